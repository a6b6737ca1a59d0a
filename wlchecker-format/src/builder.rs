use std::fmt;

use serde::{Deserialize, Serialize};

use crate::delimiter::DelimiterTable;
use crate::entity::{Entity, EntityKind};
use crate::insert::Rendering;
use crate::{html, markdown};

/// Markup syntax used to serialise entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Markdown,
    #[default]
    Html,
}

impl Dialect {
    pub fn parse(self, source: &str) -> (String, Vec<Entity>) {
        match self {
            Dialect::Markdown => markdown::parse(source),
            Dialect::Html => html::parse(source),
        }
    }

    pub fn unparse(self, text: &str, entities: &[Entity]) -> String {
        match self {
            Dialect::Markdown => markdown::unparse(text, entities),
            Dialect::Html => html::unparse(text, entities),
        }
    }

    /// Makes `text` literal in this dialect. Markdown has no escape syntax in
    /// this codec, so text passes through unchanged.
    pub fn escape(self, text: &str) -> String {
        match self {
            Dialect::Markdown => text.to_string(),
            Dialect::Html => html::escape_html(text),
        }
    }

    fn render(self, kind: &EntityKind, inner: &str) -> Rendering {
        match self {
            Dialect::Markdown => markdown::rendering(kind, inner, Some(DelimiterTable::standard())),
            Dialect::Html => html::tags(kind, inner),
        }
    }
}

/// Already rendered markup. Never escaped again when appended.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Markup(String);

impl Markup {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Argument of the builder methods: plain text (escaped when the builder
/// escapes) or finished markup.
#[derive(Debug, Clone)]
pub enum Content {
    Text(String),
    Markup(Markup),
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<&String> for Content {
    fn from(text: &String) -> Self {
        Content::Text(text.clone())
    }
}

impl From<Markup> for Content {
    fn from(markup: Markup) -> Self {
        Content::Markup(markup)
    }
}

/// Accumulates markup in one dialect.
///
/// ```
/// use wlchecker_format::RichText;
///
/// let mut msg = RichText::html();
/// let world = msg.bold("<world>");
/// msg.text("Hello, ").text(world).newline();
/// assert_eq!(msg.build(), "Hello, <b>&lt;world&gt;</b>\n");
/// ```
#[derive(Debug, Clone)]
pub struct RichText {
    dialect: Dialect,
    escape: bool,
    buf: String,
}

impl RichText {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            escape: true,
            buf: String::new(),
        }
    }

    pub fn markdown() -> Self {
        Self::new(Dialect::Markdown)
    }

    pub fn html() -> Self {
        Self::new(Dialect::Html)
    }

    pub fn with_escape(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn child(&self) -> Self {
        Self {
            dialect: self.dialect,
            escape: self.escape,
            buf: String::new(),
        }
    }

    fn render_content(&self, content: Content) -> String {
        match content {
            Content::Text(text) if self.escape => self.dialect.escape(&text),
            Content::Text(text) => text,
            Content::Markup(markup) => markup.into_string(),
        }
    }

    fn wrap(&self, kind: EntityKind, content: impl Into<Content>) -> Markup {
        let inner = self.render_content(content.into());
        match self.dialect.render(&kind, &inner) {
            Rendering::Wrap(open, close) => Markup(format!("{open}{inner}{close}")),
            Rendering::Verbatim => Markup(inner),
        }
    }

    pub fn text(&mut self, content: impl Into<Content>) -> &mut Self {
        let rendered = self.render_content(content.into());
        self.buf.push_str(&rendered);
        self
    }

    /// Appends whatever `f` writes into a child builder.
    pub fn text_with(&mut self, f: impl FnOnce(&mut RichText)) -> &mut Self {
        let markup = self.nested(f);
        self.buf.push_str(markup.as_str());
        self
    }

    pub fn newline(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    /// Runs `f` on a child builder with the same dialect and escaping, and
    /// returns what it produced.
    pub fn nested(&self, f: impl FnOnce(&mut RichText)) -> Markup {
        let mut child = self.child();
        f(&mut child);
        Markup(child.buf)
    }

    pub fn bold(&self, content: impl Into<Content>) -> Markup {
        self.wrap(EntityKind::Bold, content)
    }

    pub fn italic(&self, content: impl Into<Content>) -> Markup {
        self.wrap(EntityKind::Italic, content)
    }

    pub fn underline(&self, content: impl Into<Content>) -> Markup {
        self.wrap(EntityKind::Underline, content)
    }

    pub fn strikethrough(&self, content: impl Into<Content>) -> Markup {
        self.wrap(EntityKind::Strikethrough, content)
    }

    pub fn spoiler(&self, content: impl Into<Content>) -> Markup {
        self.wrap(EntityKind::Spoiler, content)
    }

    pub fn code(&self, content: impl Into<Content>) -> Markup {
        self.wrap(EntityKind::Code, content)
    }

    pub fn pre(&self, content: impl Into<Content>, language: Option<&str>) -> Markup {
        let kind = EntityKind::Pre {
            language: language.map(str::to_string),
        };
        self.wrap(kind, content)
    }

    pub fn blockquote(&self, content: impl Into<Content>) -> Markup {
        self.wrap(EntityKind::Blockquote, content)
    }

    pub fn expandable_blockquote(&self, content: impl Into<Content>) -> Markup {
        self.wrap(EntityKind::ExpandableBlockquote, content)
    }

    pub fn link(&self, content: impl Into<Content>, url: &str) -> Markup {
        let kind = EntityKind::TextLink {
            url: url.to_string(),
        };
        self.wrap(kind, content)
    }

    pub fn mention(&self, content: impl Into<Content>, user_id: i64) -> Markup {
        self.wrap(EntityKind::mention_of(user_id), content)
    }

    pub fn custom_emoji(&self, alt: impl Into<Content>, custom_emoji_id: &str) -> Markup {
        let kind = EntityKind::CustomEmoji {
            custom_emoji_id: custom_emoji_id.to_string(),
        };
        self.wrap(kind, alt)
    }

    pub fn build(&self) -> String {
        self.buf.clone()
    }

    pub fn into_markup(self) -> Markup {
        Markup(self.buf)
    }
}
