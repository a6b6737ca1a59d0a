//! Tag-based dialect: the subset of HTML accepted by the Bot API.

use crate::dom::{Element, Node, parse_fragment};
use crate::entity::{Entity, EntityKind, USER_LINK_PREFIX, link_kind};
use crate::insert::{Rendering, apply_insertions, boundary_insertions};
use crate::utf16::{to_wire_units, trim_and_reanchor, wire_len};

/// Converts HTML into plain text and entities.
///
/// Tags outside the supported vocabulary are unwrapped: their children are
/// kept, the tag itself produces no entity.
pub fn parse(html: &str) -> (String, Vec<Entity>) {
    if html.is_empty() {
        return (String::new(), Vec::new());
    }

    let mut walker = Walker::default();
    for node in &parse_fragment(html) {
        walker.walk(node);
    }

    let Walker { text, mut entities, .. } = walker;
    entities.sort_by_key(|entity| entity.offset);

    trim_and_reanchor(&text, entities)
}

#[derive(Default)]
struct Walker {
    text: String,
    wire_len: usize,
    entities: Vec<Entity>,
    pre_depth: usize,
}

impl Walker {
    fn walk(&mut self, node: &Node) {
        match node {
            Node::Text(text) => {
                self.text.push_str(text);
                self.wire_len += wire_len(text);
            }
            Node::Element(element) => {
                let kind = self.entity_kind(element);
                let offset = self.wire_len;

                let is_pre = element.name == "pre";
                if is_pre {
                    self.pre_depth += 1;
                }
                for child in &element.children {
                    self.walk(child);
                }
                if is_pre {
                    self.pre_depth -= 1;
                }

                let length = self.wire_len - offset;
                if let Some(kind) = kind.filter(|_| length > 0) {
                    self.entities.push(Entity::new(kind, offset, length));
                }
            }
        }
    }

    fn entity_kind(&self, element: &Element) -> Option<EntityKind> {
        let kind = match element.name.as_str() {
            "b" | "strong" => EntityKind::Bold,
            "i" | "em" => EntityKind::Italic,
            "u" | "ins" => EntityKind::Underline,
            "s" | "strike" | "del" => EntityKind::Strikethrough,
            "blockquote" if element.has_attr("expandable") => EntityKind::ExpandableBlockquote,
            "blockquote" => EntityKind::Blockquote,
            // <code> inside <pre> only carries the language
            "code" if self.pre_depth > 0 => return None,
            "code" => EntityKind::Code,
            "pre" => EntityKind::Pre {
                language: pre_language(element),
            },
            "a" => {
                let href = element.attr("href").filter(|href| !href.is_empty())?;
                if href.starts_with("mailto:") {
                    EntityKind::Email
                } else {
                    link_kind(&element.text_content(), href)
                }
            }
            "tg-emoji" => EntityKind::CustomEmoji {
                custom_emoji_id: element.attr("emoji-id").filter(|id| !id.is_empty())?.to_string(),
            },
            "tg-spoiler" => EntityKind::Spoiler,
            "span" if element.has_class("tg-spoiler") => EntityKind::Spoiler,
            _ => return None,
        };
        Some(kind)
    }
}

fn pre_language(pre: &Element) -> Option<String> {
    let classes = pre.find("code")?.attr("class")?;
    classes
        .split_whitespace()
        .find_map(|class| class.strip_prefix("language-"))
        .filter(|language| !language.is_empty())
        .map(str::to_string)
}

/// Escapes `&`, `<` and `>`.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_units(units: &[u16], out: &mut Vec<u16>) {
    for &unit in units {
        match unit {
            0x26 => out.extend("&amp;".encode_utf16()),
            0x3C => out.extend("&lt;".encode_utf16()),
            0x3E => out.extend("&gt;".encode_utf16()),
            _ => out.push(unit),
        }
    }
}

/// Renders `text` and `entities` as HTML. Text outside the tags is escaped
/// exactly once.
pub fn unparse(text: &str, entities: &[Entity]) -> String {
    if text.is_empty() {
        return String::new();
    }
    if entities.is_empty() {
        return escape_html(text);
    }

    let units = to_wire_units(text);
    let insertions =
        boundary_insertions(&units, entities, |entity, covered| tags(&entity.kind, covered));

    apply_insertions(&units, insertions, escape_units)
}

/// Opening and closing tags for `kind`; `covered` is the text the entity spans.
pub(crate) fn tags(kind: &EntityKind, covered: &str) -> Rendering {
    let (open, close) = match kind {
        EntityKind::Bold => ("<b>".to_string(), "</b>"),
        EntityKind::Italic => ("<i>".to_string(), "</i>"),
        EntityKind::Underline => ("<u>".to_string(), "</u>"),
        EntityKind::Strikethrough => ("<s>".to_string(), "</s>"),
        EntityKind::Blockquote => ("<blockquote>".to_string(), "</blockquote>"),
        EntityKind::ExpandableBlockquote => ("<blockquote expandable>".to_string(), "</blockquote>"),
        EntityKind::Code => ("<code>".to_string(), "</code>"),
        EntityKind::Pre {
            language: Some(language),
        } => (
            format!(r#"<pre><code class="language-{}">"#, escape_html(language)),
            "</code></pre>",
        ),
        EntityKind::Pre { language: None } => ("<pre>".to_string(), "</pre>"),
        EntityKind::Url => (format!(r#"<a href="{}">"#, escape_html(covered)), "</a>"),
        EntityKind::Email => (format!(r#"<a href="mailto:{}">"#, escape_html(covered)), "</a>"),
        EntityKind::TextLink { url } => (format!(r#"<a href="{}">"#, escape_html(url)), "</a>"),
        EntityKind::Mention { user: Some(user) } => {
            (format!(r#"<a href="{USER_LINK_PREFIX}{}">"#, user.id), "</a>")
        }
        EntityKind::CustomEmoji { custom_emoji_id } => (
            format!(r#"<tg-emoji emoji-id="{}">"#, escape_html(custom_emoji_id)),
            "</tg-emoji>",
        ),
        EntityKind::Spoiler => ("<tg-spoiler>".to_string(), "</tg-spoiler>"),
        EntityKind::Mention { user: None } | EntityKind::Cashtag => return Rendering::Verbatim,
    };

    Rendering::Wrap(open, close.to_string())
}

