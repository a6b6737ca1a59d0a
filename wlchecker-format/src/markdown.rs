//! Delimiter-based dialect: `**bold**`, `_italic_`, `[label](url)` and friends.

use std::sync::OnceLock;

use regex::Regex;

use crate::delimiter::{DelimiterTable, LinkPattern, Rule};
use crate::entity::{EMOJI_LINK_PREFIX, Entity, EntityKind, USER_LINK_PREFIX, link_kind};
use crate::insert::{Rendering, apply_insertions, boundary_insertions, copy_verbatim};
use crate::utf16::{to_wire_units, trim_and_reanchor, wire_offset};

const CASHTAG_PATTERN_STR: &str = r"\A\$[A-Z]{1,8}(?:@[A-Za-z0-9_]{5,32})?\b";

static CASHTAG_PATTERN: OnceLock<Regex> = OnceLock::new();

fn cashtag_pattern() -> &'static Regex {
    CASHTAG_PATTERN.get_or_init(|| Regex::new(CASHTAG_PATTERN_STR).unwrap())
}

/// Which syntax [`parse_with`] recognises.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions<'a> {
    pub delimiters: Rule<'a, DelimiterTable>,
    pub links: Rule<'a, LinkPattern>,
    pub cashtags: bool,
}

impl Default for ParseOptions<'_> {
    fn default() -> Self {
        Self {
            delimiters: Rule::Default,
            links: Rule::Default,
            cashtags: true,
        }
    }
}

impl<'a> ParseOptions<'a> {
    pub fn delimiters(mut self, rule: Rule<'a, DelimiterTable>) -> Self {
        self.delimiters = rule;
        self
    }

    pub fn links(mut self, rule: Rule<'a, LinkPattern>) -> Self {
        self.links = rule;
        self
    }

    pub fn cashtags(mut self, enabled: bool) -> Self {
        self.cashtags = enabled;
        self
    }
}

/// Entity recorded while scanning; byte range of the working buffer.
#[derive(Debug)]
struct Pending {
    kind: EntityKind,
    start: usize,
    end: usize,
}

/// Removal of an opening marker of `open` bytes at `at` and of a closing
/// marker of `close` bytes right after `inner` bytes of kept content.
#[derive(Debug, Clone, Copy)]
struct Excision {
    at: usize,
    open: usize,
    inner: usize,
    close: usize,
}

impl Excision {
    /// Where a position of the buffer ends up once both markers are gone.
    fn shift(&self, position: usize) -> usize {
        let content_start = self.at + self.open;
        let content_end = content_start + self.inner;

        if position <= self.at {
            position
        } else if position < content_start {
            self.at
        } else if position <= content_end {
            position - self.open
        } else if position < content_end + self.close {
            self.at + self.inner
        } else {
            position - self.open - self.close
        }
    }

    fn apply(&self, pending: Vec<Pending>) -> Vec<Pending> {
        pending
            .into_iter()
            .map(|entity| Pending {
                start: self.shift(entity.start),
                end: self.shift(entity.end),
                kind: entity.kind,
            })
            .collect()
    }
}

/// Parses with the standard delimiters, inline links and cashtags.
pub fn parse(source: &str) -> (String, Vec<Entity>) {
    parse_with(source, &ParseOptions::default())
}

/// Strips the markup of `source`, returning the plain text and its entities.
///
/// Unterminated delimiters stay in the text as literals. Code and pre content
/// is not scanned for nested styles.
pub fn parse_with(source: &str, options: &ParseOptions<'_>) -> (String, Vec<Entity>) {
    if source.is_empty() {
        return (String::new(), Vec::new());
    }

    let delimiters = options.delimiters.resolve();
    let links = options.links.resolve();

    let mut message = source.to_string();
    let mut pending: Vec<Pending> = Vec::new();
    let mut i = 0;

    while i < message.len() {
        if let Some((marker, kind)) = delimiters.and_then(|table| table.longest_match(&message[i..])) {
            let marker_len = marker.len();
            let content_start = i + marker_len;

            let Some(close_at) = find_closing(&message, content_start, marker) else {
                tracing::trace!(marker, position = i, "unterminated delimiter kept as text");
                i += char_len_at(&message, i);
                continue;
            };

            let mut kind = kind.clone();
            let mut open = marker_len;
            if let EntityKind::Pre { language } = &mut kind {
                if let Some((lang, line_len)) = pre_language(&message[content_start..close_at]) {
                    *language = lang;
                    open += line_len;
                }
            }

            let excision = Excision {
                at: i,
                open,
                inner: close_at - i - open,
                close: marker_len,
            };

            message.replace_range(close_at..close_at + marker_len, "");
            message.replace_range(i..i + open, "");
            pending = excision.apply(pending);

            let is_code = kind.is_code();
            pending.push(Pending {
                kind,
                start: i,
                end: i + excision.inner,
            });

            if is_code {
                i += excision.inner;
            }
            continue;
        }

        if let Some(len) = cashtag_at(&message, i).filter(|_| options.cashtags) {
            pending.push(Pending {
                kind: EntityKind::Cashtag,
                start: i,
                end: i + len,
            });
            i += len;
            continue;
        }

        if let Some(link) = links.and_then(|pattern| pattern.match_at(&message[i..])) {
            let label = link.label.to_string();
            let kind = link_kind(link.label, link.target);
            let excision = Excision {
                at: i,
                open: link.label_start,
                inner: label.len(),
                close: link.len - link.label_start - label.len(),
            };
            let link_len = link.len;

            message.replace_range(i..i + link_len, &label);
            pending = excision.apply(pending);
            pending.push(Pending {
                kind,
                start: i,
                end: i + label.len(),
            });

            i += label.len();
            continue;
        }

        i += char_len_at(&message, i);
    }

    let entities = pending
        .into_iter()
        .map(|entity| {
            let offset = wire_offset(&message, entity.start);
            let length = wire_offset(&message, entity.end) - offset;
            Entity::new(entity.kind, offset, length)
        })
        .collect();

    trim_and_reanchor(&message, entities)
}

/// Byte index of the closing `marker`, leaving at least one character of content.
fn find_closing(message: &str, content_start: usize, marker: &str) -> Option<usize> {
    if content_start >= message.len() {
        return None;
    }
    let search_from = content_start + char_len_at(message, content_start);
    message[search_from..]
        .find(marker)
        .map(|position| search_from + position)
}

fn char_len_at(text: &str, index: usize) -> usize {
    text[index..].chars().next().map_or(1, char::len_utf8)
}

/// Language line of a pre block and its byte length including the newline.
/// An empty first line is a language line without a language.
fn pre_language(content: &str) -> Option<(Option<String>, usize)> {
    let (first, code) = content.split_once('\n')?;
    if code.is_empty() {
        return None;
    }
    if first.is_empty() {
        return Some((None, 1));
    }

    let is_word = first
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-' | '#'));
    is_word.then(|| (Some(first.to_string()), first.len() + 1))
}

/// Length in bytes of a cashtag starting at `index`.
fn cashtag_at(message: &str, index: usize) -> Option<usize> {
    let preceded_by_word = message[..index]
        .chars()
        .next_back()
        .is_some_and(char::is_alphanumeric);
    if preceded_by_word {
        return None;
    }
    cashtag_pattern().find(&message[index..]).map(|m| m.end())
}

/// Renders `text` and `entities` with the standard delimiters.
pub fn unparse(text: &str, entities: &[Entity]) -> String {
    unparse_with(text, entities, Rule::Default)
}

/// Inserts delimiters around every entity. Kinds without a delimiter but with
/// a target (links, inline mentions, custom emoji) use the `[label](target)`
/// form; cashtags and `@username` mentions are left as they are.
pub fn unparse_with(text: &str, entities: &[Entity], delimiters: Rule<'_, DelimiterTable>) -> String {
    if text.is_empty() || entities.is_empty() {
        return text.to_string();
    }

    let table = delimiters.resolve();
    let units = to_wire_units(text);
    let insertions = boundary_insertions(&units, entities, |entity, covered| {
        rendering(&entity.kind, covered, table)
    });

    apply_insertions(&units, insertions, copy_verbatim)
}

pub(crate) fn rendering(kind: &EntityKind, covered: &str, table: Option<&DelimiterTable>) -> Rendering {
    if let Some(marker) = table.and_then(|table| table.marker_for(kind)) {
        let open = match kind {
            EntityKind::Pre {
                language: Some(language),
            } => format!("{marker}{language}\n"),
            // an empty language line keeps the first code line from reading as one
            EntityKind::Pre { language: None } if covered.contains('\n') => format!("{marker}\n"),
            _ => marker.to_string(),
        };
        return Rendering::Wrap(open, marker.to_string());
    }

    let target = match kind {
        EntityKind::TextLink { url } => url.clone(),
        EntityKind::Mention { user: Some(user) } => format!("{USER_LINK_PREFIX}{}", user.id),
        EntityKind::CustomEmoji { custom_emoji_id } => format!("{EMOJI_LINK_PREFIX}{custom_emoji_id}"),
        EntityKind::Url => covered.to_string(),
        EntityKind::Email => format!("mailto:{covered}"),
        EntityKind::Mention { user: None } | EntityKind::Cashtag => return Rendering::Verbatim,
        // styles missing from a custom table
        EntityKind::Bold
        | EntityKind::Italic
        | EntityKind::Underline
        | EntityKind::Strikethrough
        | EntityKind::Blockquote
        | EntityKind::ExpandableBlockquote
        | EntityKind::Code
        | EntityKind::Pre { .. }
        | EntityKind::Spoiler => return Rendering::Verbatim,
    };

    Rendering::Wrap("[".to_string(), format!("]({target})"))
}

/// Backslash-escapes every character with a meaning in Telegram's MarkdownV2.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '_' | '*' | '[' | ']' | '(' | ')' | '~' | '`' | '>' | '#' | '+' | '-' | '=' | '|' | '{' | '}' | '.' | '!' | '\\'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
