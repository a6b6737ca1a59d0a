use std::sync::OnceLock;

use regex::Regex;

use crate::entity::EntityKind;
use crate::{FormatError, FormatResult};

pub const DEFAULT_LINK_PATTERN: &str = r"\[([^\[]*?)\]\(([\s\S]*?)\)";

static STANDARD_TABLE: OnceLock<DelimiterTable> = OnceLock::new();
static DEFAULT_LINKS: OnceLock<LinkPattern> = OnceLock::new();

/// Marker strings of the Markdown dialect and the entity kind each one denotes.
///
/// Entries are kept longest-marker-first so that `**` is tried before `*`
/// and `*>>` before `>>`. Markers of equal length keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterTable {
    entries: Vec<(String, EntityKind)>,
}

impl DelimiterTable {
    pub fn new<I, S>(entries: I) -> FormatResult<Self>
    where
        I: IntoIterator<Item = (S, EntityKind)>,
        S: Into<String>,
    {
        let mut table = Self {
            entries: Vec::new(),
        };
        for (marker, kind) in entries {
            table.insert(marker, kind)?;
        }
        Ok(table)
    }

    /// The built-in table: `**` `__` `_` `~~` `||` `` ``` `` `` ` `` `*>>` `>>`.
    pub fn standard() -> &'static DelimiterTable {
        STANDARD_TABLE.get_or_init(|| Self {
            entries: sorted(vec![
                ("**".to_string(), EntityKind::Bold),
                ("__".to_string(), EntityKind::Underline),
                ("_".to_string(), EntityKind::Italic),
                ("~~".to_string(), EntityKind::Strikethrough),
                ("||".to_string(), EntityKind::Spoiler),
                ("```".to_string(), EntityKind::Pre { language: None }),
                ("`".to_string(), EntityKind::Code),
                ("*>>".to_string(), EntityKind::ExpandableBlockquote),
                (">>".to_string(), EntityKind::Blockquote),
            ]),
        })
    }

    pub fn insert(&mut self, marker: impl Into<String>, kind: EntityKind) -> FormatResult<()> {
        let marker = marker.into();
        if marker.is_empty() {
            return Err(FormatError::EmptyDelimiter);
        }

        match kind {
            EntityKind::Url
            | EntityKind::Email
            | EntityKind::TextLink { .. }
            | EntityKind::Mention { .. }
            | EntityKind::CustomEmoji { .. }
            | EntityKind::Cashtag => return Err(FormatError::UnsupportedDelimiterKind(kind.name())),
            _ => {}
        }

        self.entries.retain(|(existing, _)| *existing != marker);
        let position = self
            .entries
            .iter()
            .position(|(existing, _)| existing.len() < marker.len())
            .unwrap_or(self.entries.len());
        self.entries.insert(position, (marker, kind));

        Ok(())
    }

    /// Longest marker that `text` starts with.
    pub fn longest_match(&self, text: &str) -> Option<(&str, &EntityKind)> {
        self.entries
            .iter()
            .find(|(marker, _)| text.starts_with(marker.as_str()))
            .map(|(marker, kind)| (marker.as_str(), kind))
    }

    /// First marker registered for the kind of `kind`, ignoring payloads.
    pub fn marker_for(&self, kind: &EntityKind) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, candidate)| candidate.name() == kind.name())
            .map(|(marker, _)| marker.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EntityKind)> {
        self.entries.iter().map(|(marker, kind)| (marker.as_str(), kind))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DelimiterTable {
    fn default() -> Self {
        Self::standard().clone()
    }
}

fn sorted(mut entries: Vec<(String, EntityKind)>) -> Vec<(String, EntityKind)> {
    entries.sort_by_key(|(marker, _)| std::cmp::Reverse(marker.len()));
    entries
}

/// Inline link syntax: a regex whose first group is the label and whose second
/// group is the target. Matching is anchored at the scan position.
#[derive(Debug, Clone)]
pub struct LinkPattern {
    regex: Regex,
}

impl LinkPattern {
    pub fn new(pattern: &str) -> FormatResult<Self> {
        let regex = Regex::new(&format!(r"\A(?:{pattern})"))?;
        let groups = regex.captures_len() - 1;
        if groups < 2 {
            return Err(FormatError::LinkPatternGroups(groups));
        }
        Ok(Self { regex })
    }

    pub fn standard() -> &'static LinkPattern {
        DEFAULT_LINKS
            .get_or_init(|| Self::new(DEFAULT_LINK_PATTERN).expect("default link pattern compiles"))
    }

    /// Matches a link starting exactly at the beginning of `text`.
    pub(crate) fn match_at<'t>(&self, text: &'t str) -> Option<LinkMatch<'t>> {
        let captures = self.regex.captures(text)?;
        let whole = captures.get(0)?;
        let label = captures.get(1)?;
        let target = captures.get(2)?;

        Some(LinkMatch {
            len: whole.end(),
            label_start: label.start(),
            label: label.as_str(),
            target: target.as_str(),
        })
    }
}

impl Default for LinkPattern {
    fn default() -> Self {
        Self::standard().clone()
    }
}

/// Link found by [`LinkPattern::match_at`]; positions are byte offsets from
/// the match start.
#[derive(Debug)]
pub(crate) struct LinkMatch<'t> {
    pub len: usize,
    pub label_start: usize,
    pub label: &'t str,
    pub target: &'t str,
}

/// Tri-state option: built-in behaviour, switched off, or caller supplied.
#[derive(Debug)]
pub enum Rule<'a, T> {
    Default,
    Off,
    Custom(&'a T),
}

impl<T> Default for Rule<'_, T> {
    fn default() -> Self {
        Rule::Default
    }
}

impl<T> Clone for Rule<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Rule<'_, T> {}

impl<'a> Rule<'a, DelimiterTable> {
    pub(crate) fn resolve(self) -> Option<&'a DelimiterTable> {
        match self {
            Rule::Default => Some(DelimiterTable::standard()),
            Rule::Off => None,
            Rule::Custom(table) => Some(table),
        }
    }
}

impl<'a> Rule<'a, LinkPattern> {
    pub(crate) fn resolve(self) -> Option<&'a LinkPattern> {
        match self {
            Rule::Default => Some(LinkPattern::standard()),
            Rule::Off => None,
            Rule::Custom(pattern) => Some(pattern),
        }
    }
}
