use regex::Regex;

use crate::entity::Entity;
use crate::utf16::{
    from_wire_units, is_high_surrogate, is_inside_surrogate_pair, is_low_surrogate, to_wire_units,
    wire_offset,
};
use crate::{FormatError, FormatResult};

/// Maximum message length accepted by the Bot API, in UTF-16 units.
pub const MAX_MESSAGE_LENGTH: usize = 4096;
/// Maximum number of entities per message accepted by the Bot API.
pub const MAX_MESSAGE_ENTITIES: usize = 100;

/// Piece of a longer text, with entities relative to its own start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub entities: Vec<Entity>,
}

/// Where a chunk may end. The cut goes right after the matched text.
#[derive(Debug, Clone)]
pub enum SplitPattern {
    Newline,
    Whitespace,
    AnyChar,
    /// Caller supplied split points, e.g. `Regex::new(r"[.!?]\s")`.
    Regex(Regex),
}

impl SplitPattern {
    /// Largest cut within `limit` right after a match, outside surrogate pairs.
    fn last_cut(&self, units: &[u16], limit: usize) -> Option<usize> {
        if let SplitPattern::Regex(pattern) = self {
            return last_regex_cut(pattern, units, limit);
        }

        (0..limit).rev().find_map(|index| {
            let cut = index + self.width_at(units, index)?;
            (cut <= limit && !is_inside_surrogate_pair(units, cut)).then_some(cut)
        })
    }

    /// Width in UTF-16 units of the character matched at `index`.
    fn width_at(&self, units: &[u16], index: usize) -> Option<usize> {
        let unit = units[index];
        match self {
            SplitPattern::Newline => (unit == u16::from(b'\n')).then_some(1),
            SplitPattern::Whitespace => char::from_u32(u32::from(unit))
                .filter(|c| c.is_whitespace())
                .map(|_| 1),
            SplitPattern::AnyChar => {
                if is_inside_surrogate_pair(units, index) {
                    None
                } else if is_high_surrogate(unit)
                    && units.get(index + 1).copied().is_some_and(is_low_surrogate)
                {
                    Some(2)
                } else {
                    Some(1)
                }
            }
            SplitPattern::Regex(_) => None,
        }
    }
}

fn last_regex_cut(pattern: &Regex, units: &[u16], limit: usize) -> Option<usize> {
    let end = if is_inside_surrogate_pair(units, limit) {
        limit - 1
    } else {
        limit
    };
    let window = from_wire_units(&units[..end]);

    pattern
        .find_iter(&window)
        .map(|m| m.end())
        .filter(|&at| at > 0)
        .last()
        .map(|at| wire_offset(&window, at))
}

#[derive(Debug, Clone)]
pub struct SplitOptions {
    limit: usize,
    max_entities: usize,
    patterns: Vec<SplitPattern>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            limit: MAX_MESSAGE_LENGTH,
            max_entities: MAX_MESSAGE_ENTITIES,
            patterns: vec![
                SplitPattern::Newline,
                SplitPattern::Whitespace,
                SplitPattern::AnyChar,
            ],
        }
    }
}

impl SplitOptions {
    pub fn new(limit: usize, max_entities: usize) -> FormatResult<Self> {
        if limit < 2 {
            return Err(FormatError::InvalidLimit(limit));
        }
        if max_entities == 0 {
            return Err(FormatError::InvalidEntityCeiling);
        }
        Ok(Self {
            limit,
            max_entities,
            ..Self::default()
        })
    }

    /// Split points in priority order.
    pub fn with_patterns(mut self, patterns: Vec<SplitPattern>) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn max_entities(&self) -> usize {
        self.max_entities
    }
}

/// Cuts `text` into chunks of at most `limit` UTF-16 units carrying at most
/// `max_entities` entities each (as long as entity ranges allow it).
///
/// Concatenating the chunk texts gives back `text`. Entities crossing a cut
/// are divided between both sides. No chunk starts or ends inside a
/// surrogate pair.
pub fn split_text_with_entities(
    text: &str,
    entities: &[Entity],
    options: &SplitOptions,
) -> FormatResult<Vec<Chunk>> {
    if options.limit < 2 {
        return Err(FormatError::InvalidLimit(options.limit));
    }
    if options.max_entities == 0 {
        return Err(FormatError::InvalidEntityCeiling);
    }

    let mut units = to_wire_units(text);
    let mut entities = sanitize(entities, units.len());
    let mut chunks = Vec::new();

    loop {
        let mut limit = options.limit;
        if let Some(first_over) = entities.get(options.max_entities) {
            // only the first `max_entities` entities may start before the cut
            limit = limit.min(first_over.offset.max(1));
        }

        if units.len() <= limit {
            break;
        }

        let cut = find_cut(&units, limit, &options.patterns);
        let rest = units.split_off(cut);
        let (head, tail) = partition(entities, cut);

        tracing::trace!(cut, entities = head.len(), "split chunk");
        chunks.push(Chunk {
            text: from_wire_units(&units),
            entities: head,
        });

        units = rest;
        entities = tail;
    }

    chunks.push(Chunk {
        text: from_wire_units(&units),
        entities,
    });

    Ok(chunks)
}

/// Drops empty entities, clamps them to the text and orders them by offset.
fn sanitize(entities: &[Entity], len: usize) -> Vec<Entity> {
    let mut entities: Vec<Entity> = entities
        .iter()
        .filter(|entity| entity.length > 0 && entity.offset < len)
        .map(|entity| Entity {
            length: entity.length.min(len - entity.offset),
            ..entity.clone()
        })
        .collect();
    entities.sort_by_key(|entity| entity.offset);
    entities
}

/// Largest cut within `limit` allowed by the first pattern that matches,
/// never bisecting a surrogate pair.
fn find_cut(units: &[u16], limit: usize, patterns: &[SplitPattern]) -> usize {
    if let Some(cut) = patterns
        .iter()
        .find_map(|pattern| pattern.last_cut(units, limit))
    {
        return cut;
    }

    // No pattern matched: hard cut at the last safe index.
    (1..=limit)
        .rev()
        .find(|&cut| !is_inside_surrogate_pair(units, cut))
        .unwrap_or_else(|| if is_inside_surrogate_pair(units, 1) { 2 } else { 1 })
}

fn partition(entities: Vec<Entity>, cut: usize) -> (Vec<Entity>, Vec<Entity>) {
    let mut head = Vec::new();
    let mut tail = Vec::new();

    for entity in entities {
        if entity.offset >= cut {
            tail.push(Entity {
                offset: entity.offset - cut,
                ..entity
            });
        } else if entity.end() > cut {
            tail.push(Entity {
                offset: 0,
                length: entity.end() - cut,
                ..entity.clone()
            });
            head.push(Entity {
                length: cut - entity.offset,
                ..entity
            });
        } else {
            head.push(entity);
        }
    }

    (head, tail)
}
