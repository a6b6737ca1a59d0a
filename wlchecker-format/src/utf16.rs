//! UTF-16 helpers. Every entity offset and length is measured in UTF-16 code
//! units ("wire units"), so anything that moves offsets around goes through here.

use crate::entity::Entity;

pub fn to_wire_units(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Recombines surrogate pairs. Unpaired surrogates become U+FFFD.
pub fn from_wire_units(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

pub fn wire_len(text: &str) -> usize {
    text.encode_utf16().count()
}

pub(crate) fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

pub(crate) fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// True when `index` sits between the high and the low half of a surrogate pair.
pub fn is_inside_surrogate_pair(units: &[u16], index: usize) -> bool {
    index >= 1
        && index < units.len()
        && is_high_surrogate(units[index - 1])
        && is_low_surrogate(units[index])
}

/// Moves `index` forward until it no longer bisects a surrogate pair.
pub(crate) fn nudge_forward(units: &[u16], mut index: usize) -> usize {
    while is_inside_surrogate_pair(units, index) {
        index += 1;
    }
    index
}

/// Converts a byte index of `text` into a UTF-16 offset.
pub(crate) fn wire_offset(text: &str, byte_index: usize) -> usize {
    wire_len(&text[..byte_index])
}

/// Trims surrounding whitespace and re-anchors the entities to the trimmed text.
///
/// Entities that collapse to zero length or fall outside the trimmed span are
/// dropped; the rest keep their relative order.
pub fn trim_and_reanchor(text: &str, entities: Vec<Entity>) -> (String, Vec<Entity>) {
    let left_trimmed = text.trim_start();
    let left_offset = wire_len(text) - wire_len(left_trimmed);
    let trimmed = left_trimmed.trim_end();
    let final_len = wire_len(trimmed);

    let entities = entities
        .into_iter()
        .filter_map(|mut entity| {
            if entity.length == 0 || entity.end() <= left_offset {
                tracing::trace!(
                    kind = entity.kind.name(),
                    offset = entity.offset,
                    length = entity.length,
                    "dropping entity outside trimmed text"
                );
                return None;
            }

            if entity.offset >= left_offset {
                entity.offset -= left_offset;
            } else {
                entity.length = entity.end() - left_offset;
                entity.offset = 0;
            }

            if entity.offset >= final_len {
                tracing::trace!(
                    kind = entity.kind.name(),
                    offset = entity.offset,
                    "dropping entity past trimmed text"
                );
                return None;
            }
            if entity.end() > final_len {
                entity.length = final_len - entity.offset;
            }

            Some(entity)
        })
        .collect();

    (trimmed.to_string(), entities)
}
