mod builder;
mod dom;
mod split;

use crate::entity::{Entity, EntityKind};
use crate::utf16::wire_len;

/// Joins `parts` with single spaces, giving each part an entity of its kind.
pub(crate) fn annotated(parts: &[(&str, EntityKind)]) -> (String, Vec<Entity>) {
    let mut text = String::new();
    let mut entities = Vec::new();

    for (word, kind) in parts {
        if !text.is_empty() {
            text.push(' ');
        }
        let offset = wire_len(&text);
        text.push_str(word);
        entities.push(Entity::new(kind.clone(), offset, wire_len(word)));
    }

    (text, entities)
}
