use std::cmp::Reverse;

use crate::entity::Entity;
use crate::utf16::{from_wire_units, nudge_forward};

/// Literal markup planted at a UTF-16 index of the plain text.
#[derive(Debug)]
pub(crate) struct Insertion {
    at: usize,
    order: isize,
    literal: String,
}

/// Opening and closing markup of one entity.
pub(crate) enum Rendering {
    Wrap(String, String),
    /// The covered text speaks for itself (cashtags, `@username` mentions).
    Verbatim,
}

/// Collects the open/close insertions for every entity, ordered for
/// back-to-front application.
///
/// Entities are numbered after a stable `(offset asc, length desc)` sort, opens
/// get `+n` and closes `-n`. Applied from the end of the text, equal indices
/// are processed by descending order key, so an outer entity opens before and
/// closes after an inner one, and a close always precedes an open at the same
/// index.
pub(crate) fn boundary_insertions<F>(
    units: &[u16],
    entities: &[Entity],
    mut render: F,
) -> Vec<Insertion>
where
    F: FnMut(&Entity, &str) -> Rendering,
{
    let mut ordered: Vec<&Entity> = entities.iter().filter(|e| e.length > 0).collect();
    ordered.sort_by_key(|e| (e.offset, Reverse(e.length)));

    let mut insertions = Vec::with_capacity(ordered.len() * 2);
    for (index, entity) in ordered.into_iter().enumerate() {
        let start = entity.offset.min(units.len());
        let end = entity.end().min(units.len());
        let covered = from_wire_units(&units[start..end]);

        if let Rendering::Wrap(open, close) = render(entity, &covered) {
            let order = index as isize;
            insertions.push(Insertion {
                at: start,
                order,
                literal: open,
            });
            insertions.push(Insertion {
                at: end,
                order: -order,
                literal: close,
            });
        }
    }

    insertions.sort_by_key(|ins| (Reverse(ins.at), Reverse(ins.order)));
    insertions
}

/// Splices the insertions into `units` from the end backward.
///
/// Text between two insertion points is passed through `escape` exactly once;
/// the inserted literals never are. No insertion lands inside a surrogate pair.
pub(crate) fn apply_insertions(
    units: &[u16],
    insertions: Vec<Insertion>,
    escape: fn(&[u16], &mut Vec<u16>),
) -> String {
    let mut segments: Vec<Vec<u16>> = Vec::with_capacity(insertions.len() * 2 + 1);
    let mut escape_bound = units.len();

    for insertion in insertions {
        let at = nudge_forward(units, insertion.at.min(units.len())).min(escape_bound);

        let mut between = Vec::new();
        escape(&units[at..escape_bound], &mut between);
        segments.push(between);
        segments.push(insertion.literal.encode_utf16().collect());

        escape_bound = at;
    }

    let mut head = Vec::new();
    escape(&units[..escape_bound], &mut head);
    segments.push(head);

    let joined: Vec<u16> = segments.into_iter().rev().flatten().collect();
    from_wire_units(&joined)
}

pub(crate) fn copy_verbatim(units: &[u16], out: &mut Vec<u16>) {
    out.extend_from_slice(units);
}
