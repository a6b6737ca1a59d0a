//! Conversion between Telegram message entities and marked-up text.
//!
//! Two dialects are supported: a delimiter based Markdown flavour and the HTML
//! subset of the Bot API. Offsets are always UTF-16 code units.

mod builder;
mod delimiter;
mod dom;
mod entity;
mod error;
pub mod html;
mod insert;
pub mod markdown;
mod split;
mod utf16;

pub use builder::{Content, Dialect, Markup, RichText};
pub use delimiter::{DEFAULT_LINK_PATTERN, DelimiterTable, LinkPattern, Rule};
pub use entity::{Entity, EntityKind, MentionUser};
pub use error::*;
pub use split::{
    Chunk, MAX_MESSAGE_ENTITIES, MAX_MESSAGE_LENGTH, SplitOptions, SplitPattern,
    split_text_with_entities,
};
pub use utf16::{from_wire_units, is_inside_surrogate_pair, to_wire_units, trim_and_reanchor, wire_len};

#[cfg(test)]
mod tests;
