use serde::{Deserialize, Serialize};

/// User referenced by an inline mention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MentionUser {
    pub id: i64,
}

/// Style or semantic tag carried by an [`Entity`].
///
/// Serialised with the wire names of the Bot API message entity, so
/// `EntityKind::TextLink { url }` becomes `{"type": "text_link", "url": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Blockquote,
    ExpandableBlockquote,
    Code,
    Pre {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    Url,
    Email,
    TextLink {
        url: String,
    },
    /// `@username` when `user` is empty, an inline mention of a user id otherwise.
    Mention {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user: Option<MentionUser>,
    },
    CustomEmoji {
        custom_emoji_id: String,
    },
    Spoiler,
    Cashtag,
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Bold => "bold",
            EntityKind::Italic => "italic",
            EntityKind::Underline => "underline",
            EntityKind::Strikethrough => "strikethrough",
            EntityKind::Blockquote => "blockquote",
            EntityKind::ExpandableBlockquote => "expandable_blockquote",
            EntityKind::Code => "code",
            EntityKind::Pre { .. } => "pre",
            EntityKind::Url => "url",
            EntityKind::Email => "email",
            EntityKind::TextLink { .. } => "text_link",
            EntityKind::Mention { .. } => "mention",
            EntityKind::CustomEmoji { .. } => "custom_emoji",
            EntityKind::Spoiler => "spoiler",
            EntityKind::Cashtag => "cashtag",
        }
    }

    /// Code content is never tokenized for nested styles.
    pub fn is_code(&self) -> bool {
        matches!(self, EntityKind::Code | EntityKind::Pre { .. })
    }

    pub fn mention_of(user_id: i64) -> Self {
        EntityKind::Mention {
            user: Some(MentionUser { id: user_id }),
        }
    }
}

/// Annotated range of a text. `offset` and `length` are UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    #[serde(flatten)]
    pub kind: EntityKind,
    pub offset: usize,
    pub length: usize,
}

impl Entity {
    pub fn new(kind: EntityKind, offset: usize, length: usize) -> Self {
        Self {
            kind,
            offset,
            length,
        }
    }

    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }
}

pub(crate) const USER_LINK_PREFIX: &str = "tg://user?id=";
pub(crate) const EMOJI_LINK_PREFIX: &str = "tg://emoji?id=";

/// Classifies a link target the way both dialects do: inline mentions,
/// custom emoji, autolinks, email addresses and plain text links.
pub(crate) fn link_kind(label: &str, target: &str) -> EntityKind {
    if let Some(id) = target
        .strip_prefix(USER_LINK_PREFIX)
        .and_then(|id| id.parse::<i64>().ok())
    {
        return EntityKind::mention_of(id);
    }

    if let Some(id) = target.strip_prefix(EMOJI_LINK_PREFIX).filter(|id| !id.is_empty()) {
        return EntityKind::CustomEmoji {
            custom_emoji_id: id.to_string(),
        };
    }

    if target.strip_prefix("mailto:") == Some(label) {
        return EntityKind::Email;
    }

    let bare = target
        .strip_prefix("https://")
        .or_else(|| target.strip_prefix("http://"));
    if target == label || bare == Some(label) {
        return EntityKind::Url;
    }

    EntityKind::TextLink {
        url: target.to_string(),
    }
}
