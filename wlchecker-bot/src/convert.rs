use teloxide::types::{CustomEmojiId, MessageEntity, MessageEntityKind};
use wlchecker_format::{Entity, EntityKind};

const USER_LINK_PREFIX: &str = "tg://user?id=";

pub fn to_telegram_entities(entities: &[Entity]) -> Vec<MessageEntity> {
    entities.iter().filter_map(to_telegram_entity).collect()
}

/// Inline mentions are sent as `tg://user?id=` text links, which need no
/// full `User` object. Links with an unparsable url are skipped.
pub fn to_telegram_entity(entity: &Entity) -> Option<MessageEntity> {
    let kind = match &entity.kind {
        EntityKind::Bold => MessageEntityKind::Bold,
        EntityKind::Italic => MessageEntityKind::Italic,
        EntityKind::Underline => MessageEntityKind::Underline,
        EntityKind::Strikethrough => MessageEntityKind::Strikethrough,
        EntityKind::Blockquote => MessageEntityKind::Blockquote,
        EntityKind::ExpandableBlockquote => MessageEntityKind::ExpandableBlockquote,
        EntityKind::Code => MessageEntityKind::Code,
        EntityKind::Pre { language } => MessageEntityKind::Pre {
            language: language.clone(),
        },
        EntityKind::Url => MessageEntityKind::Url,
        EntityKind::Email => MessageEntityKind::Email,
        EntityKind::TextLink { url } => MessageEntityKind::TextLink {
            url: parse_url(url)?,
        },
        EntityKind::Mention { user: Some(user) } => MessageEntityKind::TextLink {
            url: parse_url(&format!("{USER_LINK_PREFIX}{}", user.id))?,
        },
        EntityKind::Mention { user: None } => MessageEntityKind::Mention,
        EntityKind::CustomEmoji { custom_emoji_id } => MessageEntityKind::CustomEmoji {
            custom_emoji_id: CustomEmojiId(custom_emoji_id.clone()),
        },
        EntityKind::Spoiler => MessageEntityKind::Spoiler,
        EntityKind::Cashtag => MessageEntityKind::Cashtag,
    };

    Some(MessageEntity::new(kind, entity.offset, entity.length))
}

fn parse_url(url: &str) -> Option<reqwest::Url> {
    match reqwest::Url::parse(url) {
        Ok(url) => Some(url),
        Err(error) => {
            tracing::debug!(%error, url, "skipping link entity with invalid url");
            None
        }
    }
}

pub fn from_telegram_entities(entities: &[MessageEntity]) -> Vec<Entity> {
    entities.iter().filter_map(from_telegram_entity).collect()
}

pub fn from_telegram_entity(entity: &MessageEntity) -> Option<Entity> {
    let kind = match &entity.kind {
        MessageEntityKind::Bold => EntityKind::Bold,
        MessageEntityKind::Italic => EntityKind::Italic,
        MessageEntityKind::Underline => EntityKind::Underline,
        MessageEntityKind::Strikethrough => EntityKind::Strikethrough,
        MessageEntityKind::Blockquote => EntityKind::Blockquote,
        MessageEntityKind::ExpandableBlockquote => EntityKind::ExpandableBlockquote,
        MessageEntityKind::Code => EntityKind::Code,
        MessageEntityKind::Pre { language } => EntityKind::Pre {
            language: language.clone(),
        },
        MessageEntityKind::Url => EntityKind::Url,
        MessageEntityKind::Email => EntityKind::Email,
        MessageEntityKind::TextLink { url } => match url
            .as_str()
            .strip_prefix(USER_LINK_PREFIX)
            .and_then(|id| id.parse::<i64>().ok())
        {
            Some(user_id) => EntityKind::mention_of(user_id),
            None => EntityKind::TextLink {
                url: url.to_string(),
            },
        },
        MessageEntityKind::TextMention { user } => EntityKind::mention_of(user.id.0 as i64),
        MessageEntityKind::Mention => EntityKind::Mention { user: None },
        MessageEntityKind::CustomEmoji { custom_emoji_id } => EntityKind::CustomEmoji {
            custom_emoji_id: custom_emoji_id.0.clone(),
        },
        MessageEntityKind::Spoiler => EntityKind::Spoiler,
        MessageEntityKind::Cashtag => EntityKind::Cashtag,
        // hashtags, bot commands and phone numbers are recognised by clients on their own
        other => {
            tracing::trace!(kind = ?other, "skipping entity without a markup form");
            return None;
        }
    };

    Some(Entity::new(kind, entity.offset, entity.length))
}
