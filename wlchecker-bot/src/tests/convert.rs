use teloxide::types::{CustomEmojiId, MessageEntity, MessageEntityKind};
use wlchecker_format::{Entity, EntityKind};

use crate::convert::{from_telegram_entities, to_telegram_entities, to_telegram_entity};

#[test]
fn test_styles_convert_both_ways() {
    let entities = vec![
        Entity::new(EntityKind::Bold, 0, 4),
        Entity::new(EntityKind::Italic, 5, 6),
        Entity::new(EntityKind::ExpandableBlockquote, 0, 20),
        Entity::new(
            EntityKind::Pre {
                language: Some("rust".to_string()),
            },
            12,
            3,
        ),
        Entity::new(
            EntityKind::CustomEmoji {
                custom_emoji_id: "5368".to_string(),
            },
            16,
            2,
        ),
    ];

    let telegram = to_telegram_entities(&entities);

    assert_eq!(telegram.len(), 5);
    assert!(matches!(telegram[0].kind, MessageEntityKind::Bold));
    assert_eq!(telegram[1].offset, 5);
    assert_eq!(telegram[1].length, 6);
    assert!(matches!(
        telegram[2].kind,
        MessageEntityKind::ExpandableBlockquote
    ));
    assert_eq!(from_telegram_entities(&telegram), entities);
}

#[test]
fn test_inline_mention_becomes_user_link() {
    let entity = Entity::new(EntityKind::mention_of(42), 0, 3);

    let telegram = to_telegram_entity(&entity).unwrap();

    if let MessageEntityKind::TextLink { url } = &telegram.kind {
        assert_eq!(url.as_str(), "tg://user?id=42");
    } else {
        panic!("Expected TextLink");
    }
    assert_eq!(from_telegram_entities(&[telegram]), vec![entity]);
}

#[test]
fn test_text_link_keeps_url() {
    let entity = Entity::new(
        EntityKind::TextLink {
            url: "https://t.me/c/123456/42".to_string(),
        },
        2,
        6,
    );

    let telegram = to_telegram_entity(&entity).unwrap();

    if let MessageEntityKind::TextLink { url } = &telegram.kind {
        assert_eq!(url.as_str(), "https://t.me/c/123456/42");
    } else {
        panic!("Expected TextLink");
    }
}

#[test]
fn test_invalid_url_is_skipped() {
    let entity = Entity::new(
        EntityKind::TextLink {
            url: "not a url".to_string(),
        },
        0,
        3,
    );

    assert!(to_telegram_entity(&entity).is_none());
}

#[test]
fn test_unsupported_kinds_are_skipped() {
    let telegram = vec![
        MessageEntity::new(MessageEntityKind::Hashtag, 0, 5),
        MessageEntity::new(MessageEntityKind::BotCommand, 6, 5),
        MessageEntity::new(MessageEntityKind::Mention, 12, 4),
        MessageEntity::new(
            MessageEntityKind::CustomEmoji {
                custom_emoji_id: CustomEmojiId("1".to_string()),
            },
            17,
            2,
        ),
    ];

    assert_eq!(
        from_telegram_entities(&telegram),
        vec![
            Entity::new(EntityKind::Mention { user: None }, 12, 4),
            Entity::new(
                EntityKind::CustomEmoji {
                    custom_emoji_id: "1".to_string()
                },
                17,
                2
            ),
        ]
    );
}
