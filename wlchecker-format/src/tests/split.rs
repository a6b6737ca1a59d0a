use regex::Regex;

use crate::entity::{Entity, EntityKind};
use crate::error::FormatError;
use crate::split::{
    Chunk, MAX_MESSAGE_ENTITIES, SplitOptions, SplitPattern, split_text_with_entities,
};
use crate::utf16::wire_len;

fn split(text: &str, entities: &[Entity], limit: usize) -> Vec<Chunk> {
    let options = SplitOptions::new(limit, MAX_MESSAGE_ENTITIES).unwrap();
    split_text_with_entities(text, entities, &options).unwrap()
}

fn texts(chunks: &[Chunk]) -> Vec<&str> {
    chunks.iter().map(|chunk| chunk.text.as_str()).collect()
}

fn assert_well_formed(text: &str, chunks: &[Chunk], limit: usize) {
    let joined: String = chunks.iter().map(|chunk| chunk.text.as_str()).collect();
    assert_eq!(joined, text);

    for chunk in chunks {
        let len = wire_len(&chunk.text);
        assert!(len <= limit, "chunk {:?} longer than {limit}", chunk.text);
        assert!(!chunk.text.contains('\u{FFFD}'));
        for entity in &chunk.entities {
            assert!(entity.length > 0);
            assert!(entity.end() <= len, "{entity:?} outside {:?}", chunk.text);
        }
    }
}

#[test]
fn test_short_text_is_one_chunk() {
    let entities = vec![Entity::new(EntityKind::Bold, 0, 5)];

    let chunks = split("hello", &entities, 4096);

    assert_eq!(
        chunks,
        vec![Chunk {
            text: "hello".to_string(),
            entities,
        }]
    );
}

#[test]
fn test_empty_text() {
    let chunks = split("", &[], 10);

    assert_eq!(texts(&chunks), vec![""]);
    assert!(chunks[0].entities.is_empty());
}

#[test]
fn test_prefers_newline() {
    let chunks = split("aaaa\nbbbb\ncc", &[], 8);

    assert_eq!(texts(&chunks), vec!["aaaa\n", "bbbb\ncc"]);
}

#[test]
fn test_falls_back_to_whitespace() {
    let chunks = split("aaa bbb ccc", &[], 5);

    assert_eq!(texts(&chunks), vec!["aaa ", "bbb ", "ccc"]);
}

#[test]
fn test_hard_cut_without_boundaries() {
    let chunks = split("abcdefghij", &[], 4);

    assert_eq!(texts(&chunks), vec!["abcd", "efgh", "ij"]);
}

#[test]
fn test_never_bisects_surrogate_pairs() {
    let chunks = split("😀😀😀", &[], 3);
    assert_eq!(texts(&chunks), vec!["😀", "😀", "😀"]);

    let text = "ab😀 😀😀cd\n😀";
    for limit in 2..8 {
        let chunks = split(text, &[], limit);
        assert_well_formed(text, &chunks, limit);
    }
}

#[test]
fn test_whitespace_cut_checks_surrogates() {
    let options = SplitOptions::new(3, 10)
        .unwrap()
        .with_patterns(vec![SplitPattern::Whitespace]);

    let chunks = split_text_with_entities("😀😀", &[], &options).unwrap();

    assert_eq!(texts(&chunks), vec!["😀", "😀"]);
}

#[test]
fn test_straddling_entity_is_divided() {
    let entities = vec![
        Entity::new(EntityKind::Bold, 0, 11),
        Entity::new(EntityKind::Italic, 7, 2),
    ];

    let chunks = split("hello world", &entities, 6);

    assert_eq!(
        chunks,
        vec![
            Chunk {
                text: "hello ".to_string(),
                entities: vec![Entity::new(EntityKind::Bold, 0, 6)],
            },
            Chunk {
                text: "world".to_string(),
                entities: vec![
                    Entity::new(EntityKind::Bold, 0, 5),
                    Entity::new(EntityKind::Italic, 1, 2),
                ],
            },
        ]
    );
}

#[test]
fn test_entity_ceiling() {
    let text = "x".repeat(200);
    let entities: Vec<Entity> = (0..150)
        .map(|offset| Entity::new(EntityKind::Bold, offset, 1))
        .collect();

    let chunks = split(&text, &entities, 4096);

    assert!(chunks[0].entities.len() <= 100);
    assert_eq!(
        chunks.iter().map(|chunk| chunk.entities.len()).sum::<usize>(),
        150
    );
    assert_well_formed(&text, &chunks, 4096);
}

#[test]
fn test_entity_ceiling_with_overlapping_entities() {
    let text = "x".repeat(200);
    let mut entities: Vec<Entity> = (0..150)
        .map(|offset| Entity::new(EntityKind::Bold, offset, 1))
        .collect();
    entities.push(Entity::new(EntityKind::Italic, 99, 1));

    let chunks = split(&text, &entities, 4096);

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].text.len(), 99);
    assert_eq!(chunks[0].entities.len(), 99);
    assert_eq!(
        chunks[1].entities[..2],
        [
            Entity::new(EntityKind::Bold, 0, 1),
            Entity::new(EntityKind::Italic, 0, 1),
        ]
    );
    assert_eq!(chunks[1].entities.len(), 52);
    assert_well_formed(&text, &chunks, 4096);
}

#[test]
fn test_regex_split_points() {
    let options = SplitOptions::new(17, 10).unwrap().with_patterns(vec![
        SplitPattern::Regex(Regex::new(r"[.!]\s").unwrap()),
        SplitPattern::Whitespace,
    ]);

    let chunks = split_text_with_entities("One. Two! Three four", &[], &options).unwrap();
    assert_eq!(texts(&chunks), vec!["One. Two! ", "Three four"]);

    // no sentence end within the limit, the next pattern takes over
    let chunks = split_text_with_entities("aaaa bbbb cccc dddd eeee", &[], &options).unwrap();
    assert_eq!(texts(&chunks), vec!["aaaa bbbb cccc ", "dddd eeee"]);
}

#[test]
fn test_regex_split_never_bisects_surrogates() {
    let options = SplitOptions::new(3, 10)
        .unwrap()
        .with_patterns(vec![SplitPattern::Regex(Regex::new(".").unwrap())]);

    let chunks = split_text_with_entities("😀😀", &[], &options).unwrap();

    assert_eq!(texts(&chunks), vec!["😀", "😀"]);
}

#[test]
fn test_drops_empty_and_clamps_long_entities() {
    let entities = vec![
        Entity::new(EntityKind::Italic, 1, 10),
        Entity::new(EntityKind::Bold, 1, 0),
        Entity::new(EntityKind::Code, 9, 1),
    ];

    let chunks = split("abc", &entities, 10);

    assert_eq!(chunks[0].entities, vec![Entity::new(EntityKind::Italic, 1, 2)]);
}

#[test]
fn test_concatenation_law() {
    let text = "Lorem ipsum dolor sit amet,\nconsectetur 😀 adipiscing elit.\n\nសួស្តី ពិភពលោក sed do eiusmod";
    let entities = vec![
        Entity::new(EntityKind::Bold, 0, 11),
        Entity::new(EntityKind::Italic, 6, 30),
        Entity::new(EntityKind::Spoiler, 40, 25),
        Entity::new(EntityKind::Code, 70, 10),
    ];

    for limit in [2, 3, 7, 16, 33, 100] {
        let chunks = split(text, &entities, limit);
        assert_well_formed(text, &chunks, limit);
    }
}

#[test]
fn test_invalid_options() {
    assert!(matches!(
        SplitOptions::new(1, 10),
        Err(FormatError::InvalidLimit(1))
    ));
    assert!(matches!(
        SplitOptions::new(10, 0),
        Err(FormatError::InvalidEntityCeiling)
    ));

    let options = SplitOptions::default();
    assert_eq!(options.limit(), 4096);
    assert_eq!(options.max_entities(), 100);
}
