use crate::config::{Config, MessageLimits};

fn config(admins: &[&str]) -> Config {
    Config {
        token: "token".to_string(),
        admins: admins.iter().map(|admin| admin.to_string()).collect(),
        limits: MessageLimits::default(),
    }
}

#[test]
fn test_admin_by_id_or_username() {
    let config = config(&["123456", "@Alice", " bob "]);

    assert!(config.is_admin(123456, None));
    assert!(config.is_admin(1, Some("alice")));
    assert!(config.is_admin(2, Some("bob")));
    assert!(!config.is_admin(3, Some("carol")));
    assert!(!config.is_admin(3, None));
}

#[test]
fn test_empty_admin_entries_match_nobody() {
    let config = config(&["", "@"]);

    assert!(!config.is_admin(0, Some("")));
}

#[test]
fn test_default_limits() {
    let limits = MessageLimits::default();

    assert_eq!(limits.max_length, 4096);
    assert_eq!(limits.max_entities, 100);
    assert_eq!(limits.chunk_delay_ms, 50);
}
