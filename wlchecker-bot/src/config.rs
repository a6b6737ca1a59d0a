use wlchecker_format::{MAX_MESSAGE_ENTITIES, MAX_MESSAGE_LENGTH};

#[derive(Clone, serde::Deserialize)]
pub struct Config {
    pub token: String,
    /// Numeric user ids or usernames allowed to run admin commands.
    #[serde(default)]
    pub admins: Vec<String>,
    #[serde(default)]
    pub limits: MessageLimits,
}

impl Config {
    pub fn is_admin(&self, user_id: i64, username: Option<&str>) -> bool {
        let user_id = user_id.to_string();
        let username = username.map(|name| name.trim_start_matches('@'));

        self.admins.iter().any(|admin| {
            let admin = admin.trim().trim_start_matches('@');
            if admin.is_empty() {
                return false;
            }
            admin == user_id || username.is_some_and(|name| name.eq_ignore_ascii_case(admin))
        })
    }
}

/// Transport limits applied when splitting outgoing messages.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct MessageLimits {
    pub max_length: usize,
    pub max_entities: usize,
    pub chunk_delay_ms: u64,
}

impl Default for MessageLimits {
    fn default() -> Self {
        Self {
            max_length: MAX_MESSAGE_LENGTH,
            max_entities: MAX_MESSAGE_ENTITIES,
            chunk_delay_ms: 50,
        }
    }
}
