//! Kind 30315: user status (NIP-38). Addressable, `d` identifies the status
//! slot (e.g. `general`, `music`).

use nostr_types::{Event, Timestamp};

#[derive(Debug, Clone, PartialEq)]
pub struct UserStatus {
    pub identifier: String,
    pub content: String,
    pub link: Option<String>,
    pub expiration: Option<Timestamp>,
}

pub fn parse(event: &Event) -> UserStatus {
    UserStatus {
        identifier: event.tags_value("d").unwrap_or("").to_string(),
        content: event.content.clone(),
        link: event.tags_value("r").map(str::to_string),
        expiration: event.tags_value("expiration").and_then(|v| v.parse().ok()).map(Timestamp),
    }
}
