//! Kind 30023: long-form article (NIP-23). Addressable — carries a `d`
//! identifier and optional `expiration`.

use nostr_types::{Event, Timestamp};

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub identifier: String,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub published_at: Option<Timestamp>,
    pub expiration: Option<Timestamp>,
    pub content: String,
}

pub fn parse(event: &Event) -> Article {
    Article {
        identifier: event.tags_value("d").unwrap_or("").to_string(),
        title: event.tags_value("title").map(str::to_string),
        summary: event.tags_value("summary").map(str::to_string),
        image: event.tags_value("image").map(str::to_string),
        published_at: event.tags_value("published_at").and_then(|v| v.parse().ok()).map(Timestamp),
        expiration: event.tags_value("expiration").and_then(|v| v.parse().ok()).map(Timestamp),
        content: event.content.clone(),
    }
}
