//! Kind 6: repost. Content is usually the reposted event's raw JSON.

use nostr_types::Event;

#[derive(Debug, Clone, PartialEq)]
pub struct Repost {
    pub reposted_event_id: Option<String>,
    pub reposted_author: Option<String>,
    pub embedded: Option<Event>,
}

pub fn parse(event: &Event) -> Repost {
    Repost {
        reposted_event_id: event.tags.iter().find(|t| t.is_kind("e")).map(|t| t.value().to_string()),
        reposted_author: event.tags.iter().find(|t| t.is_kind("p")).map(|t| t.value().to_string()),
        embedded: serde_json::from_str(&event.content).ok(),
    }
}
