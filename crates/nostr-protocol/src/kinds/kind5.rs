//! Kind 5: deletion request. Lists the event ids (and optionally `a`
//! addressable coordinates) the author wants relays to drop.

use nostr_types::Event;

#[derive(Debug, Clone, PartialEq)]
pub struct Deletion {
    pub event_ids: Vec<String>,
    pub coordinates: Vec<String>,
    pub reason: String,
}

pub fn parse(event: &Event) -> Deletion {
    Deletion {
        event_ids: event
            .tags
            .iter()
            .filter(|t| t.is_kind("e"))
            .map(|t| t.value().to_string())
            .collect(),
        coordinates: event
            .tags
            .iter()
            .filter(|t| t.is_kind("a"))
            .map(|t| t.value().to_string())
            .collect(),
        reason: event.content.clone(),
    }
}
