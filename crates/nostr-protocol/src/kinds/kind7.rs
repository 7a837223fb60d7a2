//! Kind 7: reaction. `content` is typically `+`, `-`, or an emoji.

use nostr_types::Event;

#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    pub symbol: String,
    pub target_event_id: Option<String>,
    pub target_author: Option<String>,
}

pub fn parse(event: &Event) -> Reaction {
    Reaction {
        symbol: event.content.clone(),
        target_event_id: event.tags.iter().rev().find(|t| t.is_kind("e")).map(|t| t.value().to_string()),
        target_author: event.tags.iter().rev().find(|t| t.is_kind("p")).map(|t| t.value().to_string()),
    }
}
