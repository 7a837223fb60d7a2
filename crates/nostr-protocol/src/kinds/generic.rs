//! Fallback projection for kinds with no dedicated projection: surfaces the
//! raw event and any `alt` tag (NIP-31), per the "unknown kinds" contract.

use nostr_types::Event;

#[derive(Debug, Clone, PartialEq)]
pub struct Generic {
    pub event: Event,
    pub alt: Option<String>,
}

pub fn parse(event: &Event) -> Generic {
    Generic {
        alt: event.tags_value("alt").map(str::to_string),
        event: event.clone(),
    }
}
