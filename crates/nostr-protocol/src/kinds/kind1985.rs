//! Kind 1985: label (NIP-32). `l` tags carry the label values, `L` the
//! namespace(s).

use nostr_types::Event;

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub namespaces: Vec<String>,
    pub labels: Vec<String>,
    pub target_event_id: Option<String>,
    pub target_pubkey: Option<String>,
}

pub fn parse(event: &Event) -> Label {
    Label {
        namespaces: event.tags.iter().filter(|t| t.is_kind("L")).map(|t| t.value().to_string()).collect(),
        labels: event.tags.iter().filter(|t| t.is_kind("l")).map(|t| t.value().to_string()).collect(),
        target_event_id: event.tags.iter().find(|t| t.is_kind("e")).map(|t| t.value().to_string()),
        target_pubkey: event.tags.iter().find(|t| t.is_kind("p")).map(|t| t.value().to_string()),
    }
}
