//! Kind 10002: relay list metadata (NIP-65). `r` tags name relay URLs,
//! optionally marked `read`/`write`.

use nostr_types::Event;

#[derive(Debug, Clone, PartialEq)]
pub struct RelayEntry {
    pub url: String,
    pub read: bool,
    pub write: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelayListMetadata {
    pub relays: Vec<RelayEntry>,
}

pub fn parse(event: &Event) -> RelayListMetadata {
    let relays = event
        .tags
        .iter()
        .filter(|t| t.is_kind("r"))
        .map(|t| {
            let marker = t.info().first().map(String::as_str);
            RelayEntry {
                url: t.value().to_string(),
                read: marker != Some("write"),
                write: marker != Some("read"),
            }
        })
        .collect();
    RelayListMetadata { relays }
}
