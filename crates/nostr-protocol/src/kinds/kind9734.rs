//! Kind 9734: zap request (NIP-57). A regular, unpublished event embedded in
//! the zap receipt's description tag, carrying `amount`/`relays`/`lnurl`.

use nostr_types::Event;

#[derive(Debug, Clone, PartialEq)]
pub struct ZapRequest {
    pub amount_msat: Option<u64>,
    pub relays: Vec<String>,
    pub lnurl: Option<String>,
    pub target_event_id: Option<String>,
    pub target_pubkey: Option<String>,
    pub content: String,
}

pub fn parse(event: &Event) -> ZapRequest {
    ZapRequest {
        amount_msat: event.tags_value("amount").and_then(|v| v.parse().ok()),
        relays: event
            .tags
            .iter()
            .find(|t| t.is_kind("relays"))
            .map(|t| {
                let mut urls = vec![t.value().to_string()];
                urls.extend(t.info().iter().cloned());
                urls
            })
            .unwrap_or_default(),
        lnurl: event.tags_value("lnurl").map(str::to_string),
        target_event_id: event.tags_value("e").map(str::to_string),
        target_pubkey: event.tags_value("p").map(str::to_string),
        content: event.content.clone(),
    }
}
