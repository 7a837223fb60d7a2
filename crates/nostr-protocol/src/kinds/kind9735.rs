//! Kind 9735: zap receipt (NIP-57). Carries the paid `bolt11` invoice and the
//! embedded zap request as raw JSON in the `description` tag.

use nostr_types::Event;

use crate::bolt11;
use crate::kinds::kind9734::{self, ZapRequest};

#[derive(Debug, Clone, PartialEq)]
pub struct ZapReceipt {
    pub amount_sats: Option<u64>,
    pub bolt11: Option<String>,
    pub preimage: Option<String>,
    pub zap_request: Option<ZapRequest>,
    pub target_event_id: Option<String>,
    pub target_pubkey: Option<String>,
}

pub fn parse(event: &Event) -> ZapReceipt {
    let bolt11_str = event.tags_value("bolt11").map(str::to_string);
    let amount_sats = bolt11_str
        .as_deref()
        .and_then(bolt11::parse)
        .and_then(|inv| inv.amount_sats());
    let zap_request = event
        .tags_value("description")
        .and_then(|s| serde_json::from_str::<Event>(s).ok())
        .map(|inner| kind9734::parse(&inner));

    ZapReceipt {
        amount_sats,
        bolt11: bolt11_str,
        preimage: event.tags_value("preimage").map(str::to_string),
        zap_request,
        target_event_id: event.tags_value("e").map(str::to_string),
        target_pubkey: event.tags_value("p").map(str::to_string),
    }
}
