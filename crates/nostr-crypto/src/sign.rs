//! Completes C5's `sign`/`parse` contract with the Schnorr backend that
//! `nostr-types` deliberately doesn't depend on.

use nostr_types::event::compute_id;
use nostr_types::{Event, EventDraft, EventError};

use crate::adapter;

/// Fills in `pubkey`/`id` if absent (deriving them), or requires them to
/// match if the draft already set them, then signs. Never mutates
/// `created_at`, `kind`, `tags`, or `content`.
pub fn sign_event(draft: EventDraft, seckey: &nostr_types::SecretKey) -> Result<Event, EventError> {
    let derived_pubkey =
        adapter::derive_public_key(seckey).map_err(|_| EventError::InvalidPubkey)?;
    let pubkey = match draft.pubkey {
        Some(p) if p == derived_pubkey => p,
        Some(_) => return Err(EventError::PubkeyMismatch),
        None => derived_pubkey,
    };

    let computed_id = compute_id(&pubkey, draft.created_at, draft.kind, &draft.tags, &draft.content);
    let id = match draft.id {
        Some(i) if i == computed_id => i,
        Some(_) => return Err(EventError::IdMismatch),
        None => computed_id,
    };

    let sig = adapter::schnorr_sign(seckey, id.as_bytes()).map_err(|_| EventError::InvalidSignature)?;

    Ok(Event {
        id,
        pubkey,
        created_at: draft.created_at,
        kind: draft.kind,
        tags: draft.tags,
        content: draft.content,
        sig,
    })
}

/// Full C5 `parse` contract: returns `None` (reported via `Err`) if the id
/// doesn't match the recomputed id or the signature doesn't verify. Shape
/// errors (wrong hex length, etc.) already surface at JSON-deserialize time
/// via `nostr_types::Event`'s `Deserialize` impl.
pub fn verify_event(event: &Event) -> Result<(), EventError> {
    let recomputed = event.recompute_id();
    if recomputed != event.id {
        return Err(EventError::IdMismatch);
    }
    adapter::schnorr_verify(&event.sig, event.id.as_bytes(), &event.pubkey)
        .map_err(|_| EventError::VerificationFailed)
}

/// Parses a wire-format event object and validates it in one call, matching
/// spec's `parse(raw_object)`: total, never panics, yields `Err` on any of
/// the documented validation failures.
pub fn parse_and_verify_event(raw: &str) -> Result<Event, EventError> {
    let event: Event = serde_json::from_str(raw).map_err(|_| EventError::InvalidEventId)?;
    verify_event(&event)?;
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nostr_types::Tag;

    #[test]
    fn sign_then_parse_round_trips() {
        let seckey = nostr_types::SecretKey::from_bytes([0x11; 32]);
        let draft = EventDraft::new(1, "test".to_string())
            .with_created_at(nostr_types::Timestamp(1_704_067_200))
            .with_tags(vec![]);
        let event = sign_event(draft, &seckey).unwrap();
        let wire = serde_json::to_string(&event).unwrap();
        let parsed = parse_and_verify_event(&wire).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn tampering_content_breaks_verification() {
        let seckey = nostr_types::SecretKey::from_bytes([0x11; 32]);
        let draft = EventDraft::new(1, "test".to_string());
        let mut event = sign_event(draft, &seckey).unwrap();
        event.content = "tampered".to_string();
        assert!(verify_event(&event).is_err());
    }

    #[test]
    fn preset_pubkey_mismatch_is_fatal() {
        let seckey = nostr_types::SecretKey::from_bytes([0x11; 32]);
        let mut draft = EventDraft::new(1, "test".to_string());
        draft.pubkey = Some(nostr_types::PublicKey::from_bytes([0x99; 32]));
        assert_eq!(sign_event(draft, &seckey), Err(EventError::PubkeyMismatch));
    }

    #[test]
    fn empty_tags_and_content_still_sign() {
        let seckey = nostr_types::SecretKey::from_bytes([0x03; 32]);
        let draft = EventDraft::new(0, String::new()).with_tags(vec![Tag::new("d", "")]);
        let event = sign_event(draft, &seckey).unwrap();
        assert!(verify_event(&event).is_ok());
    }
}
