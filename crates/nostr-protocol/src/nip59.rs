//! NIP-59: rumor → seal → gift-wrap envelope, with ephemeral keys and
//! randomized timestamps (C10).

use rand::Rng;

use nostr_crypto::{adapter, nip44, sign};
use nostr_types::{Event, EventDraft, PublicKey, Rumor, SecretKey, Timestamp};

use crate::error::ProtocolError;

pub const KIND_SEAL: u64 = 13;
pub const KIND_GIFT_WRAP: u64 = 1059;

/// Offsets are drawn uniformly from `[-172800, +172800]` seconds (±2 days),
/// per the timestamp-randomization design note — never further in the past
/// or future than that window.
fn randomized_timestamp() -> Timestamp {
    let offset = rand::thread_rng().gen_range(-172_800..=172_800);
    Timestamp::now().checked_add(offset)
}

/// Encrypts `rumor`'s canonical JSON with `sender_seckey` for
/// `recipient_pubkey`, wraps it in a signed kind-13 event.
pub fn create_seal(
    rumor: &Rumor,
    sender_seckey: &SecretKey,
    recipient_pubkey: &PublicKey,
) -> Result<Event, ProtocolError> {
    let rumor_json = serde_json::to_string(rumor).map_err(|_| ProtocolError::Codec(nostr_types::CodecError::InvalidPayload))?;
    let content = nip44::encrypt(&rumor_json, sender_seckey, recipient_pubkey)?;
    let draft = EventDraft::new(KIND_SEAL, content).with_created_at(randomized_timestamp());
    Ok(sign::sign_event(draft, sender_seckey)?)
}

/// Mints a fresh ephemeral keypair, encrypts the serialized signed `seal`
/// for `recipient_pubkey`, and signs the kind-1059 wrapper with that
/// one-shot key. The ephemeral secret is dropped at the end of this call —
/// nothing persists it.
pub fn create_gift_wrap(seal: &Event, recipient_pubkey: &PublicKey) -> Result<Event, ProtocolError> {
    let ephemeral_seckey = adapter::random_secret_key();
    let seal_json = serde_json::to_string(seal).map_err(|_| ProtocolError::Codec(nostr_types::CodecError::InvalidPayload))?;
    let content = nip44::encrypt(&seal_json, &ephemeral_seckey, recipient_pubkey)?;
    let tags = vec![nostr_types::Tag::new("p", recipient_pubkey.to_hex())];
    let draft = EventDraft::new(KIND_GIFT_WRAP, content)
        .with_tags(tags)
        .with_created_at(randomized_timestamp());
    Ok(sign::sign_event(draft, &ephemeral_seckey)?)
}

/// Builds the full set of gift-wraps for one rumor: one per recipient, plus
/// one the sender wraps for themselves so their own sent folder is legible.
pub fn gift_wrap_for_recipients(
    rumor: &Rumor,
    sender_seckey: &SecretKey,
    recipients: &[PublicKey],
) -> Result<Vec<Event>, ProtocolError> {
    let sender_pubkey = adapter::derive_public_key(sender_seckey)?;
    let mut wraps = Vec::with_capacity(recipients.len() + 1);
    for recipient in recipients {
        let seal = create_seal(rumor, sender_seckey, recipient)?;
        wraps.push(create_gift_wrap(&seal, recipient)?);
    }
    let self_seal = create_seal(rumor, sender_seckey, &sender_pubkey)?;
    wraps.push(create_gift_wrap(&self_seal, &sender_pubkey)?);
    Ok(wraps)
}

pub struct Unwrapped {
    pub rumor: Rumor,
    pub sender: PublicKey,
}

/// Unwraps a gift-wrap down to its rumor, enforcing every invariant at each
/// layer: the inner event must be kind 13 with empty tags, and the rumor's
/// claimed author must match the seal's actual signer. Any failure returns
/// an error — there is no partial/fallback result.
pub fn unwrap_gift_wrap(gift_wrap: &Event, recipient_seckey: &SecretKey) -> Result<Unwrapped, ProtocolError> {
    if gift_wrap.kind != KIND_GIFT_WRAP {
        return Err(ProtocolError::UnexpectedKind {
            expected: KIND_GIFT_WRAP,
            got: gift_wrap.kind,
        });
    }
    if gift_wrap.tags_value("p").is_none() {
        return Err(ProtocolError::MissingPTag);
    }

    let seal_json = nip44::decrypt(&gift_wrap.content, recipient_seckey, &gift_wrap.pubkey)?;
    let seal: Event = serde_json::from_str(&seal_json).map_err(|_| ProtocolError::Codec(nostr_types::CodecError::InvalidPayload))?;
    if seal.kind != KIND_SEAL {
        return Err(ProtocolError::UnexpectedKind {
            expected: KIND_SEAL,
            got: seal.kind,
        });
    }
    if !seal.tags.is_empty() {
        return Err(ProtocolError::SealHasTags);
    }

    let rumor_json = nip44::decrypt(&seal.content, recipient_seckey, &seal.pubkey)?;
    let rumor: Rumor = serde_json::from_str(&rumor_json).map_err(|_| ProtocolError::Codec(nostr_types::CodecError::InvalidPayload))?;

    if rumor.pubkey != seal.pubkey {
        return Err(ProtocolError::SenderMismatch);
    }

    Ok(Unwrapped {
        sender: seal.pubkey,
        rumor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nostr_crypto::adapter::derive_public_key;

    #[test]
    fn seal_and_gift_wrap_round_trip() {
        let sender_sk = SecretKey::from_bytes([0x01; 32]);
        let recipient_sk = SecretKey::from_bytes([0x02; 32]);
        let recipient_pk = derive_public_key(&recipient_sk).unwrap();
        let sender_pk = derive_public_key(&sender_sk).unwrap();

        let rumor = Rumor::new(sender_pk, Timestamp::now(), 14, vec![], "Hi Bob!".to_string());
        let seal = create_seal(&rumor, &sender_sk, &recipient_pk).unwrap();
        let wrap = create_gift_wrap(&seal, &recipient_pk).unwrap();

        let unwrapped = unwrap_gift_wrap(&wrap, &recipient_sk).unwrap();
        assert_eq!(unwrapped.rumor.content, "Hi Bob!");
        assert_eq!(unwrapped.sender, sender_pk);
    }

    #[test]
    fn tampered_seal_pubkey_surfaces_sender_mismatch() {
        let sender_sk = SecretKey::from_bytes([0x01; 32]);
        let impostor_sk = SecretKey::from_bytes([0x03; 32]);
        let recipient_sk = SecretKey::from_bytes([0x02; 32]);
        let recipient_pk = derive_public_key(&recipient_sk).unwrap();
        let sender_pk = derive_public_key(&sender_sk).unwrap();

        let rumor = Rumor::new(sender_pk, Timestamp::now(), 14, vec![], "Hi Bob!".to_string());
        // Sign the seal with an impostor key while the rumor still claims
        // to be from `sender_pk` — this is exactly the tampering scenario.
        let seal = create_seal(&rumor, &impostor_sk, &recipient_pk).unwrap();
        let wrap = create_gift_wrap(&seal, &recipient_pk).unwrap();

        let result = unwrap_gift_wrap(&wrap, &recipient_sk);
        assert_eq!(result.err(), Some(ProtocolError::SenderMismatch));
    }

    #[test]
    fn independent_wraps_have_different_ids() {
        let sender_sk = SecretKey::from_bytes([0x01; 32]);
        let recipient_sk = SecretKey::from_bytes([0x02; 32]);
        let recipient_pk = derive_public_key(&recipient_sk).unwrap();
        let sender_pk = derive_public_key(&sender_sk).unwrap();

        let rumor = Rumor::new(sender_pk, Timestamp::now(), 14, vec![], "Hi Bob!".to_string());
        let seal1 = create_seal(&rumor, &sender_sk, &recipient_pk).unwrap();
        let wrap1 = create_gift_wrap(&seal1, &recipient_pk).unwrap();
        let seal2 = create_seal(&rumor, &sender_sk, &recipient_pk).unwrap();
        let wrap2 = create_gift_wrap(&seal2, &recipient_pk).unwrap();

        assert_ne!(wrap1.id, wrap2.id);
    }
}
