use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::keys::{EventId, PublicKey, Signature};
use crate::tag::Tag;

/// Absolute Unix timestamp in seconds. Internally signed so NIP-59's
/// ±172800-second randomization can be applied without wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before Unix epoch")
            .as_secs();
        Timestamp(secs as i64)
    }

    pub fn checked_add(self, offset: i64) -> Self {
        Timestamp(self.0 + offset)
    }
}

/// How a kind's replaceability works, per NIP-01.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindClass {
    Regular,
    Replaceable,
    Ephemeral,
    Addressable,
}

pub fn classify_kind(kind: u64) -> KindClass {
    if kind == 0 || kind == 3 || (10_000..20_000).contains(&kind) {
        KindClass::Replaceable
    } else if (20_000..30_000).contains(&kind) {
        KindClass::Ephemeral
    } else if (30_000..40_000).contains(&kind) {
        KindClass::Addressable
    } else {
        KindClass::Regular
    }
}

/// The canonical hash input: `[0, pubkey, created_at, kind, tags, content]`,
/// compact and RFC-8259 escaped. This shape is *only* used for hashing; it is
/// never the wire representation.
pub fn canonical_bytes(
    pubkey: &PublicKey,
    created_at: Timestamp,
    kind: u64,
    tags: &[Tag],
    content: &str,
) -> Vec<u8> {
    let value = (0, pubkey.to_hex(), created_at.0, kind, tags, content);
    serde_json::to_vec(&value).expect("tuple of primitives always serializes")
}

pub fn compute_id(
    pubkey: &PublicKey,
    created_at: Timestamp,
    kind: u64,
    tags: &[Tag],
    content: &str,
) -> EventId {
    let bytes = canonical_bytes(pubkey, created_at, kind, tags, content);
    let digest = Sha256::digest(&bytes);
    EventId::from_bytes(digest.into())
}

/// An event before it has been assigned an id/pubkey/signature. `pubkey` and
/// `id`, if already set by the caller, must match what signing recomputes —
/// a mismatch is a contract violation, not a recoverable error.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub pubkey: Option<PublicKey>,
    pub id: Option<EventId>,
    pub created_at: Timestamp,
    pub kind: u64,
    pub tags: Vec<Tag>,
    pub content: String,
}

impl EventDraft {
    pub fn new(kind: u64, content: impl Into<String>) -> Self {
        EventDraft {
            pubkey: None,
            id: None,
            created_at: Timestamp::now(),
            kind,
            tags: Vec::new(),
            content: content.into(),
        }
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = created_at;
        self
    }
}

/// A fully unsigned event (same shape as a signed [`Event`] minus `sig`),
/// carrying deniable content because nothing proves the listed pubkey wrote
/// it — the NIP-59 seal/gift-wrap inner value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rumor {
    pub id: EventId,
    pub pubkey: PublicKey,
    pub created_at: Timestamp,
    pub kind: u64,
    pub tags: Vec<Tag>,
    pub content: String,
}

impl Rumor {
    pub fn new(
        pubkey: PublicKey,
        created_at: Timestamp,
        kind: u64,
        tags: Vec<Tag>,
        content: String,
    ) -> Self {
        let id = compute_id(&pubkey, created_at, kind, &tags, &content);
        Rumor {
            id,
            pubkey,
            created_at,
            kind,
            tags,
            content,
        }
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        canonical_bytes(&self.pubkey, self.created_at, self.kind, &self.tags, &self.content)
    }

    pub fn recompute_id(&self) -> EventId {
        compute_id(&self.pubkey, self.created_at, self.kind, &self.tags, &self.content)
    }

    pub fn class(&self) -> KindClass {
        classify_kind(self.kind)
    }
}

/// A sealed event: id/pubkey/sig are all populated and immutable. Producing
/// one (via signing) and validating one received over the wire are both the
/// job of `nostr-crypto`, which has the Schnorr backend this type does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub pubkey: PublicKey,
    pub created_at: Timestamp,
    pub kind: u64,
    pub tags: Vec<Tag>,
    pub content: String,
    pub sig: Signature,
}

impl Event {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        canonical_bytes(&self.pubkey, self.created_at, self.kind, &self.tags, &self.content)
    }

    /// Recomputes what `id` should be from the other fields; does not touch
    /// the signature. Callers pair this with a Schnorr check in
    /// `nostr-crypto` to get the full C5 `parse` contract.
    pub fn recompute_id(&self) -> EventId {
        compute_id(&self.pubkey, self.created_at, self.kind, &self.tags, &self.content)
    }

    pub fn class(&self) -> KindClass {
        classify_kind(self.kind)
    }

    pub fn tags_value(&self, kind: &str) -> Option<&str> {
        self.tags.iter().find(|t| t.is_kind(kind)).map(Tag::value)
    }

    pub fn as_rumor(&self) -> Rumor {
        Rumor {
            id: self.id,
            pubkey: self.pubkey,
            created_at: self.created_at,
            kind: self.kind,
            tags: self.tags.clone(),
            content: self.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_id_fixture() {
        // Matches the fixture pubkey derived from seckey 1111...1111.
        let pubkey = PublicKey::from_hex(
            "4f355bdcb7cc0af728ef3cceb9615d90684bb5b2ca5f859ab0f0b704075871aa",
        )
        .unwrap();
        let created_at = Timestamp(1_704_067_200);
        let bytes = canonical_bytes(&pubkey, created_at, 1, &[], "test");
        let json = String::from_utf8(bytes).unwrap();
        assert_eq!(
            json,
            format!(
                "[0,\"{}\",1704067200,1,[],\"test\"]",
                pubkey.to_hex()
            )
        );
    }

    #[test]
    fn kind_classes() {
        assert_eq!(classify_kind(0), KindClass::Replaceable);
        assert_eq!(classify_kind(1), KindClass::Regular);
        assert_eq!(classify_kind(3), KindClass::Replaceable);
        assert_eq!(classify_kind(10_002), KindClass::Replaceable);
        assert_eq!(classify_kind(20_000), KindClass::Ephemeral);
        assert_eq!(classify_kind(30_023), KindClass::Addressable);
    }

    #[test]
    fn rumor_id_matches_event_id_formula() {
        let pubkey = PublicKey::from_bytes([1u8; 32]);
        let rumor = Rumor::new(pubkey, Timestamp(1), 1, vec![], "hi".to_string());
        assert_eq!(rumor.id, rumor.recompute_id());
    }
}
