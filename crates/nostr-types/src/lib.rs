//! Core Nostr data model: binary/text codecs, tags, events, and filters.
//!
//! This crate owns the shapes and the canonical serialization rules; it does
//! not touch a secp256k1 backend. Signing, verification, and anything else
//! that needs cryptography lives in `nostr-crypto`, one layer up.

pub mod codec;
pub mod error;
pub mod event;
pub mod filter;
pub mod keys;
pub mod tag;

pub use error::{CodecError, EventError};
pub use event::{canonical_bytes, classify_kind, compute_id, Event, EventDraft, KindClass, Rumor, Timestamp};
pub use filter::Filter;
pub use keys::{EventId, PublicKey, SecretKey, Signature};
pub use tag::Tag;
