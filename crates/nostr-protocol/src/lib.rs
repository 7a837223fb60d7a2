//! Protocol-level logic built on top of `nostr-types` and `nostr-crypto`:
//! wire message framing (C7), NIP-19 identifiers (C8), the NIP-59 envelope
//! (C10), the NIP-17 DM facade (C11), a BOLT-11 mini-parser (C13), and
//! kind-specific event projections (C14).

pub mod bolt11;
pub mod error;
pub mod kinds;
pub mod message;
pub mod nip17;
pub mod nip19;
pub mod nip59;

pub use error::ProtocolError;
pub use kinds::{project, ParsedData};
pub use message::{parse, parse_specific, ClientMessage, Message, RelayMessage};
