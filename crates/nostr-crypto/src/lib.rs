//! Cryptographic backend for the Nostr protocol primitives: Schnorr
//! signing/verification (completing C5), the C3 adapter over secp256k1/
//! ChaCha20/HKDF/HMAC/scrypt, NIP-44 v2 encryption (C9), and NIP-49 key
//! encryption (C12).

pub mod adapter;
pub mod error;
pub mod nip44;
pub mod nip49;
pub mod sign;

pub use error::CryptoError;
pub use sign::{parse_and_verify_event, sign_event, verify_event};
