use thiserror::Error;

/// Crypto-layer failures (C3/C9/C12): authentication or protocol violations.
/// None of these ever expose partial plaintext — callers get the error or
/// nothing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("payload too short")]
    PayloadTooShort,
    #[error("payload too long")]
    PayloadTooLong,
    #[error("decoded payload too short")]
    DecodedTooShort,
    #[error("decoded payload too long")]
    DecodedTooLong,
    #[error("invalid payload")]
    InvalidPayload,
    #[error("unsupported version")]
    UnsupportedVersion,
    #[error("invalid MAC")]
    InvalidMac,
    #[error("invalid padding")]
    InvalidPadding,
    #[error("decryption failed")]
    DecryptionFailed,
    #[error("invalid log_n (must be in 1..=22)")]
    InvalidLogN,
    #[error("plaintext empty")]
    PlaintextEmpty,
    #[error("plaintext too long")]
    PlaintextTooLong,
    #[error("invalid public key")]
    InvalidPublicKey,
    #[error("invalid secret key")]
    InvalidSecretKey,
    #[error(transparent)]
    Codec(#[from] nostr_types::CodecError),
}
