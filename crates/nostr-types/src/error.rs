use thiserror::Error;

/// Errors produced by the binary↔text codecs (C1) and the TLV codec (C2).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid hex")]
    InvalidHex,
    #[error("invalid base64")]
    InvalidBase64,
    #[error("invalid bech32")]
    InvalidBech32,
    #[error("invalid prefix")]
    InvalidPrefix,
    #[error("incomplete TLV entry")]
    IncompleteTlv,
    #[error("invalid payload")]
    InvalidPayload,
}

/// Errors produced while building or validating an [`crate::Event`] (C5).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("missing pubkey")]
    MissingPubkey,
    #[error("missing event id")]
    MissingEventId,
    #[error("invalid pubkey")]
    InvalidPubkey,
    #[error("invalid event id")]
    InvalidEventId,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("pubkey does not match signing key")]
    PubkeyMismatch,
    #[error("event id does not match recomputed id")]
    IdMismatch,
    #[error("signature verification failed")]
    VerificationFailed,
    #[error(transparent)]
    Codec(#[from] CodecError),
}
