use thiserror::Error;

/// Protocol-level semantic errors (C7/C8/C10/C11/C13): structured values the
/// caller decides policy on, as opposed to crypto/format errors which are
/// closer to the wire.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("sender mismatch between rumor and seal")]
    SenderMismatch,
    #[error("unexpected kind: expected {expected}, got {got}")]
    UnexpectedKind { expected: u64, got: u64 },
    #[error("unsupported kind: {0}")]
    UnsupportedKind(u64),
    #[error("nsec identifiers are not allowed in this context")]
    NsecNotAllowed,
    #[error("redirects are not allowed")]
    RedirectsNotAllowed,
    #[error("missing required `p` tag")]
    MissingPTag,
    #[error("seal must have an empty tag list")]
    SealHasTags,
    #[error("special TLV entry is required and was absent")]
    MissingSpecial,
    #[error(transparent)]
    Codec(#[from] nostr_types::CodecError),
    #[error(transparent)]
    Event(#[from] nostr_types::EventError),
    #[error(transparent)]
    Crypto(#[from] nostr_crypto::CryptoError),
}
