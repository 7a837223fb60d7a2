//! Binary↔text conversions (C1) and TLV framing (C2).

pub mod bech32;
pub mod tlv;

use crate::error::CodecError;

/// Decode lowercase or uppercase hex into bytes.
pub fn hex_decode(s: &str) -> Result<Vec<u8>, CodecError> {
    hex::decode(s).map_err(|_| CodecError::InvalidHex)
}

/// Encode bytes as lowercase hex.
pub fn hex_encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode standard, padded base64.
pub fn base64_decode(s: &str) -> Result<Vec<u8>, CodecError> {
    use base64::Engine as _;
    base64::engine::general_purpose::STANDARD
        .decode(s)
        .map_err(|_| CodecError::InvalidBase64)
}

/// Encode bytes as standard, padded base64.
pub fn base64_encode(bytes: &[u8]) -> String {
    use base64::Engine as _;
    base64::engine::general_purpose::STANDARD.encode(bytes)
}
