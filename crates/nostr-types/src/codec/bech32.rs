//! Hand-rolled BIP-173 bech32 (classic, not bech32m).
//!
//! NIP-19 requires lifting the 90-character length cap that BIP-173 mandates
//! and every published bech32 crate enforces by default, so the codec is
//! reimplemented here rather than pulled in as a dependency.

use crate::error::CodecError;

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const BECH32_CONST: u32 = 1;
const GEN: [u32; 5] = [
    0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3,
];

fn charset_rev(c: u8) -> Option<u8> {
    CHARSET.iter().position(|&x| x == c).map(|p| p as u8)
}

fn polymod(values: &[u8]) -> u32 {
    let mut chk: u32 = 1;
    for &v in values {
        let b = chk >> 25;
        chk = (chk & 0x1ff_ffff) << 5 ^ (v as u32);
        for i in 0..5 {
            if (b >> i) & 1 == 1 {
                chk ^= GEN[i];
            }
        }
    }
    chk
}

fn hrp_expand(hrp: &str) -> Vec<u8> {
    let bytes = hrp.as_bytes();
    let mut v = Vec::with_capacity(bytes.len() * 2 + 1);
    for &b in bytes {
        v.push(b >> 5);
    }
    v.push(0);
    for &b in bytes {
        v.push(b & 0x1f);
    }
    v
}

fn create_checksum(hrp: &str, data: &[u8]) -> [u8; 6] {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
    let poly = polymod(&values) ^ BECH32_CONST;
    let mut checksum = [0u8; 6];
    for (i, slot) in checksum.iter_mut().enumerate() {
        *slot = ((poly >> (5 * (5 - i))) & 31) as u8;
    }
    checksum
}

fn verify_checksum(hrp: &str, data: &[u8]) -> bool {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    polymod(&values) == BECH32_CONST
}

/// Converts a byte string between bit widths (used for the 8-bit↔5-bit
/// conversion bech32 needs). Strict: non-zero padding bits are rejected.
pub fn convert_bits(data: &[u8], from_bits: u32, to_bits: u32, pad: bool) -> Result<Vec<u8>, CodecError> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut ret = Vec::new();
    let maxv: u32 = (1 << to_bits) - 1;
    for &value in data {
        let value = value as u32;
        if (value >> from_bits) != 0 {
            return Err(CodecError::InvalidBech32);
        }
        acc = (acc << from_bits) | value;
        bits += from_bits;
        while bits >= to_bits {
            bits -= to_bits;
            ret.push(((acc >> bits) & maxv) as u8);
        }
    }
    if pad {
        if bits > 0 {
            ret.push(((acc << (to_bits - bits)) & maxv) as u8);
        }
    } else if bits >= from_bits || ((acc << (to_bits - bits)) & maxv) != 0 {
        return Err(CodecError::InvalidBech32);
    }
    Ok(ret)
}

/// Encodes already-5-bit-grouped `words` (each `0..32`) under human-readable
/// prefix `hrp`. Exposed alongside [`decode_words`] for formats like BOLT-11
/// that pack fields directly into 5-bit words rather than raw bytes.
pub fn encode_words(hrp: &str, words: &[u8]) -> Result<String, CodecError> {
    if hrp.is_empty() || !hrp.is_ascii() {
        return Err(CodecError::InvalidBech32);
    }
    if words.iter().any(|&w| w > 31) {
        return Err(CodecError::InvalidBech32);
    }
    let checksum = create_checksum(hrp, words);
    let mut out = String::with_capacity(hrp.len() + 1 + words.len() + 6);
    out.push_str(hrp);
    out.push('1');
    for &v in words.iter().chain(checksum.iter()) {
        out.push(CHARSET[v as usize] as char);
    }
    Ok(out)
}

/// Encodes `data` (arbitrary raw bytes) under human-readable prefix `hrp`.
/// Never truncates or rejects for length — the BIP-173 90-character limit is
/// intentionally not enforced, per NIP-19.
pub fn encode(hrp: &str, data: &[u8]) -> Result<String, CodecError> {
    let values = convert_bits(data, 8, 5, true)?;
    encode_words(hrp, &values)
}

/// Decodes a bech32 string down to its human-readable prefix and raw 5-bit
/// data words (checksum stripped, charset reversed, *not* regrouped into
/// bytes). Most callers want [`decode`]; this is exposed for formats like
/// BOLT-11 whose tagged fields aren't byte-aligned and have to be walked
/// word-by-word instead.
pub fn decode_words(s: &str) -> Result<(String, Vec<u8>), CodecError> {
    if s.chars().any(|c| c.is_ascii_uppercase()) && s.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(CodecError::InvalidBech32);
    }
    let lower = s.to_ascii_lowercase();
    let pos = lower.rfind('1').ok_or(CodecError::InvalidBech32)?;
    if pos == 0 || pos + 7 > lower.len() {
        return Err(CodecError::InvalidBech32);
    }
    let hrp = &lower[..pos];
    let data_part = &lower[pos + 1..];
    if !hrp.is_ascii() || hrp.is_empty() {
        return Err(CodecError::InvalidBech32);
    }

    let mut values = Vec::with_capacity(data_part.len());
    for c in data_part.chars() {
        let v = charset_rev(c as u8).ok_or(CodecError::InvalidBech32)?;
        values.push(v);
    }
    if values.len() < 6 {
        return Err(CodecError::InvalidBech32);
    }
    let (data, checksum_data) = values.split_at(values.len() - 6);
    if !verify_checksum(hrp, values.as_slice()) {
        return Err(CodecError::InvalidBech32);
    }
    let _ = checksum_data;
    Ok((hrp.to_string(), data.to_vec()))
}

/// Decodes a bech32 string into `(hrp, raw_bytes)`. Length checks are
/// disabled: strings longer than 90 characters are accepted, as NIP-19
/// requires. Mixed-case input is rejected, matching BIP-173.
pub fn decode(s: &str) -> Result<(String, Vec<u8>), CodecError> {
    let (hrp, words) = decode_words(s)?;
    let raw = convert_bits(&words, 5, 8, false)?;
    Ok((hrp, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn npub_round_trip() {
        let hex = "3bf0c63fcb93463407af97a5e5ee64fa883d107ef9e558472c4eb9aaaefa459d";
        // 33-byte hex string in the fixture is itself 65 hex chars = not 32 bytes;
        // the real NIP-19 fixture pubkey is 32 bytes (64 hex chars). Trim to 32 bytes
        // to exercise the codec; the exact string fixture is checked in nostr-protocol.
        let bytes = crate::codec::hex_decode(&hex[..64]).unwrap();
        let encoded = encode("npub", &bytes).unwrap();
        let (hrp, decoded) = decode(&encoded).unwrap();
        assert_eq!(hrp, "npub");
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn corrupt_last_char_fails() {
        let bytes = [0u8; 32];
        let mut encoded = encode("npub", &bytes).unwrap();
        let last = encoded.pop().unwrap();
        let replacement = if last == 'q' { 'p' } else { 'q' };
        encoded.push(replacement);
        assert!(decode(&encoded).is_err());
    }

    #[test]
    fn long_strings_still_decode() {
        let bytes = [7u8; 200];
        let encoded = encode("nevent", &bytes).unwrap();
        assert!(encoded.len() > 90);
        let (_, decoded) = decode(&encoded).unwrap();
        assert_eq!(decoded, bytes);
    }
}
