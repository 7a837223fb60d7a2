//! TLV framing used by NIP-19 composite identifiers (C2): a sequence of
//! `type(1 byte) || length(1 byte) || value(length bytes)` entries.

use crate::error::CodecError;

/// Up to this many trailing zero bytes are tolerated at the end of a TLV
/// stream — an artifact of bech32's 5-to-8 bit expansion padding the final
/// byte group with zero bits.
const MAX_TRAILING_PAD: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvEntry {
    pub typ: u8,
    pub value: Vec<u8>,
}

/// Encodes entries in order; callers are responsible for ordering repeatable
/// types (e.g. `relay`) themselves, since TLV order is preserved verbatim.
pub fn encode(entries: &[TlvEntry]) -> Vec<u8> {
    let mut out = Vec::new();
    for entry in entries {
        out.push(entry.typ);
        out.push(entry.value.len() as u8);
        out.extend_from_slice(&entry.value);
    }
    out
}

/// Decodes a TLV stream, tolerating up to [`MAX_TRAILING_PAD`] trailing zero
/// bytes left over from bech32's bit-width conversion.
pub fn decode(bytes: &[u8]) -> Result<Vec<TlvEntry>, CodecError> {
    let mut entries = Vec::new();
    let mut i = 0usize;
    while i < bytes.len() {
        let remaining = bytes.len() - i;
        if remaining <= MAX_TRAILING_PAD && bytes[i..].iter().all(|&b| b == 0) {
            break;
        }
        if remaining < 2 {
            return Err(CodecError::IncompleteTlv);
        }
        let typ = bytes[i];
        let len = bytes[i + 1] as usize;
        let start = i + 2;
        let end = start + len;
        if end > bytes.len() {
            return Err(CodecError::IncompleteTlv);
        }
        entries.push(TlvEntry {
            typ,
            value: bytes[start..end].to_vec(),
        });
        i = end;
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let entries = vec![
            TlvEntry { typ: 0, value: vec![1, 2, 3] },
            TlvEntry { typ: 1, value: b"wss://relay.example".to_vec() },
        ];
        let bytes = encode(&entries);
        assert_eq!(decode(&bytes).unwrap(), entries);
    }

    #[test]
    fn tolerates_trailing_zero_padding() {
        let entries = vec![TlvEntry { typ: 0, value: vec![9, 9] }];
        let mut bytes = encode(&entries);
        bytes.extend_from_slice(&[0, 0, 0]);
        assert_eq!(decode(&bytes).unwrap(), entries);
    }

    #[test]
    fn incomplete_entry_errors() {
        let bytes = vec![0u8, 5, 1, 2];
        assert!(decode(&bytes).is_err());
    }
}
