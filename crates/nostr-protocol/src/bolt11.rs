//! BOLT-11 mini-parser (C13): just enough to pull the timestamp, amount, and
//! description out of a Lightning invoice for NIP-57 zap receipts. Not a
//! full invoice validator — the signature and routing-hint fields are
//! ignored.

use nostr_types::codec::bech32::{self, convert_bits};

/// Words (5-bit groups) consumed by the trailing signature: 520 bits.
const SIGNATURE_WORDS: usize = 104;
/// Words consumed by the leading 35-bit timestamp.
const TIMESTAMP_WORDS: usize = 7;
/// Tagged-field type for the short description (BOLT-11 §"Tagged Fields").
const TAG_DESCRIPTION: u8 = 13;

/// Multiplier suffixes on the amount part of the human-readable prefix,
/// expressed in millisatoshis per unit (BOLT-11 §"Human Readable Part").
/// `p` (pico-BTC) is handled separately: its multiplier is 0.1 msat/unit,
/// so the raw amount must be a multiple of 10.
fn unit_multiplier(unit: char) -> Option<u128> {
    match unit {
        'm' => Some(100_000_000),
        'u' => Some(100_000),
        'n' => Some(100),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    pub timestamp: u64,
    pub amount_msat: Option<u128>,
    pub description: Option<String>,
}

impl Invoice {
    /// Millisats are only ever truncated to whole satoshis here, at the API
    /// boundary — the internal amount stays in millisats.
    pub fn amount_sats(&self) -> Option<u64> {
        self.amount_msat.map(|msat| (msat / 1000) as u64)
    }
}

fn parse_amount(hrp: &str) -> Option<Option<u128>> {
    let amount_part: String = hrp.chars().skip_while(|c| c.is_alphabetic()).collect();
    if amount_part.is_empty() {
        return Some(None);
    }
    let (digits, unit) = match amount_part.chars().last() {
        Some(c) if c.is_ascii_digit() => (amount_part.as_str(), None),
        Some(c) => (&amount_part[..amount_part.len() - 1], Some(c)),
        None => return None,
    };
    let amount: u128 = digits.parse().ok()?;
    let msat = match unit {
        Some('p') => {
            if amount % 10 != 0 {
                return None;
            }
            amount / 10
        }
        Some(u) => amount * unit_multiplier(u)?,
        None => amount * 100_000_000_000,
    };
    Some(Some(msat))
}

/// Reads the 35-bit timestamp from the first [`TIMESTAMP_WORDS`] 5-bit words.
fn parse_timestamp(words: &[u8]) -> u64 {
    words[..TIMESTAMP_WORDS]
        .iter()
        .fold(0u64, |acc, &w| (acc << 5) | w as u64)
}

/// Walks the tagged fields between the timestamp and the trailing signature,
/// returning the short description (`d`, type 13) if present. Other tags are
/// skipped by their declared length without being interpreted.
fn parse_description(words: &[u8]) -> Option<String> {
    let end = words.len().checked_sub(SIGNATURE_WORDS)?;
    let mut pos = TIMESTAMP_WORDS;
    let mut description = None;
    while pos + 3 <= end {
        let tag = words[pos];
        let data_length = ((words[pos + 1] as usize) << 5) | words[pos + 2] as usize;
        let field_start = pos + 3;
        let field_end = field_start + data_length;
        if field_end > end {
            break;
        }
        if tag == TAG_DESCRIPTION {
            let bytes = convert_bits(&words[field_start..field_end], 5, 8, false).ok()?;
            description = String::from_utf8(bytes).ok();
        }
        pos = field_end;
    }
    description
}

/// Parses the human-readable part for an amount (invoices without one are
/// tolerated and return `amount_msat: None`) and scans the tagged-field
/// section for the timestamp and short description.
pub fn parse(invoice: &str) -> Option<Invoice> {
    let invoice = invoice.trim();
    let lower = invoice.to_ascii_lowercase();
    if !lower.starts_with("lnbc") && !lower.starts_with("lntb") && !lower.starts_with("lnbcrt") {
        return None;
    }
    let (hrp, words) = bech32::decode_words(invoice).ok()?;
    if words.len() < TIMESTAMP_WORDS + SIGNATURE_WORDS {
        return None;
    }

    let amount_msat = parse_amount(&hrp)?;
    let timestamp = parse_timestamp(&words);
    let description = parse_description(&words);

    Some(Invoice {
        timestamp,
        amount_msat,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a syntactically valid invoice body: a 35-bit timestamp, an
    /// optional `d` (description) tagged field, and a zeroed-out signature —
    /// enough to exercise the tagged-field walk without a real payment.
    fn build_invoice(hrp: &str, timestamp: u64, description: Option<&str>) -> String {
        let mut words = Vec::new();
        for i in (0..TIMESTAMP_WORDS).rev() {
            words.push(((timestamp >> (5 * i)) & 0x1f) as u8);
        }
        if let Some(desc) = description {
            let data_words = convert_bits(desc.as_bytes(), 8, 5, true).unwrap();
            words.push(TAG_DESCRIPTION);
            words.push(((data_words.len() >> 5) & 0x1f) as u8);
            words.push((data_words.len() & 0x1f) as u8);
            words.extend(data_words);
        }
        words.extend(std::iter::repeat(0u8).take(SIGNATURE_WORDS));
        bech32::encode_words(hrp, &words).unwrap()
    }

    #[test]
    fn rejects_non_invoice_strings() {
        assert_eq!(parse("npub1abc"), None);
    }

    #[test]
    fn amount_absent_returns_none_amount() {
        let invoice = build_invoice("lnbc", 1_700_000_000, None);
        let parsed = parse(&invoice).unwrap();
        assert_eq!(parsed.amount_msat, None);
        assert_eq!(parsed.timestamp, 1_700_000_000);
    }

    #[test]
    fn micro_btc_multiplier_converts_to_millisats() {
        // 2500u = 2500 micro-BTC = 250_000_000 msat.
        let invoice = build_invoice("lnbc2500u", 0, None);
        let parsed = parse(&invoice).unwrap();
        assert_eq!(parsed.amount_msat, Some(250_000_000));
    }

    #[test]
    fn pico_btc_amount_divides_by_ten() {
        // 10p = 10 pico-BTC = 1 msat.
        let invoice = build_invoice("lnbc10p", 0, None);
        let parsed = parse(&invoice).unwrap();
        assert_eq!(parsed.amount_msat, Some(1));
    }

    #[test]
    fn pico_btc_amount_not_divisible_by_ten_is_rejected() {
        let invoice = build_invoice("lnbc15p", 0, None);
        assert_eq!(parse(&invoice), None);
    }

    #[test]
    fn description_tagged_field_is_extracted() {
        let invoice = build_invoice("lnbc", 0, Some("coffee"));
        let parsed = parse(&invoice).unwrap();
        assert_eq!(parsed.description.as_deref(), Some("coffee"));
    }

    #[test]
    fn millisat_amount_truncates_to_whole_sats() {
        let invoice = Invoice {
            timestamp: 0,
            amount_msat: Some(1_500),
            description: None,
        };
        assert_eq!(invoice.amount_sats(), Some(1));
    }
}
