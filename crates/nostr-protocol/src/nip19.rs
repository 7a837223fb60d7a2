//! NIP-19: bech32+TLV shareable identifiers (C8).

use nostr_types::codec::bech32;
use nostr_types::codec::tlv::{self, TlvEntry};
use nostr_types::{EventId, PublicKey, SecretKey};

use crate::error::ProtocolError;

const TLV_SPECIAL: u8 = 0;
const TLV_RELAY: u8 = 1;
const TLV_AUTHOR: u8 = 2;
const TLV_KIND: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePointer {
    pub pubkey: PublicKey,
    pub relays: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPointer {
    pub id: EventId,
    pub relays: Vec<String>,
    pub author: Option<PublicKey>,
    pub kind: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressPointer {
    pub identifier: Vec<u8>,
    pub relays: Vec<String>,
    pub author: Option<PublicKey>,
    pub kind: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nip19 {
    Pubkey(PublicKey),
    Secret(SecretKey),
    Note(EventId),
    Profile(ProfilePointer),
    Event(EventPointer),
    Address(AddressPointer),
}

pub fn encode_npub(pubkey: &PublicKey) -> Result<String, ProtocolError> {
    Ok(bech32::encode("npub", pubkey.as_bytes())?)
}

pub fn encode_nsec(seckey: &SecretKey) -> Result<String, ProtocolError> {
    Ok(bech32::encode("nsec", seckey.as_bytes())?)
}

pub fn encode_note(id: &EventId) -> Result<String, ProtocolError> {
    Ok(bech32::encode("note", id.as_bytes())?)
}

pub fn encode_nprofile(pubkey: &PublicKey, relays: &[String]) -> Result<String, ProtocolError> {
    let mut entries = vec![TlvEntry {
        typ: TLV_SPECIAL,
        value: pubkey.as_bytes().to_vec(),
    }];
    for relay in relays {
        entries.push(TlvEntry {
            typ: TLV_RELAY,
            value: relay.as_bytes().to_vec(),
        });
    }
    Ok(bech32::encode("nprofile", &tlv::encode(&entries))?)
}

pub fn encode_nevent(
    id: &EventId,
    relays: &[String],
    author: Option<&PublicKey>,
    kind: Option<u64>,
) -> Result<String, ProtocolError> {
    let mut entries = vec![TlvEntry {
        typ: TLV_SPECIAL,
        value: id.as_bytes().to_vec(),
    }];
    for relay in relays {
        entries.push(TlvEntry {
            typ: TLV_RELAY,
            value: relay.as_bytes().to_vec(),
        });
    }
    if let Some(author) = author {
        entries.push(TlvEntry {
            typ: TLV_AUTHOR,
            value: author.as_bytes().to_vec(),
        });
    }
    if let Some(kind) = kind {
        entries.push(TlvEntry {
            typ: TLV_KIND,
            value: (kind as u32).to_be_bytes().to_vec(),
        });
    }
    Ok(bech32::encode("nevent", &tlv::encode(&entries))?)
}

pub fn encode_naddr(
    identifier: &[u8],
    relays: &[String],
    author: &PublicKey,
    kind: u64,
) -> Result<String, ProtocolError> {
    let mut entries = vec![TlvEntry {
        typ: TLV_SPECIAL,
        value: identifier.to_vec(),
    }];
    for relay in relays {
        entries.push(TlvEntry {
            typ: TLV_RELAY,
            value: relay.as_bytes().to_vec(),
        });
    }
    entries.push(TlvEntry {
        typ: TLV_AUTHOR,
        value: author.as_bytes().to_vec(),
    });
    entries.push(TlvEntry {
        typ: TLV_KIND,
        value: (kind as u32).to_be_bytes().to_vec(),
    });
    Ok(bech32::encode("naddr", &tlv::encode(&entries))?)
}

pub fn decode(s: &str) -> Result<Nip19, ProtocolError> {
    let (hrp, data) = bech32::decode(s)?;
    match hrp.as_str() {
        "npub" => Ok(Nip19::Pubkey(PublicKey::from_slice(&data)?)),
        "nsec" => Ok(Nip19::Secret(SecretKey::from_slice(&data)?)),
        "note" => Ok(Nip19::Note(EventId::from_slice(&data)?)),
        "nprofile" => {
            let entries = tlv::decode(&data)?;
            let special = first_special(&entries).ok_or(ProtocolError::MissingSpecial)?;
            let pubkey = PublicKey::from_slice(special)?;
            let relays = collect_relays(&entries);
            Ok(Nip19::Profile(ProfilePointer { pubkey, relays }))
        }
        "nevent" => {
            let entries = tlv::decode(&data)?;
            let special = first_special(&entries).ok_or(ProtocolError::MissingSpecial)?;
            let id = EventId::from_slice(special)?;
            let relays = collect_relays(&entries);
            let author = entries
                .iter()
                .find(|e| e.typ == TLV_AUTHOR)
                .and_then(|e| PublicKey::from_slice(&e.value).ok());
            let kind = entries
                .iter()
                .find(|e| e.typ == TLV_KIND)
                .and_then(|e| e.value.as_slice().try_into().ok())
                .map(u32::from_be_bytes)
                .map(u64::from);
            Ok(Nip19::Event(EventPointer { id, relays, author, kind }))
        }
        "naddr" => {
            let entries = tlv::decode(&data)?;
            let identifier = first_special(&entries).ok_or(ProtocolError::MissingSpecial)?.to_vec();
            let relays = collect_relays(&entries);
            let author = entries
                .iter()
                .find(|e| e.typ == TLV_AUTHOR)
                .and_then(|e| PublicKey::from_slice(&e.value).ok());
            let kind = entries
                .iter()
                .find(|e| e.typ == TLV_KIND)
                .and_then(|e| e.value.as_slice().try_into().ok())
                .map(u32::from_be_bytes)
                .map(u64::from);
            Ok(Nip19::Address(AddressPointer {
                identifier,
                relays,
                author,
                kind,
            }))
        }
        _ => Err(ProtocolError::Codec(nostr_types::CodecError::InvalidPrefix)),
    }
}

/// The first `special` TLV wins; any later ones are ignored (the spec is
/// silent on duplicates, so this is the documented tie-break).
fn first_special(entries: &[TlvEntry]) -> Option<&[u8]> {
    entries.iter().find(|e| e.typ == TLV_SPECIAL).map(|e| e.value.as_slice())
}

fn collect_relays(entries: &[TlvEntry]) -> Vec<String> {
    entries
        .iter()
        .filter(|e| e.typ == TLV_RELAY)
        .filter_map(|e| String::from_utf8(e.value.clone()).ok())
        .collect()
}
