//! Domain event parsers (C14): kind-specific projections over a validated
//! [`Event`], dispatched through a closed sum type rather than open runtime
//! lookup. None of these re-verify the signature — that's C5's job, already
//! done by the time an `Event` exists.

pub mod generic;
pub mod kind0;
pub mod kind1;
pub mod kind1111;
pub mod kind1985;
pub mod kind5;
pub mod kind6;
pub mod kind7;
pub mod kind9734;
pub mod kind9735;
pub mod kind10002;
pub mod kind30023;
pub mod kind30315;

use nostr_types::Event;

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedData {
    Metadata(Option<kind0::Metadata>),
    TextNote(kind1::TextNote),
    Deletion(kind5::Deletion),
    Repost(kind6::Repost),
    Reaction(kind7::Reaction),
    Comment(kind1111::Comment),
    Label(kind1985::Label),
    ZapRequest(kind9734::ZapRequest),
    ZapReceipt(kind9735::ZapReceipt),
    RelayListMetadata(kind10002::RelayListMetadata),
    Article(kind30023::Article),
    UserStatus(kind30315::UserStatus),
    Generic(generic::Generic),
}

/// Routes `event` to its C14 projection by kind. Unknown kinds (including
/// the wide addressable/ephemeral ranges with no dedicated projection here)
/// fall back to [`ParsedData::Generic`].
pub fn project(event: &Event) -> ParsedData {
    match event.kind {
        0 => ParsedData::Metadata(kind0::parse(event)),
        1 => ParsedData::TextNote(kind1::parse(event)),
        5 => ParsedData::Deletion(kind5::parse(event)),
        6 => ParsedData::Repost(kind6::parse(event)),
        7 => ParsedData::Reaction(kind7::parse(event)),
        1111 => ParsedData::Comment(kind1111::parse(event)),
        1985 => ParsedData::Label(kind1985::parse(event)),
        9734 => ParsedData::ZapRequest(kind9734::parse(event)),
        9735 => ParsedData::ZapReceipt(kind9735::parse(event)),
        10002 => ParsedData::RelayListMetadata(kind10002::parse(event)),
        30023 => ParsedData::Article(kind30023::parse(event)),
        30315 => ParsedData::UserStatus(kind30315::parse(event)),
        _ => ParsedData::Generic(generic::parse(event)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nostr_crypto::sign::sign_event;
    use nostr_types::{EventDraft, SecretKey, Tag};

    fn signed(kind: u64, content: &str, tags: Vec<Tag>) -> Event {
        let seckey = SecretKey::from_bytes([0x5; 32]);
        let draft = EventDraft::new(kind, content.to_string()).with_tags(tags);
        sign_event(draft, &seckey).unwrap()
    }

    #[test]
    fn unknown_kind_falls_back_to_generic() {
        let event = signed(40000, "x", vec![Tag::new("alt", "a bot post")]);
        match project(&event) {
            ParsedData::Generic(g) => assert_eq!(g.alt, Some("a bot post".to_string())),
            other => panic!("expected Generic, got {other:?}"),
        }
    }

    #[test]
    fn text_note_routes_correctly() {
        let event = signed(1, "hello", vec![]);
        assert!(matches!(project(&event), ParsedData::TextNote(_)));
    }

    #[test]
    fn relay_list_reads_markers() {
        let tags = vec![
            Tag::with_info("r", "wss://a.example", vec!["write".to_string()]),
            Tag::new("r", "wss://b.example"),
        ];
        let event = signed(10002, "", tags);
        match project(&event) {
            ParsedData::RelayListMetadata(meta) => {
                assert_eq!(meta.relays.len(), 2);
                assert!(meta.relays[0].write && !meta.relays[0].read);
                assert!(meta.relays[1].read && meta.relays[1].write);
            }
            other => panic!("expected RelayListMetadata, got {other:?}"),
        }
    }
}
