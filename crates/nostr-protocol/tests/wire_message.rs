use nostr_crypto::sign_event;
use nostr_protocol::message::{parse, parse_specific, ClientMessage, Message, RelayMessage};
use nostr_protocol::ParsedData;
use nostr_types::{EventDraft, SecretKey};

#[test]
fn a_signed_event_survives_the_full_client_to_relay_round_trip() {
    let seckey = SecretKey::from_bytes([0x07; 32]);
    let draft = EventDraft::new(1, "hello relay".to_string());
    let event = sign_event(draft, &seckey).unwrap();

    let client_msg = ClientMessage::Event(event.clone());
    let wire = client_msg.to_json();

    match parse(&wire) {
        Message::Client(ClientMessage::Event(parsed)) => assert_eq!(parsed, event),
        other => panic!("unexpected parse result: {other:?}"),
    }

    let relay_msg = RelayMessage::Event {
        subscription_id: "sub1".to_string(),
        event: event.clone(),
    };
    let relay_wire = relay_msg.to_json();
    match parse(&relay_wire) {
        Message::Relay(RelayMessage::Event { subscription_id, event: parsed }) => {
            assert_eq!(subscription_id, "sub1");
            assert_eq!(parsed, event);
        }
        other => panic!("unexpected parse result: {other:?}"),
    }
}

#[test]
fn parse_specific_attaches_the_kind_projection_to_a_relay_event() {
    let seckey = SecretKey::from_bytes([0x08; 32]);
    let draft = EventDraft::new(1, "just text".to_string());
    let event = sign_event(draft, &seckey).unwrap();

    let relay_msg = RelayMessage::Event {
        subscription_id: "sub2".to_string(),
        event,
    };
    let (message, projection) = parse_specific(&relay_msg.to_json());
    assert!(matches!(message, Message::Relay(RelayMessage::Event { .. })));
    assert!(matches!(projection, Some(ParsedData::TextNote(_))));
}

#[test]
fn an_ok_message_round_trips_through_the_wire_format() {
    let seckey = SecretKey::from_bytes([0x09; 32]);
    let draft = EventDraft::new(1, "x".to_string());
    let event = sign_event(draft, &seckey).unwrap();

    let ok = RelayMessage::Ok {
        event_id: event.id,
        accepted: true,
        message: "".to_string(),
    };
    match parse(&ok.to_json()) {
        Message::Relay(RelayMessage::Ok { event_id, accepted, .. }) => {
            assert_eq!(event_id, event.id);
            assert!(accepted);
        }
        other => panic!("unexpected parse result: {other:?}"),
    }
}
