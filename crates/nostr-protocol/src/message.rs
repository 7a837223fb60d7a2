//! Wire message framing (C7): JSON-array tuples exchanged between client and
//! relay, parsed bidirectionally by arity and element type.

use serde_json::Value;

use nostr_types::{Event, EventId, Filter};

use crate::kinds::{self, ParsedData};

#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    Event(Event),
    Req {
        subscription_id: String,
        filters: Vec<Filter>,
    },
    Close {
        subscription_id: String,
    },
    Auth(Event),
    Count {
        subscription_id: String,
        filters: Vec<Filter>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RelayMessage {
    Event {
        subscription_id: String,
        event: Event,
    },
    Eose {
        subscription_id: String,
    },
    Notice {
        message: String,
    },
    Ok {
        event_id: EventId,
        accepted: bool,
        message: String,
    },
    Closed {
        subscription_id: String,
        message: String,
    },
    Auth {
        challenge: String,
    },
    Count {
        subscription_id: String,
        count: u64,
    },
}

/// A parsed wire message, or the sentinel for any shape this parser doesn't
/// recognize. `Unknown` is never an error return — it's the documented,
/// logged outcome for malformed or unrecognized frames.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Client(ClientMessage),
    Relay(RelayMessage),
    Unknown,
}

impl ClientMessage {
    pub fn to_json(&self) -> String {
        match self {
            ClientMessage::Event(event) => {
                format!(r#"["EVENT",{}]"#, serde_json::to_string(event).unwrap())
            }
            ClientMessage::Req {
                subscription_id,
                filters,
            } => {
                let mut parts = vec!["\"REQ\"".to_string(), serde_json::to_string(subscription_id).unwrap()];
                for filter in filters {
                    parts.push(serde_json::to_string(filter).unwrap());
                }
                format!("[{}]", parts.join(","))
            }
            ClientMessage::Close { subscription_id } => {
                format!(r#"["CLOSE",{}]"#, serde_json::to_string(subscription_id).unwrap())
            }
            ClientMessage::Auth(event) => {
                format!(r#"["AUTH",{}]"#, serde_json::to_string(event).unwrap())
            }
            ClientMessage::Count {
                subscription_id,
                filters,
            } => {
                let mut parts = vec!["\"COUNT\"".to_string(), serde_json::to_string(subscription_id).unwrap()];
                for filter in filters {
                    parts.push(serde_json::to_string(filter).unwrap());
                }
                format!("[{}]", parts.join(","))
            }
        }
    }
}

impl RelayMessage {
    pub fn to_json(&self) -> String {
        match self {
            RelayMessage::Event { subscription_id, event } => format!(
                r#"["EVENT",{},{}]"#,
                serde_json::to_string(subscription_id).unwrap(),
                serde_json::to_string(event).unwrap()
            ),
            RelayMessage::Eose { subscription_id } => {
                format!(r#"["EOSE",{}]"#, serde_json::to_string(subscription_id).unwrap())
            }
            RelayMessage::Notice { message } => {
                format!(r#"["NOTICE",{}]"#, serde_json::to_string(message).unwrap())
            }
            RelayMessage::Ok {
                event_id,
                accepted,
                message,
            } => format!(
                r#"["OK",{},{},{}]"#,
                serde_json::to_string(&event_id.to_hex()).unwrap(),
                accepted,
                serde_json::to_string(message).unwrap()
            ),
            RelayMessage::Closed {
                subscription_id,
                message,
            } => format!(
                r#"["CLOSED",{},{}]"#,
                serde_json::to_string(subscription_id).unwrap(),
                serde_json::to_string(message).unwrap()
            ),
            RelayMessage::Auth { challenge } => {
                format!(r#"["AUTH",{}]"#, serde_json::to_string(challenge).unwrap())
            }
            RelayMessage::Count { subscription_id, count } => format!(
                r#"["COUNT",{},{{"count":{}}}]"#,
                serde_json::to_string(subscription_id).unwrap(),
                count
            ),
        }
    }
}

fn as_str(v: &Value) -> Option<&str> {
    v.as_str()
}

fn parse_filters(rest: &[Value]) -> Option<Vec<Filter>> {
    rest.iter()
        .map(|v| serde_json::from_value::<Filter>(v.clone()).ok())
        .collect()
}

/// General-mode parse: embedded events are returned as plain [`Event`]
/// values, with no kind-specific projection attached.
pub fn parse(raw: &str) -> Message {
    let Ok(Value::Array(arr)) = serde_json::from_str::<Value>(raw) else {
        tracing::warn!("unparseable wire message: not a JSON array");
        return Message::Unknown;
    };
    parse_array(&arr)
}

/// Specific-mode parse: in addition to the general [`Message`], returns the
/// C14 projection for any embedded event (routed by kind), or `None` for
/// messages that don't carry one.
pub fn parse_specific(raw: &str) -> (Message, Option<ParsedData>) {
    let message = parse(raw);
    let projection = match &message {
        Message::Client(ClientMessage::Event(e)) | Message::Client(ClientMessage::Auth(e)) => {
            Some(kinds::project(e))
        }
        Message::Relay(RelayMessage::Event { event, .. }) => Some(kinds::project(event)),
        _ => None,
    };
    (message, projection)
}

fn parse_array(arr: &[Value]) -> Message {
    let Some(label) = arr.first().and_then(as_str) else {
        tracing::warn!("unparseable wire message: missing label");
        return Message::Unknown;
    };

    match (label, arr.len()) {
        ("EVENT", 2) => match serde_json::from_value::<Event>(arr[1].clone()) {
            Ok(event) => Message::Client(ClientMessage::Event(event)),
            Err(_) => {
                tracing::warn!("EVENT client message: malformed event object");
                Message::Unknown
            }
        },
        ("EVENT", 3) => match (as_str(&arr[1]), serde_json::from_value::<Event>(arr[2].clone())) {
            (Some(sub_id), Ok(event)) => Message::Relay(RelayMessage::Event {
                subscription_id: sub_id.to_string(),
                event,
            }),
            _ => {
                tracing::warn!("EVENT relay message: malformed shape");
                Message::Unknown
            }
        },
        ("REQ", n) if n >= 3 => {
            let Some(sub_id) = as_str(&arr[1]) else {
                tracing::warn!("REQ: subscription id not a string");
                return Message::Unknown;
            };
            match parse_filters(&arr[2..]) {
                Some(filters) => Message::Client(ClientMessage::Req {
                    subscription_id: sub_id.to_string(),
                    filters,
                }),
                None => {
                    tracing::warn!("REQ: malformed filter");
                    Message::Unknown
                }
            }
        }
        ("CLOSE", 2) => match as_str(&arr[1]) {
            Some(sub_id) => Message::Client(ClientMessage::Close {
                subscription_id: sub_id.to_string(),
            }),
            None => {
                tracing::warn!("CLOSE: subscription id not a string");
                Message::Unknown
            }
        },
        ("AUTH", 2) => {
            if let Some(challenge) = as_str(&arr[1]) {
                Message::Relay(RelayMessage::Auth {
                    challenge: challenge.to_string(),
                })
            } else if let Ok(event) = serde_json::from_value::<Event>(arr[1].clone()) {
                Message::Client(ClientMessage::Auth(event))
            } else {
                tracing::warn!("AUTH: neither a challenge string nor a signed event");
                Message::Unknown
            }
        }
        ("COUNT", 3) if is_count_response(&arr[2]) => {
            let (Some(sub_id), Some(count)) = (as_str(&arr[1]), arr[2].get("count").and_then(Value::as_u64))
            else {
                tracing::warn!("COUNT: malformed relay response");
                return Message::Unknown;
            };
            Message::Relay(RelayMessage::Count {
                subscription_id: sub_id.to_string(),
                count,
            })
        }
        ("COUNT", n) if n >= 3 => {
            let Some(sub_id) = as_str(&arr[1]) else {
                tracing::warn!("COUNT: subscription id not a string");
                return Message::Unknown;
            };
            match parse_filters(&arr[2..]) {
                Some(filters) => Message::Client(ClientMessage::Count {
                    subscription_id: sub_id.to_string(),
                    filters,
                }),
                None => {
                    tracing::warn!("COUNT: malformed filter");
                    Message::Unknown
                }
            }
        }
        ("EOSE", 2) => match as_str(&arr[1]) {
            Some(sub_id) => Message::Relay(RelayMessage::Eose {
                subscription_id: sub_id.to_string(),
            }),
            None => Message::Unknown,
        },
        ("NOTICE", 2) => match as_str(&arr[1]) {
            Some(msg) => Message::Relay(RelayMessage::Notice {
                message: msg.to_string(),
            }),
            None => Message::Unknown,
        },
        ("OK", 4) => {
            let event_id = as_str(&arr[1]).and_then(|s| EventId::from_hex(s).ok());
            let accepted = arr[2].as_bool();
            let message = as_str(&arr[3]);
            match (event_id, accepted, message) {
                (Some(event_id), Some(accepted), Some(message)) => {
                    Message::Relay(RelayMessage::Ok {
                        event_id,
                        accepted,
                        message: message.to_string(),
                    })
                }
                _ => {
                    tracing::warn!("OK: malformed shape");
                    Message::Unknown
                }
            }
        }
        ("CLOSED", 3) => match (as_str(&arr[1]), as_str(&arr[2])) {
            (Some(sub_id), Some(msg)) => Message::Relay(RelayMessage::Closed {
                subscription_id: sub_id.to_string(),
                message: msg.to_string(),
            }),
            _ => {
                tracing::warn!("CLOSED: malformed shape");
                Message::Unknown
            }
        },
        (label, arity) => {
            tracing::warn!(label, arity, "unrecognized wire message shape");
            Message::Unknown
        }
    }
}

fn is_count_response(value: &Value) -> bool {
    value.is_object()
        && value.get("count").and_then(Value::as_u64).is_some()
        && value.as_object().map(|m| m.len() == 1).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn req_round_trip() {
        let raw = r#"["REQ","sub",{"kinds":[1],"limit":10}]"#;
        let message = parse(raw);
        match message {
            Message::Client(ClientMessage::Req { subscription_id, filters }) => {
                assert_eq!(subscription_id, "sub");
                assert_eq!(filters.len(), 1);
                assert_eq!(filters[0].kinds, Some(vec![1]));
            }
            other => panic!("unexpected parse result: {other:?}"),
        }
    }

    #[test]
    fn close_parses() {
        let raw = r#"["CLOSE","sub"]"#;
        assert_eq!(
            parse(raw),
            Message::Client(ClientMessage::Close {
                subscription_id: "sub".to_string()
            })
        );
    }

    #[test]
    fn eose_parses() {
        let raw = r#"["EOSE","sub"]"#;
        assert_eq!(
            parse(raw),
            Message::Relay(RelayMessage::Eose {
                subscription_id: "sub".to_string()
            })
        );
    }

    #[test]
    fn relay_count_vs_client_count() {
        let relay_raw = r#"["COUNT","sub",{"count":5}]"#;
        assert_eq!(
            parse(relay_raw),
            Message::Relay(RelayMessage::Count {
                subscription_id: "sub".to_string(),
                count: 5
            })
        );

        let client_raw = r#"["COUNT","sub",{"kinds":[1]}]"#;
        match parse(client_raw) {
            Message::Client(ClientMessage::Count { subscription_id, filters }) => {
                assert_eq!(subscription_id, "sub");
                assert_eq!(filters[0].kinds, Some(vec![1]));
            }
            other => panic!("unexpected parse result: {other:?}"),
        }
    }

    #[test]
    fn auth_challenge_vs_signed_event() {
        let challenge_raw = r#"["AUTH","challenge-string"]"#;
        assert_eq!(
            parse(challenge_raw),
            Message::Relay(RelayMessage::Auth {
                challenge: "challenge-string".to_string()
            })
        );
    }

    #[test]
    fn unknown_shape_does_not_panic() {
        assert_eq!(parse("not json"), Message::Unknown);
        assert_eq!(parse("{}"), Message::Unknown);
        assert_eq!(parse(r#"["BOGUS", 1, 2, 3]"#), Message::Unknown);
    }
}
