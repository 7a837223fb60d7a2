//! Kind 1111: comment (NIP-22). Root/parent scope can be an event or an
//! external URI, each carried in an uppercase/lowercase tag pair.

use nostr_types::Event;

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub content: String,
    pub root_kind: Option<String>,
    pub root_target: Option<String>,
    pub parent_kind: Option<String>,
    pub parent_target: Option<String>,
}

pub fn parse(event: &Event) -> Comment {
    let tag_value = |letter: &str| event.tags.iter().find(|t| t.is_kind(letter)).map(|t| t.value().to_string());
    Comment {
        content: event.content.clone(),
        root_target: tag_value("E").or_else(|| tag_value("I")),
        root_kind: tag_value("K"),
        parent_target: tag_value("e").or_else(|| tag_value("i")),
        parent_kind: tag_value("k"),
    }
}
