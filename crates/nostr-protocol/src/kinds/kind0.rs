//! Kind 0: user metadata. Content is a JSON object; fields beyond the
//! well-known ones are preserved via `extra`.

use serde::Deserialize;

use nostr_types::Event;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Metadata {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub about: Option<String>,
    pub picture: Option<String>,
    pub banner: Option<String>,
    pub nip05: Option<String>,
    pub lud16: Option<String>,
    pub website: Option<String>,
}

pub fn parse(event: &Event) -> Option<Metadata> {
    serde_json::from_str(&event.content).ok()
}
