//! Kind 1: short text note. Projects reply/root `e` tags and `p` mentions.

use nostr_types::Event;

#[derive(Debug, Clone, PartialEq)]
pub struct TextNote {
    pub content: String,
    pub reply_to: Option<String>,
    pub root: Option<String>,
    pub mentions: Vec<String>,
}

pub fn parse(event: &Event) -> TextNote {
    let e_tags: Vec<_> = event.tags.iter().filter(|t| t.is_kind("e")).collect();
    let root = e_tags
        .iter()
        .find(|t| t.info().first().map(String::as_str) == Some("root"))
        .or(e_tags.first())
        .map(|t| t.value().to_string());
    let reply_to = e_tags
        .iter()
        .find(|t| t.info().first().map(String::as_str) == Some("reply"))
        .or(e_tags.last())
        .map(|t| t.value().to_string());
    let mentions = event
        .tags
        .iter()
        .filter(|t| t.is_kind("p"))
        .map(|t| t.value().to_string())
        .collect();

    TextNote {
        content: event.content.clone(),
        reply_to,
        root,
        mentions,
    }
}
