use serde::{Deserialize, Serialize};

/// A single Nostr tag: wire form `[type, data, info...]`. Stored as a flat
/// ordered sequence of strings so canonical serialization (which hashes tags
/// as arrays-of-arrays-of-strings) and round-tripping are both just "the
/// array, unchanged."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(Vec<String>);

impl Tag {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Tag(vec![kind.into(), value.into()])
    }

    pub fn with_info(
        kind: impl Into<String>,
        value: impl Into<String>,
        info: impl IntoIterator<Item = String>,
    ) -> Self {
        let mut parts = vec![kind.into(), value.into()];
        parts.extend(info);
        Tag(parts)
    }

    pub fn from_parts(parts: Vec<String>) -> Self {
        Tag(parts)
    }

    pub fn kind(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or("")
    }

    pub fn value(&self) -> &str {
        self.0.get(1).map(String::as_str).unwrap_or("")
    }

    pub fn info(&self) -> &[String] {
        if self.0.len() > 2 {
            &self.0[2..]
        } else {
            &[]
        }
    }

    pub fn as_parts(&self) -> &[String] {
        &self.0
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind() == kind
    }
}
