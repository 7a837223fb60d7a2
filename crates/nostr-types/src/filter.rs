use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::event::Timestamp;
use crate::keys::{EventId, PublicKey};

/// A subscription filter (NIP-01 `REQ`). Every field is optional; absent
/// fields are omitted entirely from the wire object rather than emitted as
/// `null`. Single-letter tag filters (`#e`, `#p`, …) are stored generically
/// since NIP-01 allows any letter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub ids: Option<Vec<EventId>>,
    pub authors: Option<Vec<PublicKey>>,
    pub kinds: Option<Vec<u64>>,
    pub since: Option<Timestamp>,
    pub until: Option<Timestamp>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    /// Keyed by the bare letter (`'e'`, `'p'`, …), values are the tag's data
    /// strings to match against.
    pub tags: BTreeMap<char, Vec<String>>,
}

impl Filter {
    pub fn new() -> Self {
        Filter::default()
    }

    pub fn with_kinds(mut self, kinds: Vec<u64>) -> Self {
        self.kinds = Some(kinds);
        self
    }

    pub fn with_authors(mut self, authors: Vec<PublicKey>) -> Self {
        self.authors = Some(authors);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_tag(mut self, letter: char, values: Vec<String>) -> Self {
        self.tags.insert(letter, values);
        self
    }

    pub fn matches_kind(&self, kind: u64) -> bool {
        self.kinds.as_ref().map_or(true, |ks| ks.contains(&kind))
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut len = 0;
        if self.ids.is_some() {
            len += 1;
        }
        if self.authors.is_some() {
            len += 1;
        }
        if self.kinds.is_some() {
            len += 1;
        }
        if self.since.is_some() {
            len += 1;
        }
        if self.until.is_some() {
            len += 1;
        }
        if self.limit.is_some() {
            len += 1;
        }
        if self.search.is_some() {
            len += 1;
        }
        len += self.tags.len();

        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(ids) = &self.ids {
            map.serialize_entry("ids", ids)?;
        }
        if let Some(authors) = &self.authors {
            map.serialize_entry("authors", authors)?;
        }
        if let Some(kinds) = &self.kinds {
            map.serialize_entry("kinds", kinds)?;
        }
        if let Some(since) = &self.since {
            map.serialize_entry("since", &since.0)?;
        }
        if let Some(until) = &self.until {
            map.serialize_entry("until", &until.0)?;
        }
        if let Some(limit) = &self.limit {
            map.serialize_entry("limit", limit)?;
        }
        if let Some(search) = &self.search {
            map.serialize_entry("search", search)?;
        }
        for (letter, values) in &self.tags {
            map.serialize_entry(&format!("#{letter}"), values)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: BTreeMap<String, serde_json::Value> = BTreeMap::deserialize(deserializer)?;
        let mut filter = Filter::new();
        for (key, value) in raw {
            use serde::de::Error as _;
            if let Some(letter) = key.strip_prefix('#') {
                if let Some(c) = letter.chars().next() {
                    let values: Vec<String> =
                        serde_json::from_value(value).map_err(D::Error::custom)?;
                    filter.tags.insert(c, values);
                }
                continue;
            }
            match key.as_str() {
                "ids" => filter.ids = Some(serde_json::from_value(value).map_err(D::Error::custom)?),
                "authors" => {
                    filter.authors = Some(serde_json::from_value(value).map_err(D::Error::custom)?)
                }
                "kinds" => {
                    filter.kinds = Some(serde_json::from_value(value).map_err(D::Error::custom)?)
                }
                "since" => {
                    let v: i64 = serde_json::from_value(value).map_err(D::Error::custom)?;
                    filter.since = Some(Timestamp(v));
                }
                "until" => {
                    let v: i64 = serde_json::from_value(value).map_err(D::Error::custom)?;
                    filter.until = Some(Timestamp(v));
                }
                "limit" => {
                    filter.limit = Some(serde_json::from_value(value).map_err(D::Error::custom)?)
                }
                "search" => {
                    filter.search = Some(serde_json::from_value(value).map_err(D::Error::custom)?)
                }
                _ => { /* unknown filter key: ignored */ }
            }
        }
        Ok(filter)
    }
}
