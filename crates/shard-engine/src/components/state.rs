use std::collections::BTreeMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use crate::api::types::Code;

/// Decode a code-keyed map entry by entry. Keys that are not codes and
/// values of the wrong shape are dropped so the rest of the map survives.
fn lenient_code_map<'de, D, V>(deserializer: D) -> Result<BTreeMap<Code, V>, D::Error>
where
    D: Deserializer<'de>,
    V: DeserializeOwned,
{
    let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| {
            let entry = Code::parse(&key).zip(serde_json::from_value(value).ok());
            if entry.is_none() {
                log::warn!("state: dropping unreadable entry {key:?}");
            }
            entry
        })
        .collect())
}

/// Codes whose choice the reader has followed at least once.
/// Persisted as `{ "keys": { "05": true, ... } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitedSet {
    #[serde(default, deserialize_with = "lenient_code_map")]
    keys: BTreeMap<Code, bool>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: Code) {
        self.keys.insert(code, true);
    }

    pub fn contains(&self, code: Code) -> bool {
        self.keys.get(&code).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.keys.values().filter(|v| **v).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Captured narrative text per code. Persisted as `{ "05": "text", ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FragmentStore {
    texts: BTreeMap<Code, String>,
}

impl<'de> Deserialize<'de> for FragmentStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_code_map(deserializer).map(|texts| Self { texts })
    }
}

impl FragmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `text` for `code`, replacing any earlier capture.
    /// Empty text is ignored. Returns whether the stored value changed.
    pub fn insert(&mut self, code: Code, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.is_empty() || self.get(code) == Some(text.as_str()) {
            return false;
        }
        self.texts.insert(code, text);
        true
    }

    pub fn get(&self, code: Code) -> Option<&str> {
        self.texts.get(&code).map(String::as_str).filter(|t| !t.is_empty())
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Failed puzzle submissions since the last reset. Persisted as `{ "n": 2 }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptCounter {
    #[serde(default)]
    n: u32,
}

impl AttemptCounter {
    pub fn new(n: u32) -> Self {
        Self { n }
    }

    pub fn count(self) -> u32 {
        self.n
    }

    /// The counter after one more failure.
    pub fn incremented(self) -> Self {
        Self { n: self.n.saturating_add(1) }
    }
}
