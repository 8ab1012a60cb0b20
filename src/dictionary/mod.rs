//! Risk dictionary snapshots.
//!
//! - [`builtin`]: the curated default terms used when no config supplies any.
//! - [`store`]: holds the current snapshot and swaps it atomically on reload.
//!
//! A [`Dictionary`] is validated once when it is built and is immutable
//! afterwards; every classification pass reads the same snapshot from start
//! to end.

pub mod builtin;
pub mod store;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CheckError, Result};
use crate::models::RiskLevel;
use crate::tagger::tokenizer::normalize;

/// One curated term: the lookup key, its severity and why it is flagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub key: String,
    pub level: RiskLevel,
    #[serde(default)]
    pub explanation: String,
}

impl DictionaryEntry {
    pub fn new(key: impl Into<String>, level: RiskLevel, explanation: impl Into<String>) -> Self {
        DictionaryEntry {
            key: key.into(),
            level,
            explanation: explanation.into(),
        }
    }
}

/// Validated, ordered mapping from normalized key to entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    version: Option<String>,
    entries: BTreeMap<String, DictionaryEntry>,
}

impl Dictionary {
    /// Build a snapshot, normalizing every key (trim + lowercase).
    ///
    /// Fails on an empty key, a duplicate key after normalization, or an
    /// entry whose level is `unknown`.
    pub fn from_entries<I>(version: Option<String>, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = DictionaryEntry>,
    {
        let mut map = BTreeMap::new();

        for (position, entry) in entries.into_iter().enumerate() {
            let key = normalize(&entry.key);
            if key.is_empty() {
                return Err(CheckError::EmptyKey { position });
            }
            if entry.level == RiskLevel::Unknown {
                return Err(CheckError::UnknownLevel { key });
            }
            if map.contains_key(&key) {
                return Err(CheckError::DuplicateKey { key });
            }
            map.insert(
                key.clone(),
                DictionaryEntry {
                    key,
                    level: entry.level,
                    explanation: entry.explanation,
                },
            );
        }

        debug!(
            terms = map.len(),
            version = version.as_deref().unwrap_or("-"),
            "dictionary snapshot built"
        );

        Ok(Dictionary {
            version,
            entries: map,
        })
    }

    /// A new snapshot with `entry` added to this one's terms.
    pub fn with_entry(&self, entry: DictionaryEntry) -> Result<Self> {
        let entries = self.entries.values().cloned().chain(std::iter::once(entry));
        Dictionary::from_entries(self.version.clone(), entries)
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&DictionaryEntry> {
        self.entries.get(key)
    }

    /// Entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = &DictionaryEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
