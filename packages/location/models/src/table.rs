//! Insertion-ordered location table.
//!
//! The dataset is a single JSON object mapping location keys to records.
//! Document order is significant (the `en-US` option list keeps it), so
//! the table is backed by an [`IndexMap`] rather than a `HashMap`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::LocationRecord;

/// Keyed table of [`LocationRecord`]s in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationTable(IndexMap<String, LocationRecord>);

impl LocationTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, keeping the position of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, record: LocationRecord) {
        self.0.insert(key.into(), record);
    }

    /// Looks up a record by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&LocationRecord> {
        self.0.get(key)
    }

    /// Whether `key` is present. Empty keys are never present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        !key.is_empty() && self.0.contains_key(key)
    }

    /// Iterates `(key, record)` pairs in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocationRecord)> {
        self.0.iter().map(|(k, r)| (k.as_str(), r))
    }

    /// Iterates keys in dataset order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `(parent, child)` pairs where a subdivision key does not
    /// exist in the table.
    #[must_use]
    pub fn dangling_subdivisions(&self) -> Vec<(&str, &str)> {
        self.iter()
            .flat_map(|(key, record)| {
                record
                    .subdivisions
                    .iter()
                    .filter(|child| !self.0.contains_key(child.as_str()))
                    .map(move |child| (key, child.as_str()))
            })
            .collect()
    }
}

impl FromIterator<(String, LocationRecord)> for LocationTable {
    fn from_iter<T: IntoIterator<Item = (String, LocationRecord)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
