//! Filter snapshots: the search term plus structured filters of a list view.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::ModelError;

/// Opaque key describing "which result set" a list view is showing.
///
/// Two snapshots are equal when they would make the server return the same
/// records. Filters are kept in a `BTreeMap` so equality and the fingerprint
/// do not depend on insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSnapshot {
    /// Free-text search term as typed by the user.
    #[serde(default)]
    pub q: String,
    /// Structured filters (`fornecedor_id`, `date_from`, ...).
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

impl FilterSnapshot {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into().trim().to_string(),
            filters: BTreeMap::new(),
        }
    }

    /// Add a structured filter. Blank values are dropped, matching how an
    /// empty filter input does not constrain the listing.
    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into().trim().to_string();
        if !value.is_empty() {
            self.filters.insert(key.into(), value);
        }
        self
    }

    /// Parse a `KEY=VALUE` command-line filter entry.
    pub fn parse_entry(entry: &str) -> Result<(String, String), ModelError> {
        match entry.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(ModelError::InvalidFilterEntry(entry.to_string())),
        }
    }

    /// True when neither a search term nor any filter is set.
    pub fn is_unfiltered(&self) -> bool {
        self.q.is_empty() && self.filters.is_empty()
    }

    /// Stable hex SHA-256 of the snapshot, used to detect filter changes
    /// across reloads without storing the filter values themselves.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        feed(&mut hasher, &self.q);
        for (key, value) in &self.filters {
            feed(&mut hasher, key);
            feed(&mut hasher, value);
        }
        hex::encode(hasher.finalize())
    }
}

fn feed(hasher: &mut Sha256, part: &str) {
    hasher.update((part.len() as u64).to_le_bytes());
    hasher.update(part.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_ignores_insertion_order() {
        let a = FilterSnapshot::new("abc")
            .with_filter("fornecedor", "10")
            .with_filter("data", "2024-01-01");
        let b = FilterSnapshot::new("abc")
            .with_filter("data", "2024-01-01")
            .with_filter("fornecedor", "10");
        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn fingerprint_is_not_ambiguous_on_concatenation() {
        let a = FilterSnapshot::new("").with_filter("ab", "c");
        let b = FilterSnapshot::new("").with_filter("a", "bc");
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn blank_filters_are_dropped() {
        let snapshot = FilterSnapshot::new("  ").with_filter("q2", "   ");
        assert!(snapshot.is_unfiltered());
    }

    #[test]
    fn parse_entry_requires_key() {
        assert_eq!(
            FilterSnapshot::parse_entry("fornecedor=10").unwrap(),
            ("fornecedor".to_string(), "10".to_string())
        );
        assert!(FilterSnapshot::parse_entry("=10").is_err());
        assert!(FilterSnapshot::parse_entry("fornecedor").is_err());
    }
}
