//! Header and parameter containers owned by a `Request`.
//!
//! # Design
//! `HeaderStore` is a flat name→value map: headers have no multi-value
//! semantics here, the last write for a name wins. `ValueStore` is an ordered
//! multi-map backed by a `Vec` of pairs: the same name may appear any number
//! of times and insertion order is preserved, which matters when the pairs
//! are re-encoded into a query string or a form body.

use std::collections::HashMap;

/// HTTP headers for an outbound request. Last write per name wins.
#[derive(Debug, Clone, Default)]
pub struct HeaderStore {
    entries: HashMap<String, String>,
}

impl HeaderStore {
    /// Insert a header, overwriting any previous value for the same name.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Value for `name`, or the empty string when the header is not set.
    pub fn get(&self, name: &str) -> &str {
        self.entries.get(name).map(String::as_str).unwrap_or("")
    }

    /// Remove `name`. No-op when the header is not set.
    pub fn del(&mut self, name: &str) {
        self.entries.remove(name);
    }

    /// Reset to an empty store.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Ordered multi-valued parameters, used for both the query string and the
/// request body depending on which encode path consumes them.
#[derive(Debug, Clone, Default)]
pub struct ValueStore {
    pairs: Vec<(String, String)>,
}

impl ValueStore {
    /// Append a pair. Duplicate names are kept, in insertion order.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
