//! Header key normalization and resolution.
//!
//! A transformation or whitelist entry may address a column by a symbolic
//! key, by the literal header text, or by position. All symbolic lookups go
//! through one normalization function so `full_name`, `"Full Name"`, and
//! `"full name"` select the same column.

use crate::grid::Cell;

/// Fold a header text into its symbolic key form: lowercase, punctuation and
/// whitespace runs collapsed to a single `_`, no leading/trailing `_`.
pub fn normalize_key(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    let mut pending_separator = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !key.is_empty() {
                key.push('_');
            }
            pending_separator = false;
            for lower in ch.to_lowercase() {
                key.push(lower);
            }
        } else {
            pending_separator = true;
        }
    }
    key
}

/// How a header transformation addresses the column it rewrites.
///
/// Resolution never fails: an unknown name or an out-of-range index makes the
/// transformation a no-op. This permissiveness is deliberate and part of the
/// public contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderKey {
    /// Resolved by normalizing each header cell's text and matching it
    /// against this name's own normalization.
    Named(String),
    /// A zero-based column index.
    Positional(usize),
}

impl HeaderKey {
    pub fn resolve(&self, header: &[Cell]) -> Option<usize> {
        match self {
            HeaderKey::Positional(index) => (*index < header.len()).then_some(*index),
            HeaderKey::Named(name) => {
                let wanted = normalize_key(name);
                header
                    .iter()
                    .position(|cell| normalize_key(&cell.text) == wanted)
            }
        }
    }
}

impl From<&str> for HeaderKey {
    fn from(name: &str) -> HeaderKey {
        HeaderKey::Named(name.to_string())
    }
}

impl From<String> for HeaderKey {
    fn from(name: String) -> HeaderKey {
        HeaderKey::Named(name)
    }
}

impl From<usize> for HeaderKey {
    fn from(index: usize) -> HeaderKey {
        HeaderKey::Positional(index)
    }
}

/// Derive one unique key per header cell for hash-keyed row views.
///
/// Preference order per column: the normalized text, then the literal text,
/// then the 1-based column index as a string.
pub(crate) fn derive_keys(header: &[Cell]) -> Vec<String> {
    let mut used: rustc_hash::FxHashSet<String> = rustc_hash::FxHashSet::default();
    let mut keys = Vec::with_capacity(header.len());
    for (index, cell) in header.iter().enumerate() {
        let normalized = normalize_key(&cell.text);
        let mut key = if normalized.is_empty() {
            cell.text.clone()
        } else {
            normalized
        };
        if key.is_empty() || used.contains(&key) {
            key = cell.text.clone();
            if key.is_empty() || used.contains(&key) {
                key = (index + 1).to_string();
            }
        }
        used.insert(key.clone());
        keys.push(key);
    }
    keys
}
