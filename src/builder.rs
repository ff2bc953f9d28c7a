//! Building records out of a header-keyed grid.
//!
//! The inverse of diffing: instead of checking a document against a table,
//! take a table and feed one attribute map per body row to a caller-supplied
//! factory, after an ordered list of attribute transformations. The factory
//! closure is the seam to whatever persistence the host test suite uses.

use crate::grid::Grid;
use crate::keys::normalize_key;

/// An ordered attribute map for one record. Keys keep the header's literal
/// spelling until a transformation rewrites them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Attributes {
        Attributes { entries: pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, value)| value.as_str())
    }

    /// Replace the value under `key`, or append a new entry.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(entry_key, _)| entry_key == key)
        {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self
            .entries
            .iter()
            .position(|(entry_key, _)| entry_key == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(entry_key, _)| entry_key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

type AttributeTransform = Box<dyn Fn(&mut Attributes)>;

/// Maps grid rows to records through ordered attribute transformations.
#[derive(Default)]
pub struct RecordBuilder {
    transforms: Vec<AttributeTransform>,
}

impl RecordBuilder {
    pub fn new() -> RecordBuilder {
        RecordBuilder::default()
    }

    pub fn transformation(mut self, f: impl Fn(&mut Attributes) + 'static) -> RecordBuilder {
        self.transforms.push(Box::new(f));
        self
    }

    /// Move the value under `from` to `to`. A no-op when `from` is absent.
    pub fn rename(self, from: impl Into<String>, to: impl Into<String>) -> RecordBuilder {
        let from = from.into();
        let to = to.into();
        self.transformation(move |attributes| {
            if let Some(value) = attributes.remove(&from) {
                attributes.set(&to, value);
            }
        })
    }

    /// Map one attribute through a value function; a missing attribute reads
    /// as an empty string.
    pub fn field(
        self,
        key: impl Into<String>,
        f: impl Fn(String) -> String + 'static,
    ) -> RecordBuilder {
        let key = key.into();
        self.transformation(move |attributes| {
            let current = attributes.get(&key).unwrap_or("").to_string();
            attributes.set(&key, f(current));
        })
    }

    /// Fold every key into its symbolic form (see [`normalize_key`]).
    pub fn underscore_keys(self) -> RecordBuilder {
        self.transformation(|attributes| {
            let folded: Vec<(String, String)> = attributes
                .iter()
                .map(|(key, value)| (normalize_key(key), value.to_string()))
                .collect();
            *attributes = Attributes::from_pairs(folded);
        })
    }

    /// Feed one transformed attribute map per body row to `factory`,
    /// collecting its outputs. The first factory error aborts the run.
    pub fn build<T, E, F>(&self, grid: &Grid, mut factory: F) -> Result<Vec<T>, E>
    where
        F: FnMut(&Attributes) -> Result<T, E>,
    {
        let grid = grid.clone().normalize();
        let mut records = Vec::new();
        for pairs in grid.hashes() {
            let mut attributes = Attributes::from_pairs(pairs);
            for transform in &self.transforms {
                transform(&mut attributes);
            }
            records.push(factory(&attributes)?);
        }
        Ok(records)
    }
}
