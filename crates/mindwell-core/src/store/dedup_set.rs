//! Append-only deduplicating set.
//!
//! Serializes to an ordered sequence (set iteration order, not significant)
//! so the persisted document stays a plain JSON array, and reconstructs the
//! set on load. The live type never shrinks: there is no remove operation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DedupSet<T: Ord>(BTreeSet<T>);

impl<T: Ord> DedupSet<T> {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Insert a value. Returns `true` if it was not already present.
    pub fn insert(&mut self, value: T) -> bool {
        self.0.insert(value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.0.contains(value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
}

impl<T: Ord> FromIterator<T> for DedupSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
