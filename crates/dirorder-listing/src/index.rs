//! Reverse index from entry identity to its position in a listing.
//!
//! The [`RankIndex`] is built once from the final, sorted sequence and is
//! never mutated afterwards, so `rank(e)` always equals the position at
//! which iteration yields `e`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::entry::DirectoryEntry;

/// Maps each entry path to its zero-based position.
#[derive(Clone, Debug, Default)]
pub struct RankIndex {
    ranks: HashMap<PathBuf, usize>,
}

impl RankIndex {
    /// Index a sorted sequence.
    ///
    /// If a path occurs more than once, its first position is kept.
    pub fn build(entries: &[DirectoryEntry]) -> Self {
        let mut ranks = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            ranks.entry(entry.path.clone()).or_insert(position);
        }
        Self { ranks }
    }

    /// Position of the entry at `path`, if indexed.
    pub fn get(&self, path: &Path) -> Option<usize> {
        self.ranks.get(path).copied()
    }

    /// Returns `true` if `path` is indexed.
    pub fn contains(&self, path: &Path) -> bool {
        self.ranks.contains_key(path)
    }

    /// Number of distinct indexed paths.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Returns `true` if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}
