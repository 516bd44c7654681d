//! Numeric ("human") ordering of a group of entries.
//!
//! A stem is decomposed as `{leading digits}{non-digits}{trailing digits}`,
//! with the whole stem consumed. A group is reordered by one of the two
//! numbers only when *every* entry in it has that number; a single entry
//! without one keeps the whole group in its incoming order.

use once_cell::sync::Lazy;
use regex::bytes::{Match, Regex};

use crate::entry::DirectoryEntry;

static STEM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u)^([0-9]*)[^0-9]*([0-9]*)$").expect("stem pattern compiles"));

/// Numbers found at the edges of a file stem.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StemNumbers {
    /// Value of the digit run the stem starts with.
    pub leading: Option<u64>,
    /// Value of the digit run the stem ends with.
    pub trailing: Option<u64>,
}

impl StemNumbers {
    /// Decompose a raw stem.
    ///
    /// Stems with digits in the middle (`a1b2`) don't match at all. A digit
    /// run too large for `u64` is treated as absent.
    pub fn parse(stem: &[u8]) -> Self {
        let Some(caps) = STEM_PATTERN.captures(stem) else {
            return Self::default();
        };
        Self {
            leading: caps.get(1).and_then(digits_value),
            trailing: caps.get(2).and_then(digits_value),
        }
    }

    /// Numbers of an entry's file stem.
    pub fn of(entry: &DirectoryEntry) -> Self {
        Self::parse(entry.stem().as_encoded_bytes())
    }
}

fn digits_value(m: Match<'_>) -> Option<u64> {
    if m.is_empty() {
        return None;
    }
    std::str::from_utf8(m.as_bytes()).ok()?.parse().ok()
}

/// How a group ended up ordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupOrder {
    /// By the number each stem starts with.
    Leading,
    /// By the number each stem ends with.
    Trailing,
    /// Incoming (lexicographic) order kept.
    Unchanged,
}

/// Reorder a group by leading or trailing stem numbers.
///
/// The sort is stable, so entries sharing a number keep their incoming
/// relative order.
pub fn order_group(group: &mut Vec<DirectoryEntry>) -> GroupOrder {
    if group.is_empty() {
        return GroupOrder::Unchanged;
    }

    let numbers: Vec<StemNumbers> = group.iter().map(StemNumbers::of).collect();

    let keys: Option<Vec<u64>> = numbers.iter().map(|n| n.leading).collect();
    if let Some(keys) = keys {
        apply_keys(group, keys);
        return GroupOrder::Leading;
    }

    let keys: Option<Vec<u64>> = numbers.iter().map(|n| n.trailing).collect();
    if let Some(keys) = keys {
        apply_keys(group, keys);
        return GroupOrder::Trailing;
    }

    GroupOrder::Unchanged
}

fn apply_keys(group: &mut Vec<DirectoryEntry>, keys: Vec<u64>) {
    let mut keyed: Vec<(u64, DirectoryEntry)> = keys.into_iter().zip(group.drain(..)).collect();
    keyed.sort_by_key(|(key, _)| *key);
    group.extend(keyed.into_iter().map(|(_, entry)| entry));
}
