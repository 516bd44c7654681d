//! Deterministic directory listings.
//!
//! Reads the immediate children of a directory, orders them, and offers O(1)
//! lookup of an entry's rank in that order. Two orderings are available:
//!
//! - **lexicographic**: file names compared byte by byte;
//! - **natural**: directories before files, and within each group stems
//!   ordered by their leading (or else trailing) number when every entry in
//!   the group has one, so `ep2` comes before `ep10`.
//!
//! # Key Types
//!
//! - [`DirectoryListing`] -- The sorted, ranked snapshot of a directory
//! - [`DirectoryEntry`] -- A captured child (path + kind)
//! - [`Enumeration`] -- Whether reading the directory completed, stopped early, or failed
//! - [`ListingConfig`] -- Ordering options
//! - [`RankIndex`] -- Path to position map backing rank lookups

pub mod config;
pub mod entry;
pub mod error;
pub mod index;
pub mod listing;
pub mod natural;
pub mod sort;

pub use config::ListingConfig;
pub use entry::{DirectoryEntry, EntryKind};
pub use error::ListingError;
pub use index::RankIndex;
pub use listing::{DirectoryListing, Enumeration};
pub use natural::{GroupOrder, StemNumbers};
pub use sort::sort_entries;
