//! The [`DirectoryListing`]: a sorted, ranked snapshot of one directory.
//!
//! Construction enumerates the immediate children of a directory, runs the
//! sort pipeline and builds the [`RankIndex`]. It never fails: enumeration
//! problems are recorded in an [`Enumeration`] outcome next to whatever
//! entries were collected. After construction everything is read-only.

use std::fs;
use std::io;
use std::path::Path;
use std::slice;

use tracing::{debug, warn};

use crate::config::ListingConfig;
use crate::entry::DirectoryEntry;
use crate::error::ListingError;
use crate::index::RankIndex;
use crate::sort::sort_entries;

/// How enumeration of the directory went.
#[derive(Debug)]
pub enum Enumeration {
    /// Every child was read.
    Complete,
    /// Reading stopped early; the entries read before the error are listed.
    Partial { error: ListingError },
    /// Nothing could be read.
    Failed { error: ListingError },
}

impl Enumeration {
    /// The error that stopped enumeration, if any.
    pub fn error(&self) -> Option<&ListingError> {
        match self {
            Self::Complete => None,
            Self::Partial { error } | Self::Failed { error } => Some(error),
        }
    }

    /// Returns `true` if every child was read.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Returns `true` if nothing could be read.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// A deterministic, ranked listing of a directory's immediate children.
#[derive(Debug)]
pub struct DirectoryListing {
    entries: Vec<DirectoryEntry>,
    ranks: RankIndex,
    outcome: Enumeration,
}

impl DirectoryListing {
    /// List the directory at `path`.
    pub fn open(path: impl AsRef<Path>, config: &ListingConfig) -> Self {
        let path = path.as_ref();
        let (entries, outcome) = enumerate(path);
        Self::build(entries, outcome, config)
    }

    /// List the directory an already resolved entry points to.
    ///
    /// The entry's recorded kind is not trusted; if it no longer refers to a
    /// directory, the outcome carries the error the OS reports.
    pub fn open_entry(dir: &DirectoryEntry, config: &ListingConfig) -> Self {
        Self::open(&dir.path, config)
    }

    /// Sort and index entries captured elsewhere.
    ///
    /// The outcome is always [`Enumeration::Complete`].
    pub fn from_entries(entries: Vec<DirectoryEntry>, config: &ListingConfig) -> Self {
        Self::build(entries, Enumeration::Complete, config)
    }

    fn build(
        mut entries: Vec<DirectoryEntry>,
        outcome: Enumeration,
        config: &ListingConfig,
    ) -> Self {
        sort_entries(&mut entries, config);
        let ranks = RankIndex::build(&entries);
        Self {
            entries,
            ranks,
            outcome,
        }
    }

    /// How enumeration went. Check this to tell an empty directory from one
    /// that could not be read.
    pub fn outcome(&self) -> &Enumeration {
        &self.outcome
    }

    /// The sorted entries.
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Iterate over the entries in rank order.
    pub fn iter(&self) -> slice::Iter<'_, DirectoryEntry> {
        self.entries.iter()
    }

    /// Number of listed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was listed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `rank`.
    pub fn get(&self, rank: usize) -> Option<&DirectoryEntry> {
        self.entries.get(rank)
    }

    /// Rank of `entry`, or `None` if it is not part of this listing.
    pub fn rank(&self, entry: &DirectoryEntry) -> Option<usize> {
        self.ranks.get(&entry.path)
    }

    /// Rank of the entry at `path`.
    pub fn rank_of(&self, path: impl AsRef<Path>) -> Option<usize> {
        self.ranks.get(path.as_ref())
    }

    /// Rank of `entry`, or 0 when it is not listed.
    ///
    /// A miss is indistinguishable from the first entry. Prefer [`rank`](Self::rank).
    pub fn rank_or_first(&self, entry: &DirectoryEntry) -> usize {
        self.rank(entry).unwrap_or(0)
    }

    /// Returns `true` if `entry` is part of this listing.
    pub fn contains(&self, entry: &DirectoryEntry) -> bool {
        self.ranks.contains(&entry.path)
    }

    /// Up to `count` entries starting at rank `start`.
    ///
    /// Empty when `start` is past the end.
    pub fn page(&self, start: usize, count: usize) -> &[DirectoryEntry] {
        let start = start.min(self.entries.len());
        let end = start.saturating_add(count).min(self.entries.len());
        &self.entries[start..end]
    }

    /// The entry ranked right after `entry`.
    pub fn next_after(&self, entry: &DirectoryEntry) -> Option<&DirectoryEntry> {
        let rank = self.rank(entry)?;
        self.entries.get(rank + 1)
    }

    /// The entry ranked right before `entry`.
    pub fn previous_before(&self, entry: &DirectoryEntry) -> Option<&DirectoryEntry> {
        let rank = self.rank(entry)?;
        self.entries.get(rank.checked_sub(1)?)
    }
}

impl<'a> IntoIterator for &'a DirectoryListing {
    type Item = &'a DirectoryEntry;
    type IntoIter = slice::Iter<'a, DirectoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Read the immediate children of `dir`, stopping at the first error.
fn enumerate(dir: &Path) -> (Vec<DirectoryEntry>, Enumeration) {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            let error = ListingError::from_io(dir, e);
            warn!(path = %dir.display(), %error, "cannot list directory");
            return (Vec::new(), Enumeration::Failed { error });
        }
    };

    let items = read_dir.map(|item| item.map(|entry| DirectoryEntry::from_dir_entry(&entry)));
    collect_entries(dir, items)
}

/// Collect entries until the first error.
///
/// Entries read before the error are kept; the outcome is `Failed` only when
/// none were.
fn collect_entries<I>(dir: &Path, items: I) -> (Vec<DirectoryEntry>, Enumeration)
where
    I: Iterator<Item = io::Result<DirectoryEntry>>,
{
    let mut entries = Vec::new();
    for item in items {
        match item {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                let error = ListingError::from_io(dir, e);
                warn!(
                    path = %dir.display(),
                    collected = entries.len(),
                    %error,
                    "directory listing stopped early"
                );
                let outcome = if entries.is_empty() {
                    Enumeration::Failed { error }
                } else {
                    Enumeration::Partial { error }
                };
                return (entries, outcome);
            }
        }
    }

    debug!(path = %dir.display(), entries = entries.len(), "directory enumerated");
    (entries, Enumeration::Complete)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use proptest::prelude::*;

    fn names(listing: &DirectoryListing) -> Vec<String> {
        listing
            .iter()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect()
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    fn media_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in ["10_video.mkv", "2_video.mkv", "1_video.mkv"] {
            touch(dir.path(), name);
        }
        fs::create_dir(dir.path().join("zz_extras")).unwrap();
        fs::create_dir(dir.path().join("alpha")).unwrap();
        dir
    }

    #[test]
    fn lexicographic_listing_of_real_directory() {
        let dir = media_dir();
        let listing = DirectoryListing::open(dir.path(), &ListingConfig::lexicographic());
        assert!(listing.outcome().is_complete());
        assert_eq!(
            names(&listing),
            ["10_video.mkv", "1_video.mkv", "2_video.mkv", "alpha", "zz_extras"]
        );
    }

    #[test]
    fn natural_listing_of_real_directory() {
        let dir = media_dir();
        let listing = DirectoryListing::open(dir.path(), &ListingConfig::natural());
        assert!(listing.outcome().is_complete());
        assert_eq!(
            names(&listing),
            ["alpha", "zz_extras", "1_video.mkv", "2_video.mkv", "10_video.mkv"]
        );
    }

    #[test]
    fn trailing_numbers_in_real_directory() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["video_2.avi", "video_10.avi", "video_1.avi"] {
            touch(dir.path(), name);
        }
        let listing = DirectoryListing::open(dir.path(), &ListingConfig::natural());
        assert_eq!(names(&listing), ["video_1.avi", "video_2.avi", "video_10.avi"]);
    }

    #[test]
    fn mixed_group_falls_back_to_lexicographic() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["video_2.avi", "clip.avi", "video_10.avi"] {
            touch(dir.path(), name);
        }
        let listing = DirectoryListing::open(dir.path(), &ListingConfig::natural());
        assert_eq!(names(&listing), ["clip.avi", "video_10.avi", "video_2.avi"]);
    }

    #[test]
    fn entries_carry_kind_and_full_path() {
        let dir = media_dir();
        let listing = DirectoryListing::open(dir.path(), &ListingConfig::natural());
        let first = listing.get(0).unwrap();
        assert_eq!(first.path, dir.path().join("alpha"));
        assert!(first.is_directory());
        assert!(!listing.get(2).unwrap().is_directory());
    }

    #[test]
    fn empty_directory_is_complete_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        let listing = DirectoryListing::open(dir.path(), &ListingConfig::natural());
        assert!(listing.is_empty());
        assert!(listing.outcome().is_complete());
        assert!(listing.outcome().error().is_none());
    }

    #[test]
    fn missing_directory_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let listing = DirectoryListing::open(&missing, &ListingConfig::natural());

        assert!(listing.is_empty());
        assert!(listing.outcome().is_failed());
        match listing.outcome().error() {
            Some(ListingError::NotFound { path }) => assert_eq!(path, &missing),
            other => panic!("unexpected outcome: {other:?}"),
        }

        let stranger = DirectoryEntry::file(missing.join("a.mkv"));
        assert_eq!(listing.rank(&stranger), None);
        assert_eq!(listing.rank_or_first(&stranger), 0);
    }

    #[cfg(unix)]
    #[test]
    fn listing_a_file_reports_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "plain.txt");
        let plain = dir.path().join("plain.txt");
        let listing = DirectoryListing::open(plain, &ListingConfig::default());
        assert!(listing.is_empty());
        assert!(matches!(
            listing.outcome().error(),
            Some(ListingError::NotADirectory { .. })
        ));
    }

    #[test]
    fn error_after_some_entries_is_partial() {
        let dir = Path::new("/srv/media");
        let items = vec![
            Ok(DirectoryEntry::file("/srv/media/b.mkv")),
            Ok(DirectoryEntry::file("/srv/media/a.mkv")),
            Err(io::Error::other("device went away")),
            Ok(DirectoryEntry::file("/srv/media/c.mkv")),
        ];
        let (entries, outcome) = collect_entries(dir, items.into_iter());

        assert_eq!(
            entries,
            [
                DirectoryEntry::file("/srv/media/b.mkv"),
                DirectoryEntry::file("/srv/media/a.mkv"),
            ]
        );
        match &outcome {
            Enumeration::Partial { error: ListingError::Io { path, .. } } => {
                assert_eq!(path, dir)
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!outcome.is_complete());
        assert!(!outcome.is_failed());
    }

    #[test]
    fn error_before_any_entry_is_failed() {
        let dir = Path::new("/srv/media");
        let items = vec![
            Err(io::Error::from(io::ErrorKind::PermissionDenied)),
            Ok(DirectoryEntry::file("/srv/media/a.mkv")),
        ];
        let (entries, outcome) = collect_entries(dir, items.into_iter());

        assert!(entries.is_empty());
        assert!(outcome.is_failed());
        assert!(matches!(
            outcome.error(),
            Some(ListingError::PermissionDenied { .. })
        ));
    }

    #[test]
    fn partial_entries_are_sorted_and_ranked() {
        let items = vec![
            Ok(DirectoryEntry::file("/srv/media/ep_10.mkv")),
            Ok(DirectoryEntry::file("/srv/media/ep_2.mkv")),
            Err(io::Error::other("stale handle")),
        ];
        let (entries, outcome) = collect_entries(Path::new("/srv/media"), items.into_iter());
        let listing = DirectoryListing::build(entries, outcome, &ListingConfig::natural());

        assert_eq!(names(&listing), ["ep_2.mkv", "ep_10.mkv"]);
        assert_eq!(listing.rank_of("/srv/media/ep_10.mkv"), Some(1));
        assert!(matches!(listing.outcome(), Enumeration::Partial { .. }));
    }

    #[test]
    fn open_entry_matches_open() {
        let dir = media_dir();
        let config = ListingConfig::natural();
        let by_path = DirectoryListing::open(dir.path(), &config);
        let dir_entry = DirectoryEntry::from_path(dir.path());
        let by_entry = DirectoryListing::open_entry(&dir_entry, &config);
        assert_eq!(by_path.entries(), by_entry.entries());
    }

    #[test]
    fn listing_is_a_snapshot() {
        let dir = media_dir();
        let listing = DirectoryListing::open(dir.path(), &ListingConfig::natural());
        let before: Vec<PathBuf> = listing.iter().map(|e| e.path.clone()).collect();

        fs::remove_file(dir.path().join("1_video.mkv")).unwrap();
        touch(dir.path(), "0_new.mkv");

        let after: Vec<PathBuf> = listing.iter().map(|e| e.path.clone()).collect();
        assert_eq!(before, after);
        assert_eq!(listing.rank_of(dir.path().join("1_video.mkv")), Some(2));
        assert_eq!(listing.rank_of(dir.path().join("0_new.mkv")), None);
    }

    #[test]
    fn repeated_construction_is_deterministic() {
        let dir = media_dir();
        let config = ListingConfig::natural();
        let a = DirectoryListing::open(dir.path(), &config);
        let b = DirectoryListing::open(dir.path(), &config);
        assert_eq!(a.entries(), b.entries());
        for entry in &a {
            assert_eq!(a.rank(entry), b.rank(entry));
        }
    }

    #[test]
    fn rank_matches_iteration_position() {
        let dir = media_dir();
        let listing = DirectoryListing::open(dir.path(), &ListingConfig::natural());
        for (i, entry) in listing.iter().enumerate() {
            assert_eq!(listing.rank(entry), Some(i));
            assert!(listing.contains(entry));
        }
    }

    #[test]
    fn rank_ignores_recorded_kind() {
        let listing = DirectoryListing::from_entries(
            vec![DirectoryEntry::file("/m/b"), DirectoryEntry::file("/m/a")],
            &ListingConfig::lexicographic(),
        );
        assert_eq!(listing.rank(&DirectoryEntry::directory("/m/b")), Some(1));
    }

    #[test]
    fn page_is_clamped() {
        let listing = DirectoryListing::from_entries(
            ["a", "b", "c", "d", "e"].iter().map(|n| DirectoryEntry::file(*n)).collect(),
            &ListingConfig::lexicographic(),
        );
        assert_eq!(listing.page(0, 2).len(), 2);
        assert_eq!(listing.page(3, 10).len(), 2);
        assert_eq!(listing.page(4, 1)[0].path, PathBuf::from("e"));
        assert!(listing.page(5, 3).is_empty());
        assert!(listing.page(99, 3).is_empty());
        assert_eq!(listing.page(1, usize::MAX).len(), 4);
    }

    #[test]
    fn neighbours_follow_rank() {
        let listing = DirectoryListing::from_entries(
            vec![
                DirectoryEntry::file("ep_3"),
                DirectoryEntry::file("ep_1"),
                DirectoryEntry::file("ep_2"),
            ],
            &ListingConfig::natural(),
        );
        let first = DirectoryEntry::file("ep_1");
        let last = DirectoryEntry::file("ep_3");

        assert_eq!(listing.previous_before(&first), None);
        assert_eq!(listing.next_after(&first).unwrap().path, PathBuf::from("ep_2"));
        assert_eq!(listing.previous_before(&last).unwrap().path, PathBuf::from("ep_2"));
        assert_eq!(listing.next_after(&last), None);
        assert_eq!(listing.next_after(&DirectoryEntry::file("missing")), None);
    }

    #[test]
    fn listing_can_be_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DirectoryListing>();

        let dir = media_dir();
        let listing = DirectoryListing::open(dir.path(), &ListingConfig::natural());
        let listing = std::sync::Arc::new(listing);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let listing = listing.clone();
                std::thread::spawn(move || {
                    listing.iter().map(|e| listing.rank(e)).collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            let ranks = handle.join().unwrap();
            assert_eq!(ranks, (0..listing.len()).map(Some).collect::<Vec<_>>());
        }
    }

    proptest! {
        #[test]
        fn rank_is_consistent_for_any_input(
            raw in prop::collection::btree_set("[a-z]{0,2}[0-9]{0,3}", 0..32),
            natural in any::<bool>(),
        ) {
            let entries: Vec<DirectoryEntry> = raw
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let path = format!("/lib/{name}");
                    if i % 3 == 0 {
                        DirectoryEntry::directory(path)
                    } else {
                        DirectoryEntry::file(path)
                    }
                })
                .collect();
            let config = ListingConfig { natural_order: natural };
            let listing = DirectoryListing::from_entries(entries.clone(), &config);

            prop_assert_eq!(listing.len(), entries.len());
            for (i, entry) in listing.iter().enumerate() {
                prop_assert_eq!(listing.rank(entry), Some(i));
            }
        }
    }
}
