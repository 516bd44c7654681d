//! Directory entry types captured during enumeration.

use std::ffi::OsStr;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// What kind of filesystem object an entry refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory (symlinks to directories included).
    Directory,
    /// Anything else: sockets, devices, fifos, dangling symlinks.
    Other,
}

impl EntryKind {
    /// Classify a `std::fs::FileType`, following symlinks through `path`.
    pub fn from_file_type(file_type: fs::FileType, path: &Path) -> Self {
        if file_type.is_symlink() {
            return match fs::metadata(path) {
                Ok(meta) => Self::from_resolved(meta.file_type()),
                Err(_) => Self::Other,
            };
        }
        Self::from_resolved(file_type)
    }

    fn from_resolved(file_type: fs::FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// A single child of a listed directory.
///
/// The entry is a self-contained snapshot: it keeps no handle to the
/// filesystem, so it stays valid after the directory changes. Equality and
/// hashing use the path only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Path as produced by enumeration (the listed directory joined with the name).
    pub path: PathBuf,
    /// Kind of the object at `path` when it was captured.
    pub kind: EntryKind,
}

impl DirectoryEntry {
    /// Create a new entry.
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Shorthand for a regular file entry.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(path, EntryKind::File)
    }

    /// Shorthand for a directory entry.
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::new(path, EntryKind::Directory)
    }

    /// Capture an entry from a `read_dir` item.
    pub fn from_dir_entry(entry: &fs::DirEntry) -> Self {
        let path = entry.path();
        let kind = match entry.file_type() {
            Ok(file_type) => EntryKind::from_file_type(file_type, &path),
            Err(_) => EntryKind::Other,
        };
        Self { path, kind }
    }

    /// Resolve an arbitrary path into an entry by querying its metadata.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = match fs::symlink_metadata(&path) {
            Ok(meta) => EntryKind::from_file_type(meta.file_type(), &path),
            Err(_) => EntryKind::Other,
        };
        Self { path, kind }
    }

    /// The final path component, or an empty string for paths without one.
    pub fn file_name(&self) -> &OsStr {
        self.path.file_name().unwrap_or_default()
    }

    /// The file name without its final extension.
    pub fn stem(&self) -> &OsStr {
        self.path.file_stem().unwrap_or_default()
    }

    /// Returns `true` if this entry is a directory.
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

impl PartialEq for DirectoryEntry {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for DirectoryEntry {}

impl Hash for DirectoryEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}
