//! Error types for the listing crate.

use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while enumerating a directory.
///
/// These never escape construction of a [`DirectoryListing`](crate::DirectoryListing);
/// they are recorded in its [`Enumeration`](crate::Enumeration) outcome.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    /// The directory does not exist.
    #[error("directory not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The directory exists but cannot be read.
    #[error("permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    /// The path exists but is not a directory.
    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// Any other I/O failure while reading the directory.
    #[error("io error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ListingError {
    /// Classify an I/O error raised while reading `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source: err },
        }
    }

    /// The directory the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::PermissionDenied { path }
            | Self::NotADirectory { path }
            | Self::Io { path, .. } => path,
        }
    }
}
