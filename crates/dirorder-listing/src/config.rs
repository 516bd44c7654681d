use serde::{Deserialize, Serialize};

/// Configuration for building a directory listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// When `true`, directories are listed before files and each group is
    /// ordered by the numbers in its file stems when every entry has one.
    /// When `false`, the listing is plain byte-wise filename order.
    pub natural_order: bool,
}

impl ListingConfig {
    /// Plain filename order for every entry.
    pub fn lexicographic() -> Self {
        Self {
            natural_order: false,
        }
    }

    /// Directories first, numbered stems in numeric order.
    ///
    /// This is what media browsers want: `ep2` sorts before `ep10`.
    pub fn natural() -> Self {
        Self {
            natural_order: true,
        }
    }
}
