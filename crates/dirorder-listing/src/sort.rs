//! The sort pipeline applied to freshly enumerated entries.

use tracing::debug;

use crate::config::ListingConfig;
use crate::entry::DirectoryEntry;
use crate::natural::order_group;

/// Sort entries in place according to `config`.
///
/// Entries are first ordered by file name using raw byte comparison. With
/// natural ordering enabled, directories are then moved ahead of everything
/// else and each of the two groups is reordered by its stem numbers where
/// possible. Both passes are stable.
pub fn sort_entries(entries: &mut Vec<DirectoryEntry>, config: &ListingConfig) {
    if entries.is_empty() {
        return;
    }

    sort_by_name(entries);

    if !config.natural_order {
        return;
    }

    let (mut directories, mut files): (Vec<_>, Vec<_>) =
        entries.drain(..).partition(DirectoryEntry::is_directory);

    let dir_order = order_group(&mut directories);
    let file_order = order_group(&mut files);
    debug!(
        directories = directories.len(),
        files = files.len(),
        ?dir_order,
        ?file_order,
        "natural ordering applied"
    );

    entries.append(&mut directories);
    entries.append(&mut files);
}

/// Stable ascending sort by final path component, compared byte by byte.
fn sort_by_name(entries: &mut [DirectoryEntry]) {
    entries.sort_by(|a, b| {
        a.file_name()
            .as_encoded_bytes()
            .cmp(b.file_name().as_encoded_bytes())
    });
}
