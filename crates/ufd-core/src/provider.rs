//! Listing and volume provider interfaces.

use std::sync::Arc;

use compact_str::CompactString;

use crate::codec;
use crate::error::ProviderError;
use crate::node::EntryKind;

/// Supplies the entries of a directory.
pub trait DirectoryListingProvider {
    /// List entry names under `path`, sorted ascending by name.
    ///
    /// Hidden entries are left out unless `include_hidden` is set. An empty
    /// directory yields an empty list, not an error.
    fn list(&self, path: &str, include_hidden: bool) -> Result<Vec<String>, ProviderError>;

    /// Whether `path` denotes something that can be listed.
    fn is_container(&self, path: &str) -> bool;
}

/// Supplies the root-level volumes.
pub trait VolumeEnumerator {
    /// Volume labels, in display order.
    fn enumerate(&self) -> Result<Vec<String>, ProviderError>;
}

impl<T: DirectoryListingProvider + ?Sized> DirectoryListingProvider for Arc<T> {
    fn list(&self, path: &str, include_hidden: bool) -> Result<Vec<String>, ProviderError> {
        (**self).list(path, include_hidden)
    }

    fn is_container(&self, path: &str) -> bool {
        (**self).is_container(path)
    }
}

impl<T: DirectoryListingProvider + ?Sized> DirectoryListingProvider for &T {
    fn list(&self, path: &str, include_hidden: bool) -> Result<Vec<String>, ProviderError> {
        (**self).list(path, include_hidden)
    }

    fn is_container(&self, path: &str) -> bool {
        (**self).is_container(path)
    }
}

impl<T: VolumeEnumerator + ?Sized> VolumeEnumerator for &T {
    fn enumerate(&self) -> Result<Vec<String>, ProviderError> {
        (**self).enumerate()
    }
}

/// One classified entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    /// Entry name.
    pub name: CompactString,
    /// Directory if the provider reports a container, file otherwise.
    pub kind: EntryKind,
}

impl ListedEntry {
    /// Create a listed entry.
    pub fn new(name: impl Into<CompactString>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// List `path` and look up each entry's kind. Provider order is kept.
pub fn fetch_listing<P>(
    provider: &P,
    path: &str,
    include_hidden: bool,
) -> Result<Vec<ListedEntry>, ProviderError>
where
    P: DirectoryListingProvider + ?Sized,
{
    let names = provider.list(path, include_hidden)?;
    let entries = names
        .into_iter()
        .filter(|name| !name.is_empty())
        .map(|name| {
            let kind = if provider.is_container(&codec::join(path, &name)) {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            ListedEntry::new(name, kind)
        })
        .collect();
    Ok(entries)
}
