//! Directory listing backed by `std::fs`.

use std::fs;
use std::path::Path;

use tracing::warn;

use ufd_core::{DirectoryListingProvider, ProviderError};

/// Lists directories of the local host.
///
/// Entries that cannot be read individually are skipped with a warning; only
/// a failure to open the directory itself is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFsProvider;

impl StdFsProvider {
    /// Create a new provider.
    pub fn new() -> Self {
        Self
    }
}

impl DirectoryListingProvider for StdFsProvider {
    fn list(&self, path: &str, include_hidden: bool) -> Result<Vec<String>, ProviderError> {
        let read_dir = fs::read_dir(path).map_err(|e| ProviderError::io(path, e))?;

        let mut names = Vec::new();
        for entry_result in read_dir {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    warn!(path = %path, error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            // A lossy name would not resolve back to the entry.
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(os_name) => {
                    warn!(path = %path, name = ?os_name, "skipping non-UTF-8 entry");
                    continue;
                }
            };
            if !include_hidden && is_hidden(&entry, &name) {
                continue;
            }
            names.push(name);
        }

        sort_names(&mut names);
        Ok(names)
    }

    fn is_container(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }
}

#[cfg(windows)]
fn sort_names(names: &mut [String]) {
    names.sort_by_cached_key(|name| name.to_lowercase());
}

#[cfg(not(windows))]
fn sort_names(names: &mut [String]) {
    names.sort();
}

#[cfg(windows)]
fn is_hidden(entry: &fs::DirEntry, name: &str) -> bool {
    use std::os::windows::fs::MetadataExt;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

    name.starts_with('.')
        || entry
            .metadata()
            .map(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
            .unwrap_or(false)
}

#[cfg(not(windows))]
fn is_hidden(_entry: &fs::DirEntry, name: &str) -> bool {
    name.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("beta")).unwrap();
        fs::create_dir(root.join(".config")).unwrap();
        fs::write(root.join("alpha.txt"), "hello").unwrap();
        fs::write(root.join("gamma.txt"), "world").unwrap();
        fs::write(root.join(".secret"), "shh").unwrap();

        temp
    }

    fn path_str(temp: &TempDir) -> String {
        temp.path().to_string_lossy().into_owned()
    }

    #[test]
    fn test_list_sorted_without_hidden() {
        let temp = create_test_tree();
        let names = StdFsProvider.list(&path_str(&temp), false).unwrap();
        assert_eq!(names, vec!["alpha.txt", "beta", "gamma.txt"]);
    }

    #[test]
    fn test_list_with_hidden() {
        let temp = create_test_tree();
        let names = StdFsProvider.list(&path_str(&temp), true).unwrap();
        assert_eq!(names.len(), 5);
        assert!(names.contains(&".secret".to_string()));
    }

    #[test]
    fn test_empty_directory_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(StdFsProvider.list(&path_str(&temp), false).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone").to_string_lossy().into_owned();
        let err = StdFsProvider.list(&missing, false).unwrap_err();
        assert!(matches!(err, ProviderError::NotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_is_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let bad = OsStr::from_bytes(b"bad\xffdir");
        // Some filesystems refuse such names outright.
        if fs::create_dir(temp.path().join(bad)).is_err() {
            return;
        }
        fs::write(temp.path().join("good.txt"), "ok").unwrap();

        let names = StdFsProvider.list(&path_str(&temp), true).unwrap();
        assert_eq!(names, vec!["good.txt"]);
        assert!(names.iter().all(|n| !n.contains('\u{FFFD}')));
    }

    #[test]
    fn test_is_container() {
        let temp = create_test_tree();
        let root = temp.path();
        assert!(StdFsProvider.is_container(&root.join("beta").to_string_lossy()));
        assert!(!StdFsProvider.is_container(&root.join("alpha.txt").to_string_lossy()));
        assert!(!StdFsProvider.is_container(&root.join("nope").to_string_lossy()));
    }
}
