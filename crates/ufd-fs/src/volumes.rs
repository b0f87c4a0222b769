//! Root volume discovery.

use tracing::debug;

use ufd_core::{ProviderError, VolumeEnumerator};

/// Enumerates the browsable roots of the local host.
///
/// Unix hosts have a single root volume with an empty label (path `/`).
/// Windows hosts report every mounted drive letter, `A:` to `Z:`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdVolumes;

impl StdVolumes {
    /// Create a new enumerator.
    pub fn new() -> Self {
        Self
    }
}

impl VolumeEnumerator for StdVolumes {
    #[cfg(unix)]
    fn enumerate(&self) -> Result<Vec<String>, ProviderError> {
        debug!("using single root volume");
        Ok(vec![String::new()])
    }

    #[cfg(windows)]
    fn enumerate(&self) -> Result<Vec<String>, ProviderError> {
        let drives: Vec<String> = (b'A'..=b'Z')
            .map(|letter| format!("{}:", letter as char))
            .filter(|drive| std::path::Path::new(&format!("{drive}\\")).exists())
            .collect();

        debug!(count = drives.len(), "found drives");
        if drives.is_empty() {
            return Err(ProviderError::other("No mounted drives found"));
        }
        Ok(drives)
    }

    #[cfg(not(any(unix, windows)))]
    fn enumerate(&self) -> Result<Vec<String>, ProviderError> {
        debug!("no volume support on this target");
        Err(ProviderError::Unsupported)
    }
}
