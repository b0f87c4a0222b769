//! Background directory listing.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use ufd_core::{DirectoryListingProvider, ListedEntry, ListingRequest, ProviderError, fetch_listing};

/// Channel buffer size for listing results.
const LISTING_CHANNEL_SIZE: usize = 1;

/// Outcome of a background listing, paired with the request it answers.
#[derive(Debug)]
pub struct ListingResult {
    pub request: ListingRequest,
    pub outcome: Result<Vec<ListedEntry>, ProviderError>,
}

/// Start listing a focused node off the calling thread.
///
/// The listing runs on tokio's blocking pool. Cancelling `cancel` drops the
/// result instead of sending it; the provider call itself runs to completion.
/// Must be called from within a tokio runtime.
pub fn spawn_listing<P>(
    provider: P,
    request: ListingRequest,
    cancel: CancellationToken,
) -> mpsc::Receiver<ListingResult>
where
    P: DirectoryListingProvider + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LISTING_CHANNEL_SIZE);

    tokio::spawn(async move {
        let path = request.path.clone();
        let include_hidden = request.include_hidden;
        let listing =
            tokio::task::spawn_blocking(move || fetch_listing(&provider, &path, include_hidden));

        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                debug!(path = %request.path, "listing cancelled");
            }
            joined = listing => {
                let outcome = joined.unwrap_or_else(|e| Err(ProviderError::other(e.to_string())));
                let _ = tx.send(ListingResult { request, outcome }).await;
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Arc;

    use tempfile::TempDir;
    use ufd_core::{DialogConfig, DialogSession, EntryKind};

    use crate::{StdFsProvider, StdVolumes};

    #[tokio::test]
    async fn test_spawned_listing_completes_focus() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("file.txt"), "x").unwrap();

        let provider = Arc::new(StdFsProvider::new());
        let mut session =
            DialogSession::new(DialogConfig::default(), provider.clone(), &StdVolumes).unwrap();
        let root = session.tree().roots()[0];
        let mut request = session.request_focus(root).unwrap().unwrap();

        // Point the request at the temp directory instead of the host root.
        request.path = temp.path().to_string_lossy().into_owned();

        let mut rx = spawn_listing(provider, request, CancellationToken::new());
        let result = rx.recv().await.unwrap();
        let entries = result.outcome.as_ref().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name.as_str(), "file.txt");
        assert_eq!(entries[0].kind, EntryKind::File);
        assert_eq!(entries[1].kind, EntryKind::Directory);

        session.complete_focus(&result.request, result.outcome).unwrap();
        assert_eq!(session.candidates().len(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_listing_sends_nothing() {
        let temp = TempDir::new().unwrap();
        let provider = Arc::new(StdFsProvider::new());
        let mut session =
            DialogSession::new(DialogConfig::default(), provider.clone(), &StdVolumes).unwrap();
        let root = session.tree().roots()[0];
        let mut request = session.request_focus(root).unwrap().unwrap();
        request.path = temp.path().to_string_lossy().into_owned();

        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut rx = spawn_listing(provider, request, cancel);
        assert!(rx.recv().await.is_none());
    }
}
