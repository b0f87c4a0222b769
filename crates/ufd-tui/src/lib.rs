//! Terminal front-end for the file dialog.
//!
//! Drives a [`DialogSession`] with two panes: a lazily expanded volume tree
//! on the left and the candidates of the focused node on the right. Listings
//! run in the background, so the UI stays responsive on slow mounts.
//!
//! # Usage
//!
//! ```rust,no_run
//! use ufd_core::{DialogConfig, DialogSession};
//! use ufd_fs::{StdFsProvider, StdVolumes};
//!
//! let session = DialogSession::new(DialogConfig::default(), StdFsProvider, &StdVolumes)?;
//! let outcome = ufd_tui::run(session)?;
//! for path in outcome.paths {
//!     println!("{path}");
//! }
//! # Ok::<(), color_eyre::Report>(())
//! ```
//!
//! # Keyboard Navigation
//!
//! - `j`/`k` - Move down/up
//! - `l`/`Enter` - Expand and list the node under the cursor
//! - `h` - Collapse, or go to the parent
//! - `Tab` - Switch between the browse and select panes
//! - `Space` - Toggle choice of a candidate
//! - `s` - Submit
//! - `Esc`/`q` - Cancel
//! - `?` - Help

pub mod app;
mod event;
mod theme;
mod ui;

use ufd_core::{DialogSession, DirectoryListingProvider};

pub use app::{App, AppResult, DialogOutcome};
pub use event::KeyAction;
pub use theme::{Theme, ThemeVariant};

/// Run the dialog until the user submits or cancels.
pub fn run<P>(session: DialogSession<P>) -> AppResult<DialogOutcome>
where
    P: DirectoryListingProvider + Clone + Send + 'static,
{
    run_with_theme(session, Theme::default())
}

/// Run the dialog with a specific theme.
pub fn run_with_theme<P>(session: DialogSession<P>, theme: Theme) -> AppResult<DialogOutcome>
where
    P: DirectoryListingProvider + Clone + Send + 'static,
{
    // Create tokio runtime for the background listings
    let rt = tokio::runtime::Runtime::new()?;

    let terminal = ratatui::init();
    let result = rt.block_on(App::new(session).with_theme(theme).run(terminal));
    ratatui::restore();

    // Don't wait on a listing stuck on a dead mount
    rt.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}
