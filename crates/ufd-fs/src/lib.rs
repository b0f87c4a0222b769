//! Host filesystem providers for ufd.
//!
//! This crate connects the navigation model in `ufd-core` to the local
//! machine:
//!
//! - [`StdFsProvider`] lists directories with `std::fs`, hiding dot-entries
//!   (and, on Windows, entries with the hidden attribute) unless asked not to
//! - [`StdVolumes`] reports the root volumes (`/`, or the mounted drive letters)
//! - [`spawn_listing`] runs a listing on tokio's blocking pool so an
//!   interactive front-end never waits on slow storage
//!
//! # Example
//!
//! ```rust,no_run
//! use ufd_core::{DialogConfig, DialogSession};
//! use ufd_fs::{StdFsProvider, StdVolumes};
//!
//! let mut session = DialogSession::new(DialogConfig::default(), StdFsProvider, &StdVolumes).unwrap();
//! let root = session.tree().roots()[0];
//! session.focus(root).unwrap();
//!
//! for candidate in session.candidates() {
//!     println!("{}", candidate.path);
//! }
//! ```

mod listing;
mod task;
mod volumes;

pub use listing::StdFsProvider;
pub use task::{ListingResult, spawn_listing};
pub use volumes::StdVolumes;

// Re-export core types for convenience
pub use ufd_core::{
    DialogConfig, DialogError, DialogSession, DirectoryListingProvider, ListedEntry,
    ListingRequest, ProviderError, VolumeEnumerator,
};
