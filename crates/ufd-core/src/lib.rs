//! Core navigation and selection model for ufd.
//!
//! This crate holds the host-independent part of the file dialog: a lazily
//! expanded tree of volumes, directories and files, the policy deciding what
//! is shown and what can be chosen, the candidate list for the focused node,
//! and the [`DialogSession`] tying them together.
//!
//! Directory listing and volume discovery are supplied by implementations of
//! [`DirectoryListingProvider`] and [`VolumeEnumerator`].
//!
//! # Example
//!
//! ```rust,ignore
//! use ufd_core::{DialogConfig, DialogSession};
//!
//! let mut session = DialogSession::new(DialogConfig::default(), provider, &volumes)?;
//! let root = session.tree().roots()[0];
//! session.focus(root)?;
//! session.choose([0])?;
//! let paths = session.submit()?.to_vec();
//! ```

mod codec;
mod config;
mod error;
mod filter;
mod node;
mod provider;
mod selection;
mod session;
mod tree;

pub use codec::{CANONICAL_DELIMITER, PathCodec, join};
pub use config::{DEFAULT_TITLE, DialogConfig, DialogConfigBuilder, DialogConfigBuilderError};
pub use error::{DialogError, ProviderError};
pub use filter::{Classification, classify};
pub use node::{EntryKind, NodeId, TreeNode};
pub use provider::{DirectoryListingProvider, ListedEntry, VolumeEnumerator, fetch_listing};
pub use selection::{SelectionCandidate, SelectionList};
pub use session::{DialogSession, ListingRequest, SessionState};
pub use tree::FileTree;
