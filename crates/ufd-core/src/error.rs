//! Error types for the navigation and selection model.

use thiserror::Error;

use crate::node::NodeId;

/// Failure reported by a listing or volume provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    /// Path no longer exists.
    #[error("Path not found: {path}")]
    NotFound { path: String },

    /// Any other backend failure.
    #[error("{message}")]
    Other { message: String },

    /// Volume enumeration is not available on this host.
    #[error("Volume enumeration is not supported on this host")]
    Unsupported,
}

impl ProviderError {
    /// Create a provider error from an I/O error, keeping the path as context.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Other {
                message: format!("I/O error at {path}: {source}"),
            },
        }
    }

    /// Create a provider error from a plain message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

/// Errors surfaced by the tree, the selection list and the dialog session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogError {
    /// Volume enumeration failed while seeding the tree.
    #[error("Cannot enumerate volumes: {0}")]
    Provider(#[from] ProviderError),

    /// Listing a node's directory failed. The node is left expanded and empty.
    #[error("Cannot list {path}: {source}")]
    Listing {
        path: String,
        #[source]
        source: ProviderError,
    },

    /// A selection index beyond the current candidate list.
    #[error("Selection index {index} out of range (candidates: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// More than one index chosen while multiselect is off.
    #[error("Multiselect is disabled, got {count} indices")]
    MultiselectDisabled { count: usize },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// The node handle does not refer to a live node in the tree.
    #[error("Unknown or discarded node {id}")]
    UnknownNode { id: NodeId },

    /// The session already reached a terminal state.
    #[error("Dialog session is closed")]
    SessionClosed,
}

impl DialogError {
    /// Whether the error leaves the session usable.
    ///
    /// Listing failures are reported to the user and browsing continues.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Listing { .. } | Self::Provider(_))
    }
}
