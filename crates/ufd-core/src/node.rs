//! Tree node types.

use std::fmt;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Handle to a node inside a [`FileTree`](crate::FileTree).
///
/// Handles are generational: once a node is discarded by a re-expansion of
/// its parent, any handle to it stops resolving, even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index in the arena.
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Type of browsable entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum EntryKind {
    /// Root-level volume or mount.
    Volume,
    /// Directory.
    Directory,
    /// Anything that is not a container.
    File,
}

impl EntryKind {
    /// Check if entries of this kind can have children.
    pub fn is_container(&self) -> bool {
        matches!(self, EntryKind::Volume | EntryKind::Directory)
    }

    /// Check if this is a plain file.
    pub fn is_file(&self) -> bool {
        matches!(self, EntryKind::File)
    }
}

/// A single browsable entry in the tree.
///
/// The node never stores its own path; [`FileTree::path`](crate::FileTree::path)
/// rebuilds it from the ancestry.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Entry name, without delimiters.
    pub name: CompactString,

    /// Entry kind.
    pub kind: EntryKind,

    /// Whether the node has been expanded at least once.
    pub expanded: bool,

    /// Message of the last failed listing, cleared by a successful one.
    pub error: Option<String>,

    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl TreeNode {
    pub(crate) fn new(name: impl Into<CompactString>, kind: EntryKind, parent: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            kind,
            expanded: false,
            error: None,
            parent,
            children: Vec::new(),
        }
    }

    /// Parent handle, `None` for roots.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in provider order. Empty until expanded.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Label for display. The Unix root volume has an empty name.
    pub fn label(&self) -> &str {
        if self.name.is_empty() && self.kind == EntryKind::Volume {
            "/"
        } else {
            &self.name
        }
    }

    /// Check if this node is a plain file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }
}
