//! Lazily expanded filesystem tree.

use tracing::{debug, warn};

use crate::codec::{self, CANONICAL_DELIMITER};
use crate::config::DialogConfig;
use crate::error::{DialogError, ProviderError};
use crate::filter::classify;
use crate::node::{EntryKind, NodeId, TreeNode};
use crate::provider::{DirectoryListingProvider, ListedEntry, VolumeEnumerator, fetch_listing};

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<TreeNode>,
}

/// Arena-backed tree of browsable entries.
///
/// Parents own their children through the arena; the `parent` link on each
/// node is a plain handle used only for path reconstruction.
#[derive(Debug, Clone, Default)]
pub struct FileTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    roots: Vec<NodeId>,
}

impl FileTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all roots with the volumes reported by `volumes`.
    ///
    /// On failure the existing tree is left untouched.
    pub fn seed_roots<V>(&mut self, volumes: &V) -> Result<Vec<NodeId>, DialogError>
    where
        V: VolumeEnumerator + ?Sized,
    {
        let labels = volumes.enumerate()?;

        for root in std::mem::take(&mut self.roots) {
            self.discard(root);
        }

        for label in labels {
            let label = label.trim_end_matches(CANONICAL_DELIMITER);
            let id = self.insert(TreeNode::new(label, EntryKind::Volume, None));
            self.roots.push(id);
        }

        debug!(count = self.roots.len(), "seeded volume roots");
        Ok(self.roots.clone())
    }

    /// Root volumes in enumeration order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Check if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a node, `None` if the handle is stale.
    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    /// Look up a node, failing with `UnknownNode` if the handle is stale.
    pub fn node(&self, id: NodeId) -> Result<&TreeNode, DialogError> {
        self.get(id).ok_or(DialogError::UnknownNode { id })
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut TreeNode, DialogError> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(DialogError::UnknownNode { id })
    }

    /// Check if a handle still refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of ancestors above the node.
    pub fn depth(&self, id: NodeId) -> Result<usize, DialogError> {
        let mut depth = 0;
        let mut current = self.node(id)?;
        while let Some(parent) = current.parent {
            current = self.node(parent)?;
            depth += 1;
        }
        Ok(depth)
    }

    /// Canonical absolute path of a node, rebuilt from its ancestry.
    ///
    /// A volume's own path ends in the delimiter (`C:/`, `/`).
    pub fn path(&self, id: NodeId) -> Result<String, DialogError> {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(next) = current {
            let node = self.node(next)?;
            names.push(node.name.as_str());
            current = node.parent;
        }

        let mut names = names.into_iter().rev();
        let mut path = String::new();
        if let Some(root) = names.next() {
            path.push_str(root);
            path.push(CANONICAL_DELIMITER);
        }
        for name in names {
            path = codec::join(&path, name);
        }
        Ok(path)
    }

    /// List a node through `provider` and replace its children.
    ///
    /// File nodes have no children: this returns an empty list and leaves
    /// them untouched.
    pub fn expand<P>(
        &mut self,
        id: NodeId,
        provider: &P,
        config: &DialogConfig,
    ) -> Result<Vec<NodeId>, DialogError>
    where
        P: DirectoryListingProvider + ?Sized,
    {
        if self.node(id)?.is_file() {
            return Ok(Vec::new());
        }
        let path = self.path(id)?;
        let outcome = fetch_listing(provider, &path, config.show_hidden);
        self.apply_listing(id, outcome, config)
    }

    /// Replace a node's children with an already fetched listing.
    ///
    /// Previous children and their subtrees are discarded. A failed listing
    /// leaves the node expanded with no children and records the error on it.
    pub fn apply_listing(
        &mut self,
        id: NodeId,
        outcome: Result<Vec<ListedEntry>, ProviderError>,
        config: &DialogConfig,
    ) -> Result<Vec<NodeId>, DialogError> {
        if self.node(id)?.is_file() {
            return Ok(Vec::new());
        }
        let path = self.path(id)?;

        let old_children = std::mem::take(&mut self.node_mut(id)?.children);
        for child in old_children {
            self.discard(child);
        }

        match outcome {
            Ok(entries) => {
                let children: Vec<NodeId> = entries
                    .into_iter()
                    .filter(|entry| classify(entry.kind, config).show_in_tree)
                    .map(|entry| self.insert(TreeNode::new(entry.name, entry.kind, Some(id))))
                    .collect();

                let node = self.node_mut(id)?;
                node.children = children.clone();
                node.expanded = true;
                node.error = None;

                debug!(path = %path, count = children.len(), "expanded node");
                Ok(children)
            }
            Err(source) => {
                let node = self.node_mut(id)?;
                node.expanded = true;
                node.error = Some(source.to_string());

                warn!(path = %path, error = %source, "listing failed");
                Err(DialogError::Listing { path, source })
            }
        }
    }

    fn insert(&mut self, node: TreeNode) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId::new(index, 0)
            }
        }
    }

    /// Free a node and its whole subtree, invalidating their handles.
    fn discard(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(next.index())
                .filter(|slot| slot.generation == next.generation)
            else {
                continue;
            };
            if let Some(node) = slot.node.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(next.index);
                stack.extend(node.children);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Volumes(Vec<&'static str>);

    impl VolumeEnumerator for Volumes {
        fn enumerate(&self) -> Result<Vec<String>, ProviderError> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    fn listing(names: &[(&str, EntryKind)]) -> Result<Vec<ListedEntry>, ProviderError> {
        Ok(names
            .iter()
            .map(|(name, kind)| ListedEntry::new(*name, *kind))
            .collect())
    }

    #[test]
    fn test_seed_roots() {
        let mut tree = FileTree::new();
        let roots = tree.seed_roots(&Volumes(vec!["C:/", "D:/"])).unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(tree.node(roots[0]).unwrap().name.as_str(), "C:");
        assert_eq!(tree.path(roots[1]).unwrap(), "D:/");
        assert_eq!(tree.node(roots[0]).unwrap().kind, EntryKind::Volume);
    }

    #[test]
    fn test_unix_root_path() {
        let mut tree = FileTree::new();
        let roots = tree.seed_roots(&Volumes(vec![""])).unwrap();
        assert_eq!(tree.path(roots[0]).unwrap(), "/");

        let children = tree
            .apply_listing(
                roots[0],
                listing(&[("home", EntryKind::Directory)]),
                &DialogConfig::default(),
            )
            .unwrap();
        assert_eq!(tree.path(children[0]).unwrap(), "/home");
        assert_eq!(tree.depth(children[0]).unwrap(), 1);
    }

    #[test]
    fn test_reexpansion_discards_subtree() {
        let config = DialogConfig::default();
        let mut tree = FileTree::new();
        let root = tree.seed_roots(&Volumes(vec!["a"])).unwrap()[0];

        let first = tree
            .apply_listing(root, listing(&[("b", EntryKind::Directory)]), &config)
            .unwrap();
        let grandchildren = tree
            .apply_listing(first[0], listing(&[("c", EntryKind::File)]), &config)
            .unwrap();
        assert_eq!(tree.len(), 3);

        let second = tree
            .apply_listing(root, listing(&[("b", EntryKind::Directory)]), &config)
            .unwrap();
        assert_eq!(tree.len(), 2);
        assert!(!tree.contains(first[0]));
        assert!(!tree.contains(grandchildren[0]));
        assert!(tree.contains(second[0]));
        assert!(matches!(
            tree.path(first[0]),
            Err(DialogError::UnknownNode { .. })
        ));
    }

    #[test]
    fn test_failed_listing_marks_node() {
        let config = DialogConfig::default();
        let mut tree = FileTree::new();
        let root = tree.seed_roots(&Volumes(vec!["a"])).unwrap()[0];
        tree.apply_listing(root, listing(&[("b", EntryKind::Directory)]), &config)
            .unwrap();

        let err = tree
            .apply_listing(root, Err(ProviderError::other("boom")), &config)
            .unwrap_err();
        assert!(matches!(err, DialogError::Listing { ref path, .. } if path == "a/"));

        let node = tree.node(root).unwrap();
        assert!(node.expanded);
        assert!(node.children().is_empty());
        assert_eq!(node.error.as_deref(), Some("boom"));

        tree.apply_listing(root, listing(&[]), &config).unwrap();
        assert!(tree.node(root).unwrap().error.is_none());
    }

    #[test]
    fn test_file_node_apply_is_noop() {
        let config = DialogConfig::default();
        let mut tree = FileTree::new();
        let root = tree.seed_roots(&Volumes(vec!["a"])).unwrap()[0];
        let file = tree
            .apply_listing(root, listing(&[("f.txt", EntryKind::File)]), &config)
            .unwrap()[0];

        let children = tree
            .apply_listing(file, listing(&[("x", EntryKind::File)]), &config)
            .unwrap();
        assert!(children.is_empty());
        assert!(!tree.node(file).unwrap().expanded);
    }

    #[test]
    fn test_slot_reuse_keeps_old_handles_stale() {
        let config = DialogConfig::default();
        let mut tree = FileTree::new();
        let root = tree.seed_roots(&Volumes(vec!["a"])).unwrap()[0];
        let old = tree
            .apply_listing(root, listing(&[("b", EntryKind::Directory)]), &config)
            .unwrap()[0];
        let new = tree
            .apply_listing(root, listing(&[("b", EntryKind::Directory)]), &config)
            .unwrap()[0];

        assert_eq!(old.index(), new.index());
        assert_ne!(old, new);
        assert!(tree.get(old).is_none());
    }

    #[test]
    fn test_reseeding_invalidates_previous_roots() {
        let mut tree = FileTree::new();
        let old = tree.seed_roots(&Volumes(vec!["C:"])).unwrap()[0];
        let new = tree.seed_roots(&Volumes(vec!["D:"])).unwrap()[0];

        assert!(!tree.contains(old));
        assert_eq!(tree.node(new).unwrap().name.as_str(), "D:");
        assert_eq!(tree.len(), 1);
    }
}
