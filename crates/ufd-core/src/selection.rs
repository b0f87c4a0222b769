//! Selectable candidates for the focused node and the chosen indices.

use std::collections::BTreeSet;

use compact_str::CompactString;
use serde::Serialize;

use crate::config::DialogConfig;
use crate::error::DialogError;
use crate::filter::classify;
use crate::node::{EntryKind, NodeId};
use crate::tree::FileTree;

/// One entry that can be chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionCandidate {
    /// Label shown in the list.
    pub label: CompactString,
    /// Canonical absolute path.
    pub path: String,
    /// Entry kind.
    pub kind: EntryKind,
}

/// Ordered candidates plus the set of chosen indices.
///
/// An index keeps denoting the same candidate until the next rebuild, and
/// every rebuild clears the chosen set.
#[derive(Debug, Clone, Default)]
pub struct SelectionList {
    candidates: Vec<SelectionCandidate>,
    chosen: BTreeSet<usize>,
}

impl SelectionList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the candidates with the selectable entries among `children`.
    ///
    /// All paths are resolved before anything is replaced, so a stale handle
    /// leaves the previous list and selection intact.
    pub fn rebuild(
        &mut self,
        tree: &FileTree,
        children: &[NodeId],
        config: &DialogConfig,
    ) -> Result<(), DialogError> {
        let mut candidates = Vec::with_capacity(children.len());
        for &child in children {
            let node = tree.node(child)?;
            if !classify(node.kind, config).selectable {
                continue;
            }
            candidates.push(SelectionCandidate {
                label: node.name.clone(),
                path: tree.path(child)?,
                kind: node.kind,
            });
        }

        self.candidates = candidates;
        self.chosen.clear();
        Ok(())
    }

    /// Replace the candidates with the single focused file itself.
    pub fn rebuild_for_file(&mut self, tree: &FileTree, file: NodeId) -> Result<(), DialogError> {
        let node = tree.node(file)?;
        let candidate = SelectionCandidate {
            label: node.name.clone(),
            path: tree.path(file)?,
            kind: node.kind,
        };

        self.candidates = vec![candidate];
        self.chosen.clear();
        Ok(())
    }

    /// Drop every candidate and the selection.
    pub fn clear(&mut self) {
        self.candidates.clear();
        self.chosen.clear();
    }

    /// Replace the chosen set. Fails without changing anything if an index
    /// is out of range.
    pub fn choose<I>(&mut self, indices: I) -> Result<(), DialogError>
    where
        I: IntoIterator<Item = usize>,
    {
        let len = self.candidates.len();
        let chosen = indices
            .into_iter()
            .map(|index| {
                if index < len {
                    Ok(index)
                } else {
                    Err(DialogError::IndexOutOfRange { index, len })
                }
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        self.chosen = chosen;
        Ok(())
    }

    /// Forget the chosen indices, keeping the candidates.
    pub fn clear_choice(&mut self) {
        self.chosen.clear();
    }

    /// Chosen candidate paths, in index order.
    pub fn resolve(&self) -> Vec<String> {
        self.chosen
            .iter()
            .filter_map(|&index| self.candidates.get(index))
            .map(|candidate| candidate.path.clone())
            .collect()
    }

    /// Current candidates.
    pub fn candidates(&self) -> &[SelectionCandidate] {
        &self.candidates
    }

    /// Chosen indices in ascending order.
    pub fn chosen(&self) -> &BTreeSet<usize> {
        &self.chosen
    }

    /// Check if an index is chosen.
    pub fn is_chosen(&self, index: usize) -> bool {
        self.chosen.contains(&index)
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Check if there are no candidates.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
