//! A single dialog invocation: browse, choose, then submit or cancel.

use std::collections::BTreeSet;

use strum::Display;
use tracing::{debug, info};

use crate::codec::PathCodec;
use crate::config::DialogConfig;
use crate::error::{DialogError, ProviderError};
use crate::node::NodeId;
use crate::provider::{DirectoryListingProvider, ListedEntry, VolumeEnumerator, fetch_listing};
use crate::selection::{SelectionCandidate, SelectionList};
use crate::tree::FileTree;

/// Lifecycle of a session. Both `Submitted` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum SessionState {
    #[default]
    Browsing,
    Submitted,
    Cancelled,
}

impl SessionState {
    /// Check if the session reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionState::Browsing)
    }
}

/// A listing the session is waiting for, to be fetched by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    /// Node being focused.
    pub node: NodeId,
    /// Canonical path to list.
    pub path: String,
    /// Whether hidden entries should be included.
    pub include_hidden: bool,
    ticket: u64,
}

/// Navigation and selection state for one dialog invocation.
///
/// Sessions are single-use: once submitted or cancelled, every further
/// action fails with [`DialogError::SessionClosed`].
#[derive(Debug)]
pub struct DialogSession<P> {
    config: DialogConfig,
    codec: PathCodec,
    provider: P,
    tree: FileTree,
    selection: SelectionList,
    focused: Option<NodeId>,
    state: SessionState,
    result: Vec<String>,
    next_ticket: u64,
    pending: Option<u64>,
}

impl<P: DirectoryListingProvider> DialogSession<P> {
    /// Validate `config` and seed the tree from `volumes`.
    ///
    /// An invalid configuration fails before any provider is called.
    pub fn new<V>(config: DialogConfig, provider: P, volumes: &V) -> Result<Self, DialogError>
    where
        V: VolumeEnumerator + ?Sized,
    {
        config.validate()?;

        let mut tree = FileTree::new();
        tree.seed_roots(volumes)?;

        info!(%config, "dialog session started");

        Ok(Self {
            codec: PathCodec::for_config(config.use_external_delimiter),
            config,
            provider,
            tree,
            selection: SelectionList::new(),
            focused: None,
            state: SessionState::Browsing,
            result: Vec::new(),
            next_ticket: 0,
            pending: None,
        })
    }

    /// Override the codec used to present submitted paths.
    pub fn with_codec(mut self, codec: PathCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Session configuration.
    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// Listing provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Browsed tree.
    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    /// Candidate list and chosen indices.
    pub fn selection(&self) -> &SelectionList {
        &self.selection
    }

    /// Candidates offered for the focused node.
    pub fn candidates(&self) -> &[SelectionCandidate] {
        self.selection.candidates()
    }

    /// Currently focused node.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if a focus listing is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    fn ensure_open(&self) -> Result<(), DialogError> {
        if self.state.is_terminal() {
            return Err(DialogError::SessionClosed);
        }
        Ok(())
    }

    /// Focus a node, expanding it synchronously through the provider.
    ///
    /// A failed listing is returned as [`DialogError::Listing`]; the session
    /// stays open with an empty candidate list.
    pub fn focus(&mut self, id: NodeId) -> Result<(), DialogError> {
        match self.request_focus(id)? {
            Some(request) => {
                let outcome = fetch_listing(&self.provider, &request.path, request.include_hidden);
                self.complete_focus(&request, outcome)
            }
            None => Ok(()),
        }
    }

    /// First half of [`focus`](Self::focus) for callers that list off-thread.
    ///
    /// Returns `None` when no listing is needed (a focused file becomes the
    /// single candidate right away). The previous candidates are dropped
    /// immediately, so nothing can be chosen until the listing completes.
    pub fn request_focus(&mut self, id: NodeId) -> Result<Option<ListingRequest>, DialogError> {
        self.ensure_open()?;
        let node = self.tree.node(id)?;

        if node.is_file() {
            self.selection.rebuild_for_file(&self.tree, id)?;
            self.focused = Some(id);
            self.pending = None;
            return Ok(None);
        }

        let path = self.tree.path(id)?;
        let ticket = self.next_ticket;
        self.next_ticket += 1;

        self.selection.clear();
        self.focused = Some(id);
        self.pending = Some(ticket);

        debug!(node = %id, path = %path, "focus requested");
        Ok(Some(ListingRequest {
            node: id,
            path,
            include_hidden: self.config.show_hidden,
            ticket,
        }))
    }

    /// Second half of [`focus`](Self::focus): apply a fetched listing.
    ///
    /// Results for a closed session or for a focus that was superseded by a
    /// newer request are ignored.
    pub fn complete_focus(
        &mut self,
        request: &ListingRequest,
        outcome: Result<Vec<ListedEntry>, ProviderError>,
    ) -> Result<(), DialogError> {
        if self.state.is_terminal() || self.pending != Some(request.ticket) {
            debug!(node = %request.node, "ignoring stale listing");
            return Ok(());
        }
        self.pending = None;

        match self.tree.apply_listing(request.node, outcome, &self.config) {
            Ok(children) => self.selection.rebuild(&self.tree, &children, &self.config),
            Err(err) => {
                self.selection.clear();
                Err(err)
            }
        }
    }

    /// Replace the chosen candidate indices.
    pub fn choose<I>(&mut self, indices: I) -> Result<(), DialogError>
    where
        I: IntoIterator<Item = usize>,
    {
        self.ensure_open()?;
        let indices: BTreeSet<usize> = indices.into_iter().collect();
        if !self.config.multiselect && indices.len() > 1 {
            return Err(DialogError::MultiselectDisabled {
                count: indices.len(),
            });
        }
        self.selection.choose(indices)
    }

    /// Finish the session with the chosen paths in external form.
    pub fn submit(&mut self) -> Result<&[String], DialogError> {
        self.ensure_open()?;
        self.result = self
            .selection
            .resolve()
            .iter()
            .map(|path| self.codec.to_external(path))
            .collect();
        self.state = SessionState::Submitted;
        self.pending = None;

        info!(count = self.result.len(), "dialog submitted");
        Ok(&self.result)
    }

    /// Finish the session with an empty result. No-op once terminal.
    pub fn cancel(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        self.selection.clear_choice();
        self.result.clear();
        self.state = SessionState::Cancelled;
        self.pending = None;

        info!("dialog cancelled");
    }

    /// Final result: chosen paths after submit, empty otherwise.
    pub fn result(&self) -> &[String] {
        &self.result
    }

    /// Consume the session, returning its result.
    pub fn into_result(self) -> Vec<String> {
        self.result
    }
}
