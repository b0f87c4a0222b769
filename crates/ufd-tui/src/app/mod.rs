//! Main application state and logic.

mod constants;
pub mod navigation;
mod render;
pub mod state;

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use ufd_core::{DialogSession, DirectoryListingProvider, NodeId, SessionState};
use ufd_fs::{ListingResult, spawn_listing};

use crate::event::KeyAction;
use crate::theme::Theme;
use crate::ui::{TreeState, flatten};

use self::constants::{PAGE_SIZE, STATUS_TIMEOUT_SECS, TICK_INTERVAL_MS};
use self::navigation::{ListNavigator, SimpleListNav};
use self::state::{AppMode, Pane, StatusMessage};

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// How the dialog ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogOutcome {
    /// `Submitted` or `Cancelled`.
    pub state: SessionState,
    /// Chosen paths in external form; empty unless submitted.
    pub paths: Vec<String>,
}

/// Main application state.
pub struct App<P> {
    /// The dialog model driven by this front-end.
    session: DialogSession<P>,
    mode: AppMode,
    /// Pane receiving navigation keys.
    pane: Pane,
    theme: Theme,
    tree_state: TreeState,
    /// Cached count of visible tree rows.
    cached_tree_len: usize,
    select_nav: SimpleListNav,
    status: Option<StatusMessage>,
    /// Result channel of the in-flight listing.
    listing_rx: Option<mpsc::Receiver<ListingResult>>,
    /// Cancels the in-flight listing when focus moves on.
    listing_cancel: CancellationToken,
    needs_redraw: bool,
}

impl<P> App<P>
where
    P: DirectoryListingProvider + Clone + Send + 'static,
{
    /// Create a new application around an open session.
    pub fn new(session: DialogSession<P>) -> Self {
        let mut app = Self {
            session,
            mode: AppMode::Normal,
            pane: Pane::Browse,
            theme: Theme::default(),
            tree_state: TreeState::default(),
            cached_tree_len: 0,
            select_nav: SimpleListNav::default(),
            status: None,
            listing_rx: None,
            listing_cancel: CancellationToken::new(),
            needs_redraw: true,
        };
        app.refresh_tree_len();
        app
    }

    /// Use a specific theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Run the event loop until the dialog is submitted or cancelled.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<DialogOutcome> {
        // A host with a single root gets it listed right away.
        if let [root] = self.session.tree().roots() {
            let root = *root;
            self.focus(root);
        }

        let period = Duration::from_millis(TICK_INTERVAL_MS);
        let mut interval = tokio::time::interval(period);
        let mut events = EventStream::new();

        while self.mode != AppMode::Quit {
            if self.needs_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key_event))) => self.handle_key(key_event),
                        Some(Ok(Event::Resize(_, _))) => self.needs_redraw = true,
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            self.listing_cancel.cancel();
                            return Err(e.into());
                        }
                        None => {
                            debug!("event stream closed");
                            self.cancel();
                        }
                    }
                }

                Some(result) = async {
                    if let Some(rx) = &mut self.listing_rx {
                        rx.recv().await
                    } else {
                        std::future::pending().await
                    }
                } => {
                    self.handle_listing_result(result);
                }

                _ = interval.tick() => {
                    if self.status.as_ref().is_some_and(|s| s.is_expired(STATUS_TIMEOUT_SECS)) {
                        self.status = None;
                        self.needs_redraw = true;
                    }
                }
            }
        }

        self.listing_cancel.cancel();
        Ok(self.into_outcome())
    }

    /// Final state and result of the session.
    pub fn into_outcome(self) -> DialogOutcome {
        let state = self.session.state();
        DialogOutcome {
            state,
            paths: self.session.into_result(),
        }
    }

    /// Borrow the session.
    pub fn session(&self) -> &DialogSession<P> {
        &self.session
    }

    /// Current mode.
    pub fn mode(&self) -> AppMode {
        self.mode
    }

    /// Pane receiving navigation keys.
    pub fn pane(&self) -> Pane {
        self.pane
    }

    fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.kind != KeyEventKind::Press {
            return;
        }
        let action = KeyAction::from_key_event(key_event);
        self.handle_action(action);
    }

    /// Apply one key action.
    pub fn handle_action(&mut self, action: KeyAction) {
        if self.mode == AppMode::Help {
            if matches!(action, KeyAction::ToggleHelp | KeyAction::Cancel) {
                self.mode = AppMode::Normal;
                self.needs_redraw = true;
            }
            return;
        }

        match action {
            KeyAction::MoveUp => self.move_cursor(|tree, _| tree.move_up(1), |nav| nav.move_up(1)),
            KeyAction::MoveDown => {
                self.move_cursor(|tree, len| tree.move_down(1, len), |nav| nav.move_down(1))
            }
            KeyAction::PageUp => {
                self.move_cursor(|tree, _| tree.move_up(PAGE_SIZE), |nav| nav.page_up())
            }
            KeyAction::PageDown => {
                self.move_cursor(|tree, len| tree.move_down(PAGE_SIZE, len), |nav| nav.page_down())
            }
            KeyAction::JumpToTop => {
                self.move_cursor(|tree, _| tree.jump_to_top(), |nav| nav.jump_to_top())
            }
            KeyAction::JumpToBottom => {
                self.move_cursor(|tree, len| tree.jump_to_bottom(len), |nav| nav.jump_to_bottom())
            }
            KeyAction::Expand => {
                if self.pane == Pane::Browse {
                    self.expand_under_cursor();
                }
            }
            KeyAction::Collapse => {
                if self.pane == Pane::Browse {
                    self.collapse_under_cursor();
                }
            }
            KeyAction::ToggleChoice => self.toggle_choice(),
            KeyAction::ChooseAll => self.choose_all(),
            KeyAction::ClearChoice => self.apply_choice(Vec::new()),
            KeyAction::SwitchPane => self.pane = self.pane.other(),
            KeyAction::ToggleHelp => self.mode = AppMode::Help,
            KeyAction::ToggleTheme => self.theme = self.theme.toggle(),
            KeyAction::Activate => match self.pane {
                Pane::Browse => self.expand_under_cursor(),
                Pane::Select => self.submit(),
            },
            KeyAction::Submit => self.submit(),
            KeyAction::Cancel => self.cancel(),
            KeyAction::None => return,
        }
        self.needs_redraw = true;
    }

    fn move_cursor(
        &mut self,
        tree_move: impl FnOnce(&mut TreeState, usize),
        list_move: impl FnOnce(&mut SimpleListNav),
    ) {
        match self.pane {
            Pane::Browse => tree_move(&mut self.tree_state, self.cached_tree_len),
            Pane::Select => list_move(&mut self.select_nav),
        }
    }

    fn refresh_tree_len(&mut self) {
        self.cached_tree_len = flatten(self.session.tree(), &self.tree_state).len();
        let max = self.cached_tree_len.saturating_sub(1);
        if self.tree_state.selected > max {
            self.tree_state.selected = max;
        }
    }

    fn node_under_cursor(&self) -> Option<NodeId> {
        flatten(self.session.tree(), &self.tree_state)
            .get(self.tree_state.selected)
            .map(|item| item.id)
    }

    fn expand_under_cursor(&mut self) {
        if let Some(id) = self.node_under_cursor() {
            self.focus(id);
        }
    }

    /// Fold an open node, or move the cursor to the parent of a closed one.
    fn collapse_under_cursor(&mut self) {
        let Some(id) = self.node_under_cursor() else {
            return;
        };
        let tree = self.session.tree();
        if self.tree_state.is_open(tree, id) {
            self.tree_state.collapse(id);
            self.refresh_tree_len();
            return;
        }

        let parent = tree.get(id).and_then(|n| n.parent());
        if let Some(parent) = parent {
            let items = flatten(tree, &self.tree_state);
            if let Some(index) = items.iter().position(|item| item.id == parent) {
                self.tree_state.selected = index;
            }
        }
    }

    /// Focus a node, listing it in the background when needed.
    pub fn focus(&mut self, id: NodeId) {
        match self.session.request_focus(id) {
            Ok(Some(request)) => {
                self.listing_cancel.cancel();
                self.listing_cancel = CancellationToken::new();
                self.tree_state.unfold(id);
                self.listing_rx = Some(spawn_listing(
                    self.session.provider().clone(),
                    request,
                    self.listing_cancel.clone(),
                ));
            }
            Ok(None) => {
                self.listing_cancel.cancel();
                self.listing_rx = None;
            }
            Err(e) => {
                warn!(node = %id, error = %e, "focus failed");
                self.status = Some(StatusMessage::error(e.to_string()));
            }
        }
        self.select_nav.reset(self.session.candidates().len());
        self.needs_redraw = true;
    }

    /// Feed a finished background listing into the session.
    pub fn handle_listing_result(&mut self, result: ListingResult) {
        if let Err(e) = self.session.complete_focus(&result.request, result.outcome) {
            self.status = Some(StatusMessage::error(e.to_string()));
        }
        if !self.session.is_loading() {
            self.listing_rx = None;
        }
        // Re-listing discards subtrees; drop folds on handles that died with them.
        let tree = self.session.tree();
        self.tree_state.collapsed.retain(|id| tree.contains(*id));
        self.select_nav.reset(self.session.candidates().len());
        self.refresh_tree_len();
        self.needs_redraw = true;
    }

    fn toggle_choice(&mut self) {
        if self.pane != Pane::Select || self.session.candidates().is_empty() {
            return;
        }
        let index = self.select_nav.selected();
        let chosen = self.session.selection().chosen();

        let next: Vec<usize> = if chosen.contains(&index) {
            chosen.iter().copied().filter(|&i| i != index).collect()
        } else if self.session.config().multiselect {
            chosen.iter().copied().chain([index]).collect()
        } else {
            vec![index]
        };
        self.apply_choice(next);
    }

    fn choose_all(&mut self) {
        if !self.session.config().multiselect {
            self.status = Some(StatusMessage::info("Only one entry can be chosen"));
            return;
        }
        let all = (0..self.session.candidates().len()).collect();
        self.apply_choice(all);
    }

    fn apply_choice(&mut self, indices: Vec<usize>) {
        if let Err(e) = self.session.choose(indices) {
            self.status = Some(StatusMessage::error(e.to_string()));
        }
    }

    /// Submit the chosen entries. With nothing chosen, the candidate under
    /// the select cursor is taken.
    fn submit(&mut self) {
        if self.session.selection().chosen().is_empty()
            && self.pane == Pane::Select
            && !self.session.candidates().is_empty()
        {
            self.apply_choice(vec![self.select_nav.selected()]);
        }

        match self.session.submit() {
            Ok(paths) => {
                debug!(count = paths.len(), "submitted");
                self.listing_cancel.cancel();
                self.mode = AppMode::Quit;
            }
            Err(e) => self.status = Some(StatusMessage::error(e.to_string())),
        }
    }

    fn cancel(&mut self) {
        self.listing_cancel.cancel();
        self.session.cancel();
        self.mode = AppMode::Quit;
    }
}
