//! Application state types and enums.

use std::time::Instant;

use strum::Display;

/// Application mode representing the current UI state.
///
/// Listings are not a mode: they run in the background while the user keeps
/// navigating in Normal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Normal,
    Help,
    Quit,
}

/// Pane that receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum Pane {
    /// Volume tree.
    #[default]
    Browse,
    /// Candidates of the focused node.
    Select,
}

impl Pane {
    /// The other pane.
    pub fn other(self) -> Self {
        match self {
            Pane::Browse => Pane::Select,
            Pane::Select => Pane::Browse,
        }
    }
}

/// Severity of a footer message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Transient footer message.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    pub shown_at: Instant,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    /// Check if the message has been visible for at least `secs` seconds.
    pub fn is_expired(&self, secs: u64) -> bool {
        self.shown_at.elapsed().as_secs() >= secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pane_other() {
        assert_eq!(Pane::Browse.other(), Pane::Select);
        assert_eq!(Pane::Select.other(), Pane::Browse);
        assert_eq!(Pane::default().to_string(), "Browse");
    }

    #[test]
    fn test_fresh_status_not_expired() {
        let msg = StatusMessage::error("boom");
        assert_eq!(msg.kind, StatusKind::Error);
        assert!(!msg.is_expired(60));
        assert!(msg.is_expired(0));
    }
}
