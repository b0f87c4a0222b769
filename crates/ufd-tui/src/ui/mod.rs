//! UI components and widgets.

mod candidates;
mod help;
mod tree;

pub use candidates::CandidateList;
pub use help::HelpOverlay;
pub use tree::{TreeState, TreeView, flatten};

use ratatui::layout::{Constraint, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Layout areas for the dialog.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub header: Rect,
    pub browse: Rect,
    pub select: Rect,
    pub footer: Rect,
}

impl AppLayout {
    /// Compute layout from terminal area.
    ///
    /// Narrow terminals stack the panes instead of placing them side by side.
    pub fn new(area: Rect) -> Self {
        let min_side_by_side = 60;

        let [header, content, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .areas(area);

        let [browse, select] = if area.width >= min_side_by_side {
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .areas(content)
        } else {
            Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(content)
        };

        Self {
            header,
            browse,
            select,
            footer,
        }
    }
}

/// Truncate a string to a display width, ending in `…` when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width - 1 {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}
