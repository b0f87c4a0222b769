//! Application rendering.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Widget};

use ufd_core::{DirectoryListingProvider, SessionState};

use crate::theme::Theme;
use crate::ui::{AppLayout, CandidateList, HelpOverlay, TreeView, truncate_to_width};

use super::App;
use super::state::{AppMode, Pane, StatusKind, StatusMessage};

impl<P> App<P>
where
    P: DirectoryListingProvider + Clone + Send + 'static,
{
    pub(super) fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let layout = AppLayout::new(area);
        let buf = frame.buffer_mut();

        buf.set_style(area, Style::default().fg(self.theme.foreground));

        let focused_path = self
            .session
            .focused()
            .and_then(|id| self.session.tree().path(id).ok());
        render_header(
            &self.theme,
            &self.session.config().title,
            self.session.state(),
            focused_path.as_deref(),
            layout.header,
            buf,
        );

        let browse_active = self.pane == Pane::Browse;
        let tree_view = TreeView::new(self.session.tree(), &self.theme)
            .focused(self.session.focused(), self.session.is_loading())
            .active(browse_active)
            .block(pane_block(&self.theme, " Browse ", browse_active));
        ratatui::widgets::StatefulWidget::render(tree_view, layout.browse, buf, &mut self.tree_state);

        let placeholder = if self.session.is_loading() {
            "Listing…"
        } else if self.session.focused().is_none() {
            "Expand a volume or directory to list it"
        } else {
            "Nothing to choose here"
        };
        let candidates = CandidateList::new(self.session.selection(), &self.theme)
            .active(!browse_active)
            .placeholder(placeholder)
            .block(pane_block(&self.theme, " Select ", !browse_active));
        ratatui::widgets::StatefulWidget::render(candidates, layout.select, buf, &mut self.select_nav);

        let chosen = self.session.selection().chosen().len();
        render_footer(
            &self.theme,
            self.pane,
            chosen,
            self.session.config().multiselect,
            self.status.as_ref(),
            layout.footer,
            buf,
        );

        if self.mode == AppMode::Help {
            HelpOverlay::new(&self.theme).render(area, buf);
        }
    }
}

fn pane_block<'a>(theme: &Theme, title: &'a str, active: bool) -> Block<'a> {
    Block::default()
        .title(title)
        .title_style(if active { theme.title } else { Style::default().fg(theme.muted) })
        .borders(Borders::ALL)
        .border_style(theme.pane_border(active))
}

fn render_header(
    theme: &Theme,
    title: &str,
    state: SessionState,
    focused_path: Option<&str>,
    area: Rect,
    buf: &mut Buffer,
) {
    buf.set_style(area, theme.header);

    let mut spans = vec![Span::styled(format!(" {title} "), theme.title)];
    if state != SessionState::Browsing {
        spans.push(Span::styled(format!("[{state}] "), Style::default().fg(theme.warning)));
    }
    if let Some(path) = focused_path {
        let used: usize = spans.iter().map(|s| s.width()).sum();
        let room = (area.width as usize).saturating_sub(used + 1);
        spans.push(Span::styled(truncate_to_width(path, room), theme.header));
    }

    buf.set_line(area.x, area.y, &Line::from(spans), area.width);
}

fn render_footer(
    theme: &Theme,
    pane: Pane,
    chosen: usize,
    multiselect: bool,
    status: Option<&StatusMessage>,
    area: Rect,
    buf: &mut Buffer,
) {
    buf.set_style(area, theme.footer);

    if let Some(status) = status {
        let color = match status.kind {
            StatusKind::Info => theme.info,
            StatusKind::Error => theme.error,
        };
        let line = Line::from(Span::styled(format!(" {}", status.text), Style::default().fg(color)));
        buf.set_line(area.x, area.y, &line, area.width);
        return;
    }

    let mut keys: Vec<(&str, &str)> = match pane {
        Pane::Browse => vec![("j/k", "Nav"), ("l", "Expand"), ("h", "Collapse")],
        Pane::Select if multiselect => vec![("j/k", "Nav"), ("Spc", "Toggle"), ("a", "All")],
        Pane::Select => vec![("j/k", "Nav"), ("Spc", "Choose")],
    };
    keys.extend([("Tab", "Pane"), ("s", "Submit"), ("Esc", "Cancel"), ("?", "Help")]);

    let mut spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(format!(" {key} "), theme.help_key),
                Span::styled(format!("{desc} "), theme.help_desc),
            ]
        })
        .collect();

    if chosen > 0 {
        spans.push(Span::styled(format!(" {chosen} chosen"), theme.chosen));
    }

    buf.set_line(area.x, area.y, &Line::from(spans), area.width);
}
