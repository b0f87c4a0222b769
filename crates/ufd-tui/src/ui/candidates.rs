//! Select pane: candidates of the focused node.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, StatefulWidget, Widget};

use ufd_core::{EntryKind, SelectionList};

use crate::app::navigation::{ListNavigator, SimpleListNav};
use crate::theme::Theme;
use crate::ui::truncate_to_width;

/// Candidate list widget with one checkbox per row.
pub struct CandidateList<'a> {
    selection: &'a SelectionList,
    theme: &'a Theme,
    active: bool,
    placeholder: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> CandidateList<'a> {
    pub fn new(selection: &'a SelectionList, theme: &'a Theme) -> Self {
        Self {
            selection,
            theme,
            active: false,
            placeholder: "",
            block: None,
        }
    }

    /// Whether this pane has keyboard focus.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Text shown when there are no candidates.
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl StatefulWidget for CandidateList<'_> {
    type State = SimpleListNav;

    fn render(self, area: Rect, buf: &mut Buffer, nav: &mut Self::State) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner_area.height == 0 || inner_area.width == 0 {
            return;
        }

        let candidates = self.selection.candidates();
        if candidates.is_empty() {
            let line = Line::from(Span::styled(
                self.placeholder,
                Style::default().fg(self.theme.muted),
            ));
            buf.set_line(inner_area.x, inner_area.y, &line, inner_area.width);
            return;
        }

        let viewport_height = inner_area.height as usize;
        nav.set_count(candidates.len());
        nav.ensure_visible(viewport_height);

        let start = nav.offset();
        let end = (start + viewport_height).min(candidates.len());

        for (row_idx, index) in (start..end).enumerate() {
            let candidate = &candidates[index];
            let chosen = self.selection.is_chosen(index);
            let y = inner_area.y + row_idx as u16;

            let (checkbox, checkbox_style) = if chosen {
                ("[x] ", self.theme.chosen)
            } else {
                ("[ ] ", Style::default().fg(self.theme.muted))
            };
            let (suffix, name_style) = match candidate.kind {
                EntryKind::File => ("", self.theme.file),
                _ => ("/", self.theme.directory),
            };

            let label = format!("{}{suffix}", candidate.label);
            let label_width = unicode_width::UnicodeWidthStr::width(label.as_str());
            let available = (inner_area.width as usize).saturating_sub(4);
            let label = truncate_to_width(&label, available);

            // Full path after the label when there is room for it.
            let path_room = available.saturating_sub(label_width + 2);
            let mut spans = vec![
                Span::styled(checkbox, checkbox_style),
                Span::styled(label, if chosen { self.theme.chosen } else { name_style }),
            ];
            if path_room > 8 {
                spans.push(Span::styled(
                    format!("  {}", truncate_to_width(&candidate.path, path_room)),
                    Style::default().fg(self.theme.muted),
                ));
            }

            let line = Line::from(spans);
            let line = if index == nav.selected() {
                line.style(self.theme.cursor(self.active))
            } else {
                line
            };
            Widget::render(line, Rect::new(inner_area.x, y, inner_area.width, 1), buf);
        }
    }
}
