//! Help overlay widget.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Widget};

use crate::event::{HelpSection, get_help_sections};
use crate::theme::Theme;

/// Help overlay showing key bindings organized by section.
pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn section_lines(&self, section: &HelpSection) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            section.title,
            Style::default()
                .fg(self.theme.info)
                .add_modifier(Modifier::BOLD),
        ))];
        for binding in &section.bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("{:>12}", binding.keys), self.theme.help_key),
                Span::styled(format!(" {}", binding.description), self.theme.help_desc),
            ]));
        }
        lines
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let sections = get_help_sections();
        let lines: Vec<Line> = sections
            .iter()
            .enumerate()
            .flat_map(|(i, section)| {
                let mut lines = self.section_lines(section);
                if i + 1 < sections.len() {
                    lines.push(Line::default());
                }
                lines
            })
            .collect();

        let popup_width = 48.min(area.width.saturating_sub(4));
        let popup_height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(" Help - press ? or Esc to close ")
            .title_style(self.theme.title)
            .borders(Borders::ALL)
            .border_style(self.theme.border);
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        for (row, line) in lines.iter().take(inner.height as usize).enumerate() {
            buf.set_line(inner.x, inner.y + row as u16, line, inner.width);
        }
    }
}

/// Center a rect of the given size within an area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
