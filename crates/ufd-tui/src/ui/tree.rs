//! Browse pane: the lazily expanded volume tree.

use std::collections::HashSet;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, StatefulWidget, Widget};

use ufd_core::{EntryKind, FileTree, NodeId};

use crate::theme::Theme;
use crate::ui::truncate_to_width;

/// State for the tree view.
#[derive(Debug, Default, Clone)]
pub struct TreeState {
    /// Currently selected index in the flattened view.
    pub selected: usize,
    /// Scroll offset.
    pub offset: usize,
    /// Expanded nodes the user folded away. Folding keeps the children in
    /// the tree so unfolding needs no new listing.
    pub collapsed: HashSet<NodeId>,
}

impl TreeState {
    /// Fold a node.
    pub fn collapse(&mut self, id: NodeId) {
        self.collapsed.insert(id);
    }

    /// Unfold a node.
    pub fn unfold(&mut self, id: NodeId) {
        self.collapsed.remove(&id);
    }

    /// Check if a node is shown open.
    pub fn is_open(&self, tree: &FileTree, id: NodeId) -> bool {
        tree.get(id).is_some_and(|n| n.expanded) && !self.collapsed.contains(&id)
    }

    /// Move selection up.
    pub fn move_up(&mut self, count: usize) {
        self.selected = self.selected.saturating_sub(count);
    }

    /// Move selection down.
    pub fn move_down(&mut self, count: usize, max: usize) {
        self.selected = (self.selected + count).min(max.saturating_sub(1));
    }

    /// Jump to top.
    pub fn jump_to_top(&mut self) {
        self.selected = 0;
    }

    /// Jump to bottom.
    pub fn jump_to_bottom(&mut self, max: usize) {
        self.selected = max.saturating_sub(1);
    }

    /// Ensure selected item is visible, adjusting offset if needed.
    pub fn ensure_visible(&mut self, viewport_height: usize) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + viewport_height {
            self.offset = self.selected - viewport_height + 1;
        }
    }
}

/// A flattened visible row of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleItem {
    pub id: NodeId,
    pub depth: usize,
    pub is_last_sibling: bool,
    pub parent_last_siblings: Vec<bool>,
}

/// Flatten the tree into visible rows, honoring expansion and folding.
///
/// Roots are drawn at depth 0 without connector lines.
pub fn flatten(tree: &FileTree, state: &TreeState) -> Vec<VisibleItem> {
    let mut items = Vec::new();
    let roots = tree.roots();
    for (i, &root) in roots.iter().enumerate() {
        flatten_node(tree, root, 0, i + 1 == roots.len(), Vec::new(), state, &mut items);
    }
    items
}

fn flatten_node(
    tree: &FileTree,
    id: NodeId,
    depth: usize,
    is_last: bool,
    parent_last_siblings: Vec<bool>,
    state: &TreeState,
    items: &mut Vec<VisibleItem>,
) {
    let Some(node) = tree.get(id) else {
        return;
    };

    items.push(VisibleItem {
        id,
        depth,
        is_last_sibling: is_last,
        parent_last_siblings: parent_last_siblings.clone(),
    });

    if !state.is_open(tree, id) {
        return;
    }

    let child_count = node.children().len();
    for (i, &child) in node.children().iter().enumerate() {
        let mut child_parent_lasts = parent_last_siblings.clone();
        if depth > 0 {
            child_parent_lasts.push(is_last);
        }
        flatten_node(
            tree,
            child,
            depth + 1,
            i + 1 == child_count,
            child_parent_lasts,
            state,
            items,
        );
    }
}

/// Tree view widget.
pub struct TreeView<'a> {
    tree: &'a FileTree,
    focused: Option<NodeId>,
    loading: bool,
    active: bool,
    theme: &'a Theme,
    block: Option<Block<'a>>,
}

impl<'a> TreeView<'a> {
    /// Create a new tree view.
    pub fn new(tree: &'a FileTree, theme: &'a Theme) -> Self {
        Self {
            tree,
            focused: None,
            loading: false,
            active: true,
            theme,
            block: None,
        }
    }

    /// Mark the focused node, and whether its listing is still in flight.
    pub fn focused(mut self, focused: Option<NodeId>, loading: bool) -> Self {
        self.focused = focused;
        self.loading = loading;
        self
    }

    /// Whether this pane has keyboard focus.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Set the block (border) for the widget.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl StatefulWidget for TreeView<'_> {
    type State = TreeState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
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

        let items = flatten(self.tree, state);
        let viewport_height = inner_area.height as usize;
        state.ensure_visible(viewport_height);

        let start = state.offset;
        let end = (start + viewport_height).min(items.len());

        for (row_idx, item_idx) in (start..end).enumerate() {
            let item = &items[item_idx];
            let Some(node) = self.tree.get(item.id) else {
                continue;
            };
            let y = inner_area.y + row_idx as u16;
            let is_selected = item_idx == state.selected;
            let is_focused = self.focused == Some(item.id);

            let mut prefix = String::new();
            for &parent_is_last in &item.parent_last_siblings {
                prefix.push_str(if parent_is_last { "  " } else { "│ " });
            }
            if item.depth > 0 {
                prefix.push_str(if item.is_last_sibling { "└─" } else { "├─" });
            }

            let (indicator, indicator_style) = if is_focused && self.loading {
                ("… ", Style::default().fg(self.theme.info))
            } else if node.error.is_some() {
                ("! ", Style::default().fg(self.theme.error))
            } else if node.kind.is_container() {
                let open = state.is_open(self.tree, item.id);
                (if open { "▼ " } else { "▶ " }, Style::default().fg(self.theme.muted))
            } else {
                ("  ", Style::default().fg(self.theme.muted))
            };

            let base_style = match node.kind {
                EntryKind::Volume => self.theme.volume,
                EntryKind::Directory => self.theme.directory,
                EntryKind::File => self.theme.file,
            };
            let base_style = if is_focused {
                base_style.add_modifier(Modifier::UNDERLINED)
            } else {
                base_style
            };

            let used = unicode_width::UnicodeWidthStr::width(prefix.as_str()) + 2;
            let available = (inner_area.width as usize).saturating_sub(used);
            let name = truncate_to_width(node.label(), available);

            let mut spans = vec![
                Span::styled(prefix, self.theme.tree_lines),
                Span::styled(indicator, indicator_style),
                Span::styled(name, base_style),
            ];
            if let Some(error) = &node.error {
                spans.push(Span::styled(
                    format!("  {error}"),
                    Style::default().fg(self.theme.error).add_modifier(Modifier::DIM),
                ));
            }

            let line = Line::from(spans);
            let line = if is_selected {
                line.style(self.theme.cursor(self.active))
            } else {
                line
            };

            let line_area = Rect::new(inner_area.x, y, inner_area.width, 1);
            Widget::render(line, line_area, buf);
        }
    }
}
