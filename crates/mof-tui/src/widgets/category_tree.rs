//! Category tree widget: the specialty filter in the left pane.
//!
//! One root node ("All specialties") with a leaf per distinct specialty.
//! The set of selected leaves is the category filter; an empty set means no
//! category restriction.
//!
//! # Navigation
//! - `↑`/`k` and `↓`/`j` move the cursor up and down the visible list.
//! - `→`/`l` expands the focused node; `←`/`h` collapses it.
//! - `Space` or `Enter` on a leaf toggles that specialty; on the root it
//!   toggles every specialty at once. `Enter` on a collapsed root expands it.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};

const ROOT_ID: &str = "__all__";
const ROOT_LABEL: &str = "All specialties";

// ---------------------------------------------------------------------------
// Selection state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeSelection {
    Selected,
    Unselected,
    /// Some (but not all) specialties under this node are selected.
    Partial,
}

// ---------------------------------------------------------------------------
// Tree node
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Stable identifier; the specialty name for leaves.
    pub id: String,
    pub label: String,
    pub expanded: bool,
    pub selection: NodeSelection,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            expanded: true,
            selection: NodeSelection::Unselected,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }
}

// ---------------------------------------------------------------------------
// Tree state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct CategoryTreeState {
    pub nodes: Vec<TreeNode>,
    /// Index into the currently-visible (flattened) list.
    pub cursor: usize,
}

impl CategoryTreeState {
    /// Build the tree from the sorted category list of the loaded records.
    pub fn from_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let leaves = categories
            .into_iter()
            .map(|c| {
                let c = c.into();
                TreeNode::new(c.clone(), c)
            })
            .collect();
        Self {
            nodes: vec![TreeNode::new(ROOT_ID, ROOT_LABEL).with_children(leaves)],
            cursor: 0,
        }
    }

    /// Specialties whose leaves are selected, in tree order.
    pub fn selected_categories(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_selected_leaves(&self.nodes, &mut out);
        out
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        set_all_selection(&mut self.nodes, NodeSelection::Unselected);
    }

    fn cursor_id(&self) -> Option<String> {
        self.visible()
            .into_iter()
            .nth(self.cursor)
            .map(|(_, n)| n.id.clone())
    }

    /// Flatten the tree into `(depth, &node)` pairs, respecting expanded state.
    pub fn visible(&self) -> Vec<(usize, &TreeNode)> {
        flatten(&self.nodes, 0)
    }

    /// Handle an [`AppEvent`]. Returns `true` when the selection changed and
    /// the category filter must be re-applied.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "tree: cursor up");
                false
            }
            AppEvent::Nav(Direction::Down) => {
                let max = self.visible().len().saturating_sub(1);
                if self.cursor < max {
                    self.cursor += 1;
                }
                tracing::debug!(cursor = self.cursor, "tree: cursor down");
                false
            }
            AppEvent::Nav(Direction::Right) => {
                if let Some(id) = self.cursor_id() {
                    tracing::debug!(node = %id, "tree: expand");
                    set_expanded(&mut self.nodes, &id, true);
                }
                false
            }
            AppEvent::Nav(Direction::Left) => {
                if let Some(id) = self.cursor_id() {
                    tracing::debug!(node = %id, "tree: collapse");
                    set_expanded(&mut self.nodes, &id, false);
                    self.clamp_cursor();
                }
                false
            }
            AppEvent::Enter => {
                let Some(id) = self.cursor_id() else {
                    return false;
                };
                if !is_leaf(&self.nodes, &id) && !is_expanded(&self.nodes, &id) {
                    tracing::debug!(node = %id, "tree: expand (enter)");
                    set_expanded(&mut self.nodes, &id, true);
                    return false;
                }
                tracing::debug!(node = %id, "tree: toggle selection (enter)");
                toggle_selection(&mut self.nodes, &id)
            }
            AppEvent::Char(' ') => match self.cursor_id() {
                Some(id) => {
                    tracing::debug!(node = %id, "tree: toggle selection (space)");
                    toggle_selection(&mut self.nodes, &id)
                }
                None => false,
            },
            _ => false,
        }
    }

    fn clamp_cursor(&mut self) {
        let max = self.visible().len().saturating_sub(1);
        if self.cursor > max {
            self.cursor = max;
        }
    }
}

// ---------------------------------------------------------------------------
// Recursive tree helpers
// ---------------------------------------------------------------------------

fn flatten(nodes: &[TreeNode], depth: usize) -> Vec<(usize, &TreeNode)> {
    let mut out = Vec::new();
    for node in nodes {
        out.push((depth, node));
        if node.expanded {
            out.extend(flatten(&node.children, depth + 1));
        }
    }
    out
}

fn collect_selected_leaves(nodes: &[TreeNode], out: &mut Vec<String>) {
    for node in nodes {
        if node.children.is_empty() {
            if node.selection == NodeSelection::Selected {
                out.push(node.id.clone());
            }
        } else {
            collect_selected_leaves(&node.children, out);
        }
    }
}

fn find<'a>(nodes: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find(&node.children, id) {
            return Some(found);
        }
    }
    None
}

fn is_leaf(nodes: &[TreeNode], id: &str) -> bool {
    find(nodes, id).is_none_or(|n| n.children.is_empty())
}

fn is_expanded(nodes: &[TreeNode], id: &str) -> bool {
    find(nodes, id).is_some_and(|n| n.expanded)
}

/// Set the `expanded` flag on the node with `id`. Returns `true` if found.
fn set_expanded(nodes: &mut [TreeNode], id: &str, expanded: bool) -> bool {
    for node in nodes.iter_mut() {
        if node.id == id {
            node.expanded = expanded;
            return true;
        }
        if set_expanded(&mut node.children, id, expanded) {
            return true;
        }
    }
    false
}

/// Toggle the selection state of the node with `id`.
///
/// The new state is pushed down to every descendant; on the way back up each
/// ancestor recomputes its own state from its children.
fn toggle_selection(nodes: &mut [TreeNode], id: &str) -> bool {
    for node in nodes.iter_mut() {
        if node.id == id {
            let new_state = match node.selection {
                NodeSelection::Selected | NodeSelection::Partial => NodeSelection::Unselected,
                NodeSelection::Unselected => NodeSelection::Selected,
            };
            node.selection = new_state;
            set_all_selection(&mut node.children, new_state);
            return true;
        }
        if toggle_selection(&mut node.children, id) {
            node.selection = compute_selection_from_children(&node.children);
            return true;
        }
    }
    false
}

fn set_all_selection(nodes: &mut [TreeNode], state: NodeSelection) {
    for node in nodes.iter_mut() {
        node.selection = state;
        set_all_selection(&mut node.children, state);
    }
}

/// - All `Selected`   → `Selected`
/// - All `Unselected` → `Unselected`
/// - Any mix → `Partial`
fn compute_selection_from_children(children: &[TreeNode]) -> NodeSelection {
    if children.is_empty() {
        return NodeSelection::Unselected;
    }
    if children.iter().all(|c| c.selection == NodeSelection::Selected) {
        NodeSelection::Selected
    } else if children.iter().all(|c| c.selection == NodeSelection::Unselected) {
        NodeSelection::Unselected
    } else {
        NodeSelection::Partial
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct CategoryTree<'a> {
    state: &'a CategoryTreeState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> CategoryTree<'a> {
    pub fn new(state: &'a CategoryTreeState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for CategoryTree<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Specialties")
            .border_style(self.theme.border(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let items: Vec<ListItem> = self
            .state
            .visible()
            .iter()
            .map(|(depth, node)| {
                let indent = "  ".repeat(*depth);
                let expand = if node.children.is_empty() {
                    "  "
                } else if node.expanded {
                    "▼ "
                } else {
                    "▶ "
                };
                let sel = match node.selection {
                    NodeSelection::Selected => "✓ ",
                    NodeSelection::Unselected => "○ ",
                    NodeSelection::Partial => "◐ ",
                };
                let label_style = if node.children.is_empty() {
                    self.theme.specialty_style(&node.label)
                } else {
                    self.theme.heading
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{indent}{expand}{sel}")),
                    Span::styled(node.label.clone(), label_style),
                ]))
            })
            .collect();

        let list =
            List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let cursor = self.focused.then_some(self.state.cursor);
        let mut list_state = ListState::default().with_selected(cursor);
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
