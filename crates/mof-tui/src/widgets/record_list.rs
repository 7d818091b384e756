//! Record list widget: the list view, one summary card per filtered record.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Previous card (scrolls the window if needed) |
//! | `↓` / `j` | Next card |
//! | `PageUp` / `Ctrl+u` | Up one page |
//! | `PageDown` / `Ctrl+d` | Down one page |
//! | `Enter` | Open the detail view (handled by the app shell) |
//!
//! `offset` is the index of the first visible card; `cursor` is the index of
//! the highlighted card and always lies inside the visible window.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use mof_core::view::{Card, ListProjection};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

/// Rows per card: name, specialty, address, spacer.
const CARD_ROWS: usize = 4;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct RecordListState {
    pub cursor: usize,
    pub offset: usize,
    /// Cached from the last render so `handle()` can page correctly.
    last_height: Cell<usize>,
}

impl Default for RecordListState {
    fn default() -> Self {
        Self {
            cursor: 0,
            offset: 0,
            last_height: Cell::new(40),
        }
    }
}

impl RecordListState {
    fn page(&self) -> usize {
        (self.last_height.get() / CARD_ROWS).max(1)
    }

    /// Back to the first card. Call whenever the filtered subset changes.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    /// Handle a navigation event against a list of `total` cards.
    pub fn handle(&mut self, event: &AppEvent, total: usize) {
        if total == 0 {
            self.reset();
            return;
        }
        let page = self.page();
        match event {
            AppEvent::Nav(Direction::Up) => self.cursor = self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.cursor = (self.cursor + 1).min(total - 1),
            AppEvent::ScrollUp => self.cursor = self.cursor.saturating_sub(page),
            AppEvent::ScrollDown => self.cursor = (self.cursor + page).min(total - 1),
            _ => return,
        }
        self.follow_cursor(page);
        tracing::debug!(cursor = self.cursor, offset = self.offset, "list: moved");
    }

    fn follow_cursor(&mut self, page: usize) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + page {
            self.offset = self.cursor + 1 - page;
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct RecordList<'a> {
    projection: &'a ListProjection,
    state: &'a RecordListState,
    query: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> RecordList<'a> {
    pub fn new(
        projection: &'a ListProjection,
        state: &'a RecordListState,
        query: &'a str,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { projection, state, query, focused, theme }
    }
}

impl Widget for RecordList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Craftspeople")
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        self.state.last_height.set(inner.height as usize);

        let cards = match self.projection {
            ListProjection::Empty(placeholder) => {
                let lines = vec![
                    Line::from(""),
                    Line::from(Span::styled(placeholder.title, self.theme.heading)).centered(),
                    Line::from(Span::styled(placeholder.hint, self.theme.placeholder)).centered(),
                ];
                Paragraph::new(lines).render(inner, buf);
                return;
            }
            ListProjection::Cards(cards) => cards,
        };

        let page = (inner.height as usize / CARD_ROWS).max(1);
        let start = self.state.offset.min(cards.len().saturating_sub(1));
        let end = (start + page).min(cards.len());

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        let mut lines: Vec<Line> = Vec::with_capacity(page * CARD_ROWS);
        for (idx, card) in cards[start..end].iter().enumerate() {
            let highlighted = self.focused && start + idx == self.state.cursor;
            for mut line in card_lines(card, self.query, self.theme) {
                if highlighted {
                    line = line.patch_style(Style::default().add_modifier(Modifier::REVERSED));
                }
                lines.push(line);
            }
            lines.push(Line::from(""));
        }
        Paragraph::new(lines).render(text_area, buf);

        let mut sb_state = ScrollbarState::new(cards.len())
            .position(self.state.cursor)
            .viewport_content_length(page);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

// ---------------------------------------------------------------------------
// Card rendering
// ---------------------------------------------------------------------------

fn card_lines<'a>(card: &'a Card, query: &str, theme: &Theme) -> [Line<'a>; 3] {
    let mut title = highlight(&card.name, query, theme.heading, theme.search_highlight);
    if let Some(ref year) = card.year {
        title.push(Span::raw("  "));
        title.push(Span::styled(format!("[{year}]"), theme.muted));
    }

    let mut second = vec![Span::styled(
        card.specialty.as_str(),
        theme.specialty_style(&card.specialty),
    )];
    if let Some(ref distance) = card.distance {
        second.push(Span::raw("  · "));
        second.push(Span::styled(distance.as_str(), theme.distance));
    }

    [
        Line::from(title),
        Line::from(second),
        Line::from(Span::styled(card.address.as_str(), theme.muted)),
    ]
}

/// Split `text` around the first case-insensitive occurrence of `query`.
///
/// Only applies when lowercasing keeps byte offsets aligned; accent-folded
/// matches are filtered correctly but not highlighted.
fn highlight<'a>(text: &'a str, query: &str, base: Style, hl: Style) -> Vec<Span<'a>> {
    let query = query.trim();
    let lower = text.to_lowercase();
    let needle = query.to_lowercase();
    if needle.is_empty() || lower.len() != text.len() {
        return vec![Span::styled(text, base)];
    }
    match lower.find(&needle) {
        Some(at) if text.is_char_boundary(at) && text.is_char_boundary(at + needle.len()) => {
            let end = at + needle.len();
            vec![
                Span::styled(&text[..at], base),
                Span::styled(&text[at..end], base.patch(hl)),
                Span::styled(&text[end..], base),
            ]
        }
        _ => vec![Span::styled(text, base)],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
