//! Help popup: centred floating overlay listing all keybindings.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::{event::Keymap, theme::Theme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Fixed bindings; the remappable ones are prepended from the [`Keymap`].
const FIXED: &[(&str, &str)] = &[
    ("q  /  Ctrl+c", "Quit"),
    ("Enter (search)", "Centre the map on the typed address"),
    ("Escape", "Close popup / leave the search bar"),
    ("↑ k  /  ↓ j", "Move in the tree, list, or between markers"),
    ("← h  /  → l", "Collapse / expand tree, previous / next marker"),
    ("Space", "Toggle a specialty"),
    ("Enter", "Toggle a specialty / open the highlighted record"),
    ("PageUp  /  Ctrl+u", "List: page up"),
    ("PageDown / Ctrl+d", "List: page down"),
    (":", "Command line (:help for commands)"),
    ("?", "Toggle this help popup"),
];

fn rows(keymap: &Keymap) -> Vec<(String, &'static str)> {
    let mut rows = vec![
        (Keymap::label(keymap.toggle_focus), "Cycle focus: specialties → view → search"),
        (Keymap::label(keymap.query_focus), "Focus the search bar"),
        (Keymap::label(keymap.toggle_view), "Switch between map and list"),
        (Keymap::label(keymap.geolocate), "Locate me and sort by distance"),
        (Keymap::label(keymap.reset_filters), "Reset all filters"),
    ];
    rows.extend(FIXED.iter().map(|(k, d)| (k.to_string(), *d)));
    rows
}

pub struct HelpPopup<'a> {
    keymap: &'a Keymap,
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(keymap: &'a Keymap, theme: &'a Theme) -> Self {
        Self { keymap, theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = rows(self.keymap);
        let popup = centered_rect(76, rows.len() as u16 + 2, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" MOF Guide: keybindings (? to close) ")
            .border_style(self.theme.border_focused);

        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines: Vec<Line> = rows
            .into_iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(format!("  {key:<20}"), self.theme.heading),
                    Span::raw(desc),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

/// A `width`×`height` rect centred in `area`, clipped to it.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn lists_remapped_keys() {
        let keymap = Keymap {
            toggle_view: KeyCode::Char('m'),
            ..Keymap::default()
        };
        let theme = Theme::load_default();
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal
            .draw(|f| f.render_widget(HelpPopup::new(&keymap, &theme), f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("  m "));
        assert!(text.contains("Switch between map and list"));
        assert!(text.contains("Tab"));
    }

    #[test]
    fn centered_rect_clips_to_area() {
        let r = centered_rect(100, 50, Rect::new(0, 0, 40, 10));
        assert_eq!(r, Rect::new(0, 0, 40, 10));
    }
}
