//! Detail popup: everything known about one record.
//!
//! Opened with `Enter` on a list card or a highlighted map marker; closed
//! with `Escape`.

use crate::theme::Theme;
use crate::widgets::help::centered_rect;
use mof_core::view::Detail;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};

pub struct DetailPopup<'a> {
    detail: &'a Detail,
    theme: &'a Theme,
}

impl<'a> DetailPopup<'a> {
    pub fn new(detail: &'a Detail, theme: &'a Theme) -> Self {
        Self { detail, theme }
    }
}

impl Widget for DetailPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![
            Line::from(Span::styled(
                self.detail.specialty.as_str(),
                self.theme.specialty_style(&self.detail.specialty),
            )),
            Line::from(""),
        ];
        for section in &self.detail.sections {
            lines.push(Line::from(Span::styled(section.heading, self.theme.heading)));
            let body_style = if section.heading == "Website" {
                self.theme.link
            } else {
                ratatui::style::Style::default()
            };
            lines.push(Line::from(Span::styled(format!("  {}", section.body), body_style)));
            lines.push(Line::from(""));
        }

        let height = lines.len() as u16 + 2;
        let popup = centered_rect(64, height, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(format!(" {} ", self.detail.name))
            .title_bottom(Line::from(" Esc to close ").right_aligned())
            .border_style(self.theme.border_focused);

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(popup, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mof_core::{Coordinates, Record};
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn renders_name_address_and_website() {
        let record = Record {
            id: 7,
            name: "Jeanne Martin".to_string(),
            specialty: "Ébéniste".to_string(),
            address: Some("3 rue du Bois, Lyon".to_string()),
            year: Some(2004),
            coordinates: Some(Coordinates::new(45.76, 4.83)),
            website: Some("https://example.fr".to_string()),
            distance: Some(2.5),
        };
        let detail = Detail::from_record(&record);
        let theme = Theme::load_default();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| f.render_widget(DetailPopup::new(&detail, &theme), f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Jeanne Martin"));
        assert!(text.contains("3 rue du Bois, Lyon"));
        assert!(text.contains("https://example.fr"));
        assert!(text.contains("2.5 km"));
    }
}
