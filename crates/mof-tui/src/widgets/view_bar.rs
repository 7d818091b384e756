//! View bar: the strip at the top of the screen: map/list switch, result
//! count, and the latest status message.

use crate::theme::Theme;
use mof_core::ViewMode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Tabs, Widget},
};

/// A transient message shown at the right edge until the next action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct ViewBar<'a> {
    view: ViewMode,
    summary: &'a str,
    status: Option<&'a Status>,
    /// A geolocation request is in flight.
    locating: bool,
    theme: &'a Theme,
}

impl<'a> ViewBar<'a> {
    pub fn new(
        view: ViewMode,
        summary: &'a str,
        status: Option<&'a Status>,
        locating: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { view, summary, status, locating, theme }
    }
}

impl Widget for ViewBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let selected = match self.view {
            ViewMode::Map => 0,
            ViewMode::List => 1,
        };
        let tabs = Tabs::new(vec![Line::from(" Map "), Line::from(" List ")])
            .select(selected)
            .highlight_style(self.theme.border_focused.add_modifier(Modifier::REVERSED))
            .divider("");
        let tabs_width = 14;
        tabs.render(Rect { width: tabs_width.min(area.width), ..area }, buf);

        let summary = Span::styled(format!(" {} ", self.summary), self.theme.heading);
        buf.set_span(area.x + tabs_width, area.y, &summary, area.width.saturating_sub(tabs_width));

        let right = if self.locating {
            Span::styled(" Locating… ", self.theme.status_info)
        } else {
            match self.status {
                Some(Status::Info(msg)) => Span::styled(format!(" {msg} "), self.theme.status_info),
                Some(Status::Error(msg)) => {
                    Span::styled(format!(" {msg} "), self.theme.status_error)
                }
                None => Span::styled(
                    " v:view  L:locate  ?:help ",
                    Style::default().add_modifier(Modifier::DIM),
                ),
            }
        };
        let width = right.width() as u16;
        let x = area.right().saturating_sub(width);
        buf.set_span(x, area.y, &right, width);
    }
}
