//! Map view widget: world outline with one point per located record.
//!
//! The visible region is the [`MapState`] viewport; the canvas axes are
//! longitude (x) and latitude (y). `←`/`→` (or `↑`/`↓`) step through the
//! markers, `Enter` opens the highlighted one.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use mof_core::view::MapState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    symbols,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Block, Widget,
    },
};

/// Step the marker cursor. Returns `true` if it moved.
pub fn handle(state: &mut MapState, event: &AppEvent) -> bool {
    let before = state.cursor;
    match event {
        AppEvent::Nav(Direction::Right | Direction::Down) => state.select_next(),
        AppEvent::Nav(Direction::Left | Direction::Up) => state.select_prev(),
        _ => return false,
    }
    if state.cursor != before {
        tracing::debug!(cursor = state.cursor, "map: marker selected");
    }
    state.cursor != before
}

pub struct MapView<'a> {
    state: &'a MapState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> MapView<'a> {
    pub fn new(state: &'a MapState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for MapView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.state.selected() {
            Some(marker) if self.focused => format!(" Map · {} ", marker.label),
            _ => format!(" Map · {} markers ", self.state.markers.len()),
        };
        let block = Block::bordered()
            .title(title)
            .border_style(self.theme.border(self.focused));

        let vp = self.state.viewport;
        let coastline = Theme::color_of(self.theme.coastline);
        let record = Theme::color_of(self.theme.marker_record);
        let selected = Theme::color_of(self.theme.marker_selected);
        let user = Theme::color_of(self.theme.marker_user);

        let points: Vec<(f64, f64)> = self
            .state
            .markers
            .iter()
            .map(|m| (m.position.lon, m.position.lat))
            .collect();
        let highlighted = self
            .state
            .selected()
            .filter(|_| self.focused)
            .map(|m| (m.position.lon, m.position.lat, m.label.clone()));

        Canvas::default()
            .block(block)
            .marker(symbols::Marker::Braille)
            .x_bounds([vp.west, vp.east])
            .y_bounds([vp.south, vp.north])
            .paint(|ctx| {
                ctx.draw(&Map {
                    resolution: MapResolution::High,
                    color: coastline,
                });
                ctx.layer();
                ctx.draw(&Points {
                    coords: &points,
                    color: record,
                });
                if let Some((x, y, ref label)) = highlighted {
                    ctx.draw(&Points {
                        coords: &[(x, y)],
                        color: selected,
                    });
                    ctx.print(
                        x,
                        y,
                        Line::from(Span::styled(format!(" {label}"), self.theme.marker_selected)),
                    );
                }
                if let Some(me) = self.state.user {
                    ctx.print(
                        me.lon,
                        me.lat,
                        Line::from(Span::styled("◉ you", self.theme.marker_user)),
                    );
                    ctx.draw(&Points {
                        coords: &[(me.lon, me.lat)],
                        color: user,
                    });
                }
            })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mof_core::view::{project_map, Marker, MapSurface};
    use mof_core::Record;
    use mof_core::Coordinates;
    use ratatui::{backend::TestBackend, Terminal};

    fn state_with_markers(n: u32) -> MapState {
        let mut s = MapState::new(Coordinates::new(46.6, 1.9), 6);
        for i in 0..n {
            s.place_marker(Marker {
                record_id: i,
                label: format!("m{i}"),
                position: Coordinates::new(45.0 + i as f64, 2.0),
            });
        }
        s
    }

    #[test]
    fn nav_steps_through_markers_and_stops_at_ends() {
        let mut s = state_with_markers(2);
        assert!(handle(&mut s, &AppEvent::Nav(Direction::Right)));
        assert!(!handle(&mut s, &AppEvent::Nav(Direction::Right)));
        assert_eq!(s.cursor, 1);
        assert!(handle(&mut s, &AppEvent::Nav(Direction::Up)));
        assert!(!handle(&mut s, &AppEvent::Nav(Direction::Left)));
    }

    #[test]
    fn renders_marker_count_and_user_position() {
        let mut s = state_with_markers(3);
        s.user = Some(Coordinates::new(46.0, 2.0));
        let theme = Theme::load_default();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|f| f.render_widget(MapView::new(&s, false, &theme), f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("3 markers"));
        assert!(text.contains("you"));
    }

    #[test]
    fn single_projected_marker_is_drawn() {
        let record = Record {
            id: 1,
            name: "Pierre Hermé".to_string(),
            specialty: "Pâtissier-Confiseur".to_string(),
            address: None,
            year: Some(1997),
            coordinates: Some(Coordinates::new(48.8534, 2.3328)),
            website: None,
            distance: None,
        };
        let mut s = MapState::new(Coordinates::new(46.6, 1.9), 6);
        project_map(&[record], &mut s, 0.1);

        let theme = Theme::load_default();
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|f| f.render_widget(MapView::new(&s, false, &theme), f.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let dots = (1..11)
            .flat_map(|y| (1..39).map(move |x| (x, y)))
            .filter(|&(x, y)| {
                buffer[(x, y)]
                    .symbol()
                    .chars()
                    .any(|c| ('\u{2801}'..='\u{28FF}').contains(&c))
            })
            .count();
        assert!(dots > 0, "nothing drawn inside the map pane");
    }
}
