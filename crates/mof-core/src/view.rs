//! View projections: turn the filtered subset into what the map, list, and
//! detail surfaces draw.
//!
//! Projections are stateless with respect to filtering: they read the
//! filtered subset they are given and nothing else.

use crate::{
    geo::{format_distance, Bounds},
    types::{Coordinates, Record},
};

/// Shown wherever a record has no address.
pub const NO_ADDRESS: &str = "Address not available";

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// Closest zoom a fit may reach, so a single marker or markers on one
/// line still get a region with area.
pub const MAX_FIT_ZOOM: u8 = 14;

/// A point marker with the record it opens when selected.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Id of the record to look up on selection.
    pub record_id: u32,
    pub label: String,
    pub position: Coordinates,
}

/// The operations a map display accepts.
pub trait MapSurface {
    /// Centre the visible region on `center` at a web-map zoom level.
    fn set_view(&mut self, center: Coordinates, zoom: u8);
    fn place_marker(&mut self, marker: Marker);
    fn clear_markers(&mut self);
    /// Make `bounds` the visible region.
    fn fit_bounds(&mut self, bounds: Bounds);
}

/// Project `filtered` onto `surface`: replace every marker with one per
/// located record, then fit the region to them with `padding`.
///
/// Records without coordinates are skipped. With no markers placed the
/// visible region is left as it was. The fitted region is never tighter than
/// [`MAX_FIT_ZOOM`] on either axis. Returns the number of markers placed.
pub fn project_map<S: MapSurface + ?Sized>(filtered: &[Record], surface: &mut S, padding: f64) -> usize {
    surface.clear_markers();

    let mut placed = Vec::new();
    for record in filtered {
        let Some(position) = record.coordinates else {
            continue;
        };
        surface.place_marker(Marker {
            record_id: record.id,
            label: record.name.clone(),
            position,
        });
        placed.push(position);
    }

    if let Some(bounds) = Bounds::from_points(placed.iter().copied()) {
        surface.fit_bounds(bounds.pad(padding).at_most_zoom(MAX_FIT_ZOOM));
    }
    tracing::debug!(markers = placed.len(), "map projected");
    placed.len()
}

/// In-memory [`MapSurface`] backing the TUI map pane.
#[derive(Debug, Clone)]
pub struct MapState {
    pub viewport: Bounds,
    pub markers: Vec<Marker>,
    /// The user's own position, drawn distinctly from record markers.
    pub user: Option<Coordinates>,
    /// Index into `markers` of the highlighted marker.
    pub cursor: usize,
}

impl MapState {
    pub fn new(center: Coordinates, zoom: u8) -> Self {
        Self {
            viewport: Bounds::around(center, zoom),
            markers: Vec::new(),
            user: None,
            cursor: 0,
        }
    }

    pub fn selected(&self) -> Option<&Marker> {
        self.markers.get(self.cursor)
    }

    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.markers.len() {
            self.cursor += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }
}

impl MapSurface for MapState {
    fn set_view(&mut self, center: Coordinates, zoom: u8) {
        self.viewport = Bounds::around(center, zoom);
    }

    fn place_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
        self.cursor = 0;
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.viewport = bounds;
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// Summary card for one record in the list view.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub record_id: u32,
    pub name: String,
    pub specialty: String,
    pub address: String,
    /// `"MOF 1997"` when the year is known.
    pub year: Option<String>,
    /// `"1.2 km away"` when a distance is known.
    pub distance: Option<String>,
    pub website: Option<String>,
}

impl Card {
    pub fn from_record(record: &Record) -> Self {
        Self {
            record_id: record.id,
            name: record.name.clone(),
            specialty: record.specialty.clone(),
            address: record.address.clone().unwrap_or_else(|| NO_ADDRESS.to_string()),
            year: record.year.map(|y| format!("MOF {y}")),
            distance: record.distance.map(|d| format!("{} away", format_distance(d))),
            website: record.website.clone(),
        }
    }
}

/// Empty-state placeholder drawn instead of an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub title: &'static str,
    pub hint: &'static str,
}

pub const NO_RESULTS: Placeholder = Placeholder {
    title: "No craftsperson found",
    hint: "Try changing your filters or your search",
};

#[derive(Debug, Clone, PartialEq)]
pub enum ListProjection {
    Cards(Vec<Card>),
    Empty(Placeholder),
}

/// Cards in filtered order, or the [`NO_RESULTS`] placeholder.
pub fn project_list(filtered: &[Record]) -> ListProjection {
    if filtered.is_empty() {
        ListProjection::Empty(NO_RESULTS)
    } else {
        ListProjection::Cards(filtered.iter().map(Card::from_record).collect())
    }
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSection {
    pub heading: &'static str,
    pub body: String,
}

/// Everything the detail popup shows for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub record_id: u32,
    pub name: String,
    pub specialty: String,
    pub sections: Vec<DetailSection>,
}

impl Detail {
    /// Built from the record's current values, so a distance computed after
    /// the last location update is included.
    pub fn from_record(record: &Record) -> Self {
        let mut sections = vec![DetailSection {
            heading: "Address",
            body: record.address.clone().unwrap_or_else(|| NO_ADDRESS.to_string()),
        }];
        if let Some(year) = record.year {
            sections.push(DetailSection {
                heading: "MOF title",
                body: format!("Awarded in {year}"),
            });
        }
        if let Some(d) = record.distance {
            sections.push(DetailSection {
                heading: "Distance",
                body: format!("{} from your position", format_distance(d)),
            });
        }
        if let Some(ref url) = record.website {
            sections.push(DetailSection {
                heading: "Website",
                body: url.clone(),
            });
        }
        Self {
            record_id: record.id,
            name: record.name.clone(),
            specialty: record.specialty.clone(),
            sections,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
