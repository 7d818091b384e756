//! Core types for mof-core: MOF Guide.
//!
//! This module defines the data structures shared across all layers: the
//! craftsperson [`Record`], its optional [`Coordinates`], the session
//! [`FilterCriteria`], and the on-disk [`Directory`] document.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One craftsperson entry from the directory.
///
/// Only `distance` is ever written after load; every other field is treated
/// as read-only by the store, the filter pipeline, and the view projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Stable join key used by marker → detail lookups.
    pub id: u32,
    pub name: String,
    /// Craft category. An empty string means "no category".
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub address: Option<String>,
    /// Year the distinction was awarded.
    #[serde(default)]
    pub year: Option<i32>,
    /// Data files write `{"lat": null, "lon": null}` for unknown positions;
    /// that shape deserializes to `None`.
    #[serde(default, deserialize_with = "deserialize_coordinates")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub website: Option<String>,
    /// Kilometres from the user location. Derived; never persisted.
    #[serde(skip)]
    pub distance: Option<f64>,
}

#[derive(Deserialize)]
struct RawCoordinates {
    lat: Option<f64>,
    lon: Option<f64>,
}

fn deserialize_coordinates<'de, D>(deserializer: D) -> Result<Option<Coordinates>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawCoordinates> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawCoordinates {
            lat: Some(lat),
            lon: Some(lon),
        }) => Some(Coordinates { lat, lon }),
        _ => None,
    })
}

/// Mutable filter state for the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Selected specialties. Empty means no category restriction.
    pub categories: BTreeSet<String>,
    /// Inclusive lower bound on `year`.
    pub year_min: Option<i32>,
    /// Inclusive upper bound on `year`.
    pub year_max: Option<i32>,
    /// Free text matched accent- and case-insensitively.
    pub search_query: String,
}

impl FilterCriteria {
    /// True when no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.year_min.is_none()
            && self.year_max.is_none()
            && self.search_query.is_empty()
    }
}

/// Which projection of the filtered subset is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Map,
    List,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Map => ViewMode::List,
            ViewMode::List => ViewMode::Map,
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Map => write!(f, "map"),
            ViewMode::List => write!(f, "list"),
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "map" | "carte" => Ok(ViewMode::Map),
            "list" | "liste" => Ok(ViewMode::List),
            other => Err(format!("unknown view: {other}")),
        }
    }
}

/// The on-disk directory document: `{ "meta": {...}, "mof": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Directory {
    #[serde(default)]
    pub meta: Option<DirectoryMeta>,
    #[serde(default)]
    pub mof: Vec<Record>,
}

/// Provenance block written by the scrapers. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryMeta {
    pub total: Option<usize>,
    pub generated_at: Option<String>,
    pub source: Option<String>,
    pub method: Option<String>,
    pub note: Option<String>,
}

impl DirectoryMeta {
    /// Parse `generated_at` (`%Y-%m-%d %H:%M:%S`). Unparsable values read as absent.
    pub fn generated_at(&self) -> Option<chrono::NaiveDateTime> {
        self.generated_at
            .as_deref()
            .and_then(|s| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
