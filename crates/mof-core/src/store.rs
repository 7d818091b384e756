//! Store: the loaded record collection, the current filtered subset, the
//! filter criteria, and the user location.
//!
//! The store is the single source of truth; the views read from it, never
//! from the data source directly. Every mutation recomputes the filtered
//! subset from scratch, so no state leaks between filter passes.

use crate::{
    error::{Error, Result},
    filter::{apply_filters, sort_by_distance},
    geo::distance_between,
    types::{Coordinates, FilterCriteria, Record},
};
use std::collections::BTreeSet;

#[derive(Debug, Default)]
pub struct DataStore {
    records: Vec<Record>,
    filtered: Vec<Record>,
    criteria: FilterCriteria,
    user_location: Option<Coordinates>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection. The filtered subset becomes an identical
    /// copy and any previous user location is forgotten.
    ///
    /// An empty collection is refused with [`Error::DataUnavailable`]; the
    /// store is left as it was.
    pub fn load(&mut self, records: Vec<Record>) -> Result<()> {
        if records.is_empty() {
            tracing::error!("refusing to load an empty record collection");
            return Err(Error::DataUnavailable("the record collection is empty".to_string()));
        }
        tracing::debug!(count = records.len(), "store: loaded records");
        self.filtered = records.clone();
        self.records = records;
        self.user_location = None;
        self.criteria = FilterCriteria::default();
        Ok(())
    }

    /// Distinct non-empty specialties across the full collection, ascending.
    pub fn extract_categories(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| !r.specialty.is_empty())
            .map(|r| r.specialty.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Set the user location, recompute every distance, and re-sort the full
    /// collection nearest-first. Records without coordinates lose any
    /// previous distance and sink to the end.
    pub fn update_location(&mut self, location: Coordinates) {
        self.user_location = Some(location);
        for record in self.records.iter_mut() {
            record.distance = record.coordinates.map(|c| distance_between(location, c));
        }
        sort_by_distance(&mut self.records);
        tracing::debug!(
            lat = location.lat,
            lon = location.lon,
            located = self.records.iter().filter(|r| r.distance.is_some()).count(),
            "store: distances updated"
        );
        self.refilter();
    }

    // ── Criteria mutators ─────────────────────────────────────────────────

    /// Add `category` to the selection, or remove it if already selected.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.criteria.categories.remove(category) {
            self.criteria.categories.insert(category.to_string());
        }
        tracing::debug!(category, selected = ?self.criteria.categories, "store: category toggled");
        self.refilter();
    }

    pub fn set_categories<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.criteria.categories = categories.into_iter().map(Into::into).collect();
        self.refilter();
    }

    pub fn set_year_min(&mut self, year: Option<i32>) {
        self.criteria.year_min = year;
        tracing::debug!(?year, "store: year_min set");
        self.refilter();
    }

    pub fn set_year_max(&mut self, year: Option<i32>) {
        self.criteria.year_max = year;
        tracing::debug!(?year, "store: year_max set");
        self.refilter();
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.criteria.search_query = query.into();
        self.refilter();
    }

    /// Clear every filter. The user location and distance order are kept.
    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        tracing::debug!("store: filters reset");
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = apply_filters(&self.records, &self.criteria);
        tracing::debug!(
            filtered = self.filtered.len(),
            total = self.records.len(),
            "store: filters applied"
        );
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn filtered(&self) -> &[Record] {
        &self.filtered
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn user_location(&self) -> Option<Coordinates> {
        self.user_location
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look a record up by id in the full collection.
    pub fn find(&self, id: u32) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// `"12 MOF craftspeople"` when nothing is filtered out, otherwise
    /// `"3 of 12 craftspeople"`.
    pub fn results_summary(&self) -> String {
        results_summary(self.filtered.len(), self.records.len())
    }
}

/// Result-count line shown above the views.
pub fn results_summary(count: usize, total: usize) -> String {
    let noun = if count > 1 { "craftspeople" } else { "craftsperson" };
    if count == total {
        format!("{count} MOF {noun}")
    } else {
        format!("{count} of {total} {noun}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
