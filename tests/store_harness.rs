#![allow(unused)]
//! Store layer integration harness.
//!
//! # What this covers
//!
//! - **Loading**: from the JSON data source, including null coordinates and
//!   the refusal of an empty or unreadable document.
//! - **Location update**: distances are computed for located records only,
//!   the collection is sorted nearest-first, unlocated records sink to the end.
//! - **Re-location**: a second update replaces every distance.
//! - **Filters after location**: the filtered subset keeps distance order.
//! - **Reset**: clears every filter but keeps the user location and order.
//! - **Categories**: distinct, sorted, empty specialty excluded.
//!
//! # What this does NOT cover
//!
//! - Filter predicate details (see `filter_harness`)
//! - The geolocation adapter itself (it only hands back a position)
//!
//! # Running
//!
//! ```sh
//! cargo test --test store_harness
//! ```

mod common;
use common::*;

use mof_core::{DataStore, Error};
use mof_sources::{load_store, ConfiguredLocator, DataSource, Geolocator, JsonFileSource};
use pretty_assertions::assert_eq;

async fn sample_store() -> DataStore {
    let file = data_file(SAMPLE_DIRECTORY);
    load_store(&JsonFileSource::new(file.path())).await.unwrap()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[tokio::test]
async fn loads_every_record_in_file_order() {
    let store = sample_store().await;
    assert_eq!(store.len(), 5);
    assert_ids!(store.records(), [1, 2, 3, 4, 5]);
    assert_eq!(store.filtered(), store.records());
    assert!(store.user_location().is_none());
}

#[tokio::test]
async fn null_coordinates_load_as_absent() {
    let store = sample_store().await;
    assert!(store.find(4).unwrap().coordinates.is_none());
    assert!(store.find(1).unwrap().coordinates.is_some());
}

#[tokio::test]
async fn empty_document_is_data_unavailable() {
    let file = data_file(r#"{"meta": {"total": 0}, "mof": []}"#);
    let err = load_store(&JsonFileSource::new(file.path())).await.unwrap_err();
    assert!(matches!(err, Error::DataUnavailable(_)));
    assert_eq!(
        err.user_message(),
        "Unable to load the directory data. Please try again."
    );
}

#[tokio::test]
async fn malformed_document_is_data_unavailable() {
    let file = data_file("{ not json");
    let err = JsonFileSource::new(file.path()).load().await.unwrap_err();
    assert!(matches!(err, Error::DataUnavailable(_)));
}

#[tokio::test]
async fn missing_file_is_data_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let err = JsonFileSource::new(dir.path().join("absent.json"))
        .load()
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DataUnavailable(_)));
    assert!(!err.is_recoverable());
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

#[tokio::test]
async fn location_sorts_nearest_first_and_sinks_unlocated() {
    let mut store = sample_store().await;
    store.update_location(PARIS);

    assert_eq!(store.user_location(), Some(PARIS));
    assert_nearest_first(store.records());
    assert_eq!(store.records()[0].id, 1);
    assert_eq!(store.records()[0].distance, Some(0.0));
    assert_eq!(store.records()[3].id, 3);
    assert_eq!(store.records()[4].id, 4);
    assert_eq!(store.records()[4].distance, None);
    assert_eq!(store.filtered(), store.records());
}

#[tokio::test]
async fn relocating_replaces_every_distance() {
    let mut store = sample_store().await;
    store.update_location(PARIS);
    store.update_location(MARSEILLE);

    assert_nearest_first(store.records());
    assert_eq!(store.records()[0].id, 3);
    assert_eq!(store.records()[0].distance, Some(0.0));
    assert_eq!(store.records()[3].id, 1);
    assert!(store.records().iter().all(|r| r.coordinates.is_some() == r.distance.is_some()));
}

#[tokio::test]
async fn filters_keep_distance_order() {
    let mut store = sample_store().await;
    store.update_location(MARSEILLE);
    store.set_categories(["Fromager", "Pâtissier-Confiseur"]);

    assert_nearest_first(store.filtered());
    assert_eq!(store.filtered().len(), 4);
    assert_eq!(store.filtered().last().map(|r| r.id), Some(4));
    assert_eq!(store.filtered()[2].id, 1);
}

#[tokio::test]
async fn reset_keeps_location_and_order() {
    let mut store = sample_store().await;
    store.update_location(LYON);
    let sorted = ids(store.records());

    store.set_year_min(Some(2010));
    store.set_search_query("lyon");
    assert_ids!(store.filtered(), [2]);

    store.reset_filters();
    assert!(store.criteria().is_empty());
    assert_eq!(store.user_location(), Some(LYON));
    assert_eq!(ids(store.filtered()), sorted);
}

#[tokio::test]
async fn configured_locator_feeds_the_store() {
    let mut store = sample_store().await;
    let position = ConfiguredLocator::new(Some(LYON)).locate().await.unwrap();
    store.update_location(position);
    assert_eq!(store.records()[0].distance.map(|d| d < 1.0), Some(true));
}

#[tokio::test]
async fn unconfigured_locator_is_position_unavailable() {
    let err = ConfiguredLocator::new(None).locate().await.unwrap_err();
    assert!(matches!(err, Error::PositionUnavailable(_)));
    assert!(err.is_recoverable());
    assert_eq!(
        err.user_message(),
        "Unable to locate you. Check your location settings."
    );
}

// ---------------------------------------------------------------------------
// Categories and summary
// ---------------------------------------------------------------------------

#[test]
fn categories_are_distinct_sorted_and_non_empty() {
    let store = store_with(vec![
        located(1, "A", "Fromager", 2000, 45.0, 4.0),
        RecordBuilder::new(2, "B").specialty("").build(),
        located(3, "C", "Boulanger", 2001, 45.0, 4.0),
        located(4, "D", "Fromager", 2002, 45.0, 4.0),
    ]);
    assert_eq!(store.extract_categories(), vec!["Boulanger", "Fromager"]);
}

#[test]
fn toggling_twice_restores_everything() {
    let mut store = store_with(sample_records());
    store.toggle_category("Fromager");
    assert_ids!(store.filtered(), [2, 4]);
    store.toggle_category("Fromager");
    assert_ids!(store.filtered(), [1, 2, 3, 4, 5]);
}

#[test]
fn summary_counts_filtered_against_total() {
    let mut store = store_with(sample_records());
    assert_eq!(store.results_summary(), "5 MOF craftspeople");
    store.set_search_query("herme");
    assert_eq!(store.results_summary(), "1 of 5 craftsperson");
}
