//! Filter/sort pipeline: category, year-range, and free-text predicates over
//! the record collection, plus the distance ordering applied when a user
//! location is known.
//!
//! Filtering never re-sorts: the output is always a sub-sequence of the
//! input, so distance order (or load order) carries through untouched.

use crate::{
    normalizer::{contains_normalized, normalize},
    types::{FilterCriteria, Record},
};
use std::cmp::Ordering;

/// Apply every active predicate of `criteria` to `records`, in order:
/// category membership, lower year bound, upper year bound, text search.
///
/// A record with no `year` is dropped as soon as either bound is set.
pub fn apply_filters(records: &[Record], criteria: &FilterCriteria) -> Vec<Record> {
    let query = if criteria.search_query.is_empty() {
        None
    } else {
        Some(normalize(&criteria.search_query))
    };

    records
        .iter()
        .filter(|r| criteria.categories.is_empty() || criteria.categories.contains(&r.specialty))
        .filter(|r| match criteria.year_min {
            Some(min) => r.year.is_some_and(|y| y >= min),
            None => true,
        })
        .filter(|r| match criteria.year_max {
            Some(max) => r.year.is_some_and(|y| y <= max),
            None => true,
        })
        .filter(|r| match query.as_deref() {
            Some(q) => matches_query(r, q),
            None => true,
        })
        .cloned()
        .collect()
}

/// True when the normalized name, specialty, or address contains `query`.
/// `query` must already be normalized.
pub fn matches_query(record: &Record, query: &str) -> bool {
    contains_normalized(&record.name, query)
        || contains_normalized(&record.specialty, query)
        || record
            .address
            .as_deref()
            .is_some_and(|a| contains_normalized(a, query))
}

/// Stable sort ascending by `distance`; records without a distance go last
/// and keep their relative order.
pub fn sort_by_distance(records: &mut [Record]) {
    records.sort_by(|a, b| compare_distance(a.distance, b.distance));
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.total_cmp(&b),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(id: u32, name: &str, specialty: &str, year: Option<i32>) -> Record {
        Record {
            id,
            name: name.to_string(),
            specialty: specialty.to_string(),
            address: None,
            year,
            coordinates: None,
            website: None,
            distance: None,
        }
    }

    fn ids(records: &[Record]) -> Vec<u32> {
        records.iter().map(|r| r.id).collect()
    }

    fn sample() -> Vec<Record> {
        vec![
            record(1, "Pierre Hermé", "Pâtissier-Confiseur", Some(1997)),
            record(2, "Yannick Alléno", "Cuisinier", Some(2004)),
            record(3, "Éric Kayser", "Boulanger", Some(1996)),
            record(4, "Michel Fouchereau", "Fromager", None),
            record(5, "Régis Marcon", "Cuisinier", Some(1994)),
        ]
    }

    #[test]
    fn empty_criteria_is_identity() {
        let records = sample();
        assert_eq!(apply_filters(&records, &FilterCriteria::default()), records);
    }

    #[test]
    fn category_filter_matches_any_selected() {
        let mut criteria = FilterCriteria::default();
        criteria.categories.insert("Cuisinier".to_string());
        criteria.categories.insert("Boulanger".to_string());
        assert_eq!(ids(&apply_filters(&sample(), &criteria)), vec![2, 3, 5]);
    }

    #[test]
    fn year_bounds_are_inclusive_and_drop_missing_years() {
        let criteria = FilterCriteria {
            year_min: Some(1996),
            year_max: Some(2004),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&sample(), &criteria)), vec![1, 2, 3]);
    }

    #[test]
    fn single_bound_drops_missing_years() {
        let criteria = FilterCriteria {
            year_max: Some(3000),
            ..Default::default()
        };
        assert!(!ids(&apply_filters(&sample(), &criteria)).contains(&4));
    }

    #[test]
    fn search_is_accent_and_case_insensitive() {
        let criteria = FilterCriteria {
            search_query: "ERIC".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&sample(), &criteria)), vec![3]);
    }

    #[test]
    fn search_matches_address() {
        let mut records = sample();
        records[1].address = Some("8 Avenue Dutuit, 75008 Paris".to_string());
        let criteria = FilterCriteria {
            search_query: "dutuit".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&records, &criteria)), vec![2]);
    }

    #[test]
    fn sort_puts_undistanced_last_and_is_stable() {
        let mut records = sample();
        records[0].distance = Some(5.0);
        records[2].distance = Some(1.0);
        records[4].distance = Some(3.0);
        sort_by_distance(&mut records);
        assert_eq!(ids(&records), vec![3, 5, 1, 2, 4]);
    }

    #[test]
    fn equal_distances_keep_input_order() {
        let mut records = sample();
        for r in records.iter_mut() {
            r.distance = Some(2.0);
        }
        sort_by_distance(&mut records);
        assert_eq!(ids(&records), vec![1, 2, 3, 4, 5]);
    }
}
