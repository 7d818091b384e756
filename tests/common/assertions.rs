//! Domain-specific assertion macros for mof-guide harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! directory invariant was violated.

use mof_core::Record;

/// Assert the ids of a record slice, in order.
///
/// ```rust
/// assert_ids!(store.filtered(), [2, 5, 1]);
/// ```
#[macro_export]
macro_rules! assert_ids {
    ($records:expr, [$($id:expr),* $(,)?]) => {{
        let actual: Vec<u32> = $records.iter().map(|r| r.id).collect();
        let expected: Vec<u32> = vec![$($id),*];
        pretty_assertions::assert_eq!(actual, expected, "record ids (in order)");
    }};
}

/// Assert that records with a distance come first in ascending order, and
/// records without one come after all of them.
pub fn assert_nearest_first(records: &[Record]) {
    let first_none = records
        .iter()
        .position(|r| r.distance.is_none())
        .unwrap_or(records.len());
    assert!(
        records[first_none..].iter().all(|r| r.distance.is_none()),
        "assert_nearest_first! failed: a located record follows an unlocated one: {:?}",
        records.iter().map(|r| (r.id, r.distance)).collect::<Vec<_>>()
    );
    for pair in records[..first_none].windows(2) {
        let (a, b) = (pair[0].distance.unwrap(), pair[1].distance.unwrap());
        assert!(
            a <= b,
            "assert_nearest_first! failed: {} ({a} km) before {} ({b} km)",
            pair[0].id,
            pair[1].id
        );
    }
}

/// Assert that `sub` is `all` with some records removed, relative order kept.
pub fn assert_ordered_subset(sub: &[Record], all: &[Record]) {
    let mut rest = all.iter();
    for r in sub {
        assert!(
            rest.any(|a| a.id == r.id),
            "assert_ordered_subset! failed: record {} missing or out of order",
            r.id
        );
    }
}
