//! Test builders: ergonomic constructors for `Record` and `DataStore`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use mof_core::{Coordinates, DataStore, Record};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Record`] test fixtures.
///
/// # Example
///
/// ```rust
/// let record = RecordBuilder::new(7, "Jeanne Martin")
///     .specialty("Ébéniste")
///     .year(2004)
///     .at(45.76, 4.83)
///     .build();
/// ```
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            record: Record {
                id,
                name: name.into(),
                specialty: "Boulanger".to_string(),
                address: None,
                year: None,
                coordinates: None,
                website: None,
                distance: None,
            },
        }
    }

    pub fn specialty(mut self, specialty: impl Into<String>) -> Self {
        self.record.specialty = specialty.into();
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.record.address = Some(address.into());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.record.year = Some(year);
        self
    }

    pub fn at(mut self, lat: f64, lon: f64) -> Self {
        self.record.coordinates = Some(Coordinates::new(lat, lon));
        self
    }

    pub fn website(mut self, url: impl Into<String>) -> Self {
        self.record.website = Some(url.into());
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// A located record with a specialty and a year.
pub fn located(id: u32, name: &str, specialty: &str, year: i32, lat: f64, lon: f64) -> Record {
    RecordBuilder::new(id, name)
        .specialty(specialty)
        .year(year)
        .at(lat, lon)
        .build()
}

/// A store loaded with `records`.
pub fn store_with(records: Vec<Record>) -> DataStore {
    let mut store = DataStore::new();
    store.load(records).expect("non-empty fixture");
    store
}

/// Ids of `records`, in order.
pub fn ids(records: &[Record]) -> Vec<u32> {
    records.iter().map(|r| r.id).collect()
}
