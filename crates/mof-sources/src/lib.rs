//! mof-sources: boundary adapters for mof-guide.
//!
//! Each adapter wraps one external collaborator behind a narrow async trait:
//! the directory data file, the user's position, and free-text address
//! resolution. Results are plain [`mof_core`] values; failures are mapped onto
//! the [`mof_core::Error`] kinds the TUI knows how to surface.

pub mod json_file;
pub mod locator;
pub mod nominatim;

pub use json_file::JsonFileSource;
pub use locator::ConfiguredLocator;
pub use nominatim::NominatimResolver;

use async_trait::async_trait;
use mof_core::{Coordinates, Record, Result};

/// Single read of the whole record collection.
///
/// Implementations report a failed read or an empty collection as
/// [`mof_core::Error::DataUnavailable`].
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn load(&self) -> Result<Vec<Record>>;
}

/// The user's current position.
#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Fails with [`mof_core::Error::PositionUnavailable`].
    async fn locate(&self) -> Result<Coordinates>;
}

/// Free-text address → coordinates.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// `Ok(None)` means the lookup worked but nothing matched. Transport,
    /// status, and decode failures are
    /// [`mof_core::Error::AddressLookupFailed`].
    async fn resolve(&self, query: &str) -> Result<Option<Coordinates>>;
}

/// Read `source` once and build the store the views work from.
pub async fn load_store(source: &dyn DataSource) -> Result<mof_core::DataStore> {
    let mut store = mof_core::DataStore::new();
    store.load(source.load().await?)?;
    Ok(store)
}
