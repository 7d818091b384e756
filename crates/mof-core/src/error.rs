//! Error kinds shared by the store and the boundary adapters.

use thiserror::Error;

/// Failures surfaced to the user.
///
/// `DataUnavailable` is fatal to initialisation; everything else is
/// recoverable and must leave application state untouched.
#[derive(Error, Debug)]
pub enum Error {
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    #[error("position unavailable: {0}")]
    PositionUnavailable(String),

    #[error("address not found: {0}")]
    AddressNotFound(String),

    #[error("address lookup failed: {0}")]
    AddressLookupFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for mof-core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Recoverable errors leave the session running; the user re-triggers the action.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::PositionUnavailable(_) | Error::AddressNotFound(_) | Error::AddressLookupFailed(_)
        )
    }

    /// The one-line message shown to the user.
    ///
    /// Not-found and transport failures on address lookup read the same;
    /// only the log line tells them apart.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::DataUnavailable(_) | Error::Io(_) | Error::Json(_) => {
                "Unable to load the directory data. Please try again."
            }
            Error::PositionUnavailable(_) => {
                "Unable to locate you. Check your location settings."
            }
            Error::AddressNotFound(_) | Error::AddressLookupFailed(_) => {
                "Address not found. Try another search."
            }
        }
    }
}
