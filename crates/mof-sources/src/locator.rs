//! Configured geolocation: a terminal has no browser geolocation API, so the
//! user's position comes from the `[location]` config section or `--at`.

use crate::Geolocator;
use async_trait::async_trait;
use mof_core::{Coordinates, Error, Result};

#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocator {
    position: Option<Coordinates>,
}

impl ConfiguredLocator {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Geolocator for ConfiguredLocator {
    async fn locate(&self) -> Result<Coordinates> {
        match self.position {
            Some(p) => {
                tracing::debug!(lat = p.lat, lon = p.lon, "position from configuration");
                Ok(p)
            }
            None => Err(Error::PositionUnavailable(
                "no [location] configured and no --at given".to_string(),
            )),
        }
    }
}

/// Parse `"LAT,LON"` as given to `--at`.
pub fn parse_lat_lon(s: &str) -> std::result::Result<Coordinates, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got {s:?}"))?;
    let lat: f64 = lat.trim().parse().map_err(|_| format!("bad latitude: {lat:?}"))?;
    let lon: f64 = lon.trim().parse().map_err(|_| format!("bad longitude: {lon:?}"))?;
    Ok(Coordinates::new(lat, lon))
}
