//! Geo utilities: haversine distance, distance formatting, and map bounds.

use crate::types::Coordinates;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Degrees → radians.
pub fn to_rad(degrees: f64) -> f64 {
    degrees * (std::f64::consts::PI / 180.0)
}

/// Great-circle distance in kilometres between two points given in degrees.
///
/// Inputs are not range-checked; out-of-range values give a defined but
/// meaningless result.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = to_rad(lat2 - lat1);
    let d_lon = to_rad(lon2 - lon1);
    let a = (d_lat / 2.0).sin().powi(2)
        + to_rad(lat1).cos() * to_rad(lat2).cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// [`distance_km`] between two [`Coordinates`].
pub fn distance_between(a: Coordinates, b: Coordinates) -> f64 {
    distance_km(a.lat, a.lon, b.lat, b.lon)
}

/// `"500 m"` below one kilometre, `"12.3 km"` from there on.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{} m", (km * 1000.0).round() as i64)
    } else {
        format!("{km:.1} km")
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// An axis-aligned lat/lon rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Smallest rectangle containing every point, or `None` for an empty input.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinates>,
    {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Bounds {
                    south: p.lat,
                    west: p.lon,
                    north: p.lat,
                    east: p.lon,
                },
                Some(b) => Bounds {
                    south: b.south.min(p.lat),
                    west: b.west.min(p.lon),
                    north: b.north.max(p.lat),
                    east: b.east.max(p.lon),
                },
            })
        })
    }

    /// Push every edge out by `ratio` times the span on its axis.
    pub fn pad(self, ratio: f64) -> Self {
        let h = (self.north - self.south).abs() * ratio;
        let w = (self.east - self.west).abs() * ratio;
        Bounds {
            south: self.south - h,
            west: self.west - w,
            north: self.north + h,
            east: self.east + w,
        }
    }

    /// Widen any axis narrower than the region shown at `zoom`, keeping its
    /// centre. Axes already wide enough are returned untouched.
    pub fn at_most_zoom(self, zoom: u8) -> Self {
        let floor = Bounds::around(self.center(), zoom);
        let (min_lat, min_lon) = (floor.north - floor.south, floor.east - floor.west);
        let mut b = self;
        if b.north - b.south < min_lat {
            b.south = floor.south;
            b.north = floor.north;
        }
        if b.east - b.west < min_lon {
            b.west = floor.west;
            b.east = floor.east;
        }
        b
    }

    /// Region centred on `center` at a web-map zoom level.
    ///
    /// Zoom `z` shows `360 / 2^z` degrees of longitude and half as much
    /// latitude, which keeps the canvas roughly square on a terminal whose
    /// cells are twice as tall as they are wide.
    pub fn around(center: Coordinates, zoom: u8) -> Self {
        let lon_span = 360.0 / 2f64.powi(i32::from(zoom));
        let lat_span = lon_span / 2.0;
        Bounds {
            south: center.lat - lat_span / 2.0,
            west: center.lon - lon_span / 2.0,
            north: center.lat + lat_span / 2.0,
            east: center.lon + lon_span / 2.0,
        }
    }

    pub fn center(&self) -> Coordinates {
        Coordinates::new((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }

    pub fn contains(&self, p: Coordinates) -> bool {
        p.lat >= self.south && p.lat <= self.north && p.lon >= self.west && p.lon <= self.east
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
