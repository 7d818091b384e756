//! Configuration types for mof-guide.
//!
//! [`Config::load`] reads `~/.config/mof-guide/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use crate::types::{Coordinates, ViewMode};
use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[data]
path = "data.json"

[map]
default_lat  = 46.603354
default_lon  = 1.888334
default_zoom = 6
user_zoom    = 12
fit_padding  = 0.1

[geocoder]
url           = "https://nominatim.openstreetmap.org/search"
country_codes = "fr"
user_agent    = "MOF-Guide/1.0"

[ui]
default_view            = "map"
category_pane_width_pct = 25

[keybindings]
toggle_focus  = "Tab"
query_focus   = "/"
toggle_view   = "v"
geolocate     = "L"
reset_filters = "r"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/mof-guide/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    /// Position reported by the geolocation provider. Absent means
    /// geolocation fails with "position unavailable".
    #[serde(default)]
    pub location: Option<LocationConfig>,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

/// `[data]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

fn default_data_path() -> PathBuf { PathBuf::from("data.json") }

impl Default for DataConfig {
    fn default() -> Self {
        Self { path: default_data_path() }
    }
}

/// `[map]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_lat")]
    pub default_lat: f64,
    #[serde(default = "default_lon")]
    pub default_lon: f64,
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,
    #[serde(default = "default_user_zoom")]
    pub user_zoom: u8,
    /// Margin added around the markers when fitting the map, as a fraction
    /// of the marker span.
    #[serde(default = "default_fit_padding")]
    pub fit_padding: f64,
}

// Centre of metropolitan France.
fn default_lat() -> f64 { 46.603354 }
fn default_lon() -> f64 { 1.888334 }
fn default_zoom() -> u8 { 6 }
fn default_user_zoom() -> u8 { 12 }
fn default_fit_padding() -> f64 { 0.1 }

impl MapConfig {
    pub fn default_center(&self) -> Coordinates {
        Coordinates::new(self.default_lat, self.default_lon)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_lat: default_lat(),
            default_lon: default_lon(),
            default_zoom: default_zoom(),
            user_zoom: default_user_zoom(),
            fit_padding: default_fit_padding(),
        }
    }
}

/// `[geocoder]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderConfig {
    #[serde(default = "default_geocoder_url")]
    pub url: String,
    #[serde(default = "default_country_codes")]
    pub country_codes: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_geocoder_url() -> String { "https://nominatim.openstreetmap.org/search".to_string() }
fn default_country_codes() -> String { "fr".to_string() }
fn default_user_agent() -> String { "MOF-Guide/1.0".to_string() }

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            url: default_geocoder_url(),
            country_codes: default_country_codes(),
            user_agent: default_user_agent(),
        }
    }
}

/// `[location]` section of `config.toml`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LocationConfig {
    pub lat: f64,
    pub lon: f64,
}

impl From<LocationConfig> for Coordinates {
    fn from(l: LocationConfig) -> Self {
        Coordinates::new(l.lat, l.lon)
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub default_view: ViewMode,
    #[serde(default = "default_category_pane_width_pct")]
    pub category_pane_width_pct: u16,
}

fn default_category_pane_width_pct() -> u16 { 25 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_view: ViewMode::default(),
            category_pane_width_pct: default_category_pane_width_pct(),
        }
    }
}

/// `[keybindings]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_toggle_focus")]
    pub toggle_focus: String,
    #[serde(default = "default_query_focus")]
    pub query_focus: String,
    #[serde(default = "default_toggle_view")]
    pub toggle_view: String,
    #[serde(default = "default_geolocate")]
    pub geolocate: String,
    #[serde(default = "default_reset_filters")]
    pub reset_filters: String,
}

fn default_toggle_focus() -> String { "Tab".to_string() }
fn default_query_focus() -> String { "/".to_string() }
fn default_toggle_view() -> String { "v".to_string() }
fn default_geolocate() -> String { "L".to_string() }
fn default_reset_filters() -> String { "r".to_string() }

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            toggle_focus: default_toggle_focus(),
            query_focus: default_query_focus(),
            toggle_view: default_toggle_view(),
            geolocate: default_geolocate(),
            reset_filters: default_reset_filters(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/mof-guide/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Layer the file at `path` (if present) over the built-in defaults.
    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("mof-guide")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
