//! mof-core: MOF Guide core library.
//!
//! This crate exposes the pipeline layers as public modules, plus the shared
//! types used across all layers.
//!
//! # Architecture
//!
//! ```text
//! DataSource ──► Store ──► Filter ──► View (map | list | detail)
//!                  ▲
//!   location ──────┘
//! ```
//!
//! Everything here is synchronous and free of I/O apart from [`config`];
//! the adapters in `mof-sources` sit at the boundary and the TUI owns the
//! single [`DataStore`].

pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod geo;
pub mod normalizer;
pub mod store;
pub mod types;
pub mod view;

pub use error::{Error, Result};
pub use store::DataStore;
pub use types::{Coordinates, Directory, DirectoryMeta, FilterCriteria, Record, ViewMode};
