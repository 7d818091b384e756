//! mof-guide: terminal directory of Meilleurs Ouvriers de France.
//!
//! The interactive UI lives in `mof-tui`; this crate adds the binary entry
//! point and the non-interactive [`headless`] mode that prints (or exports)
//! the filtered directory for scripts.
//!
//! # Architecture
//!
//! ```text
//! JsonFileSource ──► DataStore ──► filters ──► map | list | detail   (mof-tui)
//!                        ▲                 └──► text | json | JSON-LD (headless)
//!   Geolocator / AddressResolver
//! ```

pub mod headless;
