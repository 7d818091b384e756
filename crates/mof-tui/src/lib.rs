//! MOF Guide TUI: ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use app::Services;
use mof_core::config::Config;
use mof_sources::{ConfiguredLocator, JsonFileSource, NominatimResolver};
use std::sync::Arc;

/// Load the directory named by `config` and run the interactive UI until the
/// user quits.
///
/// A data file that cannot be read, or holds no records, stops start-up
/// before the terminal is touched.
pub fn run(config: Config, runtime: &tokio::runtime::Runtime) -> anyhow::Result<()> {
    let source = JsonFileSource::new(&config.data.path);
    let store = match runtime.block_on(mof_sources::load_store(&source)) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "start-up aborted");
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    };
    tracing::info!(records = store.len(), "directory loaded");

    let services = Services {
        geolocator: Arc::new(ConfiguredLocator::new(config.location.map(Into::into))),
        resolver: Arc::new(NominatimResolver::new(&config.geocoder)?),
        runtime: runtime.handle().clone(),
    };
    App::new(store, config, theme::Theme::load_default(), services).run()
}
