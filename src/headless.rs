//! Headless mode: apply filters from the command line and print the result.

use mof_core::{
    export,
    view::{project_list, Card, ListProjection},
    Coordinates, DataStore, Record,
};
use mof_sources::{load_store, JsonFileSource};
use serde_json::{json, Value};
use std::{io::Write, path::PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One card per record, as in the list view.
    #[default]
    Text,
    /// A JSON array of records, distances included.
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessOptions {
    pub data: PathBuf,
    pub categories: Vec<String>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub query: Option<String>,
    /// Sort by distance from here.
    pub at: Option<Coordinates>,
    pub format: OutputFormat,
    /// Also write the filtered records as a JSON-LD `ItemList`.
    pub export: Option<PathBuf>,
}

/// Load, filter, and write the result to `out`.
pub async fn run(opts: &HeadlessOptions, out: &mut impl Write) -> anyhow::Result<()> {
    let store = load_store(&JsonFileSource::new(&opts.data)).await?;
    let store = apply_options(store, opts);
    tracing::info!(shown = store.filtered().len(), total = store.len(), "headless filter applied");

    match opts.format {
        OutputFormat::Text => write_text(&store, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &records_json(store.filtered()))?;
            writeln!(out)?;
        }
    }

    if let Some(ref path) = opts.export {
        let doc = export::item_list(store.filtered());
        std::fs::write(path, serde_json::to_string_pretty(&doc)?)?;
        tracing::info!(path = %path.display(), "JSON-LD written");
    }
    Ok(())
}

/// Location first, so that every later re-filter sees the sorted order.
fn apply_options(mut store: DataStore, opts: &HeadlessOptions) -> DataStore {
    if let Some(at) = opts.at {
        store.update_location(at);
    }
    store.set_categories(opts.categories.iter().cloned());
    store.set_year_min(opts.year_min);
    store.set_year_max(opts.year_max);
    if let Some(ref q) = opts.query {
        store.set_search_query(q.clone());
    }
    store
}

fn write_text(store: &DataStore, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", store.results_summary())?;
    match project_list(store.filtered()) {
        ListProjection::Empty(placeholder) => {
            writeln!(out)?;
            writeln!(out, "{}", placeholder.title)?;
            writeln!(out, "{}", placeholder.hint)?;
        }
        ListProjection::Cards(cards) => {
            for card in &cards {
                writeln!(out)?;
                write_card(card, out)?;
            }
        }
    }
    Ok(())
}

fn write_card(card: &Card, out: &mut impl Write) -> std::io::Result<()> {
    match card.year {
        Some(ref year) => writeln!(out, "{} [{}]", card.name, year)?,
        None => writeln!(out, "{}", card.name)?,
    }
    writeln!(out, "  {}", card.specialty)?;
    writeln!(out, "  {}", card.address)?;
    if let Some(ref distance) = card.distance {
        writeln!(out, "  {distance}")?;
    }
    if let Some(ref website) = card.website {
        writeln!(out, "  {website}")?;
    }
    Ok(())
}

fn records_json(records: &[Record]) -> Value {
    Value::Array(
        records
            .iter()
            .map(|r| {
                json!({
                    "id": r.id,
                    "name": r.name,
                    "specialty": r.specialty,
                    "address": r.address,
                    "year": r.year,
                    "website": r.website,
                    "coordinates": r.coordinates.map(|c| json!({"lat": c.lat, "lon": c.lon})),
                    "distance_km": r.distance,
                })
            })
            .collect(),
    )
}
