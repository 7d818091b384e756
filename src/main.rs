use clap::Parser;
use mof_core::{
    config::{Config, LocationConfig},
    Coordinates,
};
use mof_guide::headless::{self, HeadlessOptions, OutputFormat};
use mof_sources::locator::parse_lat_lon;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mof-guide",
    about = "MOF Guide: find Meilleurs Ouvriers de France craftspeople"
)]
struct Cli {
    /// Write debug logs to /tmp/mof-guide-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Directory data file; overrides `[data] path`.
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Your position, used by "locate me"; overrides `[location]`.
    #[arg(long, value_name = "LAT,LON", value_parser = parse_lat_lon, allow_hyphen_values = true)]
    at: Option<Coordinates>,

    /// Print the filtered directory instead of starting the UI.
    #[arg(long)]
    headless: bool,

    /// Keep only this specialty (repeatable).
    #[arg(long = "category", value_name = "NAME", requires = "headless")]
    categories: Vec<String>,

    /// Earliest award year.
    #[arg(long, value_name = "YEAR", requires = "headless")]
    from: Option<i32>,

    /// Latest award year.
    #[arg(long, value_name = "YEAR", requires = "headless")]
    to: Option<i32>,

    /// Free-text search over name, specialty, and address.
    #[arg(long, requires = "headless")]
    query: Option<String>,

    /// Output format for headless mode.
    #[arg(long, value_enum, requires = "headless")]
    format: Option<OutputFormat>,

    /// Also write the result as a schema.org ItemList (JSON-LD).
    #[arg(long, value_name = "PATH", requires = "headless")]
    export: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config unreadable, using defaults");
        Config::defaults()
    });
    if let Some(ref path) = cli.data {
        config.data.path = path.clone();
    }
    if let Some(at) = cli.at {
        config.location = Some(LocationConfig { lat: at.lat, lon: at.lon });
    }

    let runtime = tokio::runtime::Runtime::new()?;

    if !cli.headless {
        return mof_tui::run(config, &runtime);
    }

    let opts = HeadlessOptions {
        data: config.data.path,
        categories: cli.categories,
        year_min: cli.from,
        year_max: cli.to,
        query: cli.query,
        at: cli.at,
        format: cli.format.unwrap_or_default(),
        export: cli.export,
    };
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = runtime.block_on(headless::run(&opts, &mut stdout)) {
        if let Some(err) = e.downcast_ref::<mof_core::Error>() {
            eprintln!("{}", err.user_message());
        }
        return Err(e);
    }
    Ok(())
}

/// `--debug` logs to a file; headless mode otherwise logs warnings to stderr.
/// The TUI owns the terminal, so without `--debug` it logs nothing.
fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let filter = |default: &str| {
        tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default))
    };

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/mof-guide-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(filter("debug"))
            .init();
        tracing::info!("mof-guide debug log started: tail -f /tmp/mof-guide-debug.log");
    } else if cli.headless {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter("warn"))
            .init();
    }
    Ok(())
}
