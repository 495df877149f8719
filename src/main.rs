//! TableForge - a terminal spreadsheet editor for nested JSON collections.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};

use tableforge::app::App;
use tableforge::config::{Config, Settings};
use tableforge::control::TableControl;
use tableforge::events::EventHandler;
use tableforge::logging;
use tableforge::model::Document;
use tableforge::terminal::TerminalGuard;

/// Edit a JSON collection as a table.
#[derive(Debug, Parser)]
#[command(name = "tableforge", version, about)]
struct Cli {
    /// The JSON file to edit.
    file: PathBuf,

    /// Rows shown per page.
    #[arg(long)]
    page_size: Option<usize>,

    /// Hide a field from the grid. May be repeated.
    #[arg(long = "ignore", value_name = "NAME")]
    ignore: Vec<String>,

    /// Read settings from this file instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let result = run(cli);
    if let Err(e) = &result {
        error!(error = %e, "TableForge exited with an error");
    }
    logging::shutdown();
    result
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = load_settings(&cli)?;

    let document = Document::load(&cli.file, &settings.ignored_fields)
        .with_context(|| format!("Failed to open {}", cli.file.display()))?;
    let control = TableControl::new(document.into_root(), settings.page_size)?;
    let events = EventHandler::from_settings(&settings);
    let mut app = App::new(control, cli.file.clone(), &settings);

    let mut guard = TerminalGuard::new().context("Failed to initialize terminal")?;
    info!(file = %cli.file.display(), "Editor started");

    while !app.should_quit() {
        guard.terminal().draw(|frame| app.view(frame))?;
        app.update(events.next()?);
    }

    Ok(())
}

/// Load settings from the config file, then apply command-line overrides.
fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using default: {}", e);
            Config::default()
        }),
    };

    if let Some(page_size) = cli.page_size {
        config.settings.page_size = page_size;
    }
    config.settings.ignored_fields.extend(cli.ignore.iter().cloned());
    config.validate()?;

    Ok(config.settings)
}
