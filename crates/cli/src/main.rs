use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::Level;

use chipline_tui::RunOptions;
use chipline_types::PanelDirection;

/// Interactive autocomplete chip input in the terminal.
///
/// Type to filter suggestions, commit with Enter or a delimiter, pop chips
/// with Backspace on an empty field. On exit the committed values are
/// printed as a JSON array.
#[derive(Debug, Parser)]
#[command(name = "chipline", version)]
struct Cli {
    /// JSON file holding an array of candidate strings for the pool
    #[arg(long)]
    source: Option<PathBuf>,

    /// Value already committed when the session starts (repeatable)
    #[arg(long = "value")]
    values: Vec<String>,

    /// Pin the suggestion panel to one side instead of measuring
    #[arg(long, value_enum)]
    direction: Option<DirectionArg>,

    /// Placement threshold in terminal rows for choosing the below side
    #[arg(long)]
    min_panel_height: Option<f32>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionArg {
    Above,
    Below,
}

impl From<DirectionArg> for PanelDirection {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::Above => PanelDirection::Above,
            DirectionArg::Below => PanelDirection::Below,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let pool = match &cli.source {
        Some(path) => load_pool(path)?,
        None => default_pool(),
    };

    let committed = chipline_tui::run(RunOptions {
        pool,
        initial_values: cli.values,
        forced_direction: cli.direction.map(Into::into),
        min_panel_height: cli.min_panel_height,
    })?;

    println!("{}", serde_json::to_string_pretty(&committed)?);
    Ok(())
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .try_init();
}

fn load_pool(path: &PathBuf) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading source pool {}", path.display()))?;
    let pool: Vec<String> =
        serde_json::from_str(&raw).with_context(|| format!("parsing source pool {}", path.display()))?;
    Ok(pool)
}

fn default_pool() -> Vec<String> {
    [
        "Android", "iOS", "Linux", "macOS", "Windows", "FreeBSD", "OpenBSD", "NetBSD", "illumos", "Redox",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}
