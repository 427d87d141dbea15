//! Command handlers for the `bom-dashboard` binary.

use crate::index::generate_index;
use crate::loader::{BomLoader, LoaderConfig};
use crate::tui::{run_dashboard, DashboardApp};
use anyhow::Context;
use std::path::Path;

/// Launch the interactive dashboard. The initial load runs from the first
/// event-loop tick, so the terminal shows the loading state immediately.
pub fn run_view(config: LoaderConfig) -> anyhow::Result<()> {
    let mut app = DashboardApp::new(BomLoader::new(config));
    run_dashboard(&mut app).context("terminal error")?;
    Ok(())
}

/// Load the newest snapshot and print its rows as JSON to stdout.
pub fn run_rows(config: LoaderConfig, pretty: bool) -> anyhow::Result<()> {
    let loaded = BomLoader::new(config)
        .load_once()
        .context("failed to load BOM data")?;

    let json = if pretty {
        serde_json::to_string_pretty(&loaded.rows)
    } else {
        serde_json::to_string(&loaded.rows)
    }
    .context("failed to serialize rows")?;

    println!("{json}");
    tracing::info!(rows = loaded.rows.len(), "wrote rows to stdout");
    Ok(())
}

/// Rebuild the snapshot index file for a directory of snapshot documents.
pub fn run_index(dir: &Path) -> anyhow::Result<()> {
    let names = generate_index(dir)
        .with_context(|| format!("failed to index {}", dir.display()))?;

    println!("indexed {} snapshot(s) in {}", names.len(), dir.display());
    for name in &names {
        println!("  {name}");
    }
    Ok(())
}
