//! Data loading: index fetch, newest-snapshot fetch, row generation.
//!
//! The loader performs two sequential HTTP fetches (the index, then the
//! newest snapshot it names) and owns an explicit state machine:
//! `Idle -> Loading -> Loaded | Error`. The presenter reads the state; only
//! the loader transitions it. There are no retries and no partial results -
//! rows exist only once a snapshot with a scan date has been accepted.

use crate::error::{BomDashError, LoadErrorKind, Result};
use crate::model::{BomRow, BomSnapshot};
use crate::rows::generate_rows;
use std::time::Duration;

/// Default name of the index resource.
pub const DEFAULT_INDEX_FILE: &str = "boms.json";

/// Configuration for the loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Base URL the index and snapshots are served from
    pub base_url: String,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Name of the index resource under the base URL
    pub index_file: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(15),
            index_file: DEFAULT_INDEX_FILE.to_string(),
        }
    }
}

/// A successfully loaded snapshot with its derived rows.
#[derive(Debug, Clone)]
pub struct LoadedBom {
    /// Snapshot filenames, newest first
    pub index: Vec<String>,
    /// The newest snapshot document (kept for footer metadata)
    pub snapshot: BomSnapshot,
    /// Rows generated from the snapshot
    pub rows: Vec<BomRow>,
}

/// Loader state, owned by [`BomLoader`] and read-only to the presenter.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    /// No load attempted yet
    #[default]
    Idle,
    /// Fetches in progress
    Loading,
    /// A valid snapshot is available
    Loaded(LoadedBom),
    /// A user-visible load failure
    Error(String),
}

impl LoadState {
    /// Whether a load may still be started.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether fetches are in progress.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The loaded data, if any.
    #[must_use]
    pub fn loaded(&self) -> Option<&LoadedBom> {
        match self {
            Self::Loaded(bom) => Some(bom),
            _ => None,
        }
    }

    /// The user-visible error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Fetches the snapshot index and the newest snapshot it names.
pub struct BomLoader {
    config: LoaderConfig,
    state: LoadState,
}

impl BomLoader {
    /// Create an idle loader.
    #[must_use]
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            state: LoadState::Idle,
        }
    }

    /// Create a loader already in a given state, bypassing the fetch
    /// sequence. Lets presenter tests run against loaded rows without a
    /// network.
    #[cfg(test)]
    pub(crate) fn with_state(state: LoadState) -> Self {
        Self {
            config: LoaderConfig::default(),
            state,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Run the full load sequence once.
    ///
    /// A loader that is already loading, loaded, or in error is left alone,
    /// which guards against duplicate loads.
    pub fn load(&mut self) {
        if !self.state.is_idle() {
            return;
        }
        self.state = LoadState::Loading;

        match self.fetch_all() {
            Ok(loaded) => {
                tracing::info!(
                    snapshots = loaded.index.len(),
                    rows = loaded.rows.len(),
                    "loaded newest BOM snapshot"
                );
                self.state = LoadState::Loaded(loaded);
            }
            Err(err) => {
                tracing::error!(error = %err, "BOM load failed");
                self.state = LoadState::Error(user_message(&err));
            }
        }
    }

    /// Blocking variant that returns the result directly (used by the
    /// headless `rows` command).
    pub fn load_once(mut self) -> Result<LoadedBom> {
        let loaded = self.fetch_all()?;
        self.state = LoadState::Loaded(loaded.clone());
        Ok(loaded)
    }

    /// Index fetch, then newest-snapshot fetch, then row generation.
    fn fetch_all(&self) -> Result<LoadedBom> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| BomDashError::load("building HTTP client", LoadErrorKind::Network(e.to_string())))?;

        let index_url = self.resource_url(&self.config.index_file);
        tracing::debug!(url = %index_url, "fetching snapshot index");
        let index: Vec<String> = fetch_json(&client, &index_url, |msg| {
            BomDashError::load("fetching snapshot index", LoadErrorKind::IndexUnavailable(msg))
        })?;
        accept_index(&index)?;

        let newest = &index[0];
        let snapshot_url = self.resource_url(newest);
        tracing::debug!(url = %snapshot_url, "fetching newest snapshot");
        let snapshot: BomSnapshot = fetch_json(&client, &snapshot_url, |msg| {
            BomDashError::load(
                format!("fetching snapshot {newest}"),
                LoadErrorKind::SnapshotUnavailable(msg),
            )
        })?;
        accept_snapshot(&snapshot)?;

        let rows = generate_rows(&snapshot);
        Ok(LoadedBom {
            index,
            snapshot,
            rows,
        })
    }

    fn resource_url(&self, name: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), name)
    }
}

/// GET a JSON resource, mapping transport and status failures through `err`.
fn fetch_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::blocking::Client,
    url: &str,
    err: impl Fn(String) -> BomDashError,
) -> Result<T> {
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .map_err(|e| err(e.to_string()))?;

    if !response.status().is_success() {
        return Err(err(format!("server returned {}", response.status())));
    }

    response.json().map_err(|e| err(e.to_string()))
}

// ============================================================================
// Acceptance checks (pure, unit-testable without a network)
// ============================================================================

/// Accept an index only if it names at least one snapshot.
pub fn accept_index(index: &[String]) -> Result<()> {
    if index.is_empty() {
        return Err(BomDashError::load(
            "validating snapshot index",
            LoadErrorKind::IndexEmpty,
        ));
    }
    Ok(())
}

/// Accept a snapshot only if it carries a non-empty scan date.
pub fn accept_snapshot(snapshot: &BomSnapshot) -> Result<()> {
    if !snapshot.has_scan_date() {
        return Err(BomDashError::load(
            "validating snapshot",
            LoadErrorKind::MissingScanDate,
        ));
    }
    Ok(())
}

/// Map a load error to the message shown inline in the dashboard.
fn user_message(err: &BomDashError) -> String {
    match err {
        BomDashError::Load { source, .. } => match source {
            LoadErrorKind::IndexUnavailable(_) => "Failed to retrieve the snapshot index".to_string(),
            LoadErrorKind::IndexEmpty | LoadErrorKind::InvalidJson(_) => {
                "Failed to parse the snapshot index".to_string()
            }
            LoadErrorKind::SnapshotUnavailable(_) => {
                "Failed to retrieve the latest BOM snapshot".to_string()
            }
            LoadErrorKind::MissingScanDate => "Failed to parse the latest BOM snapshot".to_string(),
            LoadErrorKind::Network(_) => "Network error while loading BOM data".to_string(),
        },
        other => other.to_string(),
    }
}
