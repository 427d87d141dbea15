//! **A terminal dashboard over software bill-of-materials scan output.**
//!
//! `bom-dashboard` turns the aggregated output of a nightly repository scan
//! (source-control metadata, CI results, container build info, and
//! security-scan findings) into a flat, filterable grid. The pipeline is:
//!
//! 1. Fetch the snapshot index (`boms.json`) and the newest snapshot it
//!    names ([`loader`]).
//! 2. Flatten the snapshot into one row per service, or per repository when
//!    no service manifest exists ([`rows`]).
//! 3. Render the rows in an interactive terminal grid with a scan-metadata
//!    footer ([`tui`]).
//!
//! The flattening step is a pure function over the snapshot document, so it
//! can also be driven headlessly: the `rows` command prints the generated
//! rows as JSON, and [`index::generate_index`] rebuilds the snapshot index
//! for a directory of snapshot files.
//!
//! ## Parsing a snapshot and generating rows
//!
//! ```no_run
//! use bom_dashboard::{generate_rows, BomSnapshot};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let text = std::fs::read_to_string("bom-2026-08-27.json")?;
//!     let snapshot: BomSnapshot = serde_json::from_str(&text)?;
//!
//!     for row in generate_rows(&snapshot) {
//!         println!("{} ({})", row.id, row.service_name.as_deref().unwrap_or("-"));
//!     }
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Cast safety: usize↔u16/f64 casts are bounded in TUI layout math
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    // TUI render functions are inherently long
    clippy::too_many_lines,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // State structs legitimately use many bools for toggle flags
    clippy::struct_excessive_bools
)]

pub mod cli;
pub mod error;
pub mod index;
pub mod loader;
pub mod model;
pub mod rows;
pub mod tui;

pub use error::{BomDashError, Result};
pub use index::generate_index;
pub use loader::{BomLoader, LoadState, LoadedBom, LoaderConfig};
pub use model::{BomRow, BomSnapshot};
pub use rows::generate_rows;
pub use tui::{run_dashboard, DashboardApp};
