//! Terminal UI for the BOM dashboard.
//!
//! The presenter renders the loader's state: a loading indicator while
//! fetches run, an inline error on failure, and the row grid with a scan
//! metadata footer once a snapshot is loaded. All grid state (filtering,
//! sorting, selection, column visibility) lives in [`DashboardApp`]; the
//! loader's data is read-only from the render side.

mod app;
mod columns;
mod events;
pub mod theme;
mod ui;

pub use app::{DashboardApp, SortDirection};
pub use columns::{Column, ColumnKey, COLUMNS};
pub use events::Event;
pub use ui::run_dashboard;
