//! Dashboard application state.

use super::columns::{Column, COLUMNS};
use crate::loader::BomLoader;
use crate::model::BomRow;

/// Page size for PgUp/PgDn navigation.
const PAGE_SIZE: usize = 10;

/// Sort direction for the active sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    #[must_use]
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }
}

/// State for the dashboard TUI.
///
/// Owns the loader; the render side only reads `loader.state()`. The view
/// model (`view`) holds indexes into the loaded rows with the service
/// filter and sort applied.
pub struct DashboardApp {
    pub loader: BomLoader,
    /// Indexes of rows currently shown, in display order
    view: Vec<usize>,

    pub selected: usize,
    pub scroll_offset: usize,
    /// First unpinned column currently shown (horizontal scroll)
    pub col_offset: usize,

    /// Hide rows without a service name (the grid's default filter)
    pub hide_empty_service: bool,
    /// Show the less-essential columns hidden by default
    pub show_hidden_columns: bool,
    /// Active sort column (index into [`COLUMNS`]) and direction
    pub sort_column: Option<usize>,
    pub sort_direction: SortDirection,

    /// Full-field overlay for the selected row
    pub show_detail: bool,
    pub should_quit: bool,
    pub tick: u64,
}

impl DashboardApp {
    /// Create the app around an idle loader.
    #[must_use]
    pub fn new(loader: BomLoader) -> Self {
        Self {
            loader,
            view: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            col_offset: 0,
            hide_empty_service: true,
            show_hidden_columns: false,
            sort_column: None,
            sort_direction: SortDirection::Ascending,
            show_detail: false,
            should_quit: false,
            tick: 0,
        }
    }

    /// Advance one tick; the initial automatic load fires here, exactly once.
    pub fn on_tick(&mut self) {
        self.tick += 1;
        if self.loader.state().is_idle() {
            self.loader.load();
            self.rebuild_view();
        }
    }

    /// Recompute the filtered, sorted view model.
    pub fn rebuild_view(&mut self) {
        let Some(loaded) = self.loader.state().loaded() else {
            self.view.clear();
            return;
        };

        let mut view: Vec<usize> = loaded
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !self.hide_empty_service || row.has_service())
            .map(|(i, _)| i)
            .collect();

        if let Some(col_idx) = self.sort_column {
            let column = &COLUMNS[col_idx];
            let rows = &loaded.rows;
            view.sort_by(|&a, &b| {
                let ord = column.compare(&rows[a], &rows[b]);
                match self.sort_direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }

        self.view = view;
        self.clamp_selection();
    }

    /// Rows currently shown, in display order.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<&BomRow> {
        match self.loader.state().loaded() {
            Some(loaded) => self.view.iter().map(|&i| &loaded.rows[i]).collect(),
            None => Vec::new(),
        }
    }

    /// The currently selected row, if any.
    #[must_use]
    pub fn selected_row(&self) -> Option<&BomRow> {
        let loaded = self.loader.state().loaded()?;
        self.view.get(self.selected).map(|&i| &loaded.rows[i])
    }

    /// Columns currently shown, honoring the hidden-column toggle.
    #[must_use]
    pub fn visible_columns(&self) -> Vec<&'static Column> {
        COLUMNS
            .iter()
            .filter(|c| self.show_hidden_columns || !c.default_hidden)
            .collect()
    }

    // ---- Row navigation ----

    pub fn select_next(&mut self) {
        let total = self.view.len();
        if total > 0 && self.selected < total - 1 {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn page_down(&mut self) {
        let total = self.view.len();
        if total > 0 {
            self.selected = (self.selected + PAGE_SIZE).min(total - 1);
        }
    }

    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(PAGE_SIZE);
    }

    pub fn go_first(&mut self) {
        self.selected = 0;
    }

    pub fn go_last(&mut self) {
        self.selected = self.view.len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let total = self.view.len();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }

    // ---- Column scroll ----

    pub fn scroll_cols_right(&mut self) {
        let max = self.visible_columns().len().saturating_sub(2);
        if self.col_offset < max {
            self.col_offset += 1;
        }
    }

    pub fn scroll_cols_left(&mut self) {
        self.col_offset = self.col_offset.saturating_sub(1);
    }

    // ---- Toggles ----

    pub fn toggle_service_filter(&mut self) {
        self.hide_empty_service = !self.hide_empty_service;
        self.rebuild_view();
    }

    pub fn toggle_hidden_columns(&mut self) {
        self.show_hidden_columns = !self.show_hidden_columns;
        // Column count changed; keep the scroll in range
        let max = self.visible_columns().len().saturating_sub(2);
        self.col_offset = self.col_offset.min(max);
    }

    pub fn toggle_detail(&mut self) {
        if self.selected_row().is_some() {
            self.show_detail = !self.show_detail;
        }
    }

    // ---- Sorting ----

    /// Advance the sort column through the visible columns, wrapping to
    /// unsorted after the last.
    pub fn cycle_sort_column(&mut self) {
        let visible: Vec<usize> = COLUMNS
            .iter()
            .enumerate()
            .filter(|(_, c)| self.show_hidden_columns || !c.default_hidden)
            .map(|(i, _)| i)
            .collect();

        self.sort_column = match self.sort_column {
            None => visible.first().copied(),
            Some(current) => {
                let pos = visible.iter().position(|&i| i == current);
                match pos {
                    Some(p) if p + 1 < visible.len() => Some(visible[p + 1]),
                    _ => None,
                }
            }
        };
        self.rebuild_view();
    }

    pub fn flip_sort_direction(&mut self) {
        self.sort_direction = self.sort_direction.flipped();
        if self.sort_column.is_some() {
            self.rebuild_view();
        }
    }

    pub fn clear_sort(&mut self) {
        self.sort_column = None;
        self.sort_direction = SortDirection::Ascending;
        self.rebuild_view();
    }
}
