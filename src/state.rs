use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::data::cache::TableCache;
use crate::data::filter::FilterSelection;
use crate::data::model::StudentTable;
use crate::view::{build_view, ViewOutcome};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Tables loaded so far, by path.
    pub cache: TableCache,

    /// Path of the current data file.
    pub data_path: Option<PathBuf>,

    /// Loaded table (None until a file loads successfully).
    pub table: Option<Arc<StudentTable>>,

    /// Current year / term selection.
    pub selection: FilterSelection,

    /// Result of the last dashboard run.
    pub outcome: Option<ViewOutcome>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Rows shown in the data preview.
    pub preview_rows: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            cache: TableCache::new(),
            data_path: None,
            table: None,
            selection: FilterSelection::default(),
            outcome: None,
            status_message: None,
            preview_rows: 50,
        }
    }
}

impl AppState {
    /// Load `path` (through the cache), select everything and run the dashboard.
    pub fn open(&mut self, path: &Path) {
        self.data_path = Some(path.to_path_buf());
        match self.cache.get_or_load(path) {
            Ok(table) => {
                self.selection = FilterSelection::all(&table);
                self.table = Some(table);
                self.status_message = None;
                self.refresh();
            }
            Err(e) => {
                log::error!("Failed to load data: {e}");
                self.table = None;
                self.outcome = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Drop the cached table for the current file and load it again.
    pub fn reload(&mut self) {
        let Some(path) = self.data_path.clone() else {
            return;
        };
        self.cache.invalidate(&path);
        self.open(&path);
    }

    /// Recompute the dashboard after a filter change.
    pub fn refresh(&mut self) {
        if let Some(table) = &self.table {
            self.outcome = Some(build_view(table, &self.selection));
        }
    }

    pub fn toggle_year(&mut self, year: i64) {
        self.selection.toggle_year(year);
        self.refresh();
    }

    pub fn toggle_term(&mut self, term: &str) {
        self.selection.toggle_term(term);
        self.refresh();
    }

    pub fn select_all_years(&mut self) {
        if let Some(table) = &self.table {
            self.selection.select_all_years(table);
            self.refresh();
        }
    }

    pub fn select_all_terms(&mut self) {
        if let Some(table) = &self.table {
            self.selection.select_all_terms(table);
            self.refresh();
        }
    }

    pub fn clear_years(&mut self) {
        self.selection.clear_years();
        self.refresh();
    }

    pub fn clear_terms(&mut self) {
        self.selection.clear_terms();
        self.refresh();
    }

    /// Rows in the filtered view, when a view exists.
    pub fn visible_rows(&self) -> usize {
        match &self.outcome {
            Some(ViewOutcome::Ready(view)) => view.filtered.len(),
            _ => 0,
        }
    }
}
