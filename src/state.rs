use std::time::Duration;

use crate::config::{DashboardConfig, snap_display_count};
use crate::data::aggregate::{DashboardView, ViewCache};
use crate::data::filter::FilterCriteria;
use crate::data::model::RecordStore;
use crate::startup::{DataSource, PendingLoad};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded record store (None until the start-up load resolves).
    pub store: Option<RecordStore>,

    /// Search text and selected make.
    pub criteria: FilterCriteria,

    /// Number of records in the chart segment.
    pub display_count: usize,

    pub dark_mode: bool,

    /// Derived view for the current store and filters.
    cache: ViewCache,

    /// Start-up load, until it resolves.
    pending: Option<PendingLoad>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            store: None,
            criteria: FilterCriteria::default(),
            display_count: snap_display_count(config.display_count),
            dark_mode: config.dark_mode,
            cache: ViewCache::default(),
            pending: None,
            status_message: None,
        }
    }

    /// Kick off the delayed start-up load.
    pub fn begin_load(&mut self, source: DataSource, delay: Duration) {
        log::info!("Loading {source:?} after {delay:?}");
        self.pending = Some(PendingLoad::spawn(source, delay));
    }

    /// Whether the initial load is still outstanding.
    pub fn loading(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| !p.is_resolved())
    }

    /// Check on the start-up load; installs the store once it arrives.
    pub fn poll_load(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let Some(result) = pending.poll() else {
            return;
        };
        self.pending = None;
        match result {
            Ok(store) => self.set_store(store),
            Err(e) => {
                log::error!("Failed to load dataset: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded store and reset filters.
    pub fn set_store(&mut self, store: RecordStore) {
        self.criteria = FilterCriteria::default();
        self.cache.invalidate();
        self.store = Some(store);
        self.status_message = None;
        self.refresh();
    }

    /// Re-derive the view for the current inputs.
    pub fn refresh(&mut self) {
        if let Some(store) = &self.store {
            self.cache.view(store, &self.criteria, self.display_count);
        }
    }

    pub fn view(&self) -> &DashboardView {
        self.cache.current()
    }

    pub fn set_search_text(&mut self, text: String) {
        self.criteria.search_text = text;
        self.refresh();
    }

    /// `None` selects all makes.
    pub fn set_selected_make(&mut self, make: Option<String>) {
        self.criteria.selected_make = make.filter(|m| !m.is_empty());
        self.refresh();
    }

    pub fn set_display_count(&mut self, count: usize) {
        self.display_count = snap_display_count(count);
        self.refresh();
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }
}
