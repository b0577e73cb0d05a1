//! App state - pure data structure with no I/O logic

use std::time::Duration;

use crate::constants::DEFAULT_NOTIFICATION_TTL_MS;
use crate::filter::{DeveloperFilter, SortState};
use crate::messages::ui_events::{AppView, InputMode, Panel};
use crate::messages::RenderState;
use crate::models::{fixture_developers, Developer, Notification};

/// Main application state - pure data, no I/O
pub struct AppState {
    pub active_view: AppView,

    // Canonical collection and its filtered projection
    pub developers: Vec<Developer>,
    pub filtered: Vec<Developer>,
    pub filter: DeveloperFilter,
    pub sort: SortState,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub selected_row: usize,

    // Lookup + result modal
    pub modal_visible: bool,
    pub is_loading: bool,
    /// Target of the running lookup, then the staged result
    pub current: Option<Developer>,
    pub next_job_id: u64,
    pub pending_job_id: Option<u64>,

    // Popups
    pub overwrite_prompt: Option<Developer>,
    pub show_help: bool,

    pub notification: Option<Notification>,
    pub notification_ttl: Duration,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_developers(fixture_developers())
    }

    pub fn with_developers(developers: Vec<Developer>) -> Self {
        AppState {
            active_view: AppView::Landing,
            filtered: developers.clone(),
            developers,
            filter: DeveloperFilter::default(),
            sort: SortState::default(),
            active_panel: Panel::Table,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            selected_row: 0,
            modal_visible: false,
            is_loading: false,
            current: None,
            next_job_id: 1,
            pending_job_id: None,
            overwrite_prompt: None,
            show_help: false,
            notification: None,
            notification_ttl: Duration::from_millis(DEFAULT_NOTIFICATION_TTL_MS),
        }
    }

    /// Generate a unique job ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_job_id;
        self.next_job_id += 1;
        id
    }

    /// Filtered rows in table order
    pub fn visible_rows(&self) -> Vec<Developer> {
        let mut rows = self.filtered.clone();
        self.sort.sort(&mut rows);
        rows
    }

    /// Developer under the table cursor
    pub fn selected_developer(&self) -> Option<Developer> {
        self.visible_rows().get(self.selected_row).cloned()
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            active_view: self.active_view,
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            search: self.filter.search.clone(),
            domain_filter: self.filter.domain,
            nation_filter: self.filter.nation.clone(),
            filters_active: self.filter.is_active(),
            rows: self.visible_rows(),
            total_count: self.developers.len(),
            selected_row: self.selected_row,
            sort: self.sort,
            modal_visible: self.modal_visible,
            is_loading: self.is_loading,
            staged: self.current.clone(),
            overwrite_prompt: self.overwrite_prompt.clone(),
            show_help: self.show_help,
            notification: self.notification.clone(),
            notification_ttl: self.notification_ttl,
        }
    }
}
