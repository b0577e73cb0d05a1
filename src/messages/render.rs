//! Render state - data structure sent from App layer to UI for rendering

use std::time::Duration;

use crate::constants::DEFAULT_NOTIFICATION_TTL_MS;
use crate::filter::SortState;
use crate::messages::ui_events::{AppView, InputMode, Panel};
use crate::models::{Developer, Domain, Notification};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub active_view: AppView,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Filters
    pub search: String,
    pub domain_filter: Option<Domain>,
    pub nation_filter: Option<String>,
    pub filters_active: bool,

    // Table, already filtered and sorted
    pub rows: Vec<Developer>,
    pub total_count: usize,
    pub selected_row: usize,
    pub sort: SortState,

    // Result modal
    pub modal_visible: bool,
    pub is_loading: bool,
    pub staged: Option<Developer>,

    // Popups
    pub overwrite_prompt: Option<Developer>,
    pub show_help: bool,

    pub notification: Option<Notification>,
    pub notification_ttl: Duration,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            active_view: AppView::Landing,
            active_panel: Panel::Table,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            search: String::new(),
            domain_filter: None,
            nation_filter: None,
            filters_active: false,
            rows: Vec::new(),
            total_count: 0,
            selected_row: 0,
            sort: SortState::default(),
            modal_visible: false,
            is_loading: false,
            staged: None,
            overwrite_prompt: None,
            show_help: false,
            notification: None,
            notification_ttl: Duration::from_millis(DEFAULT_NOTIFICATION_TTL_MS),
        }
    }
}
