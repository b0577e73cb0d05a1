//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::constants::{FILTERABLE_NATIONS, UPDATE_SUCCESS_MESSAGE};
use crate::filter::SortColumn;
use crate::messages::ui_events::{AppView, InputMode, Panel};
use crate::messages::{LookupKind, SimulationCommand, SimulationResponse};
use crate::models::{Developer, Domain, Notification};

/// Replace the entry with the same id, returns whether one was found
fn replace_by_id(list: &mut [Developer], updated: &Developer) -> bool {
    match list.iter_mut().find(|d| d.id == updated.id) {
        Some(slot) => {
            *slot = updated.clone();
            true
        }
        None => false,
    }
}

/// Step through `[None, Some(options[0]), ..]` with wrap-around
fn cycle_option<T: Clone + PartialEq>(current: &Option<T>, options: &[T], forward: bool) -> Option<T> {
    let len = options.len() + 1;
    let pos = match current {
        None => 0,
        Some(v) => options.iter().position(|o| o == v).map(|i| i + 1).unwrap_or(0),
    };
    let next = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
    if next == 0 {
        None
    } else {
        Some(options[next - 1].clone())
    }
}

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn enter_listing(&mut self) {
        self.active_view = AppView::Developers;
    }

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
    }

    pub fn focus_search(&mut self) {
        self.active_panel = Panel::Search;
        self.start_editing();
    }

    // ========================
    // Search editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.active_panel == Panel::Search {
            self.input_mode = InputMode::Editing;
            self.cursor_position = self.filter.search.len();
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = &self.filter.search;
        if self.cursor_position > 0 {
            self.cursor_position = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = &self.filter.search;
        if self.cursor_position < input.len() {
            self.cursor_position = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        if cursor_pos <= self.filter.search.len() {
            self.filter.search.insert(cursor_pos, c);
            self.cursor_position = cursor_pos + c.len_utf8();
            self.refilter();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let cursor_pos = self.cursor_position;
            let prev_pos = self.filter.search[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.filter.search.remove(prev_pos);
            self.cursor_position = prev_pos;
            self.refilter();
        }
    }

    // ========================
    // Filters
    // ========================

    pub fn set_domain_filter(&mut self, domain: Option<Domain>) {
        self.filter.domain = domain;
        self.refilter();
    }

    pub fn set_nation_filter(&mut self, nation: Option<String>) {
        self.filter.nation = nation;
        self.refilter();
    }

    pub fn next_option(&mut self) {
        self.step_option(true);
    }

    pub fn prev_option(&mut self) {
        self.step_option(false);
    }

    fn step_option(&mut self, forward: bool) {
        match self.active_panel {
            Panel::Domain => {
                let next = cycle_option(&self.filter.domain, &Domain::ALL, forward);
                self.set_domain_filter(next);
            }
            Panel::Nation => {
                let nations: Vec<String> = FILTERABLE_NATIONS.iter().map(|n| n.to_string()).collect();
                let next = cycle_option(&self.filter.nation, &nations, forward);
                self.set_nation_filter(next);
            }
            _ => {}
        }
    }

    pub fn clear_filters(&mut self) {
        self.filter = Default::default();
        self.cursor_position = 0;
        self.refilter();
    }

    /// Recompute the filtered projection from the canonical collection
    pub fn refilter(&mut self) {
        self.filtered = self.filter.apply(&self.developers);
        self.selected_row = self.selected_row.min(self.filtered.len().saturating_sub(1));
        tracing::debug!(
            search = %self.filter.search,
            domain = ?self.filter.domain,
            nation = ?self.filter.nation,
            matches = self.filtered.len(),
            "Filter recomputed"
        );
    }

    // ========================
    // Table
    // ========================

    pub fn select_next(&mut self) {
        if !self.filtered.is_empty() {
            self.selected_row = (self.selected_row + 1) % self.filtered.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.filtered.is_empty() {
            self.selected_row = self.selected_row
                .checked_sub(1)
                .unwrap_or(self.filtered.len() - 1);
        }
    }

    pub fn sort_by(&mut self, column: SortColumn) {
        self.sort.cycle(column);
    }

    // ========================
    // Simulated lookups
    // ========================

    /// Guess a nation for the selected developer, asking first if one is already set
    pub fn guess_nation(&mut self) -> Option<SimulationCommand> {
        let developer = self.selected_developer()?;
        self.current = Some(developer.clone());
        if developer.nation.is_some() {
            self.overwrite_prompt = Some(developer);
            return None;
        }
        Some(self.begin_lookup(LookupKind::GuessNation, developer))
    }

    pub fn confirm_overwrite(&mut self) -> Option<SimulationCommand> {
        let developer = self.overwrite_prompt.take()?;
        Some(self.begin_lookup(LookupKind::GuessNation, developer))
    }

    pub fn decline_overwrite(&mut self) {
        self.overwrite_prompt = None;
    }

    pub fn rate_developer(&mut self) -> Option<SimulationCommand> {
        let developer = self.selected_developer()?;
        Some(self.begin_lookup(LookupKind::RateDeveloper, developer))
    }

    /// Open the modal in loading state and build the command for the simulation layer
    fn begin_lookup(&mut self, kind: LookupKind, developer: Developer) -> SimulationCommand {
        let id = self.next_id();
        self.pending_job_id = Some(id);
        self.current = Some(developer.clone());
        self.modal_visible = true;
        self.is_loading = true;
        tracing::info!(id, kind = kind.as_str(), developer = %developer.id, "Lookup requested");
        SimulationCommand::Start { id, kind, developer }
    }

    pub fn handle_response(&mut self, response: SimulationResponse) {
        if self.pending_job_id != Some(response.id()) {
            tracing::debug!(id = response.id(), "Ignoring stale lookup response");
            return;
        }

        match response {
            SimulationResponse::Completed { developer, .. } => {
                self.current = Some(developer);
            }
            // cancel_modal clears the pending id first, so this only fires for a job cancelled elsewhere
            SimulationResponse::Cancelled { .. } => {
                self.current = None;
            }
        }
        self.is_loading = false;
        self.pending_job_id = None;
    }

    // ========================
    // Result modal
    // ========================

    /// Commit the staged record; ignored while the lookup is still running
    pub fn confirm_modal(&mut self) {
        if !self.modal_visible || self.is_loading {
            return;
        }
        if let Some(staged) = self.current.take() {
            self.commit(&staged);
            self.notification = Some(Notification::success(UPDATE_SUCCESS_MESSAGE));
        }
        self.modal_visible = false;
    }

    /// Write a staged record into both collections
    pub fn commit(&mut self, staged: &Developer) {
        let in_canonical = replace_by_id(&mut self.developers, staged);
        let in_filtered = replace_by_id(&mut self.filtered, staged);
        tracing::info!(developer = %staged.id, in_canonical, in_filtered, "Committed developer update");

        // The sort key may have changed, keep the cursor on the same developer
        if let Some(row) = self.visible_rows().iter().position(|d| d.id == staged.id) {
            self.selected_row = row;
        }
    }

    /// Discard the staged record, cancelling the lookup if it is still running
    pub fn cancel_modal(&mut self) -> Option<SimulationCommand> {
        let cmd = self.pending_job_id.take().map(SimulationCommand::Cancel);
        if cmd.is_some() {
            self.notification = Some(Notification::info("Lookup cancelled"));
        }
        self.modal_visible = false;
        self.is_loading = false;
        self.current = None;
        cmd
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixture_developers;

    fn listing() -> AppState {
        let mut state = AppState::new();
        state.enter_listing();
        state
    }

    fn select(state: &mut AppState, name: &str) {
        state.selected_row = state
            .visible_rows()
            .iter()
            .position(|d| d.name == name)
            .expect("developer visible");
    }

    fn complete(state: &mut AppState, cmd: SimulationCommand, developer: Developer) {
        let SimulationCommand::Start { id, kind, .. } = cmd else {
            panic!("expected start command");
        };
        state.handle_response(SimulationResponse::Completed { id, kind, developer });
    }

    #[test]
    fn test_typing_refilters() {
        let mut state = listing();
        state.focus_search();
        for c in "SMITH".chars() {
            state.enter_char(c);
        }
        assert_eq!(state.filtered.len(), 1);
        assert_eq!(state.filtered[0].name, "Jane Smith");

        for _ in 0..5 {
            state.delete_char();
        }
        assert_eq!(state.filtered, state.developers);
    }

    #[test]
    fn test_domain_selector_cycles_through_all() {
        let mut state = listing();
        state.active_panel = Panel::Domain;

        state.next_option();
        assert_eq!(state.filter.domain, Some(Domain::WebDevelopment));
        state.next_option();
        assert_eq!(state.filter.domain, Some(Domain::MachineLearning));
        assert_eq!(state.filtered.len(), 1);
        assert_eq!(state.filtered[0].name, "Jane Smith");

        state.prev_option();
        state.prev_option();
        assert_eq!(state.filter.domain, None);
        state.prev_option();
        assert_eq!(state.filter.domain, Some(Domain::DataScience));
    }

    #[test]
    fn test_nation_selector_filters_usa() {
        let mut state = listing();
        state.active_panel = Panel::Nation;
        state.next_option();
        assert_eq!(state.filter.nation.as_deref(), Some("USA"));
        assert_eq!(state.filtered.len(), 1);
        assert_eq!(state.filtered[0].name, "John Doe");
    }

    #[test]
    fn test_selection_clamped_after_filter() {
        let mut state = listing();
        state.selected_row = 4;
        state.set_nation_filter(Some("USA".into()));
        assert_eq!(state.selected_row, 0);
        state.set_nation_filter(Some("Atlantis".into()));
        assert_eq!(state.selected_row, 0);
        assert!(state.selected_developer().is_none());
        assert!(state.rate_developer().is_none());
    }

    #[test]
    fn test_guess_without_nation_starts_immediately() {
        let mut state = listing();
        select(&mut state, "Jane Smith");

        let cmd = state.guess_nation().expect("lookup starts");
        assert!(matches!(cmd, SimulationCommand::Start { kind: LookupKind::GuessNation, .. }));
        assert!(state.overwrite_prompt.is_none());
        assert!(state.modal_visible);
        assert!(state.is_loading);
    }

    #[test]
    fn test_guess_with_nation_asks_first() {
        let mut state = listing();
        select(&mut state, "John Doe");

        assert!(state.guess_nation().is_none());
        assert_eq!(state.overwrite_prompt.as_ref().map(|d| d.name.as_str()), Some("John Doe"));
        assert!(!state.modal_visible);
        assert!(state.pending_job_id.is_none());

        state.decline_overwrite();
        assert!(state.overwrite_prompt.is_none());
        assert!(!state.modal_visible);
        assert_eq!(state.developers, fixture_developers());
    }

    #[test]
    fn test_confirmed_overwrite_starts_lookup() {
        let mut state = listing();
        select(&mut state, "Zhang Wei");
        assert!(state.guess_nation().is_none());

        let cmd = state.confirm_overwrite().expect("lookup starts");
        let SimulationCommand::Start { developer, .. } = &cmd else {
            panic!("expected start");
        };
        assert_eq!(developer.name, "Zhang Wei");
        assert!(state.is_loading);
        assert!(state.overwrite_prompt.is_none());
    }

    #[test]
    fn test_completed_lookup_is_staged_not_committed() {
        let mut state = listing();
        select(&mut state, "Maria Garcia");
        let cmd = state.rate_developer().unwrap();
        let staged = state.selected_developer().unwrap().with_talent_rank(9.6);
        complete(&mut state, cmd, staged.clone());

        assert!(!state.is_loading);
        assert_eq!(state.current, Some(staged));
        assert_eq!(state.developers, fixture_developers());
    }

    #[test]
    fn test_commit_replaces_exactly_one_record() {
        let mut state = listing();
        select(&mut state, "Maria Garcia");
        let cmd = state.rate_developer().unwrap();
        let staged = state.selected_developer().unwrap().with_talent_rank(9.6);
        complete(&mut state, cmd, staged.clone());

        state.confirm_modal();

        assert!(!state.modal_visible);
        let fixtures = fixture_developers();
        for (before, after) in fixtures.iter().zip(&state.developers) {
            if before.id == staged.id {
                assert_eq!(after, &staged);
            } else {
                assert_eq!(after, before);
            }
        }
        assert_eq!(state.filtered, state.developers);
        let note = state.notification.as_ref().expect("notification shown");
        assert_eq!(note.message, UPDATE_SUCCESS_MESSAGE);
    }

    #[test]
    fn test_commit_keeps_selection_on_same_developer_when_sorted() {
        let mut state = listing();
        state.sort_by(SortColumn::TalentRank);
        state.selected_row = 0;
        let maria = state.selected_developer().unwrap();
        assert_eq!(maria.name, "Maria Garcia");

        let cmd = state.rate_developer().unwrap();
        complete(&mut state, cmd, maria.with_talent_rank(9.9));
        state.confirm_modal();

        let selected = state.selected_developer().unwrap();
        assert_eq!(selected.id, maria.id);
        assert_eq!(selected.talent_rank, 9.9);
        assert_eq!(state.selected_row, 4);
    }

    #[test]
    fn test_commit_updates_filtered_without_refiltering() {
        let mut state = listing();
        state.set_nation_filter(Some("USA".into()));
        select(&mut state, "John Doe");
        assert!(state.guess_nation().is_none());
        let cmd = state.confirm_overwrite().unwrap();
        let staged = fixture_developers()[0].with_nation("Germany");
        complete(&mut state, cmd, staged.clone());
        state.confirm_modal();

        assert_eq!(state.filtered, vec![staged.clone()]);
        assert_eq!(state.developers[0], staged);
    }

    #[test]
    fn test_cancel_never_mutates() {
        let mut state = listing();
        select(&mut state, "Alex Johnson");
        let cmd = state.rate_developer().unwrap();
        let staged = state.selected_developer().unwrap().with_talent_rank(10.0);
        complete(&mut state, cmd, staged);

        assert!(state.cancel_modal().is_none());
        assert!(!state.modal_visible);
        assert!(state.current.is_none());
        assert_eq!(state.developers, fixture_developers());
        assert_eq!(state.filtered, fixture_developers());
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_cancel_while_loading_cancels_job_and_ignores_late_result() {
        let mut state = listing();
        let cmd = state.rate_developer().unwrap();
        let SimulationCommand::Start { id, kind, developer } = cmd else {
            panic!("expected start");
        };

        let cancel = state.cancel_modal();
        assert!(matches!(cancel, Some(SimulationCommand::Cancel(c)) if c == id));
        assert!(state.notification.is_some());

        state.handle_response(SimulationResponse::Completed {
            id,
            kind,
            developer: developer.with_talent_rank(8.1),
        });
        assert!(state.current.is_none());
        assert!(!state.modal_visible);
        assert_eq!(state.developers, fixture_developers());
    }

    #[test]
    fn test_confirm_ignored_while_loading() {
        let mut state = listing();
        state.rate_developer().unwrap();
        state.confirm_modal();
        assert!(state.modal_visible);
        assert!(state.is_loading);
        assert_eq!(state.developers, fixture_developers());
    }

    #[test]
    fn test_new_lookup_supersedes_pending_one() {
        let mut state = listing();
        let first = state.rate_developer().unwrap();
        let second = state.rate_developer().unwrap();
        let (SimulationCommand::Start { id: first_id, .. }, SimulationCommand::Start { id: second_id, .. }) =
            (first, second)
        else {
            panic!("expected start commands");
        };
        assert_ne!(first_id, second_id);
        assert_eq!(state.pending_job_id, Some(second_id));

        state.handle_response(SimulationResponse::Cancelled { id: first_id });
        assert!(state.is_loading);
    }

    #[test]
    fn test_selection_follows_sorted_order() {
        let mut state = listing();
        state.sort_by(SortColumn::TalentRank);
        state.sort_by(SortColumn::TalentRank);
        state.selected_row = 0;
        assert_eq!(state.selected_developer().unwrap().name, "Jane Smith");
    }

    #[test]
    fn test_render_state_reports_active_filters() {
        let mut state = listing();
        assert!(!state.to_render_state().filters_active);
        state.set_nation_filter(Some("Atlantis".into()));
        let render = state.to_render_state();
        assert!(render.filters_active);
        assert!(render.rows.is_empty());
    }

    #[test]
    fn test_clear_filters() {
        let mut state = listing();
        state.set_domain_filter(Some(Domain::DataScience));
        state.filter.search.push_str("zzz");
        state.clear_filters();
        assert_eq!(state.filtered.len(), 5);
        assert!(!state.filter.is_active());
    }
}
