//! App actor - message loop processing UI events and simulation responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::config::Config;
use crate::filter::SortColumn;
use crate::messages::{RenderState, SimulationCommand, SimulationResponse, UiEvent};

/// App actor that processes UI events and simulation responses
pub struct AppActor {
    state: AppState,
    simulation_tx: mpsc::UnboundedSender<SimulationCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        config: &Config,
        simulation_tx: mpsc::UnboundedSender<SimulationCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        let mut state = AppState::new();
        state.notification_ttl = config.notification_ttl();
        AppActor {
            state,
            simulation_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut sim_rx: mpsc::UnboundedReceiver<SimulationResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.simulation_tx.send(SimulationCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = sim_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send(&self, cmd: Option<SimulationCommand>) {
        if let Some(cmd) = cmd {
            let _ = self.simulation_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::EnterListing => self.state.enter_listing(),

            // Panel navigation
            UiEvent::NextPanel => self.state.next_panel(),
            UiEvent::PrevPanel => self.state.prev_panel(),
            UiEvent::FocusSearch => self.state.focus_search(),

            // Search editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Selectors
            UiEvent::PrevOption => self.state.prev_option(),
            UiEvent::NextOption => self.state.next_option(),
            UiEvent::ClearFilters => self.state.clear_filters(),

            // Table
            UiEvent::SelectPrev => self.state.select_prev(),
            UiEvent::SelectNext => self.state.select_next(),
            UiEvent::SortByName => self.state.sort_by(SortColumn::Name),
            UiEvent::SortByRank => self.state.sort_by(SortColumn::TalentRank),

            // Lookups
            UiEvent::GuessNation => {
                let cmd = self.state.guess_nation();
                self.send(cmd);
            }
            UiEvent::RateDeveloper => {
                let cmd = self.state.rate_developer();
                self.send(cmd);
            }
            UiEvent::ConfirmOverwrite => {
                let cmd = self.state.confirm_overwrite();
                self.send(cmd);
            }
            UiEvent::DeclineOverwrite => self.state.decline_overwrite(),

            // Modal
            UiEvent::ConfirmModal => self.state.confirm_modal(),
            UiEvent::CancelModal => {
                let cmd = self.state.cancel_modal();
                self.send(cmd);
            }

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::ui_events::AppView;
    use crate::simulation::{Oracle, SimulationActor};
    use std::time::Duration;

    /// Wire an app actor to a real simulation actor with a short delay
    fn spawn_app() -> (mpsc::UnboundedSender<UiEvent>, mpsc::UnboundedReceiver<RenderState>) {
        let config = Config { simulated_delay_ms: 20, seed: Some(5), ..Config::default() };
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (sim_cmd_tx, sim_cmd_rx) = mpsc::unbounded_channel();
        let (sim_resp_tx, sim_resp_rx) = mpsc::unbounded_channel();
        let (render_tx, render_rx) = mpsc::unbounded_channel();

        let sim = SimulationActor::new(Oracle::new(5), config.simulated_delay(), sim_resp_tx);
        tokio::spawn(sim.run(sim_cmd_rx));
        tokio::spawn(AppActor::new(&config, sim_cmd_tx, render_tx).run(ui_rx, sim_resp_rx));
        (ui_tx, render_rx)
    }

    async fn next_state(rx: &mut mpsc::UnboundedReceiver<RenderState>) -> RenderState {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("render state in time")
            .expect("channel open")
    }

    #[tokio::test]
    async fn test_rate_flow_end_to_end() {
        let (ui_tx, mut render_rx) = spawn_app();
        let initial = next_state(&mut render_rx).await;
        assert_eq!(initial.active_view, AppView::Landing);

        ui_tx.send(UiEvent::EnterListing).unwrap();
        ui_tx.send(UiEvent::RateDeveloper).unwrap();
        next_state(&mut render_rx).await;
        let loading = next_state(&mut render_rx).await;
        assert!(loading.modal_visible);
        assert!(loading.is_loading);

        let staged = next_state(&mut render_rx).await;
        assert!(!staged.is_loading);
        let rank = staged.staged.as_ref().expect("staged record").talent_rank;
        assert!((8.0..=10.0).contains(&rank));

        ui_tx.send(UiEvent::ConfirmModal).unwrap();
        let committed = next_state(&mut render_rx).await;
        assert!(!committed.modal_visible);
        assert_eq!(committed.rows[0].talent_rank, rank);
        assert!(committed.notification.is_some());
    }

    #[tokio::test]
    async fn test_quit_ends_actor() {
        let (ui_tx, mut render_rx) = spawn_app();
        next_state(&mut render_rx).await;
        ui_tx.send(UiEvent::Quit).unwrap();
        let closed = tokio::time::timeout(Duration::from_secs(2), render_rx.recv()).await;
        assert!(matches!(closed, Ok(None)));
    }
}
