//! DevScope - Actor-based developer dashboard
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Simulation Layer (Tokio) - delayed fake lookups

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use devscope_tui::config::Config;
use devscope_tui::constants::{APP_NAME, APP_VERSION};
use devscope_tui::filter::SortColumn;
use devscope_tui::messages::ui_events::{key_to_ui_event, AppView, InputMode, Panel};
use devscope_tui::messages::{RenderState, SimulationCommand, SimulationResponse, UiEvent};
use devscope_tui::models::NotificationLevel;
use devscope_tui::simulation::{Oracle, SimulationActor};
use devscope_tui::ui::{self, centered_rect};
use devscope_tui::AppActor;

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config errors surface before the terminal is taken over
    let config = Config::load()?;

    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", &config.log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let seed = config.resolve_seed();
    tracing::info!(seed, delay_ms = config.simulated_delay_ms, "Starting {} {}", APP_NAME, APP_VERSION);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (sim_cmd_tx, sim_cmd_rx) = mpsc::unbounded_channel::<SimulationCommand>();
    let (sim_resp_tx, sim_resp_rx) = mpsc::unbounded_channel::<SimulationResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn simulation actor
    let simulation_actor = SimulationActor::new(Oracle::new(seed), config.simulated_delay(), sim_resp_tx);
    tokio::spawn(simulation_actor.run(sim_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(&config, sim_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, sim_resp_rx));

    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();
    let mut spinner_tick: usize = 0;

    loop {
        spinner_tick = spinner_tick.wrapping_add(1);
        terminal.draw(|f| draw_ui(f, &current_state, spinner_tick))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_view,
                    current_state.active_panel,
                    current_state.input_mode,
                    current_state.show_help,
                    current_state.overwrite_prompt.is_some(),
                    current_state.modal_visible,
                ) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState, tick: usize) {
    let area = f.area();

    match state.active_view {
        AppView::Landing => draw_landing(f, area),
        AppView::Developers => draw_listing(f, state, area),
    }

    if state.show_help {
        draw_help_popup(f, area);
    }

    if let Some(dev) = &state.overwrite_prompt {
        draw_overwrite_prompt(f, dev.nation.as_deref().unwrap_or_default(), area);
    }

    if state.modal_visible {
        draw_result_modal(f, state, tick, area);
    }
}

fn draw_landing(f: &mut Frame, area: Rect) {
    let block = Block::default().style(Style::default().bg(Color::Blue));
    f.render_widget(block, area);

    let banner = centered_rect(50, 30, area);
    let lines = vec![
        Line::from(Span::styled(APP_NAME, Style::default().fg(Color::White).bold())),
        Line::from(""),
        Line::from(Span::styled("Developer talent explorer", Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(Span::styled("Press any key to continue, q to quit", Style::default().fg(Color::DarkGray))),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(Color::Blue));
    f.render_widget(paragraph, banner);
}

fn draw_listing(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Search + selectors
            Constraint::Min(5),     // Table
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_header(f, state, chunks[0]);
    draw_table(f, state, chunks[1]);
    draw_status_bar(f, state, chunks[2]);
}

fn draw_header(f: &mut Frame, state: &RenderState, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(26),
            Constraint::Length(22),
        ])
        .split(area);

    // Search box
    let is_focused = state.active_panel == Panel::Search;
    let border_style = if is_focused && state.input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Search developers ");
    let search = if state.search.is_empty() && state.input_mode == InputMode::Normal {
        Paragraph::new(Span::styled("name or username...", Style::default().fg(Color::DarkGray)))
    } else {
        Paragraph::new(state.search.as_str())
    };
    f.render_widget(search.block(block), columns[0]);

    if is_focused && state.input_mode == InputMode::Editing {
        let area = columns[0];
        let max_x = area.x + area.width.saturating_sub(2);
        let column = ui::cursor_column(&state.search, state.cursor_position);
        let cursor_x = (area.x + column + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }

    let domain = ui::render_selector(
        " Domain ",
        ui::domain_label(state.domain_filter),
        state.active_panel == Panel::Domain,
    );
    f.render_widget(domain, columns[1]);

    let nation = ui::render_selector(
        " Nation ",
        ui::nation_label(state.nation_filter.as_deref()),
        state.active_panel == Panel::Nation,
    );
    f.render_widget(nation, columns[2]);
}

fn draw_table(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Table;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let header = Row::new(vec![
        Cell::from(ui::sort_header("Name", state.sort.order_for(SortColumn::Name))),
        Cell::from("Username"),
        Cell::from(ui::sort_header("TalentRank", state.sort.order_for(SortColumn::TalentRank))),
        Cell::from("Nation"),
        Cell::from("Domain"),
    ])
    .style(Style::default().fg(Color::Yellow).bold());

    let rows: Vec<Row> = state.rows.iter()
        .map(|dev| {
            let nation = ui::display_nation(dev.nation.as_deref());
            let nation_style = if dev.nation.is_some() {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Row::new(vec![
                Cell::from(dev.name.clone()),
                Cell::from(dev.username.clone()),
                Cell::from(ui::format_talent_rank(dev.talent_rank))
                    .style(Style::default().fg(ui::rank_color(dev.talent_rank))),
                Cell::from(nation.to_string()).style(nation_style),
                Cell::from(dev.domain.as_str()),
            ])
        })
        .collect();

    let title = format!(" Developers ({}/{}) ", state.rows.len(), state.total_count);
    let highlight_style = if is_focused {
        Style::default().bg(Color::DarkGray).bold()
    } else {
        Style::default()
    };

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(22),
            Constraint::Percentage(18),
            Constraint::Percentage(14),
            Constraint::Percentage(14),
            Constraint::Percentage(32),
        ],
    )
    .header(header)
    .block(Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title))
    .row_highlight_style(highlight_style)
    .highlight_symbol("> ");

    let mut table_state = TableState::default();
    if !state.rows.is_empty() {
        table_state.select(Some(state.selected_row));
    }
    f.render_stateful_widget(table, area, &mut table_state);

    if state.rows.is_empty() {
        let inner = area.inner(Margin { horizontal: 2, vertical: 2 });
        let message = if state.filters_active {
            "No developers match the current filters. Press 'x' to clear."
        } else {
            "No developers loaded."
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, inner);
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let now = chrono::Utc::now();
    if let Some(note) = state.notification.as_ref().filter(|n| !n.is_expired(now, state.notification_ttl)) {
        let icon = match note.level {
            NotificationLevel::Success => "✓",
            NotificationLevel::Info => "i",
        };
        let bar = Paragraph::new(format!(" {} {} ", icon, note.message))
            .style(Style::default().fg(ui::notification_color(note.level)));
        f.render_widget(bar, area);
        return;
    }

    let status = if state.is_loading {
        " Processing... "
    } else if state.input_mode == InputMode::Editing {
        " ESC/Enter:stop editing | arrows:move "
    } else {
        match state.active_panel {
            Panel::Table => " g:guess nation | r:rate | n/t:sort | Tab:panel | ?:help | q:quit ",
            Panel::Search => " e:edit search | /:search | x:clear | Tab:panel | q:quit ",
            Panel::Domain | Panel::Nation => " ←/→:change | x:clear | Tab:panel | q:quit ",
        }
    };

    let bar = Paragraph::new(status)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_result_modal(f: &mut Frame, state: &RenderState, tick: usize, area: Rect) {
    const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
    let popup_area = centered_rect(50, 40, area);

    let (title, lines) = if state.is_loading {
        let frame = SPINNER[(tick / 2) % SPINNER.len()];
        (
            " Processing... ",
            vec![
                Line::from(""),
                Line::from(Span::styled(frame, Style::default().fg(Color::Cyan).bold())),
                Line::from(""),
                Line::from("Please wait while we process the information..."),
            ],
        )
    } else {
        let mut lines = match &state.staged {
            Some(dev) => ui::developer_lines(dev),
            None => Vec::new(),
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter:OK  Esc:Cancel",
            Style::default().fg(Color::DarkGray),
        )));
        (" Result ", lines)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(Color::Black));

    let alignment = if state.is_loading { Alignment::Center } else { Alignment::Left };
    let modal = Paragraph::new(lines)
        .block(block)
        .alignment(alignment)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(modal, popup_area);
}

fn draw_overwrite_prompt(f: &mut Frame, nation: &str, area: Rect) {
    let popup_area = centered_rect(50, 25, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Guess Nation ")
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let text = vec![
        Line::from(format!(
            "The developer's nation is already set to {}. Do you want to guess anyway?",
            nation
        )),
        Line::from(""),
        Line::from(Span::styled("y/Enter:OK  n/Esc:Cancel", Style::default().fg(Color::DarkGray))),
    ];

    let prompt = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(prompt, popup_area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 DEVSCOPE - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Cycle Search / Domain / Nation / Table
   ↑ / ↓              Move table selection

 FILTERS
   / or e             Edit search text
   ← / →              Change domain or nation filter
   x                  Clear all filters

 TABLE
   n                  Sort by name (asc / desc / off)
   t                  Sort by talent rank (asc / desc / off)
   g                  Guess nation of selected developer
   r                  Rate selected developer

 RESULT DIALOG
   Enter / y          Apply the result
   Esc / n            Discard the result

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
