//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Top-level screens
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum AppView {
    #[default]
    Landing,
    Developers,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Landing
    EnterListing,

    // Panel navigation
    NextPanel,
    PrevPanel,
    FocusSearch,

    // Search editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Domain / nation selectors
    PrevOption,
    NextOption,
    ClearFilters,

    // Table
    SelectPrev,
    SelectNext,
    SortByName,
    SortByRank,

    // Simulated actions
    GuessNation,
    RateDeveloper,

    // Overwrite confirmation
    ConfirmOverwrite,
    DeclineOverwrite,

    // Result modal
    ConfirmModal,
    CancelModal,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Focusable panel of the listing view
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Panel {
    Search,
    Domain,
    Nation,
    Table,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Search => Panel::Domain,
            Panel::Domain => Panel::Nation,
            Panel::Nation => Panel::Table,
            Panel::Table => Panel::Search,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Search => Panel::Table,
            Panel::Domain => Panel::Search,
            Panel::Nation => Panel::Domain,
            Panel::Table => Panel::Nation,
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_view: AppView,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
    show_overwrite_prompt: bool,
    modal_visible: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if active_view == AppView::Landing {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
            _ => Some(UiEvent::EnterListing),
        };
    }

    // Popups capture every key, topmost first
    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if show_overwrite_prompt {
        return match key.code {
            KeyCode::Enter | KeyCode::Char('y') => Some(UiEvent::ConfirmOverwrite),
            KeyCode::Esc | KeyCode::Char('n') => Some(UiEvent::DeclineOverwrite),
            _ => None,
        };
    }

    if modal_visible {
        return match key.code {
            KeyCode::Enter | KeyCode::Char('y') => Some(UiEvent::ConfirmModal),
            KeyCode::Esc | KeyCode::Char('n') => Some(UiEvent::CancelModal),
            _ => None,
        };
    }

    match input_mode {
        InputMode::Editing => match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
        InputMode::Normal => handle_listing_keys(key, active_panel),
    }
}

/// Handle keys for the listing view in normal mode
fn handle_listing_keys(key: KeyEvent, active_panel: Panel) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Tab => Some(UiEvent::NextPanel),
        KeyCode::BackTab => Some(UiEvent::PrevPanel),
        KeyCode::Char('/') => Some(UiEvent::FocusSearch),
        KeyCode::Char('n') => Some(UiEvent::SortByName),
        KeyCode::Char('t') => Some(UiEvent::SortByRank),
        KeyCode::Char('x') => Some(UiEvent::ClearFilters),
        KeyCode::Char('e') | KeyCode::Enter if active_panel == Panel::Search => {
            Some(UiEvent::StartEditing)
        }
        KeyCode::Left if matches!(active_panel, Panel::Domain | Panel::Nation) => {
            Some(UiEvent::PrevOption)
        }
        KeyCode::Right | KeyCode::Enter if matches!(active_panel, Panel::Domain | Panel::Nation) => {
            Some(UiEvent::NextOption)
        }
        KeyCode::Up if active_panel == Panel::Table => Some(UiEvent::SelectPrev),
        KeyCode::Down if active_panel == Panel::Table => Some(UiEvent::SelectNext),
        KeyCode::Char('g') if active_panel == Panel::Table => Some(UiEvent::GuessNation),
        KeyCode::Char('r') if active_panel == Panel::Table => Some(UiEvent::RateDeveloper),
        _ => None,
    }
}
