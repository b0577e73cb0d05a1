//! # DevScope TUI
//!
//! A terminal dashboard over a fixed set of developer profiles.
//!
//! ## Features
//! - Case-insensitive search over name and username
//! - Domain and nation filters
//! - Sortable table (name, talent rank)
//! - Simulated "guess nation" and "rate developer" lookups
//! - Result dialog that stages a change until it is confirmed
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Simulation Layer (Tokio runtime)

pub mod config;
pub mod constants;
pub mod filter;
pub mod models;
pub mod ui;
pub mod messages;
pub mod app;
pub mod simulation;

// Re-export commonly used types
pub use models::{fixture_developers, Developer, Domain, Notification};
pub use filter::{DeveloperFilter, SortColumn, SortOrder, SortState};
pub use messages::{UiEvent, SimulationCommand, SimulationResponse, RenderState};
pub use app::{AppState, AppActor};
pub use simulation::SimulationActor;
