//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the UI, App, and Simulation layers.

pub mod ui_events;
pub mod simulation;
pub mod render;

pub use ui_events::UiEvent;
pub use simulation::{LookupKind, SimulationCommand, SimulationResponse};
pub use render::RenderState;
