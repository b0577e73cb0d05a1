//! Simulation layer - stands in for a remote lookup service
//!
//! The Simulation actor receives lookup commands, waits a fixed delay,
//! and answers with a randomly chosen value.

pub mod actor;
pub mod oracle;

pub use actor::SimulationActor;
pub use oracle::Oracle;
