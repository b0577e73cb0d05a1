//! Simulation messages - communication between App and Simulation layers

use crate::models::Developer;

/// The two simulated lookups
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LookupKind {
    GuessNation,
    RateDeveloper,
}

impl LookupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupKind::GuessNation => "guess nation",
            LookupKind::RateDeveloper => "rate developer",
        }
    }
}

/// Commands sent from App layer to Simulation layer
#[derive(Debug, Clone)]
pub enum SimulationCommand {
    /// Start a lookup for a developer
    Start {
        id: u64,
        kind: LookupKind,
        developer: Developer,
    },
    /// Abandon a pending lookup
    Cancel(u64),
    /// Shutdown the simulation actor
    Shutdown,
}

/// Responses sent from Simulation layer to App layer
#[derive(Debug, Clone)]
pub enum SimulationResponse {
    /// Lookup finished; the developer carries the proposed value
    Completed {
        id: u64,
        kind: LookupKind,
        developer: Developer,
    },
    /// Lookup was cancelled before the delay elapsed
    Cancelled {
        id: u64,
    },
}

impl SimulationResponse {
    /// Get the job ID from the response
    pub fn id(&self) -> u64 {
        match self {
            SimulationResponse::Completed { id, .. } => *id,
            SimulationResponse::Cancelled { id } => *id,
        }
    }
}
