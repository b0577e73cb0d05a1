//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Application name
pub const APP_NAME: &str = "DevScope";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulated lookup latency
pub const DEFAULT_SIMULATED_DELAY_MS: u64 = 2000;

/// How long a status bar notification stays visible
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 3000;

/// Log file written next to the working directory
pub const DEFAULT_LOG_FILE: &str = "devscope.log";

/// Shown wherever a developer has no nation
pub const NATION_PLACEHOLDER: &str = "N/A";

/// Candidates for the nation guess
pub const GUESSABLE_NATIONS: [&str; 5] = ["USA", "China", "India", "UK", "Germany"];

/// Values offered by the nation filter (besides "all")
pub const FILTERABLE_NATIONS: [&str; 3] = ["USA", "China", "Canada"];

/// Bounds of a simulated rating
pub const RATING_MIN: f64 = 8.0;
pub const RATING_MAX: f64 = 10.0;

pub const UPDATE_SUCCESS_MESSAGE: &str = "Developer information updated successfully";
