//! Tokenwatch - a countdown-reconciliation daemon for broker token expiry
//!
//! This library tracks how long broker and market-data tokens have left
//! before expiry. The backend is the sole authority on expiry math; between
//! polls a local ticker decrements the last authoritative value and resyncs
//! the instant a fresher one arrives.

pub mod config;
pub mod state;
pub mod display;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
