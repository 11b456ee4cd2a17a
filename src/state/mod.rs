//! State management module
//!
//! This module contains all state-related structures and their management logic.

pub mod countdown;
pub mod app_state;

// Re-export main types
pub use countdown::{TokenStatus, TokenTimerState};
pub use app_state::AppState;
