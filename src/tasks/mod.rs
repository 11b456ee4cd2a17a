//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod ticker;
pub mod poller;

// Re-export main functions
pub use ticker::countdown_ticker_task;
pub use poller::token_poll_task;
