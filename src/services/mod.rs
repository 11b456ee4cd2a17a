//! External service clients
//!
//! This module contains the client for the platform backend, the sole
//! authority on token expiry.

pub mod backend;

// Re-export main types
pub use backend::{BackendClient, TokenSnapshot};
