//! Toybox API Library
//!
//! This crate provides the HTTP handlers, application state and setup for the
//! upload service.

mod handlers;
mod utils;

pub mod error;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::HttpAppError;
pub use state::AppState;
