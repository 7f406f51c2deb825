//! Application configuration and constants.
//!
//! This module provides:
//! - Fixed backend endpoints and protocol constants
//! - The supported airline table
//! - The `Config` type shared by the CLI and library callers

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Airline, Config, LogFormat, LogLevel};
