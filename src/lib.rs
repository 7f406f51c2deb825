//! bag_status library: delayed-baggage status resolution.
//!
//! This library queries the mybag.aero tracking backend for the state of a
//! delayed airline bag and normalizes the backend's inconsistent,
//! semi-structured response into an immutable [`StatusRecord`] with a small
//! set of actionable states (`searching`, `updated`, `not_found`, `error`).
//!
//! # Example
//!
//! ```no_run
//! use bag_status::{check_status, Airline, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     airline: Airline::Austrian,
//!     reference_number: "FRAOS1234567".into(),
//!     family_name: "Gregg".into(),
//!     ..Default::default()
//! };
//!
//! let record = check_status(&config).await?;
//! println!("{}: {}", record.state, record.message);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Scheduling of periodic checks,
//! backoff, and persistence of results are the caller's concern; the engine
//! exposes exactly one asynchronous "check now" operation per client.

#![warn(missing_docs)]

mod catalog;
mod classify;
mod client;
pub mod config;
mod delivery;
mod error;
pub mod initialization;
mod record;
mod reference;
pub mod transport;
mod value;

// Re-export public API
pub use client::StatusClient;
pub use config::{Airline, Config, LogFormat, LogLevel};
pub use error::{CheckError, InitializationError};
pub use record::{BagState, StatusRecord};
pub use reference::{parse_file_reference, ParsedReference};
pub use transport::{ReqwestTransport, StatusTransport, TransportError, TransportReply};

use std::sync::Arc;
use std::time::Duration;

/// Runs a single status check with the provided configuration.
///
/// Convenience entry point for callers that do not inject their own
/// transport: builds a `reqwest`-backed transport, runs one check, and
/// returns the resolved record.
///
/// # Errors
///
/// Only HTTP client construction can fail here. A check that fails against
/// the backend still succeeds from this function's point of view; the
/// failure is carried inside the returned record.
pub async fn check_status(config: &Config) -> anyhow::Result<StatusRecord> {
    let http = initialization::init_client(config)?;
    let transport = Arc::new(ReqwestTransport::new(http));
    let client = StatusClient::with_options(
        transport,
        config.airline,
        &config.reference_number,
        &config.family_name,
        config.user_agent.clone(),
        Duration::from_secs(config.timeout_seconds),
    );
    Ok(client.check().await)
}
