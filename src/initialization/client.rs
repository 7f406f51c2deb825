//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, REQUEST_TIMEOUT_SECS};
use crate::error::InitializationError;

/// Initializes the HTTP client used by the production transport.
///
/// Creates a `reqwest::Client` configured with the user-agent from the
/// configuration and a per-request timeout. The overall check timeout is
/// enforced separately by the status client; this bound only keeps a single
/// hung request from consuming the whole budget.
///
/// # Errors
///
/// Returns [`InitializationError::HttpClientError`] if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}
