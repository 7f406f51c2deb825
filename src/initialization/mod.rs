//! Initialization of process-level resources: HTTP client and logger.

mod client;
mod logger;

pub use client::init_client;
pub use logger::init_logger_with;
