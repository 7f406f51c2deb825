//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `bag_status` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! One invocation runs exactly one status check. An `error` record is a
//! completed check and still exits 0; only setup failures exit non-zero.

use anyhow::{Context, Result};
use clap::Parser;

use bag_status::initialization::init_logger_with;
use bag_status::{check_status, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let record = check_status(&config).await?;

    if config.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&record).context("Failed to serialize record")?
        );
    } else {
        println!("{}: {}", record.state, record.message);
        for (key, value) in record.attributes() {
            if key != "state" && key != "message" {
                println!("  {key}: {value}");
            }
        }
    }

    Ok(())
}
