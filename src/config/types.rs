//! Configuration types and CLI options.

use std::fmt;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::config::constants::{DEFAULT_CHECK_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Airlines supported by the mybag.aero delayed-baggage portal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Airline {
    /// Austrian Airlines (carrier code OS)
    Austrian,
    /// Lufthansa (carrier code LH)
    Lufthansa,
    /// Swiss International Air Lines (carrier code LX)
    Swiss,
}

impl Airline {
    /// Two-letter carrier code embedded in file references and the
    /// authorization header.
    pub fn code(&self) -> &'static str {
        match self {
            Airline::Austrian => "OS",
            Airline::Lufthansa => "LH",
            Airline::Swiss => "LX",
        }
    }

    /// Manage-bag portal URL recorded as the `source_url` of every record
    /// produced for this airline.
    pub fn portal_url(&self) -> &'static str {
        match self {
            Airline::Austrian => {
                "https://mybag.aero/baggage/#/pax/austrian/en-gb/delayed/manage-bag"
            }
            Airline::Lufthansa => {
                "https://mybag.aero/baggage/#/pax/lufthansa/en-gb/delayed/manage-bag"
            }
            Airline::Swiss => "https://mybag.aero/baggage/#/pax/swiss/en-gb/delayed/manage-bag",
        }
    }
}

impl fmt::Display for Airline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Airline::Austrian => "austrian",
            Airline::Lufthansa => "lufthansa",
            Airline::Swiss => "swiss",
        };
        write!(f, "{name}")
    }
}

/// Logging level for the application.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        write!(f, "{name}")
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogFormat::Plain => "plain",
            LogFormat::Json => "json",
        };
        write!(f, "{name}")
    }
}

/// Configuration for one status check.
///
/// Doubles as the CLI argument surface: the binary parses this struct
/// directly, and library users construct it programmatically.
///
/// # Examples
///
/// ```no_run
/// use bag_status::{Airline, Config};
///
/// let config = Config {
///     airline: Airline::Austrian,
///     reference_number: "FRAOS1234567".into(),
///     family_name: "Gregg".into(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bag_status",
    about = "Checks the delivery status of a delayed airline bag via mybag.aero"
)]
pub struct Config {
    /// Airline the file reference belongs to
    #[arg(long, value_enum)]
    pub airline: Airline,

    /// Baggage file reference, e.g. FRAOS1234567 (station + airline + number)
    #[arg(long)]
    pub reference_number: String,

    /// Family name the delayed-bag record was filed under
    #[arg(long)]
    pub family_name: String,

    /// Overall timeout for one check, in seconds
    #[arg(long, default_value_t = DEFAULT_CHECK_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Print the full record as JSON instead of flat attributes
    #[arg(long)]
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            airline: Airline::Austrian,
            reference_number: String::new(),
            family_name: String::new(),
            timeout_seconds: DEFAULT_CHECK_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_airline_codes() {
        assert_eq!(Airline::Austrian.code(), "OS");
        assert_eq!(Airline::Lufthansa.code(), "LH");
        assert_eq!(Airline::Swiss.code(), "LX");
    }

    #[test]
    fn test_airline_portal_urls_are_per_carrier() {
        for airline in [Airline::Austrian, Airline::Lufthansa, Airline::Swiss] {
            let url = airline.portal_url();
            assert!(url.starts_with("https://mybag.aero/baggage/"));
            assert!(url.contains(&airline.to_string()));
        }
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.timeout_seconds, DEFAULT_CHECK_TIMEOUT_SECS);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(!config.json);
    }
}
