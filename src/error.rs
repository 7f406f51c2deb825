//! Error types for status checks and initialization.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

/// Failure modes of one status check.
///
/// Every variant resolves to a [`StatusRecord`](crate::StatusRecord):
/// [`CheckError::NotFound`] becomes a `not_found` record and the rest become
/// `error` records. [`StatusClient::check`](crate::StatusClient::check) never
/// propagates these to its caller; the `Display` text of a variant is the
/// human-readable message carried on the record.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The reference does not decompose into station, airline, and number.
    /// Detected locally before any network call; carries the normalized
    /// (uppercased, whitespace-stripped) reference.
    #[error(
        "Reference '{reference}' is not in file-reference format, e.g. ABCOS12345 (station+airline+number)."
    )]
    InvalidReferenceFormat {
        /// The normalized reference that failed to match.
        reference: String,
    },

    /// The airline code embedded in the reference disagrees with the
    /// selected airline. Detected locally before any network call.
    #[error(
        "Reference '{reference}' is for airline code {found}, but selected airline expects {expected}."
    )]
    AirlineMismatch {
        /// The normalized reference.
        reference: String,
        /// Airline code embedded in the reference.
        found: String,
        /// Carrier code of the selected airline.
        expected: String,
    },

    /// Backend authoritative 401: no record exists for this reference and
    /// family name. Terminal, never retried.
    #[error("No record found for reference number and family name.")]
    NotFound,

    /// Terminal non-success status after the validator retry protocol,
    /// carrying a bounded excerpt of the response body.
    #[error("mybag API returned HTTP {status}: {excerpt}")]
    Backend {
        /// The terminal HTTP status.
        status: u16,
        /// First characters of the response body, for diagnostics.
        excerpt: String,
    },

    /// HTTP 200 whose body did not contain the delayed-bag record at the
    /// expected path. The message is the document's own `Msg`/`message`
    /// field when present.
    #[error("{message}")]
    BadResponseFormat {
        /// Human-readable description of the shape problem.
        message: String,
    },

    /// The whole check exceeded its overall bound.
    #[error("Status check timed out after {seconds} seconds.")]
    Timeout {
        /// The configured bound in seconds.
        seconds: u64,
    },

    /// Anything else, caught at the outer boundary of the check.
    #[error("Check failed: {0}")]
    Unexpected(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_is_exact() {
        assert_eq!(
            CheckError::NotFound.to_string(),
            "No record found for reference number and family name."
        );
    }

    #[test]
    fn test_backend_message_carries_status_and_excerpt() {
        let err = CheckError::Backend {
            status: 503,
            excerpt: "Service Unavailable".into(),
        };
        assert_eq!(
            err.to_string(),
            "mybag API returned HTTP 503: Service Unavailable"
        );
    }

    #[test]
    fn test_unexpected_is_prefixed() {
        let err = CheckError::Unexpected(anyhow::anyhow!("socket closed"));
        assert_eq!(err.to_string(), "Check failed: socket closed");
    }
}
