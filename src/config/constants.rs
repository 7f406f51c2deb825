//! Configuration constants.
//!
//! This module defines the fixed endpoints, protocol fields, and operational
//! limits used throughout the crate.

/// Base URL of the tracking backend.
pub const API_BASE_URL: &str = "https://wtss-api.mybag.aero";

/// Lookup endpoint for delayed-bag records.
pub const MANAGE_LOGIN_ENDPOINT: &str = "/manageLogin";

/// Fixed API key the web frontend sends with every lookup.
pub const API_KEY: &str = "P";

/// Static JSON asset mapping tracing-status codes to display text and
/// notification bodies.
pub const DYNAMIC_MESSAGES_URL: &str =
    "https://mybag.aero/baggage/assets/static/common-dynamic-messages/en-gb.json";

/// Record type submitted in the lookup request.
pub const RECORD_TYPE_DELAYED: &str = "DELAYED";

/// Agent identifier for unauthenticated lookups.
pub const AGENT_ID_GUEST: &str = "GUEST";

/// Protocol version the backend expects.
pub const PROTOCOL_VERSION: f64 = 0.1;

/// Re-login window, in days, the web frontend sends with every lookup.
pub const RELOGIN_WINDOW_DAYS: u32 = 21;

/// Statuses the backend returns when the validator flag does not match the
/// session. The set is empirically derived and preserved exactly as observed;
/// a lookup hitting one of these is retried once with the alternate validator.
pub const VALIDATOR_REJECTION_STATUSES: [u16; 3] = [489, 490, 492];

/// Status the backend uses for "no such record". Terminal, never retried:
/// the backend answers 401 when the reference/family-name pair has no record,
/// not when a retry might help.
pub const HTTP_STATUS_NO_RECORD: u16 = 401;

/// Banner shown while the backend is still tracing the bag.
pub const SEARCHING_TEXT: &str = "SEARCHING FOR YOUR BAGGAGE";

/// Overall bound for one status check (lookup, validator retry, and catalog
/// fetch combined), in seconds. A check that exceeds this resolves to an
/// error record instead of leaving the caller waiting.
pub const DEFAULT_CHECK_TIMEOUT_SECS: u64 = 90;

/// Per-request HTTP timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum characters of raw response body kept on a record for diagnostics.
pub const RAW_EXCERPT_MAX_CHARS: usize = 1000;

/// Maximum characters of response body quoted in backend error messages.
pub const ERROR_EXCERPT_MAX_CHARS: usize = 300;

/// Browser-like User-Agent sent with every backend request. The backend
/// rejects clients that do not look like the web frontend.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";
