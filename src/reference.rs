//! File-reference parsing.
//!
//! A baggage file reference packs three fields into one string: a 3-letter
//! station code, a 2-character airline code, and the remaining alphanumeric
//! short reference (e.g. `FRAOS1234567` is station `FRA`, airline `OS`,
//! number `1234567`).

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CheckError;

static FILE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{3})([A-Z0-9]{2})([A-Z0-9]+)$").expect("file-reference pattern compiles")
});

/// A file reference decomposed into its parts. Derived on demand from the
/// user-supplied reference, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReference {
    /// 3-letter station code, e.g. `FRA`.
    pub station_code: String,
    /// 2-character airline code, e.g. `OS`.
    pub airline_code: String,
    /// Remaining alphanumeric reference number.
    pub short_reference: String,
}

/// Parses a free-form file reference.
///
/// The input is uppercased and stripped of all whitespace before matching,
/// so `"fra os 1234567"` parses the same as `"FRAOS1234567"`.
///
/// # Errors
///
/// Returns [`CheckError::InvalidReferenceFormat`] carrying the normalized
/// string when it does not match the station+airline+number shape.
pub fn parse_file_reference(reference: &str) -> Result<ParsedReference, CheckError> {
    let compact: String = reference
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let captures = FILE_REFERENCE
        .captures(&compact)
        .ok_or_else(|| CheckError::InvalidReferenceFormat {
            reference: compact.clone(),
        })?;

    Ok(ParsedReference {
        station_code: captures[1].to_string(),
        airline_code: captures[2].to_string(),
        short_reference: captures[3].to_string(),
    })
}
