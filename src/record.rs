//! Immutable status records.
//!
//! A [`StatusRecord`] is the single artifact of one check. It is built once
//! by the status client, handed off by value, and never mutated afterwards.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Airline;

/// Actionable state resolved for a tracked bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BagState {
    /// The backend is still tracing the bag.
    Searching,
    /// The bag has progressed beyond searching.
    Updated,
    /// The backend has no record for the reference/family-name pair.
    NotFound,
    /// The check could not be completed.
    Error,
}

impl BagState {
    /// Stable lowercase identifier (`searching`, `updated`, `not_found`,
    /// `error`).
    pub fn as_str(&self) -> &'static str {
        match self {
            BagState::Searching => "searching",
            BagState::Updated => "updated",
            BagState::NotFound => "not_found",
            BagState::Error => "error",
        }
    }
}

impl fmt::Display for BagState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable result of one status check.
///
/// Exactly one of the four states holds per record, and `state ==
/// Searching` exactly when `is_searching` is true; `not_found` and `error`
/// records always carry `is_searching == false`. The optional fields are
/// populated only on successful checks.
#[derive(Debug, Clone, Serialize)]
pub struct StatusRecord {
    /// Resolved state.
    pub state: BagState,
    /// When the check completed.
    pub checked_at: DateTime<Utc>,
    /// Airline the reference belongs to.
    pub airline: Airline,
    /// Normalized file reference.
    pub reference_number: String,
    /// Normalized family name.
    pub family_name: String,
    /// Manage-bag portal URL for this airline.
    pub source_url: String,
    /// One-sentence human-readable summary.
    pub message: String,
    /// Redundant searching flag, kept in lockstep with `state`.
    pub is_searching: bool,
    /// Display title of the first bag, e.g. `DELAYED BAGGAGE 1 - 0001234567`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bag_title: Option<String>,
    /// Short banner for the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    /// Secondary detail line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// One tracing status per bag item, in document order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracing_statuses: Option<Vec<String>>,
    /// First tracing status, used for message resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_tracing_status: Option<String>,
    /// Ordered progress steps resolved from the message catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_steps: Option<Vec<String>>,
    /// Current-status headline resolved from the message catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_status_text: Option<String>,
    /// Long-form status body resolved from the message catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_body: Option<String>,
    /// Courier/delivery metadata mined from the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_details: Option<BTreeMap<String, String>>,
    /// Count of bags the backend reports as updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_of_bags_updated: Option<i64>,
    /// Backend record-status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_status: Option<String>,
    /// Bounded excerpt of the raw response body, for diagnostics only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_excerpt: Option<String>,
}

impl StatusRecord {
    /// Flat string attributes for presentation adapters.
    ///
    /// Optional fields appear only when present. Lists and the delivery
    /// mapping are rendered as JSON strings so the result stays a plain
    /// string-to-string mapping.
    pub fn attributes(&self) -> BTreeMap<String, String> {
        let mut attrs = BTreeMap::new();
        attrs.insert("state".to_string(), self.state.as_str().to_string());
        attrs.insert("checked_at".to_string(), self.checked_at.to_rfc3339());
        attrs.insert("airline".to_string(), self.airline.to_string());
        attrs.insert(
            "reference_number".to_string(),
            self.reference_number.clone(),
        );
        attrs.insert("family_name".to_string(), self.family_name.clone());
        attrs.insert("source_url".to_string(), self.source_url.clone());
        attrs.insert("message".to_string(), self.message.clone());
        attrs.insert("is_searching".to_string(), self.is_searching.to_string());

        let text_fields = [
            ("bag_title", &self.bag_title),
            ("headline", &self.headline),
            ("details", &self.details),
            ("primary_tracing_status", &self.primary_tracing_status),
            ("current_status_text", &self.current_status_text),
            ("status_body", &self.status_body),
            ("record_status", &self.record_status),
            ("raw_excerpt", &self.raw_excerpt),
        ];
        for (key, field) in text_fields {
            if let Some(text) = field {
                attrs.insert(key.to_string(), text.clone());
            }
        }

        if let Some(statuses) = &self.tracing_statuses {
            attrs.insert("tracing_statuses".to_string(), render_json(statuses));
        }
        if let Some(steps) = &self.status_steps {
            attrs.insert("status_steps".to_string(), render_json(steps));
        }
        if let Some(details) = &self.delivery_details {
            attrs.insert("delivery_details".to_string(), render_json(details));
        }
        if let Some(count) = self.no_of_bags_updated {
            attrs.insert("no_of_bags_updated".to_string(), count.to_string());
        }

        attrs
    }
}

fn render_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}
