//! Status client: the authenticated lookup protocol and record assembly.
//!
//! One client tracks one airline/reference/family-name triple. Its single
//! entry point, [`StatusClient::check`], runs the lookup protocol against
//! the backend and always resolves to a [`StatusRecord`]: every failure
//! mode is mapped into the record's shape at this boundary.

use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;

use crate::catalog::CatalogLoader;
use crate::classify;
use crate::config::{
    Airline, API_BASE_URL, API_KEY, AGENT_ID_GUEST, DEFAULT_CHECK_TIMEOUT_SECS,
    DEFAULT_USER_AGENT, ERROR_EXCERPT_MAX_CHARS, HTTP_STATUS_NO_RECORD, MANAGE_LOGIN_ENDPOINT,
    PROTOCOL_VERSION, RAW_EXCERPT_MAX_CHARS, RECORD_TYPE_DELAYED, RELOGIN_WINDOW_DAYS,
    VALIDATOR_REJECTION_STATUSES,
};
use crate::delivery;
use crate::error::CheckError;
use crate::record::{BagState, StatusRecord};
use crate::reference::{parse_file_reference, ParsedReference};
use crate::transport::{StatusTransport, TransportReply};
use crate::value;

// Compact token the backend expects in the Authorization header; field
// order matters for byte-identical encoding, so this stays a derived struct.
#[derive(Serialize)]
struct AuthToken<'a> {
    #[serde(rename = "fileRef")]
    file_ref: &'a str,
    #[serde(rename = "lastName")]
    last_name: &'a str,
    epic: &'a str,
    airline: &'a str,
}

#[derive(Serialize)]
struct ReadRecordRequest<'a> {
    #[serde(rename = "WTR_ReadRecordRQ")]
    read_record: ReadRecord<'a>,
}

#[derive(Serialize)]
struct ReadRecord<'a> {
    #[serde(rename = "RecordID")]
    record_id: RecordId<'a>,
    #[serde(rename = "AgentID")]
    agent_id: &'a str,
    #[serde(rename = "Version")]
    version: f64,
    #[serde(rename = "Validator")]
    validator: u8,
    #[serde(rename = "LoginAfterTimeInDays")]
    login_after_time_in_days: u32,
    #[serde(rename = "captchaResponse")]
    captcha_response: &'a str,
}

#[derive(Serialize)]
struct RecordId<'a> {
    #[serde(rename = "RecordType")]
    record_type: &'a str,
    #[serde(rename = "RecordReference")]
    record_reference: RecordReference<'a>,
}

#[derive(Serialize)]
struct RecordReference<'a> {
    #[serde(rename = "ReferenceNumber")]
    reference_number: &'a str,
    #[serde(rename = "StationCode")]
    station_code: &'a str,
    #[serde(rename = "AirlineCode")]
    airline_code: &'a str,
    #[serde(rename = "LastName")]
    last_name: &'a str,
}

/// Checks the delivery status of one delayed-bag record.
///
/// The HTTP transport is injected and shared; the client holds no other
/// resources. Concurrent checks for different references are fully
/// independent client instances.
pub struct StatusClient {
    transport: Arc<dyn StatusTransport>,
    airline: Airline,
    reference_number: String,
    family_name: String,
    source_url: String,
    user_agent: String,
    timeout: Duration,
    catalog: CatalogLoader,
}

impl StatusClient {
    /// Creates a client with the default timeout and user agent.
    ///
    /// Reference and family name are normalized (trimmed, uppercased) once
    /// here; every record the client produces carries the normalized forms.
    pub fn new(
        transport: Arc<dyn StatusTransport>,
        airline: Airline,
        reference_number: &str,
        family_name: &str,
    ) -> Self {
        Self::with_options(
            transport,
            airline,
            reference_number,
            family_name,
            DEFAULT_USER_AGENT.to_string(),
            Duration::from_secs(DEFAULT_CHECK_TIMEOUT_SECS),
        )
    }

    /// Creates a client with an explicit user agent and overall timeout.
    pub fn with_options(
        transport: Arc<dyn StatusTransport>,
        airline: Airline,
        reference_number: &str,
        family_name: &str,
        user_agent: String,
        timeout: Duration,
    ) -> Self {
        let catalog = CatalogLoader::new(Arc::clone(&transport), user_agent.clone());
        Self {
            transport,
            airline,
            reference_number: reference_number.trim().to_uppercase(),
            family_name: family_name.trim().to_uppercase(),
            source_url: airline.portal_url().to_string(),
            user_agent,
            timeout,
            catalog,
        }
    }

    /// Runs one status check and always returns a record.
    ///
    /// The whole operation is bounded by the client's timeout. Failures
    /// resolve to a `not_found` record (backend 401) or an `error` record
    /// (everything else); this method never returns an error.
    pub async fn check(&self) -> StatusRecord {
        let outcome = match tokio::time::timeout(self.timeout, self.run_check()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(CheckError::Timeout {
                seconds: self.timeout.as_secs(),
            }),
        };

        match outcome {
            Ok(record) => record,
            Err(CheckError::NotFound) => {
                info!("No record found for {}", self.reference_number);
                self.terminal_record(BagState::NotFound, CheckError::NotFound.to_string())
            }
            Err(err) => {
                warn!("Check failed for {}: {err}", self.reference_number);
                self.terminal_record(BagState::Error, err.to_string())
            }
        }
    }

    async fn run_check(&self) -> Result<StatusRecord, CheckError> {
        let parsed = parse_file_reference(&self.reference_number)?;
        let expected = self.airline.code();
        if parsed.airline_code != expected {
            return Err(CheckError::AirlineMismatch {
                reference: self.reference_number.clone(),
                found: parsed.airline_code.clone(),
                expected: expected.to_string(),
            });
        }

        let reply = self.lookup(&parsed).await?;
        self.assemble_record(&reply.body).await
    }

    /// Runs the validator retry protocol: the primary validator first, the
    /// alternate exactly once when the backend answers with one of the known
    /// validator-rejection statuses. 401 is terminal on whichever attempt it
    /// appears; any other non-success status ends the protocol.
    async fn lookup(&self, parsed: &ParsedReference) -> Result<TransportReply, CheckError> {
        let url = format!("{API_BASE_URL}{MANAGE_LOGIN_ENDPOINT}");
        let headers = self.build_headers(&parsed.airline_code)?;

        let mut reply = self.attempt(parsed, &url, &headers, 1).await?;
        if VALIDATOR_REJECTION_STATUSES.contains(&reply.status) {
            debug!(
                "Validator-sensitive HTTP {} for {}, retrying with alternate validator",
                reply.status, self.reference_number
            );
            reply = self.attempt(parsed, &url, &headers, 0).await?;
        }

        if reply.status == HTTP_STATUS_NO_RECORD {
            return Err(CheckError::NotFound);
        }
        if reply.status != 200 {
            return Err(CheckError::Backend {
                status: reply.status,
                excerpt: truncate_chars(&reply.body, ERROR_EXCERPT_MAX_CHARS),
            });
        }
        Ok(reply)
    }

    async fn attempt(
        &self,
        parsed: &ParsedReference,
        url: &str,
        headers: &[(&str, String)],
        validator: u8,
    ) -> Result<TransportReply, CheckError> {
        let request = ReadRecordRequest {
            read_record: ReadRecord {
                record_id: RecordId {
                    record_type: RECORD_TYPE_DELAYED,
                    record_reference: RecordReference {
                        reference_number: &parsed.short_reference,
                        station_code: &parsed.station_code,
                        airline_code: &parsed.airline_code,
                        last_name: &self.family_name,
                    },
                },
                agent_id: AGENT_ID_GUEST,
                version: PROTOCOL_VERSION,
                validator,
                login_after_time_in_days: RELOGIN_WINDOW_DAYS,
                captcha_response: "",
            },
        };
        let body = serde_json::to_value(&request).map_err(anyhow::Error::from)?;

        debug!(
            "Posting lookup for {} (validator {validator})",
            self.reference_number
        );
        let reply = self
            .transport
            .post_json(url, headers, &body)
            .await
            .map_err(anyhow::Error::from)?;
        debug!(
            "Lookup for {} returned HTTP {}",
            self.reference_number, reply.status
        );
        Ok(reply)
    }

    fn build_headers(&self, airline_code: &str) -> Result<Vec<(&'static str, String)>, CheckError> {
        let token = AuthToken {
            file_ref: &self.reference_number,
            last_name: &self.family_name,
            epic: RECORD_TYPE_DELAYED,
            airline: airline_code,
        };
        let token_json = serde_json::to_string(&token).map_err(anyhow::Error::from)?;
        let encoded = BASE64.encode(token_json);

        Ok(vec![
            ("Accept", "application/json, text/plain, */*".to_string()),
            ("Content-Type", "application/json".to_string()),
            ("X-Api-Key", API_KEY.to_string()),
            ("Authorization", format!("{airline_code} {encoded}")),
            ("User-Agent", self.user_agent.clone()),
        ])
    }

    /// Builds the success record from a 200 response body.
    async fn assemble_record(&self, body: &str) -> Result<StatusRecord, CheckError> {
        let document: Value = serde_json::from_str(body).map_err(anyhow::Error::from)?;

        let delayed_record = value::at(&document, &["WTR_ReadRecordRS", "WTR_DelayedBagRecReadRS"])
            .filter(|node| node.is_object());
        let Some(delayed_record) = delayed_record else {
            let message = value::str_at(&document, &["Msg"])
                .or_else(|| value::str_at(&document, &["message"]))
                .unwrap_or("Unexpected API response format.")
                .to_string();
            return Err(CheckError::BadResponseFormat { message });
        };

        let bag_items =
            value::array_at(delayed_record, &["DelayedBagGroup", "DelayedBags", "DelayedBag"])
                .map(Vec::as_slice)
                .unwrap_or_default();

        let tracing_statuses: Vec<String> = bag_items
            .iter()
            .filter_map(|item| value::str_at(item, &["tracingStatus"]))
            .map(String::from)
            .collect();
        let primary_tracing_status = tracing_statuses.first().cloned();

        let catalog = self.catalog.get().await;
        let resolved = classify::resolve_messages(catalog, primary_tracing_status.as_deref());

        let no_of_bags_updated =
            value::int_at(delayed_record, &["DelayedBagGroup", "DelayedBags", "noOfBagsUpdated"])
                .unwrap_or(0);

        let is_searching = classify::is_searching(no_of_bags_updated, &tracing_statuses);
        let texts = classify::select_texts(is_searching, &resolved);

        let bag_title = bag_items.first().and_then(delivery::build_bag_title);
        let delivery_details = delivery::extract_delivery_details(delayed_record);
        let record_status = match value::child(delayed_record, "RecordStatus") {
            Some(Value::String(code)) => Some(code.clone()),
            Some(Value::Number(code)) => Some(code.to_string()),
            _ => None,
        };

        info!(
            "Resolved status for {}: {} ({} tracing status(es), {} bag(s) updated)",
            self.reference_number,
            if is_searching { "searching" } else { "updated" },
            tracing_statuses.len(),
            no_of_bags_updated
        );

        Ok(StatusRecord {
            state: if is_searching {
                BagState::Searching
            } else {
                BagState::Updated
            },
            checked_at: Utc::now(),
            airline: self.airline,
            reference_number: self.reference_number.clone(),
            family_name: self.family_name.clone(),
            source_url: self.source_url.clone(),
            message: texts.message,
            is_searching,
            bag_title,
            headline: Some(texts.headline),
            details: Some(texts.details),
            tracing_statuses: Some(tracing_statuses),
            primary_tracing_status,
            status_steps: resolved.status_steps,
            current_status_text: resolved.current_status_text,
            status_body: resolved.status_body,
            delivery_details,
            no_of_bags_updated: Some(no_of_bags_updated),
            record_status,
            raw_excerpt: Some(truncate_chars(body, RAW_EXCERPT_MAX_CHARS)),
        })
    }

    fn terminal_record(&self, state: BagState, message: String) -> StatusRecord {
        StatusRecord {
            state,
            checked_at: Utc::now(),
            airline: self.airline,
            reference_number: self.reference_number.clone(),
            family_name: self.family_name.clone(),
            source_url: self.source_url.clone(),
            message,
            is_searching: false,
            bag_title: None,
            headline: None,
            details: None,
            tracing_statuses: None,
            primary_tracing_status: None,
            status_steps: None,
            current_status_text: None,
            status_body: None,
            delivery_details: None,
            no_of_bags_updated: None,
            record_status: None,
            raw_excerpt: None,
        }
    }
}

// Truncation by characters, not bytes: excerpts must never split a UTF-8
// code point.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
