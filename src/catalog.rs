//! Remote message catalog for tracing-status display texts.
//!
//! The portal ships a static JSON asset mapping tracing-status codes to the
//! texts its UI renders. Display text is enrichment, not the primary signal:
//! a catalog that cannot be fetched degrades to an empty one and the check
//! proceeds without resolved texts.

use std::sync::Arc;

use log::{debug, warn};
use serde_json::{Map, Value};
use tokio::sync::OnceCell;

use crate::config::DYNAMIC_MESSAGES_URL;
use crate::transport::StatusTransport;
use crate::value;

/// Display-text dictionaries keyed by tracing-status code.
///
/// `bag_status` holds the per-status UI fields (progress-step headers, the
/// close header); `notification` holds per-language long-form bodies. Both
/// may be empty; an empty catalog is the valid degraded state, never `None`.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    bag_status: Map<String, Value>,
    notification: Map<String, Value>,
}

impl MessageCatalog {
    /// Parses the asset shape
    /// `{"dynamicMessages": {"bag_status": {...}, "notification_mszs": {...}}}`.
    /// A section that is missing or not an object parses as empty.
    pub fn from_document(document: &Value) -> Self {
        let dynamic = value::child(document, "dynamicMessages");
        let section = |key: &str| {
            dynamic
                .and_then(|d| value::child(d, key))
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default()
        };
        Self {
            bag_status: section("bag_status"),
            notification: section("notification_mszs"),
        }
    }

    /// The `bag_status` entry for a tracing status, if it is an object.
    pub fn bag_status_entry(&self, tracing_status: &str) -> Option<&Map<String, Value>> {
        self.bag_status.get(tracing_status)?.as_object()
    }

    /// Long-form notification body for a tracing status (the `delayed`
    /// flavor), trimmed and non-empty.
    pub fn notification_body(&self, tracing_status: &str) -> Option<&str> {
        let entry = self.notification.get(tracing_status)?;
        value::str_at(entry, &["delayed", "body"])
    }

    /// True when neither section holds any entries.
    pub fn is_empty(&self) -> bool {
        self.bag_status.is_empty() && self.notification.is_empty()
    }
}

/// Lazily fetches and caches the catalog for the lifetime of one client.
///
/// The fetch happens at most once: a failed load caches the empty catalog so
/// subsequent checks on the same client do not retry the asset.
pub struct CatalogLoader {
    transport: Arc<dyn StatusTransport>,
    user_agent: String,
    cache: OnceCell<MessageCatalog>,
}

impl CatalogLoader {
    /// Creates a loader over the injected transport.
    pub fn new(transport: Arc<dyn StatusTransport>, user_agent: String) -> Self {
        Self {
            transport,
            user_agent,
            cache: OnceCell::new(),
        }
    }

    /// Returns the cached catalog, fetching it on first use. Never fails.
    pub async fn get(&self) -> &MessageCatalog {
        self.cache
            .get_or_init(|| async { self.fetch().await.unwrap_or_default() })
            .await
    }

    async fn fetch(&self) -> Option<MessageCatalog> {
        let headers = [("User-Agent", self.user_agent.clone())];
        let reply = match self.transport.get(DYNAMIC_MESSAGES_URL, &headers).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!("Message catalog fetch failed: {err}");
                return None;
            }
        };
        if reply.status != 200 {
            warn!("Message catalog fetch returned HTTP {}", reply.status);
            return None;
        }
        let document: Value = match serde_json::from_str(&reply.body) {
            Ok(document) => document,
            Err(err) => {
                warn!("Message catalog is not valid JSON: {err}");
                return None;
            }
        };
        let catalog = MessageCatalog::from_document(&document);
        debug!(
            "Loaded message catalog ({} bag_status entries)",
            catalog.bag_status.len()
        );
        Some(catalog)
    }
}
