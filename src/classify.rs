//! Searching/updated classification and display-text resolution.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::catalog::MessageCatalog;
use crate::config::SEARCHING_TEXT;

/// Tracing-status family meaning the bag is still being traced.
const SEARCHING_STATUS_PREFIX: &str = "BTS_1";

static OPEN_STEP_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^BTS_ACCopen_(\d+)_head$").expect("open-step pattern compiles"));

/// Decides whether the record still counts as "searching".
///
/// An updated-bag counter above zero wins outright: some bag has progressed,
/// so the record is no longer searching regardless of tracing statuses. With
/// no tracing statuses at all there is no evidence yet, which counts as
/// searching. Otherwise the record is searching if and only if every status
/// belongs to the `BTS_1` in-transit family; a single status outside it flips
/// the decision even when other bags still show searching codes.
pub fn is_searching(no_of_bags_updated: i64, tracing_statuses: &[String]) -> bool {
    if no_of_bags_updated > 0 {
        return false;
    }
    if tracing_statuses.is_empty() {
        return true;
    }
    tracing_statuses
        .iter()
        .all(|status| status.starts_with(SEARCHING_STATUS_PREFIX))
}

/// Display texts resolved from the message catalog for one tracing status.
/// All fields are absent when the status is unknown to the catalog or the
/// catalog itself is in its degraded empty state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedMessages {
    /// Ordered, de-duplicated progress steps.
    pub status_steps: Option<Vec<String>>,
    /// Headline for the current handling stage.
    pub current_status_text: Option<String>,
    /// Long-form notification body.
    pub status_body: Option<String>,
}

/// Resolves progress steps, current-status headline, and notification body
/// for the primary tracing status.
///
/// The progress steps come from the entry's `BTS_ACCopen_<N>_head` fields:
/// non-empty string values sorted by `N`, de-duplicated while preserving
/// order. The current status is the entry's `BTS_ACCclose_head` when
/// non-empty, else the last progress step. The body comes from the separate
/// notification section.
pub fn resolve_messages(
    catalog: &MessageCatalog,
    tracing_status: Option<&str>,
) -> ResolvedMessages {
    let Some(tracing_status) = tracing_status else {
        return ResolvedMessages::default();
    };
    let Some(entry) = catalog.bag_status_entry(tracing_status) else {
        return ResolvedMessages::default();
    };

    let mut open_heads: Vec<(u32, &str)> = entry
        .iter()
        .filter_map(|(key, value)| {
            let captures = OPEN_STEP_KEY.captures(key)?;
            let order: u32 = captures[1].parse().ok()?;
            let text = value.as_str()?.trim();
            (!text.is_empty()).then_some((order, text))
        })
        .collect();
    open_heads.sort_by_key(|(order, _)| *order);

    let mut steps: Vec<String> = Vec::new();
    for (_, text) in open_heads {
        if !steps.iter().any(|existing| existing == text) {
            steps.push(text.to_string());
        }
    }

    let current_status_text = entry
        .get("BTS_ACCclose_head")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(String::from)
        .or_else(|| steps.last().cloned());

    let status_body = catalog.notification_body(tracing_status).map(String::from);

    ResolvedMessages {
        status_steps: (!steps.is_empty()).then_some(steps),
        current_status_text,
        status_body,
    }
}

/// Headline, details, and message texts chosen for the final record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTexts {
    /// Short banner for the record.
    pub headline: String,
    /// Secondary detail line.
    pub details: String,
    /// One-sentence human message.
    pub message: String,
}

/// Picks the record texts: the fixed searching banner while searching,
/// otherwise the resolved texts with generic fallbacks.
pub fn select_texts(is_searching: bool, resolved: &ResolvedMessages) -> StatusTexts {
    if is_searching {
        return StatusTexts {
            headline: SEARCHING_TEXT.to_string(),
            details: "Please check back later".to_string(),
            message: "Still searching for your baggage.".to_string(),
        };
    }
    StatusTexts {
        headline: resolved
            .current_status_text
            .clone()
            .unwrap_or_else(|| "BAGGAGE STATUS UPDATED".to_string()),
        details: resolved
            .status_body
            .clone()
            .unwrap_or_else(|| "Status changed from SEARCHING FOR YOUR BAGGAGE".to_string()),
        message: resolved
            .status_body
            .clone()
            .unwrap_or_else(|| "Good news: baggage status changed.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn statuses(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_counter_above_zero_is_never_searching() {
        assert!(!is_searching(1, &[]));
        assert!(!is_searching(3, &statuses(&["BTS_100", "BTS_110"])));
    }

    #[test]
    fn test_no_statuses_means_searching() {
        assert!(is_searching(0, &[]));
    }

    #[test]
    fn test_all_in_transit_statuses_means_searching() {
        assert!(is_searching(0, &statuses(&["BTS_100", "BTS_110", "BTS_199"])));
    }

    #[test]
    fn test_single_progressed_status_flips_to_updated() {
        assert!(!is_searching(0, &statuses(&["BTS_100", "BTS_205"])));
        assert!(!is_searching(0, &statuses(&["BTS_205"])));
    }

    fn catalog(doc: serde_json::Value) -> MessageCatalog {
        MessageCatalog::from_document(&doc)
    }

    #[test]
    fn test_steps_sorted_deduplicated_nonempty() {
        // Out-of-order numbered keys, a duplicate text, and an empty value.
        let catalog = catalog(json!({
            "dynamicMessages": {
                "bag_status": {
                    "BTS_205": {
                        "BTS_ACCopen_3_head": "Out for delivery",
                        "BTS_ACCopen_1_head": "Bag received",
                        "BTS_ACCopen_2_head": "Bag received",
                        "BTS_ACCopen_10_head": "",
                        "unrelated": "ignored"
                    }
                },
                "notification_mszs": {}
            }
        }));
        let resolved = resolve_messages(&catalog, Some("BTS_205"));
        assert_eq!(
            resolved.status_steps,
            Some(vec!["Bag received".to_string(), "Out for delivery".to_string()])
        );
    }

    #[test]
    fn test_steps_numeric_ordering_not_lexicographic() {
        let catalog = catalog(json!({
            "dynamicMessages": {
                "bag_status": {
                    "BTS_205": {
                        "BTS_ACCopen_10_head": "Tenth",
                        "BTS_ACCopen_2_head": "Second"
                    }
                },
                "notification_mszs": {}
            }
        }));
        let resolved = resolve_messages(&catalog, Some("BTS_205"));
        assert_eq!(
            resolved.status_steps,
            Some(vec!["Second".to_string(), "Tenth".to_string()])
        );
    }

    #[test]
    fn test_current_status_prefers_close_head() {
        let catalog = catalog(json!({
            "dynamicMessages": {
                "bag_status": {
                    "BTS_205": {
                        "BTS_ACCopen_1_head": "Step one",
                        "BTS_ACCclose_head": "Delivered"
                    }
                },
                "notification_mszs": {}
            }
        }));
        let resolved = resolve_messages(&catalog, Some("BTS_205"));
        assert_eq!(resolved.current_status_text.as_deref(), Some("Delivered"));
    }

    #[test]
    fn test_current_status_falls_back_to_last_step() {
        let catalog = catalog(json!({
            "dynamicMessages": {
                "bag_status": {
                    "BTS_205": {
                        "BTS_ACCopen_1_head": "Step one",
                        "BTS_ACCopen_2_head": "Step two",
                        "BTS_ACCclose_head": "   "
                    }
                },
                "notification_mszs": {}
            }
        }));
        let resolved = resolve_messages(&catalog, Some("BTS_205"));
        assert_eq!(resolved.current_status_text.as_deref(), Some("Step two"));
    }

    #[test]
    fn test_body_from_notification_section() {
        let catalog = catalog(json!({
            "dynamicMessages": {
                "bag_status": {"BTS_205": {}},
                "notification_mszs": {
                    "BTS_205": {"delayed": {"body": "  Your bag is on its way.  "}}
                }
            }
        }));
        let resolved = resolve_messages(&catalog, Some("BTS_205"));
        assert_eq!(
            resolved.status_body.as_deref(),
            Some("Your bag is on its way.")
        );
    }

    #[test]
    fn test_unknown_status_resolves_nothing() {
        let catalog = catalog(json!({
            "dynamicMessages": {"bag_status": {}, "notification_mszs": {}}
        }));
        assert_eq!(
            resolve_messages(&catalog, Some("BTS_999")),
            ResolvedMessages::default()
        );
        assert_eq!(resolve_messages(&catalog, None), ResolvedMessages::default());
    }

    #[test]
    fn test_select_texts_searching_banner() {
        let texts = select_texts(true, &ResolvedMessages::default());
        assert_eq!(texts.headline, SEARCHING_TEXT);
        assert_eq!(texts.details, "Please check back later");
        assert_eq!(texts.message, "Still searching for your baggage.");
    }

    #[test]
    fn test_select_texts_updated_with_resolved() {
        let resolved = ResolvedMessages {
            status_steps: None,
            current_status_text: Some("Out for delivery".into()),
            status_body: Some("Courier is on the way.".into()),
        };
        let texts = select_texts(false, &resolved);
        assert_eq!(texts.headline, "Out for delivery");
        assert_eq!(texts.details, "Courier is on the way.");
        assert_eq!(texts.message, "Courier is on the way.");
    }

    #[test]
    fn test_select_texts_updated_fallbacks() {
        let texts = select_texts(false, &ResolvedMessages::default());
        assert_eq!(texts.headline, "BAGGAGE STATUS UPDATED");
        assert_eq!(
            texts.details,
            "Status changed from SEARCHING FOR YOUR BAGGAGE"
        );
        assert_eq!(texts.message, "Good news: baggage status changed.");
    }
}
