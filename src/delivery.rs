//! Delivery-detail extraction from the delayed-bag record.
//!
//! Courier and delivery metadata is scattered across nested contact fields
//! and two free-text blocks: a line-prefixed delivery-info block (`"DS "`,
//! `"CW "`, `"ZP "`, `"CT01 "`) and the order-confirmation email text. Each
//! field is mined independently; whatever cannot be found is simply omitted.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::value;

/// Country names for the address codes the backend leaves unresolved.
const COUNTRY_NAMES: &[(&str, &str)] = &[("DE", "Germany"), ("AT", "Austria"), ("CH", "Switzerland")];

/// Display names for the backend's bag colour codes.
const COLOUR_NAMES: &[(&str, &str)] = &[
    ("GY", "Grey"),
    ("BL", "Blue"),
    ("BK", "Black"),
    ("RD", "Red"),
    ("WH", "White"),
];

/// Phrase identifying the order-confirmation entry in the email block.
const DELIVERY_ORDER_MARKER: &str = "Baggage Delivery Order Created";

/// Marker preceding the free-text customer note in the email body.
const CUSTOMER_NOTE_MARKER: &str = "ADVICE TO CUSTOMER - PLEASE NOTE";

// "ZP 14476 .DD 18FEB .DW ...": the commission date follows the .DD token.
static COMMISSION_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.DD\s+([A-Z0-9]+)").expect("commission-date pattern compiles"));

static EMAIL_BAG_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Bag\s*-\s*\d+\s*Type\s*\d+\s*:\s*(.+)").expect("bag-type pattern compiles")
});

static EMAIL_CREATED_BY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Baggage Delivery Order Created by\s+([^\n]+)")
        .expect("created-by pattern compiles")
});

fn lookup(table: &[(&str, &'static str)], code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, name)| *name)
}

fn insert_nonempty(details: &mut BTreeMap<String, String>, key: &str, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        details.insert(key.to_string(), text.to_string());
    }
}

/// Extracts the delivery-detail mapping from a delayed-bag record.
///
/// Every field is optional and extracted independently; values are trimmed
/// and empty ones dropped. Returns `None` when nothing at all was extracted,
/// so callers can distinguish "no delivery information" from a partial set.
pub fn extract_delivery_details(delayed_record: &Value) -> Option<BTreeMap<String, String>> {
    let mut details = BTreeMap::new();

    let bag_items = value::array_at(delayed_record, &["DelayedBagGroup", "DelayedBags", "DelayedBag"]);
    let first_bag = bag_items.and_then(|items| items.first());

    // Structured bag delivery timestamps
    if let Some(bag) = first_bag {
        if let Some(pickup) = value::str_at(bag, &["BagDelivery", "Status", "TrackingUpdate", "value"]) {
            insert_nonempty(&mut details, "pickup_datetime_local", pickup);
        }
        if let Some(scheduled) =
            value::str_at(bag, &["BagDelivery", "Status", "OutForDelivery", "value"])
        {
            insert_nonempty(&mut details, "scheduled_delivery_local", scheduled);
        }
    }

    // Passenger/contact details
    if let Some(passengers) = value::child(delayed_record, "Passengers") {
        if let Some(name) = value::first_at(passengers, &["Names", "Name"])
            .and_then(|entry| value::str_at(entry, &["value"]))
        {
            insert_nonempty(&mut details, "passenger_name", name);
        }
        if let Some(phone) = value::first_at(passengers, &["ContactInfo", "CellPhones", "Phone"])
            .and_then(|entry| value::str_at(entry, &["value"]))
        {
            insert_nonempty(&mut details, "telephone_number", phone);
        }
        if let Some(permanent) = value::at(passengers, &["ContactInfo", "PermanentAddress"]) {
            let line = value::first_at(permanent, &["AddressLine"])
                .and_then(|entry| value::str_at(entry, &["value"]));
            let city = value::str_at(permanent, &["City", "value"]);
            let state = value::str_at(permanent, &["State", "value"]);
            let postal = value::str_at(permanent, &["PostalCode", "value"]);
            let country = resolve_country(permanent);
            let parts: Vec<&str> = [line, city, state, postal, country.as_deref()]
                .into_iter()
                .flatten()
                .collect();
            if !parts.is_empty() {
                details.insert("delivery_address".to_string(), parts.join(", "));
            }
        }
    }

    // Bag tag, colour, and count
    if let Some(bag) = first_bag {
        let airline_tag = value::str_at(bag, &["BagTag", "AirlineCode"]);
        let tag_sequence = value::str_at(bag, &["BagTag", "TagSequence"]);
        if let (Some(airline_tag), Some(tag_sequence)) = (airline_tag, tag_sequence) {
            details.insert("tag_details".to_string(), format!("{airline_tag}{tag_sequence}"));
        }
        if let Some(code) = value::str_at(bag, &["ColorTypeDesc", "ColorCode"]) {
            let code = code.to_uppercase();
            let name = lookup(COLOUR_NAMES, &code).map(String::from).unwrap_or(code);
            details.insert("baggage_colour".to_string(), name);
        }
    }
    if let Some(items) = bag_items {
        if !items.is_empty() {
            details.insert(
                "number_of_baggage_in_delivery".to_string(),
                items.len().to_string(),
            );
        }
    }

    // Encoded delivery block (source for courier website and commission date)
    if let Some(text) = value::first_at(delayed_record, &["AdditionalInfo", "DeliveryInfo", "Text"])
        .and_then(|entry| value::str_at(entry, &["value"]))
    {
        parse_delivery_info(text, &mut details);
    }

    // Email fallback for human-readable baggage type and note text
    if let Some(items) = value::array_at(delayed_record, &["EmailInfo", "Text"]) {
        let candidate = items.iter().rev().find_map(|item| {
            let text = value::child(item, "value")?.as_str()?;
            text.contains(DELIVERY_ORDER_MARKER).then_some(text)
        });
        if let Some(candidate) = candidate {
            scan_delivery_order_email(candidate, &mut details);
        }
    }

    (!details.is_empty()).then_some(details)
}

fn resolve_country(permanent: &Value) -> Option<String> {
    if let Some(name) = value::str_at(permanent, &["Country", "value"]) {
        return Some(name.to_string());
    }
    let code = value::str_at(permanent, &["Country", "Code"])?.to_uppercase();
    Some(lookup(COUNTRY_NAMES, &code).map(String::from).unwrap_or(code))
}

/// Scans the line-prefixed delivery block. Each prefix is interpreted
/// independently; unknown lines are skipped.
fn parse_delivery_info(text: &str, details: &mut BTreeMap<String, String>) {
    for line in text.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix("DS ") {
            // "DS <reference> - <service> - ..."
            let parts: Vec<&str> = rest
                .split(" - ")
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect();
            if parts.len() >= 2 {
                insert_nonempty(details, "delivery_reference", parts[0]);
                insert_nonempty(details, "delivery_service", parts[1]);
            }
        } else if let Some(rest) = line.strip_prefix("CW ") {
            // Site path with "/D/" standing in for the dot of the hostname.
            let site = rest.trim().replace("/D/", ".");
            let site = site.trim_matches('/');
            if !site.is_empty() {
                details.insert("courier_website".to_string(), site.to_string());
                let lower = site.to_lowercase();
                let url = if lower.starts_with("http://") || lower.starts_with("https://") {
                    site.to_string()
                } else {
                    format!("https://{site}")
                };
                details.insert("courier_tracking_url".to_string(), url);
            }
        } else if line.starts_with("ZP ") {
            if let Some(captures) = COMMISSION_DATE.captures(line) {
                insert_nonempty(details, "commission_date", &captures[1]);
            }
        } else if let Some(rest) = line.strip_prefix("CT01 ") {
            if !details.contains_key("baggage_type") {
                insert_nonempty(details, "baggage_type", rest);
            }
        }
    }
}

/// Pulls note, baggage type, and creator out of the most recent
/// order-confirmation email text.
fn scan_delivery_order_email(text: &str, details: &mut BTreeMap<String, String>) {
    if !details.contains_key("note") {
        if let Some((_, after)) = text.split_once(CUSTOMER_NOTE_MARKER) {
            insert_nonempty(details, "note", after);
        }
    }
    if !details.contains_key("baggage_type") {
        if let Some(captures) = EMAIL_BAG_TYPE.captures(text) {
            insert_nonempty(details, "baggage_type", &captures[1]);
        }
    }
    if let Some(captures) = EMAIL_CREATED_BY.captures(text) {
        insert_nonempty(details, "created_by", &captures[1]);
    }
}

/// Builds the display title for a bag item, e.g.
/// `"DELAYED BAGGAGE 1 - 0001234567"`. Purely numeric tag sequences are
/// zero-padded to the full 10-digit tag form. No tag sequence, no title.
pub fn build_bag_title(bag_item: &Value) -> Option<String> {
    let tag_sequence = value::at(bag_item, &["BagTag", "TagSequence"])?;
    let mut tag_text = match tag_sequence {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    if !tag_text.is_empty() && tag_text.chars().all(|c| c.is_ascii_digit()) {
        tag_text = format!("{tag_text:0>10}");
    }

    match value::child(bag_item, "Seq") {
        Some(Value::String(seq)) => Some(format!("DELAYED BAGGAGE {seq} - {tag_text}")),
        Some(Value::Number(seq)) => Some(format!("DELAYED BAGGAGE {seq} - {tag_text}")),
        _ => Some(format!("DELAYED BAGGAGE - {tag_text}")),
    }
}
