// Extraction of hotel-like records from the gateway's schema-less JSON
//
// The gateway wraps Google Hotels data in structures that change without notice,
// so instead of deserializing a fixed shape the whole tree is walked and every
// object that looks like a hotel is collected.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

pub const NAME_KEYS: &[&str] = &["name", "title"];
pub const RATING_KEYS: &[&str] = &["overall_rating", "rating", "stars", "star_rating"];
pub const PRICE_KEYS: &[&str] = &["price_text", "price", "rate", "rate_per_night"];
pub const AREA_KEYS: &[&str] = &["address", "neighborhood", "vicinity", "location"];

// Checked in this order; the first http(s) string wins
pub const URL_KEYS: &[&str] = &[
    "url",
    "link",
    "hotel_url",
    "booking_url",
    "place_link",
    "result_url",
    "maps_url",
    "g_url",
];

pub const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CandidateRecord {
    pub name: String,
    pub rating: Option<f64>,
    pub price_text: Option<String>,
    pub area: Option<String>,
    pub url: Option<String>,
}

// Empty strings, zero, false, null and empty containers count as absent
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Typed access to one JSON object through ordered alias keys.
pub struct FieldExtractor<'a> {
    node: &'a Map<String, Value>,
}

impl<'a> FieldExtractor<'a> {
    pub fn new(node: &'a Map<String, Value>) -> Self {
        Self { node }
    }

    /// Value of the first alias that holds a present value.
    pub fn first_present(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|key| self.node.get(*key))
            .find(|value| is_present(value))
    }

    /// First present alias accepted by `convert`; rejected values fall through.
    pub fn first_as<T>(
        &self,
        keys: &[&str],
        convert: impl Fn(&'a Value) -> Option<T>,
    ) -> Option<T> {
        keys.iter()
            .filter_map(|key| self.node.get(*key))
            .filter(|value| is_present(value))
            .find_map(convert)
    }

    // Non-string names are kept as their compact JSON text
    pub fn name(&self) -> Option<String> {
        self.first_present(NAME_KEYS).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    // Unparseable ratings are dropped, not reported
    pub fn rating(&self) -> Option<f64> {
        self.first_present(RATING_KEYS).and_then(|value| match value {
            Value::Number(n) => n.as_f64(),
            Value::Bool(true) => Some(1.0),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|r| r.is_finite()),
            _ => None,
        })
    }

    pub fn price_text(&self) -> Option<String> {
        self.first_present(PRICE_KEYS).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn area(&self) -> Option<String> {
        self.first_as(AREA_KEYS, |value| value.as_str().map(str::to_string))
    }

    pub fn url(&self) -> Option<String> {
        URL_KEYS
            .iter()
            .filter_map(|key| self.node.get(*key).and_then(Value::as_str))
            .find(|url| url.starts_with("http"))
            .map(str::to_string)
    }

    // A node qualifies only with a name plus either a rating or a price
    pub fn candidate(&self) -> Option<CandidateRecord> {
        let name = self.name()?;
        let rating_present = self.first_present(RATING_KEYS).is_some();
        let price_text = self.price_text();

        if !rating_present && price_text.is_none() {
            return None;
        }

        Some(CandidateRecord {
            name,
            rating: self.rating(),
            price_text,
            area: self.area(),
            url: self.url(),
        })
    }
}

/// Every qualifying object in pre-order: a node is recorded before its descendants.
pub fn collect_candidates(root: &Value) -> Vec<CandidateRecord> {
    let mut found = Vec::new();
    walk(root, 0, &mut found);
    found
}

fn walk(node: &Value, depth: usize, found: &mut Vec<CandidateRecord>) {
    if depth > MAX_DEPTH {
        debug!(depth, "Skipping subtree nested beyond the depth limit");
        return;
    }

    match node {
        Value::Object(fields) => {
            if let Some(candidate) = FieldExtractor::new(fields).candidate() {
                found.push(candidate);
            }
            for value in fields.values() {
                walk(value, depth + 1, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, depth + 1, found);
            }
        }
        _ => {}
    }
}

/// Keeps the first candidate per exact name, in order, up to `limit` records.
pub fn dedup_candidates(candidates: Vec<CandidateRecord>, limit: usize) -> Vec<CandidateRecord> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.name.clone()))
        .take(limit)
        .collect()
}

pub fn extract_hotels(root: &Value, limit: usize) -> Vec<CandidateRecord> {
    let candidates = collect_candidates(root);
    debug!(candidates = candidates.len(), limit, "Collected hotel candidates");
    dedup_candidates(candidates, limit)
}
