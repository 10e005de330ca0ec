//! Maps the resolution API's varying response envelopes onto one
//! [`CanonicalRecord`].
//!
//! Known envelopes, all handled by the same fallback chain:
//! - `{code, data: {aweme_detail: {...}}}`
//! - `{status_code, data: {aweme: {...}}}`
//! - `{data: {aweme_list: [{...}, ...]}}`
//! - `{code, data: {desc, video, author, ...}}` (content directly under `data`)
//! - `{data: {data: {...}}}` (double-wrapped)
//! - a bare content object with no envelope at all

use serde_json::{Map, Value};
use std::fmt;

pub const DEFAULT_STATUS_CODE: i64 = 200;

const STATUS_KEYS: [&str; 3] = ["code", "status", "status_code"];
const CONTENT_KEYS: [&str; 2] = ["aweme_detail", "aweme"];
const CONTENT_LIST_KEY: &str = "aweme_list";

/// Keys that describe the envelope rather than the content. A payload made
/// only of these (plus unusable content candidates) is not a content node.
const ENVELOPE_KEYS: [&str; 8] = [
    "code",
    "status",
    "status_code",
    "data",
    "router",
    "message",
    "msg",
    "params",
];

/// Status reported by the envelope: the first of `code`, `status`,
/// `status_code` that is present and not null.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvelopeStatus {
    Code(i64),
    /// Present but not an integer, e.g. `"fail"` or `"200"`.
    Other(Value),
}

impl EnvelopeStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Code(DEFAULT_STATUS_CODE))
    }
}

impl Default for EnvelopeStatus {
    fn default() -> Self {
        Self::Code(DEFAULT_STATUS_CODE)
    }
}

impl fmt::Display for EnvelopeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Normalized view of one resolution response.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    pub status: EnvelopeStatus,
    /// The authoritative node all fields are read from first.
    pub content_node: Option<Value>,
    /// Secondary source consulted when the content node lacks a field.
    pub payload_node: Value,
}

impl CanonicalRecord {
    /// A record is usable only with status 200 and a content node.
    pub fn is_success(&self) -> bool {
        self.status.is_ok() && self.content_node.is_some()
    }
}

pub fn normalize(response: &Value) -> CanonicalRecord {
    let payload = select_payload(response);
    let content = select_content(payload);

    CanonicalRecord {
        status: envelope_status(response),
        content_node: content.cloned(),
        payload_node: payload.clone(),
    }
}

fn envelope_status(response: &Value) -> EnvelopeStatus {
    let Some(value) = STATUS_KEYS
        .iter()
        .find_map(|key| response.get(key).filter(|v| !v.is_null()))
    else {
        return EnvelopeStatus::default();
    };

    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .map_or_else(|| EnvelopeStatus::Other(value.clone()), EnvelopeStatus::Code),
        other => EnvelopeStatus::Other(other.clone()),
    }
}

fn select_payload(response: &Value) -> &Value {
    match response.get("data") {
        Some(data) if data.is_object() => match data.get("data") {
            Some(nested) if nested.is_object() => nested,
            _ => data,
        },
        _ => response,
    }
}

fn select_content(payload: &Value) -> Option<&Value> {
    CONTENT_KEYS
        .iter()
        .find_map(|key| payload.get(key).filter(|v| v.is_object()))
        .or_else(|| {
            payload
                .get(CONTENT_LIST_KEY)
                .and_then(|list| list.get(0))
                .filter(|v| v.is_object())
        })
        .or_else(|| match payload {
            Value::Object(map) if has_content_keys(map) => Some(payload),
            _ => None,
        })
}

fn has_content_keys(map: &Map<String, Value>) -> bool {
    map.keys().any(|k| {
        let k = k.as_str();
        !ENVELOPE_KEYS.contains(&k) && !CONTENT_KEYS.contains(&k) && k != CONTENT_LIST_KEY
    })
}
