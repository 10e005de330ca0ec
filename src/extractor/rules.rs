//! Ordered extraction rules.
//!
//! Every field has a fixed list of rules, each naming one candidate node of
//! the record. Rules are tried in order and the first candidate the field's
//! reader accepts wins; later rules are never consulted.

use serde_json::Value;

use crate::normalizer::CanonicalRecord;

/// The two nodes a canonical record exposes to extraction.
#[derive(Debug, Clone, Copy)]
pub struct Sources<'a> {
    pub content: &'a Value,
    pub payload: &'a Value,
}

impl<'a> Sources<'a> {
    /// `None` when the record has no content node.
    pub fn from_record(record: &'a CanonicalRecord) -> Option<Self> {
        record.content_node.as_ref().map(|content| Self {
            content,
            payload: &record.payload_node,
        })
    }

    /// `music` of the content node, else of the payload node.
    fn music(self) -> Option<&'a Value> {
        path(self.content, &["music"])
            .filter(|m| m.is_object())
            .or_else(|| path(self.payload, &["music"]).filter(|m| m.is_object()))
    }
}

/// Which node a rule starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Root {
    Content,
    Payload,
    /// The music object of the content node, else of the payload node.
    Music,
}

/// One candidate location for a field: a root node plus a key path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub root: Root,
    pub path: &'static [&'static str],
}

impl Rule {
    pub const fn content(path: &'static [&'static str]) -> Self {
        Self {
            root: Root::Content,
            path,
        }
    }

    pub const fn payload(path: &'static [&'static str]) -> Self {
        Self {
            root: Root::Payload,
            path,
        }
    }

    pub const fn music(path: &'static [&'static str]) -> Self {
        Self {
            root: Root::Music,
            path,
        }
    }

    pub fn locate<'a>(&self, sources: Sources<'a>) -> Option<&'a Value> {
        let root = match self.root {
            Root::Content => sources.content,
            Root::Payload => sources.payload,
            Root::Music => sources.music()?,
        };
        path(root, self.path)
    }
}

/// Walk `keys` from `root`. A missing step or an explicit `null` is absent.
pub fn path<'a>(root: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .try_fold(root, |node, key| node.get(key))
        .filter(|v| !v.is_null())
}

/// Evaluate `rules` in order and return the first candidate `read` accepts.
pub fn first_match<T>(
    rules: &[Rule],
    sources: Sources<'_>,
    read: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    rules
        .iter()
        .find_map(|rule| rule.locate(sources).and_then(&read))
}

// Readers

pub fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Non-negative finite number, from a JSON number or a numeric string.
pub fn non_negative_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (n.is_finite() && n >= 0.0).then_some(n)
}

pub fn count(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    non_negative_number(value).map(|n| n.round() as u64)
}

pub fn non_empty_array(value: &Value) -> Option<&Vec<Value>> {
    value.as_array().filter(|items| !items.is_empty())
}

/// First string of a `{url_list: [...]}` node.
pub fn first_listed_url(value: &Value) -> Option<String> {
    value
        .get("url_list")
        .and_then(|list| list.get(0))
        .and_then(non_empty_str)
}

pub fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// Rules, grouped per field in priority order

pub const DESCRIPTION: &[Rule] = &[Rule::content(&["desc"]), Rule::payload(&["desc"])];

pub const MEDIA: &[Rule] = &[
    Rule::content(&["images"]),
    Rule::content(&["image_infos"]),
    Rule::payload(&["images"]),
    Rule::payload(&["image_infos"]),
];

pub const DURATION: &[Rule] = &[
    Rule::content(&["video", "duration"]),
    Rule::content(&["duration"]),
    Rule::music(&["duration"]),
];

pub const NICKNAME: &[Rule] = &[
    Rule::content(&["author", "nickname"]),
    Rule::payload(&["author", "nickname"]),
];

pub const SIGNATURE: &[Rule] = &[
    Rule::content(&["author", "signature"]),
    Rule::payload(&["author", "signature"]),
];

pub const DIGG_COUNT: &[Rule] = &[
    Rule::content(&["statistics", "digg_count"]),
    Rule::payload(&["statistics", "digg_count"]),
];

pub const COMMENT_COUNT: &[Rule] = &[
    Rule::content(&["statistics", "comment_count"]),
    Rule::payload(&["statistics", "comment_count"]),
];

pub const SHARE_COUNT: &[Rule] = &[
    Rule::content(&["statistics", "share_count"]),
    Rule::payload(&["statistics", "share_count"]),
];

pub const COLLECT_COUNT: &[Rule] = &[
    Rule::content(&["statistics", "collect_count"]),
    Rule::payload(&["statistics", "collect_count"]),
];

pub const DOWNLOAD_URL: &[Rule] = &[Rule::content(&["video", "download_addr"])];

pub const PLAY_URL: &[Rule] = &[Rule::content(&["video", "play_addr"])];

pub const COVER: &[Rule] = &[
    Rule::content(&["video", "dynamic_cover"]),
    Rule::content(&["video", "cover"]),
    Rule::content(&["video", "cover_original_scale"]),
    Rule::payload(&["dynamic_cover"]),
    Rule::payload(&["cover"]),
    Rule::payload(&["cover_original_scale"]),
];

pub const AWEME_ID: &[Rule] = &[Rule::content(&["aweme_id"]), Rule::payload(&["aweme_id"])];
