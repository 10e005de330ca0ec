//! Flat placeholder substitution for reply templates.
//!
//! Rendering is two passes. Recognized placeholders whose value is truthy
//! (non-empty text, non-zero number) are replaced first; then every
//! remaining `{...}` token is removed. A zero count therefore renders as
//! nothing rather than `0`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

static LEFTOVER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[^}]+\}").expect("Failed to compile placeholder regex"));

/// Placeholders a template may use, in substitution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    Desc,
    Type,
    DiggCount,
    CommentCount,
    ShareCount,
    CollectCount,
    Duration,
    Nickname,
    Signature,
}

impl Placeholder {
    pub const ALL: [Placeholder; 9] = [
        Placeholder::Desc,
        Placeholder::Type,
        Placeholder::DiggCount,
        Placeholder::CommentCount,
        Placeholder::ShareCount,
        Placeholder::CollectCount,
        Placeholder::Duration,
        Placeholder::Nickname,
        Placeholder::Signature,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Placeholder::Desc => "desc",
            Placeholder::Type => "type",
            Placeholder::DiggCount => "digg_count",
            Placeholder::CommentCount => "comment_count",
            Placeholder::ShareCount => "share_count",
            Placeholder::CollectCount => "collect_count",
            Placeholder::Duration => "duration",
            Placeholder::Nickname => "nickname",
            Placeholder::Signature => "signature",
        }
    }

    /// The bracketed form as written in templates, e.g. `{desc}`.
    pub fn token(self) -> String {
        format!("{{{}}}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateValue {
    Text(String),
    Number(u64),
}

impl TemplateValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            TemplateValue::Text(s) => !s.is_empty(),
            TemplateValue::Number(n) => *n != 0,
        }
    }
}

impl fmt::Display for TemplateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateValue::Text(s) => f.write_str(s),
            TemplateValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        TemplateValue::Text(value)
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        TemplateValue::Text(value.to_string())
    }
}

impl From<u64> for TemplateValue {
    fn from(value: u64) -> Self {
        TemplateValue::Number(value)
    }
}

/// Values for one rendered reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    values: BTreeMap<Placeholder, TemplateValue>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, placeholder: Placeholder, value: impl Into<TemplateValue>) -> Self {
        self.set(placeholder, value);
        self
    }

    pub fn set(&mut self, placeholder: Placeholder, value: impl Into<TemplateValue>) {
        self.values.insert(placeholder, value.into());
    }

    pub fn get(&self, placeholder: Placeholder) -> Option<&TemplateValue> {
        self.values.get(&placeholder)
    }
}

pub fn render(template: &str, context: &TemplateContext) -> String {
    let mut result = template.to_string();
    for placeholder in Placeholder::ALL {
        if let Some(value) = context.get(placeholder).filter(|v| v.is_truthy()) {
            result = result.replace(&placeholder.token(), &value.to_string());
        }
    }
    strip_placeholders(&result)
}

/// Remove every `{...}` token, recognized or not.
pub fn strip_placeholders(text: &str) -> String {
    LEFTOVER_REGEX.replace_all(text, "").into_owned()
}
