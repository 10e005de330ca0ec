use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

/// What the resolution API answered for one lookup. The body is kept as an
/// untyped JSON tree: its envelope differs between API versions and is only
/// interpreted by the normalizer.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub request_url: Url,
    pub status: StatusCode,
    pub body: Value,
}

impl RawResponse {
    pub fn new(request_url: Url, status: StatusCode, body: Value) -> Self {
        Self {
            request_url,
            status,
            body,
        }
    }
}
