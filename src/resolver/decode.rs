use crate::resolver::{errors::ResolveError, types::RawResponse};
use bytes::Bytes;
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

/// Turn a successful HTTP answer into a `RawResponse`.
///
/// The content type is not trusted: some deployments of the API answer with
/// `text/plain` or no content type at all, so any body that parses as JSON
/// is accepted.
pub fn process_response(
    request_url: Url,
    status: StatusCode,
    body_bytes: Bytes,
) -> Result<RawResponse, ResolveError> {
    let body = decode_json(&body_bytes)?;
    Ok(RawResponse::new(request_url, status, body))
}

fn decode_json(body_bytes: &[u8]) -> Result<Value, ResolveError> {
    let trimmed = strip_bom(body_bytes);
    if trimmed.iter().all(u8::is_ascii_whitespace) {
        return Err(ResolveError::Decode("empty body".to_string()));
    }
    serde_json::from_slice(trimmed).map_err(|e| ResolveError::Decode(e.to_string()))
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes)
}
