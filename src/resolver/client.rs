use crate::resolver::{decode::process_response, errors::ResolveError, types::RawResponse};
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::instrument;
use url::Url;

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const USER_AGENT: &str = "DouyinRelay/0.1";
pub const VIDEO_DATA_PATH: &str = "/api/hybrid/video_data";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers({
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                reqwest::header::ACCEPT,
                reqwest::header::HeaderValue::from_static("application/json, */*;q=0.8"),
            );
            headers
        })
        .build()
        .expect("Failed to build HTTP client")
});

pub fn get_client() -> &'static Client {
    &HTTP_CLIENT
}

/// Client for the hybrid video-data endpoint of the resolution API.
#[derive(Debug, Clone)]
pub struct ResolverClient {
    client: Client,
    api_host: String,
}

impl ResolverClient {
    /// `api_host` is the API prefix without a trailing slash.
    pub fn new(api_host: impl Into<String>) -> Self {
        Self::with_client(get_client().clone(), api_host)
    }

    pub fn with_client(client: Client, api_host: impl Into<String>) -> Self {
        Self {
            client,
            api_host: api_host.into(),
        }
    }

    /// Look up one share link. A single attempt; any failure is returned to
    /// the caller as is.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn lookup(&self, url: &str) -> Result<RawResponse, ResolveError> {
        let endpoint = Url::parse(&format!("{}{}", self.api_host, VIDEO_DATA_PATH))?;

        let response = self
            .client
            .get(endpoint.clone())
            .query(&[("url", url), ("minimal", "false")])
            .send()
            .await
            .map_err(ResolveError::from_reqwest_error)?;

        // Check content length before downloading
        if let Some(content_length) = response.content_length()
            && content_length > MAX_BODY_SIZE
        {
            return Err(ResolveError::BodyTooLarge(content_length));
        }

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Http {
                status,
                retriable: status.is_server_error(),
            });
        }

        let body_bytes = response
            .bytes()
            .await
            .map_err(|e| ResolveError::Io(e.to_string()))?;

        // Check body size after download (in case Content-Length was missing)
        if body_bytes.len() as u64 > MAX_BODY_SIZE {
            return Err(ResolveError::BodyTooLarge(body_bytes.len() as u64));
        }

        process_response(endpoint, status, body_bytes)
    }
}
