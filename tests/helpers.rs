#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

use douyin_relay::{
    config::Config,
    delivery::{Deliverer, MessageSender, OutboundItem, RecordingSender, SendError},
    logging::{EventLog, LogLevel},
    pipeline::{InboundMessage, Pipeline},
    resolver::ResolverClient,
};

pub const SHARE_URL: &str = "https://v.douyin.com/i5cseJ9a/";

pub fn share_text() -> String {
    format!("2.89 复制打开抖音，看看【海报新闻的作品】 {SHARE_URL} 10/23 r@E.uF nQX:/")
}

pub fn message(content: &str) -> InboundMessage {
    InboundMessage {
        content: content.to_string(),
        user_id: "10001".to_string(),
        username: Some("tester".to_string()),
        channel_id: "group-1".to_string(),
    }
}

pub fn test_config(api_host: &str, max_duration_secs: f64) -> Config {
    Config::new(
        api_host,
        max_duration_secs,
        "抖音解析：\n{desc}",
        "视频过长~ 请打开抖音客户端查看",
        3,
    )
    .expect("Failed to build test config")
}

pub fn test_pipeline(config: Config) -> Pipeline {
    let resolver = ResolverClient::new(config.api_host());
    Pipeline::new(resolver, Arc::new(config), EventLog::new(LogLevel::Detail))
}

/// Answer every lookup of `SHARE_URL` with `body`.
pub async fn mount_video_data(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/hybrid/video_data"))
        .and(query_param("url", SHARE_URL))
        .and(query_param("minimal", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn recording_deliverer(sender: &Arc<RecordingSender>) -> Deliverer {
    Deliverer::new(
        sender.clone(),
        None,
        "group-1",
        EventLog::new(LogLevel::Detail),
    )
}

/// Fails the first `failures` sends, then delegates to a recorder.
pub struct FlakySender {
    failures: usize,
    attempts: AtomicUsize,
    pub inner: RecordingSender,
}

impl FlakySender {
    pub fn new(failures: usize) -> Self {
        Self {
            failures,
            attempts: AtomicUsize::new(0),
            inner: RecordingSender::new(),
        }
    }

    pub fn always_failing() -> Self {
        Self::new(usize::MAX)
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageSender for FlakySender {
    async fn send(&self, channel_id: &str, item: &OutboundItem) -> Result<(), SendError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.failures {
            return Err(SendError(format!("attempt {attempt} rejected")));
        }
        self.inner.send(channel_id, item).await
    }
}
