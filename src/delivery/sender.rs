use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// One outbound message: plain text or an image reference by URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum OutboundItem {
    Text(String),
    Image(String),
}

impl OutboundItem {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self::Image(url.into())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("send failed: {0}")]
pub struct SendError(pub String);

/// A send primitive of the host platform, scoped to one channel.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, channel_id: &str, item: &OutboundItem) -> Result<(), SendError>;
}

/// Keeps every item it is given, in order. Used by the HTTP host to return
/// the reply sequence in the response body.
#[derive(Debug, Default)]
pub struct RecordingSender {
    items: Mutex<Vec<OutboundItem>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> Vec<OutboundItem> {
        self.items.lock().map(|items| items.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send(&self, _channel_id: &str, item: &OutboundItem) -> Result<(), SendError> {
        self.items
            .lock()
            .map_err(|e| SendError(e.to_string()))?
            .push(item.clone());
        Ok(())
    }
}

/// Writes items as lines to an async writer (stdout/stderr for the console
/// host). Images are rendered as `[image] <url>`.
pub struct WriterSender<W> {
    writer: tokio::sync::Mutex<W>,
}

impl<W> WriterSender<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: tokio::sync::Mutex::new(writer),
        }
    }
}

impl WriterSender<tokio::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl WriterSender<tokio::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(tokio::io::stderr())
    }
}

#[async_trait]
impl<W> MessageSender for WriterSender<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&self, channel_id: &str, item: &OutboundItem) -> Result<(), SendError> {
        let line = match item {
            OutboundItem::Text(text) => format!("[{channel_id}] {text}\n"),
            OutboundItem::Image(url) => format!("[{channel_id}] [image] {url}\n"),
        };
        let mut writer = self.writer.lock().await;
        writer
            .write_all(line.as_bytes())
            .await
            .map_err(|e| SendError(e.to_string()))?;
        writer.flush().await.map_err(|e| SendError(e.to_string()))
    }
}
