pub mod errors;

pub use errors::PipelineError;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::delivery::{Deliverer, DeliveryPlan, DeliveryReport, OutboundItem};
use crate::detector;
use crate::extractor::{self, ContentFields};
use crate::logging::{EventLog, LogLevel};
use crate::normalizer;
use crate::resolver::ResolverClient;
use crate::template;

/// A chat message as handed over by the host platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub content: String,
    pub user_id: String,
    #[serde(default)]
    pub username: Option<String>,
    pub channel_id: String,
}

impl InboundMessage {
    /// Name used in logs: the username when known, else the user id.
    pub fn sender_name(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.user_id)
    }
}

#[derive(Debug)]
pub enum Outcome {
    /// No qualifying link; the message is left to other handlers.
    Ignored,
    Completed {
        fields: ContentFields,
        report: DeliveryReport,
    },
    /// The pipeline stopped; the error notice has already been sent.
    Failed {
        error: PipelineError,
        report: DeliveryReport,
    },
}

/// Per-message processing: detect, resolve, normalize, extract, render and
/// deliver. Holds no per-message state, so one instance serves any number of
/// concurrent messages.
#[derive(Clone)]
pub struct Pipeline {
    resolver: ResolverClient,
    config: Arc<Config>,
    log: EventLog,
}

impl Pipeline {
    pub fn new(resolver: ResolverClient, config: Arc<Config>, log: EventLog) -> Self {
        Self {
            resolver,
            config,
            log,
        }
    }

    pub fn from_config(config: Arc<Config>) -> Self {
        let resolver = ResolverClient::new(config.api_host());
        let log = EventLog::new(LogLevel::from_u8(config.log_level()));
        Self::new(resolver, config, log)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn log(&self) -> EventLog {
        self.log
    }

    #[instrument(
        skip_all,
        fields(message_id = %Uuid::new_v4(), user = %message.user_id, channel = %message.channel_id)
    )]
    pub async fn handle(&self, message: &InboundMessage, deliverer: &Deliverer) -> Outcome {
        let Some(url) = detector::detect(&message.content) else {
            return Outcome::Ignored;
        };

        if self.log.info_enabled() {
            info!(url = %url, sender = %message.sender_name(), "Detected share link");
        }

        let mut report = DeliveryReport::default();
        match self.run(url, deliverer, &mut report).await {
            Ok(fields) => Outcome::Completed { fields, report },
            Err(error) => {
                self.log_failure(url, &error);
                let notice = OutboundItem::Text(error.user_message());
                report.record(deliverer.safe_send(&notice).await);
                Outcome::Failed { error, report }
            }
        }
    }

    async fn run(
        &self,
        url: &str,
        deliverer: &Deliverer,
        report: &mut DeliveryReport,
    ) -> Result<ContentFields, PipelineError> {
        self.log.detail("Requesting video data from resolution API");
        let raw = self.resolver.lookup(url).await?;
        if self.log.detail_enabled() {
            info!(endpoint = %raw.request_url, http_status = %raw.status, "Resolution API answered");
        }

        let record = normalizer::normalize(&raw.body);
        if !record.is_success() {
            return Err(PipelineError::ResolutionFailure {
                status: record.status,
            });
        }
        let fields = extractor::extract(&record).ok_or_else(|| PipelineError::ResolutionFailure {
            status: record.status.clone(),
        })?;
        self.log_resolved(&fields);

        let context = fields.template_context();
        let reply = template::render(self.config.reply_template(), &context);
        report.record(deliverer.safe_send(&OutboundItem::Text(reply)).await);

        let plan = DeliveryPlan::decide(
            &fields,
            self.config.max_duration_secs(),
            self.config.long_video_template(),
        )?;
        self.log_plan(&fields, &plan);

        let media_report = deliverer.send_all(&plan.items()).await;
        report.merge(&media_report);

        if self.log.info_enabled() {
            match &plan {
                DeliveryPlan::Images(urls) => {
                    info!(count = urls.len(), delivered = media_report.delivered, "Sent images")
                }
                DeliveryPlan::LongVideo { .. } => info!("Sent long-video notice"),
                DeliveryPlan::VideoLink(_) => info!("Sent video link"),
            }
        }

        Ok(fields)
    }

    fn log_resolved(&self, fields: &ContentFields) {
        if self.log.detail_enabled() {
            info!(
                aweme_id = fields.aweme_id.as_deref().unwrap_or("-"),
                author = %fields.author.nickname,
                content_type = fields.content_type(),
                duration = fields.duration_seconds,
                digg = fields.statistics.digg,
                comment = fields.statistics.comment,
                "Resolved post"
            );
        } else if self.log.info_enabled() {
            info!(
                content_type = fields.content_type(),
                author = %fields.author.nickname,
                duration = fields.duration_seconds,
                "Resolved post"
            );
        }
    }

    fn log_plan(&self, fields: &ContentFields, plan: &DeliveryPlan) {
        match plan {
            DeliveryPlan::Images(urls) => {
                if self.log.detail_enabled() {
                    info!(count = urls.len(), "Sending images");
                }
            }
            DeliveryPlan::LongVideo { .. } => {
                if self.log.info_enabled() {
                    warn!(
                        duration = fields.duration_seconds,
                        limit = self.config.max_duration_secs(),
                        "Video exceeds duration limit, sending preview only"
                    );
                }
            }
            DeliveryPlan::VideoLink(_) => {
                if self.log.detail_enabled() {
                    info!(duration = fields.duration_seconds, "Sending video link");
                }
            }
        }
    }

    fn log_failure(&self, url: &str, error: &PipelineError) {
        if !self.log.errors_enabled() {
            return;
        }
        match error {
            PipelineError::Transport(cause) => error!(
                url = %url,
                error = %error,
                retriable = cause.should_retry(),
                "Failed to resolve link"
            ),
            PipelineError::ResolutionFailure { status } => {
                warn!(url = %url, status = %status, "Resolution failed")
            }
            PipelineError::MissingVideoUrl => error!(url = %url, "No video url found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::RecordingSender;

    fn message(content: &str) -> InboundMessage {
        InboundMessage {
            content: content.to_string(),
            user_id: "u1".to_string(),
            username: None,
            channel_id: "c1".to_string(),
        }
    }

    #[test]
    fn test_sender_name_prefers_username() {
        let mut msg = message("x");
        assert_eq!(msg.sender_name(), "u1");
        msg.username = Some("alice".to_string());
        assert_eq!(msg.sender_name(), "alice");
    }

    #[tokio::test]
    async fn test_message_without_link_is_ignored() {
        let pipeline = Pipeline::from_config(Arc::new(Config::default()));
        let sender = Arc::new(RecordingSender::new());
        let deliverer = Deliverer::new(sender.clone(), None, "c1", pipeline.log());

        let outcome = pipeline
            .handle(&message("nothing to see on douyin.com"), &deliverer)
            .await;

        assert!(matches!(outcome, Outcome::Ignored));
        assert!(sender.items().is_empty());
    }
}
