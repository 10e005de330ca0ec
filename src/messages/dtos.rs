use serde::{Deserialize, Serialize};

use crate::delivery::{DeliveryReport, OutboundItem};
use crate::pipeline::{InboundMessage, Outcome};

const MAX_CONTENT_LENGTH: usize = 16 * 1024;

#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub content: String,
    pub user_id: String,
    #[serde(default)]
    pub username: Option<String>,
    pub channel_id: String,
}

impl PostMessageRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.channel_id.trim().is_empty() {
            return Err("channel_id cannot be empty".to_string());
        }
        if self.user_id.trim().is_empty() {
            return Err("user_id cannot be empty".to_string());
        }
        if self.content.len() > MAX_CONTENT_LENGTH {
            return Err("Message too long".to_string());
        }
        Ok(())
    }

    pub fn into_message(self) -> InboundMessage {
        InboundMessage {
            content: self.content,
            user_id: self.user_id,
            username: self.username,
            channel_id: self.channel_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Ignored,
    Completed,
    Failed,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostMessageResponse {
    pub outcome: OutcomeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub items: Vec<OutboundItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<DeliveryReport>,
}

impl PostMessageResponse {
    pub fn from_outcome(outcome: Outcome, items: Vec<OutboundItem>) -> Self {
        match outcome {
            Outcome::Ignored => Self {
                outcome: OutcomeKind::Ignored,
                content_type: None,
                error: None,
                items,
                report: None,
            },
            Outcome::Completed { fields, report } => Self {
                outcome: OutcomeKind::Completed,
                content_type: Some(fields.content_type().to_string()),
                error: None,
                items,
                report: Some(report),
            },
            Outcome::Failed { error, report } => Self {
                outcome: OutcomeKind::Failed,
                content_type: None,
                error: Some(error.to_string()),
                items,
                report: Some(report),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
