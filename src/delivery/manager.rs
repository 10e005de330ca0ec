use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

use crate::delivery::sender::{MessageSender, OutboundItem};
use crate::logging::EventLog;

/// How one item ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendOutcome {
    Primary,
    Fallback,
    /// Both paths failed; the item is skipped.
    Dropped,
}

impl SendOutcome {
    pub fn delivered(self) -> bool {
        !matches!(self, SendOutcome::Dropped)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub via_fallback: usize,
    pub dropped: usize,
}

impl DeliveryReport {
    pub fn record(&mut self, outcome: SendOutcome) {
        if outcome.delivered() {
            self.delivered += 1;
        }
        match outcome {
            SendOutcome::Primary => {}
            SendOutcome::Fallback => self.via_fallback += 1,
            SendOutcome::Dropped => self.dropped += 1,
        }
    }

    pub fn merge(&mut self, other: &DeliveryReport) {
        self.delivered += other.delivered;
        self.via_fallback += other.via_fallback;
        self.dropped += other.dropped;
    }
}

/// Sends items to one channel, one at a time, falling back to a second send
/// path when the first fails.
#[derive(Clone)]
pub struct Deliverer {
    primary: Arc<dyn MessageSender>,
    fallback: Option<Arc<dyn MessageSender>>,
    channel_id: String,
    log: EventLog,
}

impl Deliverer {
    pub fn new(
        primary: Arc<dyn MessageSender>,
        fallback: Option<Arc<dyn MessageSender>>,
        channel_id: impl Into<String>,
        log: EventLog,
    ) -> Self {
        Self {
            primary,
            fallback,
            channel_id: channel_id.into(),
            log,
        }
    }

    /// Never fails: a failure on both paths is logged and reported as
    /// `Dropped`.
    pub async fn safe_send(&self, item: &OutboundItem) -> SendOutcome {
        let primary_err = match self.primary.send(&self.channel_id, item).await {
            Ok(()) => return SendOutcome::Primary,
            Err(e) => e,
        };

        if self.log.errors_enabled() {
            warn!(channel = %self.channel_id, error = %primary_err, "Send failed, trying fallback channel");
        }

        let Some(fallback) = &self.fallback else {
            if self.log.errors_enabled() {
                error!(channel = %self.channel_id, "No fallback channel, dropping item");
            }
            return SendOutcome::Dropped;
        };

        match fallback.send(&self.channel_id, item).await {
            Ok(()) => SendOutcome::Fallback,
            Err(fallback_err) => {
                if self.log.errors_enabled() {
                    error!(channel = %self.channel_id, error = %fallback_err, "Fallback channel also failed, dropping item");
                }
                SendOutcome::Dropped
            }
        }
    }

    /// Send `items` strictly in order; a dropped item does not stop the rest.
    pub async fn send_all(&self, items: &[OutboundItem]) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        for item in items {
            report.record(self.safe_send(item).await);
        }
        report
    }
}
