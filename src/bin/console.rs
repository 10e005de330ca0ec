//! Console host: every stdin line is one chat message. Replies go to stdout;
//! stderr serves as the fallback channel.

use anyhow::Result;
use douyin_relay::{
    config::Config,
    delivery::{Deliverer, MessageSender, WriterSender},
    logging,
    pipeline::{InboundMessage, Pipeline},
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::{sync::CancellationToken, task::TaskTracker};
use tracing::{error, info};

const CONSOLE_CHANNEL: &str = "console";

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing();

    let config = Arc::new(Config::from_env()?);
    let pipeline = Pipeline::from_config(config.clone());
    if pipeline.log().info_enabled() {
        info!(api_host = config.api_host(), "Douyin relay started");
    }

    let user_id = std::env::var("USER").unwrap_or_else(|_| "console".to_string());
    let primary: Arc<dyn MessageSender> = Arc::new(WriterSender::stdout());
    let fallback: Arc<dyn MessageSender> = Arc::new(WriterSender::stderr());
    let deliverer = Deliverer::new(primary, Some(fallback), CONSOLE_CHANNEL, pipeline.log());

    let shutdown = CancellationToken::new();
    let tracker = TaskTracker::new();

    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
                return;
            }
            info!("Received shutdown signal");
            shutdown.cancel();
        });
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            _ = shutdown.cancelled() => break,
            line = lines.next_line() => line?,
        };
        let Some(content) = line else {
            break;
        };

        let message = InboundMessage {
            content,
            user_id: user_id.clone(),
            username: None,
            channel_id: CONSOLE_CHANNEL.to_string(),
        };
        let pipeline = pipeline.clone();
        let deliverer = deliverer.clone();
        tracker.spawn(async move {
            pipeline.handle(&message, &deliverer).await;
        });
    }

    tracker.close();
    tracker.wait().await;
    Ok(())
}
