use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::constants::API_NAME;
use crate::queue::{LogQueue, Result};

/// Drains the log queue and writes every message to the service log.
pub struct LogConsumer;

impl LogConsumer {
    /// Subscribes to `queue_key` and consumes it on a background task.
    pub async fn spawn(queue: Arc<dyn LogQueue>, queue_key: &str) -> Result<JoinHandle<()>> {
        let rx = queue.subscribe(queue_key).await?;
        tracing::info!("{} Log consumer listening on {}", API_NAME, queue_key);
        Ok(tokio::spawn(Self::run(rx)))
    }

    /// Logs messages until the channel closes.
    pub async fn run(mut rx: broadcast::Receiver<String>) {
        loop {
            match rx.recv().await {
                Ok(message) => Self::consume_log(&message),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("{} Log consumer lagged, skipped {} messages", API_NAME, skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
        tracing::info!("{} Log consumer stopped", API_NAME);
    }

    pub fn consume_log(message: &str) {
        tracing::info!("Message Received: {}", message);
    }
}
