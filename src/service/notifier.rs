use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::constants::API_NAME;
use crate::models::LogMessage;
use crate::queue::{queue_key, LogQueue};

/// Publishes timestamped log messages to the log queue without waiting on them.
#[derive(Clone)]
pub struct Notifier {
    queue: Arc<dyn LogQueue>,
    queue_key: Arc<str>,
}

impl Notifier {
    pub fn new(queue: Arc<dyn LogQueue>, exchange: &str, queue_name: &str) -> Self {
        Self {
            queue,
            queue_key: queue_key(exchange, queue_name).into(),
        }
    }

    pub fn queue_key(&self) -> &str {
        &self.queue_key
    }

    /// Stamps `text` now and publishes it on a detached task. Publish errors
    /// are logged and otherwise dropped.
    pub fn notify(&self, text: impl Into<String>) -> JoinHandle<()> {
        let message = LogMessage::new(text);
        let queue = Arc::clone(&self.queue);
        let key = Arc::clone(&self.queue_key);

        tokio::spawn(async move {
            let payload = message.to_string();
            if let Err(e) = queue.publish(&key, &payload).await {
                tracing::warn!("{} Failed to publish log message to {}: {}", API_NAME, key, e);
            }
        })
    }
}
