use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use super::{LogQueue, Result};

const CHANNEL_CAPACITY: usize = 256;

/// In-process queue backed by tokio broadcast channels, one per queue key.
///
/// Messages published while nobody is subscribed are dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryQueue {
    channels: Arc<RwLock<HashMap<String, broadcast::Sender<String>>>>,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    async fn channel(&self, queue_key: &str) -> broadcast::Sender<String> {
        {
            let channels = self.channels.read().await;
            if let Some(sender) = channels.get(queue_key) {
                return sender.clone();
            }
        }

        let mut channels = self.channels.write().await;
        channels
            .entry(queue_key.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .clone()
    }
}

#[async_trait]
impl LogQueue for MemoryQueue {
    async fn publish(&self, queue_key: &str, payload: &str) -> Result<()> {
        let sender = self.channel(queue_key).await;
        // No receivers is not an error.
        let _ = sender.send(payload.to_string());
        Ok(())
    }

    async fn subscribe(&self, queue_key: &str) -> Result<broadcast::Receiver<String>> {
        Ok(self.channel(queue_key).await.subscribe())
    }
}
