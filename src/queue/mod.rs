//! Message queue transport for log messages.
//!
//! The notifier publishes through [`LogQueue`] and the log consumer drains it
//! through a subscription. Backends are selected at startup.

mod memory;
mod redis_impl;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;

pub use memory::MemoryQueue;
pub use redis_impl::RedisQueue;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("Queue connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Publish failed: {0}")]
    PublishFailed(String),
    #[error("Queue operation failed: {0}")]
    OperationFailed(String),
}

pub type Result<T> = std::result::Result<T, QueueError>;

/// Name under which a queue bound to `exchange` is stored by the backend.
pub fn queue_key(exchange: &str, queue: &str) -> String {
    format!("{}.{}", exchange, queue)
}

#[async_trait]
pub trait LogQueue: Send + Sync {
    /// Enqueues `payload` without waiting for any consumer.
    async fn publish(&self, queue_key: &str, payload: &str) -> Result<()>;

    /// Starts receiving messages published to `queue_key`.
    async fn subscribe(&self, queue_key: &str) -> Result<broadcast::Receiver<String>>;
}
