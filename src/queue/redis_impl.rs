//! Redis-backed log queue.
//!
//! Each queue is a Redis list. Publishing appends with `RPUSH`; a subscription
//! drains the list with `BLPOP` on a background task, so every message is
//! handed to exactly one consumer even across processes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisResult};
use tokio::sync::{broadcast, RwLock};

use super::{LogQueue, QueueError, Result};

const CHANNEL_CAPACITY: usize = 256;

/// Seconds a single `BLPOP` waits before the drain loop re-checks for receivers.
const BLPOP_TIMEOUT_SECS: f64 = 1.0;

const INITIAL_BACKOFF: Duration = Duration::from_millis(100);
const MAX_BACKOFF: Duration = Duration::from_secs(5);

type Subscriptions = Arc<RwLock<HashMap<String, broadcast::Sender<String>>>>;

fn map_redis_error(err: redis::RedisError) -> QueueError {
    if err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped() {
        QueueError::ConnectionFailed(err.to_string())
    } else {
        QueueError::OperationFailed(err.to_string())
    }
}

/// Redis log queue.
///
/// Publishes go through one shared [`ConnectionManager`]. Each subscription
/// gets its own manager so a blocked `BLPOP` never stalls publishing.
pub struct RedisQueue {
    client: redis::Client,
    conn: ConnectionManager,
    subscriptions: Subscriptions,
}

impl RedisQueue {
    /// Connects to Redis at `url` (e.g. "redis://localhost:6379").
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = ConnectionManager::new(client.clone())
            .await
            .map_err(map_redis_error)?;

        Ok(Self {
            client,
            conn,
            subscriptions: Arc::new(RwLock::new(HashMap::new())),
        })
    }
}

#[async_trait]
impl LogQueue for RedisQueue {
    async fn publish(&self, queue_key: &str, payload: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.rpush::<_, _, ()>(queue_key, payload)
            .await
            .map_err(|e| QueueError::PublishFailed(e.to_string()))
    }

    async fn subscribe(&self, queue_key: &str) -> Result<broadcast::Receiver<String>> {
        {
            let subscriptions = self.subscriptions.read().await;
            if let Some(sender) = subscriptions.get(queue_key) {
                return Ok(sender.subscribe());
            }
        }

        let (tx, rx) = broadcast::channel(CHANNEL_CAPACITY);
        {
            let mut subscriptions = self.subscriptions.write().await;
            if let Some(sender) = subscriptions.get(queue_key) {
                return Ok(sender.subscribe());
            }
            subscriptions.insert(queue_key.to_string(), tx.clone());
        }

        let conn = match ConnectionManager::new(self.client.clone()).await {
            Ok(conn) => conn,
            Err(e) => {
                self.subscriptions.write().await.remove(queue_key);
                return Err(map_redis_error(e));
            }
        };

        let key = queue_key.to_string();
        let subscriptions = Arc::clone(&self.subscriptions);

        tokio::spawn(async move {
            if let Err(e) = run_drain_loop(conn, &key, tx).await {
                tracing::error!("Redis drain loop for queue {} failed: {}", key, e);
            }
            subscriptions.write().await.remove(&key);
        });

        Ok(rx)
    }
}

/// The list operations the drain loop needs.
#[async_trait]
trait ListConnection: Send {
    /// Blocks up to [`BLPOP_TIMEOUT_SECS`] for the head of `key`.
    async fn pop(&mut self, key: &str) -> RedisResult<Option<String>>;

    /// Puts `payload` back at the head of `key`.
    async fn requeue(&mut self, key: &str, payload: &str) -> RedisResult<()>;
}

#[async_trait]
impl ListConnection for ConnectionManager {
    async fn pop(&mut self, key: &str) -> RedisResult<Option<String>> {
        let popped: Option<(String, String)> = self.blpop(key, BLPOP_TIMEOUT_SECS).await?;
        Ok(popped.map(|(_, payload)| payload))
    }

    async fn requeue(&mut self, key: &str, payload: &str) -> RedisResult<()> {
        self.lpush(key, payload).await
    }
}

/// Pops messages off the Redis list and forwards them until every receiver
/// has been dropped.
///
/// Connection errors are retried with exponential backoff; the manager
/// reconnects underneath. Any other error ends the loop.
async fn run_drain_loop<C: ListConnection>(
    mut conn: C,
    key: &str,
    tx: broadcast::Sender<String>,
) -> Result<()> {
    let mut backoff = INITIAL_BACKOFF;

    while tx.receiver_count() > 0 {
        let payload = match conn.pop(key).await {
            Ok(popped) => {
                backoff = INITIAL_BACKOFF;
                match popped {
                    Some(payload) => payload,
                    None => continue,
                }
            }
            Err(e) => match map_redis_error(e) {
                QueueError::ConnectionFailed(reason) => {
                    tracing::warn!(
                        "Redis drain loop for queue {} lost its connection, retrying in {:?}: {}",
                        key,
                        backoff,
                        reason
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF);
                    continue;
                }
                other => return Err(other),
            },
        };

        if let Err(broadcast::error::SendError(payload)) = tx.send(payload) {
            conn.requeue(key, &payload).await.map_err(map_redis_error)?;
            break;
        }
    }

    tracing::info!("Redis drain loop for queue {} stopped: no receivers", key);
    Ok(())
}
