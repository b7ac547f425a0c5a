pub mod in_memory_producer;
pub mod producer_dispatcher;
pub mod redis_stream_producer;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use in_memory_producer::InMemoryProducer;
pub use producer_dispatcher::ProducerNotificationDispatcher;
pub use redis_stream_producer::{RedisStreamProducer, ReplicaAcks, StreamProducerConfig};

pub const DEFAULT_MAX_RETRIES: u32 = 5;
const RETRY_BACKOFF: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Error)]
pub enum ProducerError {
    #[error("producer is closed")]
    Closed,
    #[error("failed to send message: {0}")]
    Send(String),
}

/// At-least-once message channel.
///
/// `send` returns once the message is acknowledged or the retry budget is
/// spent. After `close` every send fails with [`ProducerError::Closed`];
/// closing twice is harmless.
#[async_trait]
pub trait MessageProducer: Send + Sync {
    async fn send(&self, topic: &str, payload: &[u8]) -> Result<(), ProducerError>;
    async fn close(&self) -> Result<(), ProducerError>;
}

/// Runs `attempt` up to `max_retries` times, backing off linearly between
/// failures. A `Closed` error is final.
pub(crate) async fn send_with_retries<F, Fut, T>(
    topic: &str,
    max_retries: u32,
    mut attempt: F,
) -> Result<T, ProducerError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProducerError>>,
{
    let max_retries = max_retries.max(1);
    let mut tries = 0;
    loop {
        tries += 1;
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(ProducerError::Closed) => return Err(ProducerError::Closed),
            Err(e) if tries < max_retries => {
                tracing::warn!(topic, attempt = tries, error = %e, "Retrying message send");
                tokio::time::sleep(RETRY_BACKOFF * tries).await;
            }
            Err(e) => return Err(e),
        }
    }
}
