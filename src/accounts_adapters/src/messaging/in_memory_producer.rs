use std::sync::Arc;

use tokio::sync::Mutex;

use super::{DEFAULT_MAX_RETRIES, MessageProducer, ProducerError, send_with_retries};

#[derive(Default)]
struct InMemoryState {
    closed: bool,
    messages: Vec<(String, Vec<u8>)>,
    failures_remaining: usize,
}

/// Producer keeping messages in memory, for tests and local runs.
#[derive(Clone)]
pub struct InMemoryProducer {
    state: Arc<Mutex<InMemoryState>>,
    max_retries: u32,
}

impl Default for InMemoryProducer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES)
    }
}

impl InMemoryProducer {
    pub fn new(max_retries: u32) -> Self {
        Self {
            state: Arc::new(Mutex::new(InMemoryState::default())),
            max_retries,
        }
    }

    /// Makes the next `attempts` delivery attempts fail.
    pub async fn fail_next(&self, attempts: usize) {
        self.state.lock().await.failures_remaining = attempts;
    }

    pub async fn messages(&self) -> Vec<(String, Vec<u8>)> {
        self.state.lock().await.messages.clone()
    }

    pub async fn is_closed(&self) -> bool {
        self.state.lock().await.closed
    }
}

#[async_trait::async_trait]
impl MessageProducer for InMemoryProducer {
    async fn send(&self, topic: &str, payload: &[u8]) -> Result<(), ProducerError> {
        send_with_retries(topic, self.max_retries, || async {
            let mut state = self.state.lock().await;
            if state.closed {
                return Err(ProducerError::Closed);
            }
            if state.failures_remaining > 0 {
                state.failures_remaining -= 1;
                return Err(ProducerError::Send("broker unavailable".to_owned()));
            }
            state.messages.push((topic.to_owned(), payload.to_vec()));
            Ok(())
        })
        .await
    }

    async fn close(&self) -> Result<(), ProducerError> {
        self.state.lock().await.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_send_retries_transient_failures() {
        let producer = InMemoryProducer::new(5);
        producer.fail_next(4).await;

        producer.send("notifications", b"hello").await.unwrap();

        assert_eq!(
            producer.messages().await,
            vec![("notifications".to_owned(), b"hello".to_vec())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_gives_up_after_max_retries() {
        let producer = InMemoryProducer::new(5);
        producer.fail_next(5).await;

        let result = producer.send("notifications", b"hello").await;

        assert!(matches!(result, Err(ProducerError::Send(_))));
        assert!(producer.messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_closed_producer_fails_fast() {
        let producer = InMemoryProducer::default();
        producer.close().await.unwrap();
        producer.close().await.unwrap();

        assert!(matches!(
            producer.send("notifications", b"hello").await,
            Err(ProducerError::Closed)
        ));
        assert!(producer.is_closed().await);
    }
}
