use accounts_core::{DispatchError, LifecycleEvent, NotificationDispatcher};

use super::{MessageProducer, ProducerError};

/// Serializes lifecycle events to JSON and publishes them on one topic.
pub struct ProducerNotificationDispatcher<P> {
    producer: P,
    topic: String,
}

impl<P: MessageProducer> ProducerNotificationDispatcher<P> {
    pub fn new(producer: P, topic: impl Into<String>) -> Self {
        Self {
            producer,
            topic: topic.into(),
        }
    }

    pub fn producer(&self) -> &P {
        &self.producer
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Closes the underlying producer. Later dispatches fail with
    /// [`DispatchError::ProducerClosed`].
    pub async fn close(&self) -> Result<(), ProducerError> {
        self.producer.close().await
    }
}

#[async_trait::async_trait]
impl<P: MessageProducer> NotificationDispatcher for ProducerNotificationDispatcher<P> {
    #[tracing::instrument(
        name = "Dispatching lifecycle event",
        skip_all,
        fields(kind = ?event.kind())
    )]
    async fn dispatch(&self, event: &LifecycleEvent) -> Result<(), DispatchError> {
        let payload =
            serde_json::to_vec(event).map_err(|e| DispatchError::Serialization(e.to_string()))?;

        self.producer
            .send(&self.topic, &payload)
            .await
            .map_err(|e| match e {
                ProducerError::Closed => DispatchError::ProducerClosed,
                ProducerError::Send(reason) => DispatchError::Delivery(reason),
            })
    }
}

#[cfg(test)]
mod tests {
    use accounts_core::{Email, LifecycleEventKind, Username};
    use secrecy::Secret;

    use super::*;
    use crate::messaging::InMemoryProducer;

    fn event() -> LifecycleEvent {
        LifecycleEvent::new(
            LifecycleEventKind::AccountConfirmation,
            Email::parse(Secret::new("alice@example.com".to_owned())).unwrap(),
            &Username::parse("alice").unwrap(),
            "http://localhost:8080/confirm?token=abc".to_owned(),
        )
    }

    #[tokio::test]
    async fn test_dispatch_publishes_json_event() {
        let dispatcher =
            ProducerNotificationDispatcher::new(InMemoryProducer::default(), "notifications");

        dispatcher.dispatch(&event()).await.unwrap();

        let messages = dispatcher.producer().messages().await;
        assert_eq!(messages.len(), 1);
        let (topic, payload) = &messages[0];
        assert_eq!(topic, "notifications");
        let json: serde_json::Value = serde_json::from_slice(payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Type": "user_registration",
                "Email": "alice@example.com",
                "Payload": {
                    "link": "http://localhost:8080/confirm?token=abc",
                    "username": "alice"
                }
            })
        );
    }

    #[tokio::test]
    async fn test_dispatch_after_close_fails_closed() {
        let dispatcher =
            ProducerNotificationDispatcher::new(InMemoryProducer::default(), "notifications");
        dispatcher.close().await.unwrap();

        let result = dispatcher.dispatch(&event()).await;

        assert!(matches!(result, Err(DispatchError::ProducerClosed)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_surface_as_delivery_error() {
        let dispatcher = ProducerNotificationDispatcher::new(InMemoryProducer::new(2), "events");
        dispatcher.producer().fail_next(2).await;

        let result = dispatcher.dispatch(&event()).await;

        assert!(matches!(result, Err(DispatchError::Delivery(_))));
    }
}
