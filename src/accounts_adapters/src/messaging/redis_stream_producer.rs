use redis::{Client, InfoDict, RedisResult, aio::MultiplexedConnection};
use tokio::sync::Mutex;

use super::{DEFAULT_MAX_RETRIES, MessageProducer, ProducerError, send_with_retries};

// Field name of the single entry field holding the serialized message
const PAYLOAD_FIELD: &str = "payload";
const CONNECTED_REPLICAS_FIELD: &str = "connected_slaves";

/// How many replicas must acknowledge an entry before `send` succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplicaAcks {
    /// Every replica connected to the primary when the entry is appended.
    AllConnected,
    AtLeast(usize),
}

#[derive(Debug, Clone)]
pub struct StreamProducerConfig {
    pub max_retries: u32,
    pub replica_acks: ReplicaAcks,
    pub replica_timeout_in_millis: u64,
}

impl Default for StreamProducerConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            replica_acks: ReplicaAcks::AllConnected,
            replica_timeout_in_millis: 1000,
        }
    }
}

struct ProducerState {
    running: bool,
    connection: Option<MultiplexedConnection>,
}

/// Publishes messages as Redis stream entries (`XADD <topic> * payload <bytes>`)
/// and blocks on `WAIT` until the configured replicas hold the entry.
///
/// One mutex guards the liveness flag and the send path, so a send racing
/// with `close` either completes or sees [`ProducerError::Closed`].
pub struct RedisStreamProducer {
    state: Mutex<ProducerState>,
    config: StreamProducerConfig,
}

fn connected_replicas(info: &InfoDict) -> Result<usize, ProducerError> {
    info.get(CONNECTED_REPLICAS_FIELD).ok_or_else(|| {
        ProducerError::Send(format!(
            "INFO replication did not report {CONNECTED_REPLICAS_FIELD}"
        ))
    })
}

impl RedisStreamProducer {
    pub fn new(connection: MultiplexedConnection, config: StreamProducerConfig) -> Self {
        Self {
            state: Mutex::new(ProducerState {
                running: true,
                connection: Some(connection),
            }),
            config,
        }
    }

    pub async fn connect(client: &Client, config: StreamProducerConfig) -> RedisResult<Self> {
        let connection = client.get_multiplexed_async_connection().await?;
        Ok(Self::new(connection, config))
    }

    async fn required_acks(
        &self,
        connection: &mut MultiplexedConnection,
    ) -> Result<usize, ProducerError> {
        match self.config.replica_acks {
            ReplicaAcks::AtLeast(replicas) => Ok(replicas),
            ReplicaAcks::AllConnected => {
                let info: InfoDict = redis::cmd("INFO")
                    .arg("replication")
                    .query_async(connection)
                    .await
                    .map_err(|e| ProducerError::Send(e.to_string()))?;
                connected_replicas(&info)
            }
        }
    }

    async fn append(
        &self,
        connection: &mut MultiplexedConnection,
        topic: &str,
        payload: &[u8],
    ) -> Result<String, ProducerError> {
        let entry_id: String = redis::cmd("XADD")
            .arg(topic)
            .arg("*")
            .arg(PAYLOAD_FIELD)
            .arg(payload.to_vec())
            .query_async(connection)
            .await
            .map_err(|e| ProducerError::Send(e.to_string()))?;

        let required = self.required_acks(connection).await?;
        let acknowledged: usize = redis::cmd("WAIT")
            .arg(required)
            .arg(self.config.replica_timeout_in_millis)
            .query_async(connection)
            .await
            .map_err(|e| ProducerError::Send(e.to_string()))?;

        if acknowledged < required {
            return Err(ProducerError::Send(format!(
                "entry {entry_id} acknowledged by {acknowledged} of {required} replicas"
            )));
        }

        Ok(entry_id)
    }
}

#[async_trait::async_trait]
impl MessageProducer for RedisStreamProducer {
    #[tracing::instrument(name = "Appending message to Redis stream", skip(self, payload))]
    async fn send(&self, topic: &str, payload: &[u8]) -> Result<(), ProducerError> {
        let state = self.state.lock().await;
        if !state.running {
            return Err(ProducerError::Closed);
        }
        let Some(connection) = state.connection.clone() else {
            return Err(ProducerError::Closed);
        };

        let entry_id = send_with_retries(topic, self.config.max_retries, || {
            let mut connection = connection.clone();
            async move { self.append(&mut connection, topic, payload).await }
        })
        .await?;

        tracing::info!(topic, %entry_id, "Message appended to stream");
        Ok(())
    }

    async fn close(&self) -> Result<(), ProducerError> {
        let mut state = self.state.lock().await;
        if state.running {
            state.running = false;
            state.connection = None;
            tracing::info!("Redis stream producer closed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_replicas_read_from_info_replication() {
        let info = InfoDict::new(
            "# Replication\r\nrole:master\r\nconnected_slaves:2\r\nmaster_repl_offset:0\r\n",
        );

        assert_eq!(connected_replicas(&info).unwrap(), 2);
    }

    #[test]
    fn test_missing_replica_count_is_a_send_error() {
        let info = InfoDict::new("# Replication\r\nrole:master\r\n");

        assert!(matches!(
            connected_replicas(&info),
            Err(ProducerError::Send(_))
        ));
    }

    #[test]
    fn test_default_waits_for_all_connected_replicas() {
        assert_eq!(
            StreamProducerConfig::default().replica_acks,
            ReplicaAcks::AllConnected
        );
    }
}
