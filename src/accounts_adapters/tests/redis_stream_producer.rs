use std::collections::HashMap;

use accounts_adapters::messaging::{
    MessageProducer, ProducerError, RedisStreamProducer, StreamProducerConfig,
};
use testcontainers_modules::redis::{REDIS_PORT, Redis};
use testcontainers_modules::testcontainers::runners::AsyncRunner;

type StreamEntries = Vec<(String, HashMap<String, Vec<u8>>)>;

// Needs a Docker daemon: cargo test -- --ignored
#[tokio::test]
#[ignore]
async fn test_stream_producer_appends_and_closes() {
    let container = Redis::default().start().await.unwrap();
    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(REDIS_PORT).await.unwrap();
    let client = redis::Client::open(format!("redis://{host}:{port}")).unwrap();

    let producer = RedisStreamProducer::connect(&client, StreamProducerConfig::default())
        .await
        .unwrap();

    producer
        .send("notifications", br#"{"Type":"user_registration"}"#)
        .await
        .unwrap();

    let mut connection = client.get_multiplexed_async_connection().await.unwrap();
    let entries: StreamEntries = redis::cmd("XRANGE")
        .arg("notifications")
        .arg("-")
        .arg("+")
        .query_async(&mut connection)
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0].1.get("payload").map(Vec::as_slice),
        Some(br#"{"Type":"user_registration"}"#.as_slice())
    );

    producer.close().await.unwrap();
    assert!(matches!(
        producer.send("notifications", b"late").await,
        Err(ProducerError::Closed)
    ));
    producer.close().await.unwrap();

    let entries: StreamEntries = redis::cmd("XRANGE")
        .arg("notifications")
        .arg("-")
        .arg("+")
        .query_async(&mut connection)
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
}
