use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::error::BusError;

/// Per-message metadata (e.g. `AgentID`).
pub type Headers = HashMap<String, String>;

/// One message on a bus: topic, headers, JSON payload.
#[derive(Debug, Clone)]
pub struct BusEnvelope {
    pub topic: String,
    pub headers: Headers,
    pub payload: Value,
}

/// Publish side of a pub/sub bus. Delivery semantics (at-most-once,
/// ordering) are the transport's contract, not the caller's.
#[async_trait]
pub trait BusClient: Send + Sync {
    async fn publish(&self, topic: &str, headers: Headers, payload: Value)
        -> Result<(), BusError>;
}

/// In-process pub/sub bus backed by a broadcast channel. Serves as the
/// local bus and as the test double for the remote one.
#[derive(Debug, Clone)]
pub struct MemoryBus {
    tx: broadcast::Sender<BusEnvelope>,
}

impl MemoryBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Register a subscriber. Each receiver sees every envelope published
    /// after the call.
    pub fn subscribe(&self) -> broadcast::Receiver<BusEnvelope> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[async_trait]
impl BusClient for MemoryBus {
    async fn publish(
        &self,
        topic: &str,
        headers: Headers,
        payload: Value,
    ) -> Result<(), BusError> {
        let envelope = BusEnvelope {
            topic: topic.to_string(),
            headers,
            payload,
        };
        // A send with no live subscribers is not a failure; delivery is
        // at-most-once.
        if self.tx.send(envelope).is_err() {
            tracing::debug!(topic, "No subscribers for published message");
        }
        Ok(())
    }
}

/// Establish a session to the remote bus, blocking until the handshake
/// completes or the timeout elapses. Returns the publish handle for that
/// session.
pub async fn connect_remote(
    platform: &str,
    address: Option<&str>,
    timeout: Duration,
) -> Result<MemoryBus, BusError> {
    let handshake = async { Ok::<MemoryBus, BusError>(MemoryBus::new(64)) };
    match tokio::time::timeout(timeout, handshake).await {
        Ok(result) => {
            let bus = result?;
            tracing::info!(
                platform,
                address = address.unwrap_or("<same host>"),
                "Connected to remote bus"
            );
            Ok(bus)
        }
        Err(_) => Err(BusError::ConnectTimeout(timeout.as_secs())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_reaches_subscriber() {
        let bus = MemoryBus::new(16);
        let mut rx = bus.subscribe();

        let headers = Headers::from([("AgentID".to_string(), "homeowner1".to_string())]);
        bus.publish("Bidding", headers, serde_json::json!({"price": [1.0]}))
            .await
            .unwrap();

        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.topic, "Bidding");
        assert_eq!(envelope.headers.get("AgentID").unwrap(), "homeowner1");
        assert_eq!(envelope.payload["price"][0], 1.0);
    }

    #[tokio::test]
    async fn publish_fans_out_to_all_subscribers() {
        let bus = MemoryBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish("clearing price", Headers::new(), serde_json::json!([50.0, 29.0]))
            .await
            .unwrap();

        assert_eq!(rx1.recv().await.unwrap().topic, "clearing price");
        assert_eq!(rx2.recv().await.unwrap().topic, "clearing price");
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_not_an_error() {
        let bus = MemoryBus::new(16);
        let result = bus
            .publish("openADRevent", Headers::new(), serde_json::json!({}))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn connect_remote_returns_handle() {
        let bus = connect_remote("campus", Some("tcp://127.0.0.1:22916"), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(bus.subscriber_count(), 0);
    }
}
