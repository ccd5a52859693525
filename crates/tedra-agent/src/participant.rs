use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use tedra_bus::{BusClient, BusEnvelope, Headers};
use tedra_models::{BidMessage, ClearingMessage, CurtailmentEvent, DemandCurve};

use crate::composer::EventComposer;
use crate::curve_store::CurveStore;
use crate::error::AgentError;
use crate::policy::SheddingPolicy;

/// Inbound: the market operator opens a clearing round.
pub const TOPIC_BID_REQUEST: &str = "request for bids";
/// Inbound: the market operator announces the round's outcome.
pub const TOPIC_CLEARING_PRICE: &str = "clearing price";
/// Outbound to the remote bus: this agent's demand curve.
pub const TOPIC_BIDDING: &str = "Bidding";
/// Outbound to the local bus: the curtailment signal.
pub const TOPIC_CURTAILMENT_EVENT: &str = "openADRevent";

/// A single homeowner participant in the transactive market.
///
/// Two independent reactive handlers: a bid request refreshes the demand
/// curve and submits it to the remote bus; a clearing announcement maps the
/// clearing quantity to a shed tier and publishes a curtailment event on
/// the local bus. Each reaction either completes and publishes or aborts
/// without partial side effects; nothing is retried.
pub struct MarketParticipant {
    agent_id: String,
    curve_store: CurveStore,
    policy: SheddingPolicy,
    composer: EventComposer,
    remote_bus: Arc<dyn BusClient>,
    local_bus: Arc<dyn BusClient>,
    // Most recently loaded curve. Replaced wholesale, never mutated in
    // place, so a concurrent reader always sees a fully built value.
    curve: RwLock<Option<DemandCurve>>,
}

impl MarketParticipant {
    pub fn new(
        agent_id: String,
        curve_store: CurveStore,
        composer: EventComposer,
        remote_bus: Arc<dyn BusClient>,
        local_bus: Arc<dyn BusClient>,
    ) -> Self {
        Self {
            agent_id,
            curve_store,
            policy: SheddingPolicy,
            composer,
            remote_bus,
            local_bus,
            curve: RwLock::new(None),
        }
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// The curve submitted in the most recent bid cycle, if any.
    pub fn current_curve(&self) -> Option<DemandCurve> {
        self.curve
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn headers(&self) -> Headers {
        HashMap::from([("AgentID".to_string(), self.agent_id.clone())])
    }

    /// React to a bid request: reload the demand curve from its source and
    /// submit it on the remote bus. A load failure aborts the cycle with no
    /// bid published.
    pub async fn handle_bid_request(&self) -> Result<(), AgentError> {
        let curve = self.curve_store.load()?;
        let bid = BidMessage::from_curve(&curve);
        tracing::info!(
            price = ?bid.price,
            quantity = ?bid.quantity,
            "Bidding"
        );

        // Swap in the fresh curve only once fully built. The lock is never
        // held across an await.
        {
            let mut slot = self
                .curve
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *slot = Some(curve);
        }

        let payload = serde_json::to_value(&bid)?;
        self.remote_bus
            .publish(TOPIC_BIDDING, self.headers(), payload)
            .await?;
        Ok(())
    }

    /// React to a clearing announcement: compute the shed tier against the
    /// most recently loaded curve and publish a curtailment event on the
    /// local bus. Any failure aborts the cycle with nothing published.
    pub async fn handle_clearing_price(
        &self,
        message: &Value,
    ) -> Result<CurtailmentEvent, AgentError> {
        let clearing = ClearingMessage::from_value(message)?;
        tracing::info!(
            price = clearing.price,
            quantity = clearing.quantity,
            "Got clearing announcement"
        );

        let tier = {
            let slot = self
                .curve
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let curve = slot.as_ref().ok_or(AgentError::NoCurve)?;
            self.policy.compute_tier(curve, clearing.quantity)?
        };

        let event = self.composer.compose_now(tier);
        let payload = serde_json::to_value(&event)?;
        self.local_bus
            .publish(TOPIC_CURTAILMENT_EVENT, self.headers(), payload)
            .await?;
        Ok(event)
    }

    /// Dispatch one inbound envelope by topic. Unrecognized topics are
    /// ignored.
    pub async fn dispatch(&self, envelope: &BusEnvelope) -> Result<(), AgentError> {
        match envelope.topic.as_str() {
            TOPIC_BID_REQUEST => self.handle_bid_request().await,
            TOPIC_CLEARING_PRICE => self
                .handle_clearing_price(&envelope.payload)
                .await
                .map(|_| ()),
            other => {
                tracing::debug!(topic = other, "Ignoring unrecognized topic");
                Ok(())
            }
        }
    }

    /// Run until cancelled, reacting to inbound market messages one at a
    /// time. A failed reaction aborts only its own cycle; the participant
    /// stays subscribed and live.
    pub async fn run(&self, mut rx: broadcast::Receiver<BusEnvelope>, cancel: CancellationToken) {
        tracing::info!(agent_id = %self.agent_id, "Market participant started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Market participant shutting down");
                    break;
                }
                result = rx.recv() => {
                    match result {
                        Ok(envelope) => {
                            if let Err(e) = self.dispatch(&envelope).await {
                                tracing::error!(
                                    topic = %envelope.topic,
                                    error = %e,
                                    "Reaction aborted"
                                );
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            tracing::warn!(skipped = n, "Inbound receiver lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            tracing::info!("Inbound bus channel closed");
                            break;
                        }
                    }
                }
            }
        }
    }
}
