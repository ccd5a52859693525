//! TEDRA - Transactive Energy Demand Response Agent
//!
//! A single homeowner participant in a transactive-energy market: it bids
//! its private demand curve into clearing rounds over a pub/sub bus and
//! reacts to each announced clearing quantity with a standardized
//! curtailment event.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use tedra::models::{TedraConfig, DemandCurve, ShedTier};
//! use tedra::agent::{MarketParticipant, SheddingPolicy};
//! use tedra::bus::{BusClient, MemoryBus};
//! ```

pub use tedra_agent as agent;
pub use tedra_bus as bus;
pub use tedra_models as models;

use std::sync::Arc;
use std::time::Duration;

use tedra_agent::{CurveStore, EventComposer, MarketParticipant};
use tedra_bus::{connect_remote, MemoryBus};
use tedra_models::TedraConfig;

/// Everything a running agent process needs: the participant, the remote
/// bus session it listens on, and the local bus downstream systems
/// subscribe to.
pub struct AgentHandles {
    pub participant: Arc<MarketParticipant>,
    pub remote: MemoryBus,
    pub local: MemoryBus,
}

/// Wire a MarketParticipant from configuration: connect the remote bus
/// session and assemble the curve store and event composer around it.
pub async fn build_participant(config: &TedraConfig) -> Result<AgentHandles, anyhow::Error> {
    let remote = connect_remote(
        &config.agent.destination_platform,
        config.agent.destination_vip.as_deref(),
        Duration::from_secs(config.bus.connect_timeout_seconds),
    )
    .await?;
    let local = MemoryBus::new(64);

    let participant = Arc::new(MarketParticipant::new(
        config.agent.agentid.clone(),
        CurveStore::new(&config.curve.path),
        EventComposer::new(config.events.id_policy),
        Arc::new(remote.clone()),
        Arc::new(local.clone()),
    ));

    Ok(AgentHandles {
        participant,
        remote,
        local,
    })
}
