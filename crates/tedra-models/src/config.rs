use serde::{Deserialize, Serialize};

/// Top-level configuration for a TEDRA participant, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TedraConfig {
    pub agent: AgentConfig,
    pub curve: CurveConfig,
    #[serde(default)]
    pub events: EventsConfig,
    #[serde(default)]
    pub bus: BusConfig,
}

/// Identity of this participant and the address of the remote bus it bids
/// into. Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentConfig {
    /// Identifier announced to peers in the `AgentID` header.
    pub agentid: String,
    /// Name of the remote platform hosting the market.
    #[serde(rename = "destination-platform")]
    pub destination_platform: String,
    /// Address of the remote bus. None = same-host default.
    #[serde(rename = "destination-vip", default)]
    pub destination_vip: Option<String>,
}

/// Where the demand curve source lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurveConfig {
    /// Path to the two-line curve file. Re-read on every bid cycle.
    pub path: String,
}

/// How curtailment-event identifiers are generated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EventIdPolicy {
    /// One identifier generated at startup and reused for every event the
    /// process emits.
    #[default]
    PerProcess,
    /// A fresh identifier per emitted event.
    PerEvent,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct EventsConfig {
    #[serde(default)]
    pub id_policy: EventIdPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BusConfig {
    /// Timeout for the remote bus session setup.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

fn default_connect_timeout() -> u64 {
    10
}
