use chrono::{DateTime, Utc};
use rand::Rng;

use tedra_models::event::{event_start_time, EVENT_DURATION_SECONDS, EVENT_PRIORITY, EVENT_TYPE};
use tedra_models::{CurtailmentEvent, EventIdPolicy, ShedTier};

const EVENT_ID_LEN: usize = 20;
const EVENT_ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random event identifier: 20 characters drawn from A-Z0-9.
pub fn generate_event_id() -> String {
    let mut rng = rand::rng();
    (0..EVENT_ID_LEN)
        .map(|_| EVENT_ID_ALPHABET[rng.random_range(0..EVENT_ID_ALPHABET.len())] as char)
        .collect()
}

/// Build a curtailment event. Pure and deterministic given its inputs;
/// the caller supplies the clock.
pub fn compose(tier: ShedTier, event_id: &str, now: DateTime<Utc>) -> CurtailmentEvent {
    CurtailmentEvent {
        event_id: event_id.to_string(),
        priority: EVENT_PRIORITY.to_string(),
        start_time: event_start_time(now),
        duration: EVENT_DURATION_SECONDS.to_string(),
        signal_payload: tier.ordinal().to_string(),
        event_type: EVENT_TYPE.to_string(),
    }
}

/// Builds curtailment events, owning the event-identifier policy.
pub struct EventComposer {
    policy: EventIdPolicy,
    process_event_id: String,
}

impl EventComposer {
    pub fn new(policy: EventIdPolicy) -> Self {
        Self {
            policy,
            process_event_id: generate_event_id(),
        }
    }

    /// Identifier the next composed event will carry.
    pub fn next_event_id(&self) -> String {
        match self.policy {
            EventIdPolicy::PerProcess => self.process_event_id.clone(),
            EventIdPolicy::PerEvent => generate_event_id(),
        }
    }

    /// Compose an event timestamped at the moment of the call.
    pub fn compose_now(&self, tier: ShedTier) -> CurtailmentEvent {
        compose(tier, &self.next_event_id(), Utc::now())
    }
}
