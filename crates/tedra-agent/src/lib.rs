pub mod composer;
pub mod curve_store;
pub mod error;
pub mod participant;
pub mod policy;

pub use composer::{compose, generate_event_id, EventComposer};
pub use curve_store::CurveStore;
pub use error::AgentError;
pub use participant::MarketParticipant;
pub use policy::{PolicyInvariantViolation, SheddingPolicy};
