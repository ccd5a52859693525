pub mod client;
pub mod error;

pub use client::{connect_remote, BusClient, BusEnvelope, Headers, MemoryBus};
pub use error::BusError;
