pub mod config;
pub mod curve;
pub mod event;
pub mod market;

pub use config::{AgentConfig, BusConfig, CurveConfig, EventIdPolicy, EventsConfig, TedraConfig};
pub use curve::{DemandCurve, MalformedCurveError};
pub use event::{event_start_time, CurtailmentEvent, ShedTier};
pub use market::{BidMessage, ClearingMessage, InvalidMarketMessageError};
