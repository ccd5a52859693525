use thiserror::Error;

use tedra_bus::BusError;
use tedra_models::{InvalidMarketMessageError, MalformedCurveError};

use crate::policy::PolicyInvariantViolation;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Malformed curve: {0}")]
    Curve(#[from] MalformedCurveError),

    #[error("Invalid market message: {0}")]
    Market(#[from] InvalidMarketMessageError),

    #[error("Policy invariant violated: {0}")]
    Policy(#[from] PolicyInvariantViolation),

    #[error("Bus error: {0}")]
    Bus(#[from] BusError),

    #[error("No demand curve loaded yet; cannot react to a clearing announcement")]
    NoCurve,

    #[error("Curve source read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
