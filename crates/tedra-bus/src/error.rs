use thiserror::Error;

#[derive(Error, Debug)]
pub enum BusError {
    #[error("Connection error: {0}")]
    Connect(String),

    #[error("Connection timed out after {0} seconds")]
    ConnectTimeout(u64),

    #[error("Publish error: {0}")]
    Publish(String),
}
