use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::curve::DemandCurve;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidMarketMessageError {
    #[error("clearing message must be a JSON array")]
    NotAnArray,

    #[error("clearing message must have exactly 2 elements, found {found}")]
    WrongArity { found: usize },

    #[error("clearing message element {index} is not a number")]
    NotANumber { index: usize },
}

/// Bid payload published on `Bidding`: the price array first, then the
/// quantity array, mirroring the demand curve submitted for this round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BidMessage {
    pub price: Vec<f64>,
    pub quantity: Vec<f64>,
}

impl BidMessage {
    pub fn from_curve(curve: &DemandCurve) -> Self {
        Self {
            price: curve.prices().to_vec(),
            quantity: curve.quantities().to_vec(),
        }
    }
}

/// The market outcome announced on `clearing price`: an ordered
/// two-element sequence `[clearing_price, clearing_quantity]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearingMessage {
    pub price: f64,
    pub quantity: f64,
}

impl ClearingMessage {
    /// Parse the inbound announcement. Anything other than a two-element
    /// numeric array is rejected; the reaction is aborted upstream.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, InvalidMarketMessageError> {
        let items = value
            .as_array()
            .ok_or(InvalidMarketMessageError::NotAnArray)?;
        if items.len() != 2 {
            return Err(InvalidMarketMessageError::WrongArity { found: items.len() });
        }
        let price = items[0]
            .as_f64()
            .ok_or(InvalidMarketMessageError::NotANumber { index: 0 })?;
        let quantity = items[1]
            .as_f64()
            .ok_or(InvalidMarketMessageError::NotANumber { index: 1 })?;
        Ok(Self { price, quantity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bid_message_from_curve() {
        let curve = DemandCurve::parse("1 2 3\n10 20 30").unwrap();
        let bid = BidMessage::from_curve(&curve);
        assert_eq!(bid.price, vec![1.0, 2.0, 3.0]);
        assert_eq!(bid.quantity, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn bid_message_serializes_price_first() {
        let curve = DemandCurve::parse("1 2\n10 20").unwrap();
        let json = serde_json::to_string(&BidMessage::from_curve(&curve)).unwrap();
        assert_eq!(json, r#"{"price":[1.0,2.0],"quantity":[10.0,20.0]}"#);
    }

    #[test]
    fn roundtrip_bid_message() {
        let bid = BidMessage {
            price: vec![0.05, 0.10, 0.15],
            quantity: vec![2.0, 4.0, 6.0],
        };
        let json = serde_json::to_string(&bid).unwrap();
        let deserialized: BidMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(bid, deserialized);
    }

    #[test]
    fn clearing_message_from_two_element_array() {
        let value = serde_json::json!([50.0, 29.0]);
        let clearing = ClearingMessage::from_value(&value).unwrap();
        assert_eq!(clearing.price, 50.0);
        assert_eq!(clearing.quantity, 29.0);
    }

    #[test]
    fn clearing_message_accepts_integer_elements() {
        let value = serde_json::json!([50, 29]);
        let clearing = ClearingMessage::from_value(&value).unwrap();
        assert_eq!(clearing.quantity, 29.0);
    }

    #[test]
    fn rejects_single_element_array() {
        let value = serde_json::json!([50.0]);
        let err = ClearingMessage::from_value(&value).unwrap_err();
        assert_eq!(err, InvalidMarketMessageError::WrongArity { found: 1 });
    }

    #[test]
    fn rejects_non_array_message() {
        let value = serde_json::json!({"price": 50.0, "quantity": 29.0});
        let err = ClearingMessage::from_value(&value).unwrap_err();
        assert_eq!(err, InvalidMarketMessageError::NotAnArray);
    }

    #[test]
    fn rejects_non_numeric_element() {
        let value = serde_json::json!([50.0, "29"]);
        let err = ClearingMessage::from_value(&value).unwrap_err();
        assert_eq!(err, InvalidMarketMessageError::NotANumber { index: 1 });
    }
}
