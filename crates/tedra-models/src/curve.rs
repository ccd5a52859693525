use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedCurveError {
    #[error("curve source must contain exactly 2 lines, found {found}")]
    WrongLineCount { found: usize },

    #[error("token counts differ: {prices} price tokens, {quantities} quantity tokens")]
    TokenCountMismatch { prices: usize, quantities: usize },

    #[error("unparseable {line} token {token:?}")]
    BadToken { line: &'static str, token: String },

    #[error("curve must contain at least one bid step")]
    Empty,

    #[error("quantities must be non-decreasing, violated at index {index}")]
    DecreasingQuantities { index: usize },
}

/// A participant's private demand curve: parallel price/quantity arrays,
/// one entry per bid step.
///
/// Immutable once built. A refresh replaces the whole value; there is no
/// incremental mutation. Invariants (equal lengths >= 1, non-decreasing
/// quantities) are enforced at construction and can be relied on by
/// consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandCurve {
    prices: Vec<f64>,
    quantities: Vec<f64>,
}

impl DemandCurve {
    /// Build a curve from parallel price/quantity arrays.
    pub fn new(prices: Vec<f64>, quantities: Vec<f64>) -> Result<Self, MalformedCurveError> {
        if prices.len() != quantities.len() {
            return Err(MalformedCurveError::TokenCountMismatch {
                prices: prices.len(),
                quantities: quantities.len(),
            });
        }
        if prices.is_empty() {
            return Err(MalformedCurveError::Empty);
        }
        if let Some(i) = quantities.windows(2).position(|w| w[1] < w[0]) {
            // Higher price tier serves higher cumulative quantity. Violated
            // input is a configuration error, never silently corrected.
            return Err(MalformedCurveError::DecreasingQuantities { index: i + 1 });
        }
        Ok(Self { prices, quantities })
    }

    /// Parse a curve from its two-line text source: line 1 holds
    /// whitespace-separated price tokens, line 2 the quantity tokens.
    pub fn parse(source: &str) -> Result<Self, MalformedCurveError> {
        let lines: Vec<&str> = source.lines().collect();
        if lines.len() != 2 {
            return Err(MalformedCurveError::WrongLineCount { found: lines.len() });
        }
        let prices = parse_line(lines[0], "price")?;
        let quantities = parse_line(lines[1], "quantity")?;
        Self::new(prices, quantities)
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn quantities(&self) -> &[f64] {
        &self.quantities
    }

    /// Number of bid steps. Always >= 1.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn min_quantity(&self) -> f64 {
        self.quantities[0]
    }

    pub fn max_quantity(&self) -> f64 {
        self.quantities[self.quantities.len() - 1]
    }
}

fn parse_line(line: &str, label: &'static str) -> Result<Vec<f64>, MalformedCurveError> {
    line.split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| MalformedCurveError::BadToken {
                    line: label,
                    token: token.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_two_line_source() {
        let curve = DemandCurve::parse("1 2 3\n10 20 30").unwrap();
        assert_eq!(curve.prices(), &[1.0, 2.0, 3.0]);
        assert_eq!(curve.quantities(), &[10.0, 20.0, 30.0]);
        assert_eq!(curve.len(), 3);
        assert_eq!(curve.min_quantity(), 10.0);
        assert_eq!(curve.max_quantity(), 30.0);
    }

    #[test]
    fn parse_tolerates_trailing_newline() {
        let curve = DemandCurve::parse("1.5 2.5\n4 8\n").unwrap();
        assert_eq!(curve.prices(), &[1.5, 2.5]);
        assert_eq!(curve.quantities(), &[4.0, 8.0]);
    }

    #[test]
    fn rejects_three_lines() {
        let err = DemandCurve::parse("1 2\n10 20\n30 40").unwrap_err();
        assert_eq!(err, MalformedCurveError::WrongLineCount { found: 3 });
    }

    #[test]
    fn rejects_single_line() {
        let err = DemandCurve::parse("1 2 3").unwrap_err();
        assert_eq!(err, MalformedCurveError::WrongLineCount { found: 1 });
    }

    #[test]
    fn rejects_mismatched_token_counts() {
        let err = DemandCurve::parse("1 2 3\n10 20").unwrap_err();
        assert_eq!(
            err,
            MalformedCurveError::TokenCountMismatch {
                prices: 3,
                quantities: 2
            }
        );
    }

    #[test]
    fn rejects_unparseable_token() {
        let err = DemandCurve::parse("1 two 3\n10 20 30").unwrap_err();
        assert_eq!(
            err,
            MalformedCurveError::BadToken {
                line: "price",
                token: "two".to_string()
            }
        );
    }

    #[test]
    fn rejects_empty_lines() {
        let err = DemandCurve::parse("\n").unwrap_err();
        assert!(matches!(err, MalformedCurveError::WrongLineCount { .. }));
    }

    #[test]
    fn rejects_decreasing_quantities() {
        let err = DemandCurve::parse("1 2 3\n10 30 20").unwrap_err();
        assert_eq!(err, MalformedCurveError::DecreasingQuantities { index: 2 });
    }

    #[test]
    fn accepts_equal_adjacent_quantities() {
        let curve = DemandCurve::new(vec![1.0, 2.0], vec![10.0, 10.0]).unwrap();
        assert_eq!(curve.max_quantity(), 10.0);
    }

    #[test]
    fn new_rejects_empty_arrays() {
        let err = DemandCurve::new(vec![], vec![]).unwrap_err();
        assert_eq!(err, MalformedCurveError::Empty);
    }

    #[test]
    fn single_point_curve_is_valid() {
        let curve = DemandCurve::parse("5\n100").unwrap();
        assert_eq!(curve.len(), 1);
        assert_eq!(curve.min_quantity(), curve.max_quantity());
    }
}
