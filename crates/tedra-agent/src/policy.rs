use thiserror::Error;

use tedra_models::{DemandCurve, ShedTier};

/// Fraction of the curve's quantity span covered by each shed band.
pub const CUTOFF_FRACTION: f64 = 0.3;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolicyInvariantViolation {
    #[error("shed partition degenerates: big-shed bound {bound_c} does not sit above the curve floor {min_quantity}")]
    DegeneratePartition { bound_c: f64, min_quantity: f64 },

    #[error("clearing quantity {0} is not positive in the big-shed branch")]
    NonPositiveClearingQuantity(f64),
}

/// Maps a clearing quantity to a discrete shed tier, relative to this
/// agent's own demand curve.
///
/// Three equal-width bands, each 30% of the quantity span, descend from the
/// curve's maximum quantity. The partition is curve-relative rather than an
/// absolute threshold: agents with different-sized curves shed comparable
/// fractions of their own range at the same relative clearing point.
#[derive(Debug, Default, Clone, Copy)]
pub struct SheddingPolicy;

impl SheddingPolicy {
    pub fn compute_tier(
        &self,
        curve: &DemandCurve,
        clearing_quantity: f64,
    ) -> Result<ShedTier, PolicyInvariantViolation> {
        let max_q = curve.max_quantity();
        let min_q = curve.min_quantity();
        let step = (max_q - min_q) * CUTOFF_FRACTION;
        let bound_a = max_q - step;
        let bound_b = bound_a - step;
        let bound_c = bound_b - step;

        // The partition must leave a non-degenerate big-shed region above
        // the curve's floor. A violation is a configuration defect, not a
        // recoverable runtime condition.
        if bound_c <= min_q {
            return Err(PolicyInvariantViolation::DegeneratePartition {
                bound_c,
                min_quantity: min_q,
            });
        }

        // First match wins, evaluated top tier down.
        let tier = if clearing_quantity > bound_a {
            ShedTier::NoShed
        } else if clearing_quantity > bound_b {
            ShedTier::SmallShed
        } else if clearing_quantity > bound_c {
            ShedTier::MediumShed
        } else if clearing_quantity > 0.0 {
            ShedTier::BigShed
        } else {
            // A non-positive clearing quantity reaching the final branch is
            // a state-machine violation upstream.
            return Err(PolicyInvariantViolation::NonPositiveClearingQuantity(
                clearing_quantity,
            ));
        };

        tracing::debug!(
            bound_a,
            bound_b,
            bound_c,
            clearing_quantity,
            tier = tier.ordinal(),
            "Computed shed tier"
        );
        Ok(tier)
    }
}
