//! Dispatch configuration.
//!
//! Holds the constants of the priority formula.  The defaults reproduce the
//! reference behaviour; applications may load an override from a file when
//! the `serde` feature is enabled.

use crate::{DdError, DdResult};

/// Parameters of the order priority formula:
///
/// ```text
/// priority = value_weight * trunc(value / value_bucket) - time_weight * created_at
/// ```
///
/// The weights are single precision on purpose: ties between priorities are
/// broken by exact floating-point equality, and the reference ordering was
/// produced with `f32` arithmetic.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DispatchConfig {
    /// Weight of the value bucket.  Default: 0.3.
    pub value_weight: f32,

    /// Weight of the creation time.  Default: 0.7.
    pub time_weight: f32,

    /// Order value is divided (truncating) by this before weighting.
    /// Default: 50.
    pub value_bucket: i64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            value_weight: 0.3,
            time_weight:  0.7,
            value_bucket: 50,
        }
    }
}

impl DispatchConfig {
    /// Reject configurations the priority formula cannot evaluate.
    pub fn validate(&self) -> DdResult<()> {
        if self.value_bucket <= 0 {
            return Err(DdError::Config(format!(
                "value_bucket must be > 0, got {}",
                self.value_bucket
            )));
        }
        if !self.value_weight.is_finite() || !self.time_weight.is_finite() {
            return Err(DdError::Config(format!(
                "priority weights must be finite, got value_weight={} time_weight={}",
                self.value_weight, self.time_weight
            )));
        }
        Ok(())
    }
}
