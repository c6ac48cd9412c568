use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::constants::Constants;
use crate::error::{DomainError, Result};

/// Reference radius and growth rate of the segmented spiral.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpiralParams {
    pub r0: f64,
    pub lambda: f64,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            r0: 1.0,
            lambda: 1.0,
        }
    }
}

impl SpiralParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.r0 > 0.0) || !self.r0.is_finite() {
            return Err(DomainError::InvalidParameter {
                name: "r0",
                value: self.r0,
            });
        }
        if !self.lambda.is_finite() {
            return Err(DomainError::InvalidParameter {
                name: "lambda",
                value: self.lambda,
            });
        }
        Ok(())
    }
}

/// Intermediate quantities of one effective-π evaluation at N segments.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentedCircle {
    /// R0 · φ^(-N)
    pub segment_length: f64,
    /// R0 · e^(λN)
    pub radius: f64,
    /// N · segment_length
    pub circumference: f64,
    /// circumference / (2 · radius)
    pub effective_pi: f64,
}

pub fn segmented_circle(constants: &Constants, n: f64, params: SpiralParams) -> SegmentedCircle {
    let segment_length = params.r0 * constants.phi.powf(-n);
    let radius = params.r0 * (params.lambda * n).exp();
    let circumference = n * segment_length;
    SegmentedCircle {
        segment_length,
        radius,
        circumference,
        effective_pi: circumference / (2.0 * radius),
    }
}

/// Effective circle constant at N segments. Defined for every real N.
pub fn effective_pi(constants: &Constants, n: f64, params: SpiralParams) -> f64 {
    segmented_circle(constants, n, params).effective_pi
}

/// One point of the effective-π sequence.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectivePiSample {
    pub n: u32,
    pub value: f64,
}

/// Evaluate effective-π at every integer N in `range`, in ascending order.
pub fn sample_range(
    constants: &Constants,
    params: SpiralParams,
    range: Range<u32>,
) -> Vec<EffectivePiSample> {
    range
        .map(|n| EffectivePiSample {
            n,
            value: effective_pi(constants, f64::from(n), params),
        })
        .collect()
}
