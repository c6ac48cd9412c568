//! One complete run: reference scales, target scale, effective-π sequence,
//! convergence scan and derivative analysis, bundled as an immutable value.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::constants::{Constants, DEFAULT_EPSILON, TARGET_SEGMENTS};
use crate::convergence::{Convergence, scan};
use crate::derivative::{flattest_point, logspace, sample_gradient};
use crate::effective_pi::{EffectivePiSample, SpiralParams, sample_range};
use crate::error::{DomainError, Result};
use crate::scales::{ReferenceScale, ScaleKind, reference_scales, target_scale};
use crate::segments::scale_to_segments;

/// Half-open integer range of segment counts to sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanRange {
    pub start: u32,
    pub end: u32,
}

impl Default for ScanRange {
    fn default() -> Self {
        Self { start: 1, end: 100 }
    }
}

impl ScanRange {
    pub fn range(&self) -> Range<u32> {
        self.start..self.end
    }

    /// Last N actually sampled, if any.
    pub fn last(&self) -> Option<u32> {
        (self.end > self.start).then(|| self.end - 1)
    }
}

/// Log-spaced s0 grid for the N_max-vs-scale curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepParams {
    pub start_exp: f64,
    pub end_exp: f64,
    pub points: usize,
}

impl Default for SweepParams {
    fn default() -> Self {
        Self {
            start_exp: -40.0,
            end_exp: 5.0,
            points: 1000,
        }
    }
}

/// Tunable inputs of a run. Every field has a reference default.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisParams {
    pub epsilon: f64,
    pub scan: ScanRange,
    pub spiral: SpiralParams,
    pub target_segments: f64,
    /// Leading samples ignored when searching for the flattest slope.
    pub derivative_skip: usize,
    pub sweep: SweepParams,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            scan: ScanRange::default(),
            spiral: SpiralParams::default(),
            target_segments: TARGET_SEGMENTS,
            derivative_skip: 10,
            sweep: SweepParams::default(),
        }
    }
}

impl AnalysisParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon > 0.0) || !self.epsilon.is_finite() {
            return Err(DomainError::InvalidTolerance(self.epsilon));
        }
        self.spiral.validate()?;
        if !self.target_segments.is_finite() {
            return Err(DomainError::InvalidParameter {
                name: "target_segments",
                value: self.target_segments,
            });
        }
        if self.sweep.points < 2 {
            return Err(DomainError::InvalidParameter {
                name: "sweep.points",
                value: self.sweep.points as f64,
            });
        }
        if !(self.sweep.end_exp > self.sweep.start_exp) {
            return Err(DomainError::InvalidParameter {
                name: "sweep.end_exp",
                value: self.sweep.end_exp,
            });
        }
        Ok(())
    }
}

/// Sample with the smallest |dπ_eff/dN| past the skipped prefix.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlattestSlope {
    pub n: u32,
    pub abs_derivative: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct Analysis {
    pub constants: Constants,
    pub params: AnalysisParams,
    pub reference_scales: Vec<ReferenceScale>,
    pub target: ReferenceScale,
    pub samples: Vec<EffectivePiSample>,
    pub convergence: Convergence,
    /// dπ_eff/dN at each sample.
    pub derivative: Vec<f64>,
    pub flattest: Option<FlattestSlope>,
    /// (s0, N_max) pairs over the log-spaced sweep.
    #[serde(skip)]
    pub scale_sweep: Vec<(f64, f64)>,
}

impl Analysis {
    pub fn run(constants: &Constants, params: &AnalysisParams) -> Result<Self> {
        params.validate()?;

        let reference_scales = reference_scales(constants)?;
        let target = target_scale(constants, params.target_segments)?;

        let samples = sample_range(constants, params.spiral, params.scan.range());
        let convergence = scan(&samples, params.epsilon)?;
        let derivative = sample_gradient(&samples);
        let flattest = flattest_point(&samples, params.derivative_skip).map(|(s, d)| {
            FlattestSlope {
                n: s.n,
                abs_derivative: d,
            }
        });

        let scale_sweep = logspace(params.sweep.start_exp, params.sweep.end_exp, params.sweep.points)
            .into_iter()
            .map(|s0| scale_to_segments(constants, s0).map(|n| (s0, n)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            constants: *constants,
            params: *params,
            reference_scales,
            target,
            samples,
            convergence,
            derivative,
            flattest,
            scale_sweep,
        })
    }

    pub fn scale(&self, kind: ScaleKind) -> Option<&ReferenceScale> {
        self.reference_scales.iter().find(|s| s.kind == kind)
    }

    /// |π_eff(N) - π| for each sample.
    pub fn error_to_classical(&self) -> Vec<(u32, f64)> {
        self.samples
            .iter()
            .map(|s| (s.n, (s.value - self.constants.pi).abs()))
            .collect()
    }
}
