//! Segmentation-limit math.
//!
//! Counts the golden-ratio steps from an initial length scale down to the
//! Planck length, evaluates the effective circle constant of a segmented
//! spiral, and scans that sequence for the point where successive
//! differences fall below a tolerance.
//!
//! Zero I/O: pure functions over an immutable [`Constants`] value.

pub mod analysis;
pub mod constants;
pub mod convergence;
pub mod derivative;
pub mod effective_pi;
pub mod error;
pub mod scales;
pub mod segments;

pub use analysis::{Analysis, AnalysisParams, FlattestSlope, ScanRange, SweepParams};
pub use constants::{Constants, DEFAULT_EPSILON, PHI, TARGET_SEGMENTS};
pub use convergence::{Convergence, ConvergencePoint, scan, successive_differences};
pub use derivative::{flattest_point, gradient, logspace, sample_gradient};
pub use effective_pi::{
    EffectivePiSample, SegmentedCircle, SpiralParams, effective_pi, sample_range, segmented_circle,
};
pub use error::{DomainError, Result};
pub use scales::{ReferenceScale, ScaleKind, reference_scales, target_scale};
pub use segments::{scale_to_segments, segments_to_scale};
