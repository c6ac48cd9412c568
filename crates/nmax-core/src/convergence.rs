use serde::{Deserialize, Serialize};

use crate::effective_pi::EffectivePiSample;
use crate::error::{DomainError, Result};

/// First sample whose step to its successor falls below the tolerance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConvergencePoint {
    /// Position in the scanned sequence.
    pub index: usize,
    pub n: u32,
    pub value: f64,
    /// |v[index + 1] - v[index]|
    pub difference: f64,
}

/// Outcome of an empirical successive-difference scan.
///
/// `NotConverged` is a valid result, not an error: the scanned range simply
/// never got flat enough.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Convergence {
    Converged(ConvergencePoint),
    NotConverged { samples: usize },
}

impl Convergence {
    pub fn point(&self) -> Option<&ConvergencePoint> {
        match self {
            Convergence::Converged(p) => Some(p),
            Convergence::NotConverged { .. } => None,
        }
    }

    pub fn is_converged(&self) -> bool {
        self.point().is_some()
    }
}

/// |v[i+1] - v[i]| for every adjacent pair. Empty for fewer than two values.
pub fn successive_differences(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| (w[1] - w[0]).abs()).collect()
}

/// Find the smallest index i with |v[i+1] - v[i]| < epsilon.
pub fn scan(samples: &[EffectivePiSample], epsilon: f64) -> Result<Convergence> {
    if !(epsilon > 0.0) || !epsilon.is_finite() {
        return Err(DomainError::InvalidTolerance(epsilon));
    }

    let found = samples
        .windows(2)
        .enumerate()
        .map(|(i, w)| (i, (w[1].value - w[0].value).abs()))
        .find(|&(_, d)| d < epsilon);

    Ok(match found {
        Some((index, difference)) => Convergence::Converged(ConvergencePoint {
            index,
            n: samples[index].n,
            value: samples[index].value,
            difference,
        }),
        None => Convergence::NotConverged {
            samples: samples.len(),
        },
    })
}
