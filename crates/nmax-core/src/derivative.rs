//! Numerical derivative helpers for the convergence-rate panel.

use crate::effective_pi::EffectivePiSample;
use crate::error::{DomainError, Result};

/// Numerical derivative dy/dx on a (possibly non-uniform) grid.
///
/// Second-order central differences in the interior, first-order one-sided
/// differences at both ends. Fewer than two points yields an empty vector.
pub fn gradient(ys: &[f64], xs: &[f64]) -> Result<Vec<f64>> {
    if ys.len() != xs.len() {
        return Err(DomainError::LengthMismatch {
            left: ys.len(),
            right: xs.len(),
        });
    }
    let n = ys.len();
    if n < 2 {
        return Ok(Vec::new());
    }

    let mut out = Vec::with_capacity(n);
    out.push((ys[1] - ys[0]) / (xs[1] - xs[0]));
    for i in 1..n - 1 {
        let hd = xs[i] - xs[i - 1];
        let hs = xs[i + 1] - xs[i];
        let d = (hd * hd * ys[i + 1] - hs * hs * ys[i - 1] + (hs * hs - hd * hd) * ys[i])
            / (hs * hd * (hd + hs));
        out.push(d);
    }
    out.push((ys[n - 1] - ys[n - 2]) / (xs[n - 1] - xs[n - 2]));
    Ok(out)
}

/// Derivative of the effective-π sequence with respect to N.
pub fn sample_gradient(samples: &[EffectivePiSample]) -> Vec<f64> {
    let ys: Vec<f64> = samples.iter().map(|s| s.value).collect();
    let xs: Vec<f64> = samples.iter().map(|s| f64::from(s.n)).collect();
    // lengths agree by construction
    gradient(&ys, &xs).unwrap_or_default()
}

/// Sample with the smallest |dπ_eff/dN|, ignoring the first `skip` samples
/// where the start-up slope dominates.
///
/// Returns the sample together with its |derivative|.
pub fn flattest_point(samples: &[EffectivePiSample], skip: usize) -> Option<(EffectivePiSample, f64)> {
    let slopes = sample_gradient(samples);
    samples
        .iter()
        .zip(slopes)
        .skip(skip)
        .map(|(s, d)| (*s, d.abs()))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// `count` points evenly spaced in log10 from 10^start_exp to 10^end_exp.
pub fn logspace(start_exp: f64, end_exp: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![10f64.powf(start_exp)],
        _ => {
            let step = (end_exp - start_exp) / (count - 1) as f64;
            (0..count)
                .map(|i| 10f64.powf(start_exp + step * i as f64))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_linear_is_constant() {
        let xs: Vec<f64> = (0..6).map(f64::from).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x - 1.0).collect();
        let g = gradient(&ys, &xs).unwrap();
        assert_eq!(g.len(), 6);
        assert!(g.iter().all(|d| (d - 3.0).abs() < 1e-12), "{g:?}");
    }

    #[test]
    fn test_gradient_quadratic_interior_exact() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 1.0, 4.0, 9.0];
        let g = gradient(&ys, &xs).unwrap();
        // one-sided ends, central interior
        assert_eq!(g, vec![1.0, 2.0, 4.0, 5.0]);
    }

    #[test]
    fn test_gradient_non_uniform_grid() {
        let xs = [0.0, 0.5, 2.0];
        let ys: Vec<f64> = xs.iter().map(|x| x * x).collect();
        let g = gradient(&ys, &xs).unwrap();
        assert!((g[1] - 1.0).abs() < 1e-12, "{g:?}");
    }

    #[test]
    fn test_gradient_short_and_mismatched() {
        assert!(gradient(&[1.0], &[0.0]).unwrap().is_empty());
        assert_eq!(
            gradient(&[1.0, 2.0], &[0.0]),
            Err(DomainError::LengthMismatch { left: 2, right: 1 })
        );
    }

    #[test]
    fn test_flattest_point_skips_prefix() {
        let samples: Vec<EffectivePiSample> = [0.0, 0.0, 5.0, 9.0, 10.0, 10.5]
            .iter()
            .enumerate()
            .map(|(i, &value)| EffectivePiSample {
                n: i as u32,
                value,
            })
            .collect();
        let (s, d) = flattest_point(&samples, 0).unwrap();
        assert_eq!(s.n, 0);
        assert_eq!(d, 0.0);

        let (s, d) = flattest_point(&samples, 2).unwrap();
        assert_eq!(s.n, 5);
        assert!((d - 0.5).abs() < 1e-12);

        assert!(flattest_point(&samples, 6).is_none());
    }

    #[test]
    fn test_logspace_endpoints() {
        let v = logspace(-2.0, 2.0, 5);
        assert_eq!(v.len(), 5);
        assert!((v[0] - 0.01).abs() < 1e-15);
        assert!((v[2] - 1.0).abs() < 1e-12);
        assert!((v[4] - 100.0).abs() < 1e-9);
        assert!(logspace(0.0, 1.0, 0).is_empty());
        let single = logspace(3.0, 9.0, 1);
        assert_eq!(single.len(), 1);
        assert!((single[0] - 1000.0).abs() < 1e-9);
    }
}
