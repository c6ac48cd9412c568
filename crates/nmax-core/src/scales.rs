use serde::{Deserialize, Serialize};

use crate::constants::{C, Constants, ELECTRON_MASS, G, HBAR, SOLAR_MASS};
use crate::error::Result;
use crate::segments::{scale_to_segments, segments_to_scale};

/// Which physical length a reference scale stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleKind {
    Schwarzschild,
    Compton,
    Classical,
    Typical,
    Target,
}

impl ScaleKind {
    pub fn label(self) -> &'static str {
        match self {
            ScaleKind::Schwarzschild => "Schwarzschild Radius (Sun)",
            ScaleKind::Compton => "Compton Wavelength (Electron)",
            ScaleKind::Classical => "Classical Radius",
            ScaleKind::Typical => "Typical Curvature Scale (geometric mean)",
            ScaleKind::Target => "Target Scale (l_p × φ^N)",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            ScaleKind::Schwarzschild => "Schwarzschild",
            ScaleKind::Compton => "Compton",
            ScaleKind::Classical => "classical 1m",
            ScaleKind::Typical => "typical",
            ScaleKind::Target => "target",
        }
    }
}

/// An initial scale s0 together with its segment count.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceScale {
    pub kind: ScaleKind,
    /// Metres.
    pub s0: f64,
    pub n_max: f64,
}

impl ReferenceScale {
    pub fn new(constants: &Constants, kind: ScaleKind, s0: f64) -> Result<Self> {
        Ok(Self {
            kind,
            s0,
            n_max: scale_to_segments(constants, s0)?,
        })
    }
}

/// 2GM/c²
pub fn schwarzschild_radius(mass: f64) -> f64 {
    2.0 * G * mass / (C * C)
}

/// ħ/(mc)
pub fn compton_wavelength(mass: f64) -> f64 {
    HBAR / (mass * C)
}

/// The four physical scales, in report order.
pub fn reference_scales(constants: &Constants) -> Result<Vec<ReferenceScale>> {
    let schwarzschild = schwarzschild_radius(SOLAR_MASS);
    let compton = compton_wavelength(ELECTRON_MASS);
    [
        (ScaleKind::Schwarzschild, schwarzschild),
        (ScaleKind::Compton, compton),
        (ScaleKind::Classical, 1.0),
        (ScaleKind::Typical, (schwarzschild * compton).sqrt()),
    ]
    .into_iter()
    .map(|(kind, s0)| ReferenceScale::new(constants, kind, s0))
    .collect()
}

/// The scale l_p · φ^n, with N_max recomputed through the forward formula.
pub fn target_scale(constants: &Constants, n: f64) -> Result<ReferenceScale> {
    ReferenceScale::new(constants, ScaleKind::Target, segments_to_scale(constants, n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schwarzschild_sun_about_3km() {
        let r = schwarzschild_radius(SOLAR_MASS);
        assert!((r - 2954.1).abs() < 0.1, "got {r}");
    }

    #[test]
    fn test_compton_electron() {
        let l = compton_wavelength(ELECTRON_MASS);
        assert!((l - 3.8618e-13).abs() < 1e-16, "got {l:e}");
    }

    #[test]
    fn test_reference_scale_order_and_values() {
        let c = Constants::physical();
        let scales = reference_scales(&c).unwrap();
        let kinds: Vec<ScaleKind> = scales.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ScaleKind::Schwarzschild,
                ScaleKind::Compton,
                ScaleKind::Classical,
                ScaleKind::Typical
            ]
        );
        assert!((scales[0].n_max - 183.08).abs() < 0.01);
        assert!((scales[1].n_max - 107.08).abs() < 0.01);
        assert!((scales[2].n_max - 166.48).abs() < 0.01);
        // geometric mean sits halfway in segment space
        let mid = (scales[0].n_max + scales[1].n_max) / 2.0;
        assert!((scales[3].n_max - mid).abs() < 1e-9);
    }

    #[test]
    fn test_target_scale_42() {
        let c = Constants::physical();
        let t = target_scale(&c, 42.0).unwrap();
        assert_eq!(t.kind, ScaleKind::Target);
        assert!((t.n_max - 42.0).abs() < 1e-9);
        assert!((t.s0 - 9.6826e-27).abs() < 1e-30, "got {:e}", t.s0);
    }
}
