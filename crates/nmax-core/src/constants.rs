use serde::{Deserialize, Serialize};

/// Golden ratio: (1 + √5) / 2
pub const PHI: f64 = 1.618_033_988_749_895;

/// Reduced Planck constant ħ (J·s), CODATA 2018
pub const HBAR: f64 = 1.054_571_817e-34;

/// Newtonian constant of gravitation G (m³ kg⁻¹ s⁻²), CODATA 2018
pub const G: f64 = 6.674_30e-11;

/// Speed of light in vacuum c (m/s), exact
pub const C: f64 = 299_792_458.0;

/// Solar mass (kg)
pub const SOLAR_MASS: f64 = 1.989e30;

/// Electron rest mass (kg)
pub const ELECTRON_MASS: f64 = 9.109e-31;

/// Convergence tolerance for successive effective-π differences
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Segment count whose scale the proof reconstructs
pub const TARGET_SEGMENTS: f64 = 42.0;

/// Fixed constants shared by every computation in a run.
///
/// Built once at startup and handed out by reference; nothing mutates it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Constants {
    /// Golden ratio φ, always > 1.
    pub phi: f64,
    /// Planck length l_p = sqrt(ħG/c³) in metres, always > 0.
    pub planck_length: f64,
    /// Classical circle constant.
    pub pi: f64,
}

impl Constants {
    /// Constants derived from CODATA values.
    pub fn physical() -> Self {
        Self {
            phi: (1.0 + 5f64.sqrt()) / 2.0,
            planck_length: planck_length(HBAR, G, C),
            pi: std::f64::consts::PI,
        }
    }

    /// ln(φ), the step size of one segment on a log scale.
    pub fn ln_phi(&self) -> f64 {
        self.phi.ln()
    }
}

impl Default for Constants {
    fn default() -> Self {
        Self::physical()
    }
}

/// sqrt(ħG/c³)
pub fn planck_length(hbar: f64, g: f64, c: f64) -> f64 {
    (hbar * g / c.powi(3)).sqrt()
}
