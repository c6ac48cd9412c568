use crate::constants::Constants;
use crate::error::{DomainError, Result};

/// Number of φ-steps from `s0` down to the Planck length.
///
/// Segment length shrinks as s0·φ^(-N); the limit is reached when it equals
/// l_p, so N_max = ln(s0 / l_p) / ln(φ). Scales below l_p give negative
/// counts. No clamping is applied to extreme inputs.
pub fn scale_to_segments(constants: &Constants, s0: f64) -> Result<f64> {
    // `!(s0 > 0)` also rejects NaN
    if !(s0 > 0.0) {
        return Err(DomainError::NonPositiveScale(s0));
    }
    Ok((s0 / constants.planck_length).ln() / constants.ln_phi())
}

/// Inverse of [`scale_to_segments`]: l_p · φ^n.
pub fn segments_to_scale(constants: &Constants, n: f64) -> f64 {
    constants.planck_length * constants.phi.powf(n)
}
