//! Lambert-sphere phase law shared by lunar reflection and Earthshine.

use std::f64::consts::PI;

use qtty::Radians;

/// Angles closer than this to 0 or π take the analytic limit.
pub const PHASE_EPSILON: f64 = 1e-4;

/// Fraction of a sphere's full-phase brightness seen at phase angle `angle`.
///
/// `f(x) = 1 − sin(x/2)·tan(x/2)·ln(1/tan(x/4))`
///
/// The expression is `0·∞` at both ends, so within [`PHASE_EPSILON`] of 0 it
/// returns 1 and within [`PHASE_EPSILON`] of π it returns 0. The result is
/// clamped to `[0, 1]`.
pub fn phase_illumination(angle: Radians) -> f64 {
    let x = angle.value();
    if x < PHASE_EPSILON {
        return 1.0;
    }
    if x > PI - PHASE_EPSILON {
        return 0.0;
    }

    let half = x / 2.0;
    let f = 1.0 - half.sin() * half.tan() * (1.0 / (x / 4.0).tan()).ln();
    f.clamp(0.0, 1.0)
}
