//! Device tilt to gravity vector mapping
//!
//! A `deviceorientation` event carries beta (front-back tilt) and gamma
//! (left-right tilt) in degrees. Both map linearly into a 2D gravity vector,
//! clamped so a phone held past 90 degrees can't fling letters off-screen.

use glam::Vec2;

use crate::consts::{GRAVITY_CLAMP, TILT_FULL_SCALE_DEG};

/// One orientation sensor reading, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltSample {
    /// Front-back tilt (screen toward/away from you), maps to gravity y
    pub beta: f32,
    /// Left-right tilt, maps to gravity x
    pub gamma: f32,
}

impl TiltSample {
    pub fn new(beta: f32, gamma: f32) -> Self {
        Self { beta, gamma }
    }

    /// Samples with NaN/infinite angles are dropped rather than clamped;
    /// the browser reports null angles on some desktops and we map those
    /// to non-finite floats at the binding layer.
    pub fn is_valid(&self) -> bool {
        self.beta.is_finite() && self.gamma.is_finite()
    }
}

/// Map a tilt sample to a gravity vector in clamped tilt units.
///
/// 45 degrees of tilt is one full unit; components are clamped to
/// [-GRAVITY_CLAMP, GRAVITY_CLAMP]. Returns `None` for invalid samples so
/// the caller keeps the previous gravity instead of snapping to zero.
pub fn gravity_from_tilt(sample: TiltSample) -> Option<Vec2> {
    if !sample.is_valid() {
        return None;
    }
    let x = (sample.gamma / TILT_FULL_SCALE_DEG).clamp(-GRAVITY_CLAMP, GRAVITY_CLAMP);
    let y = (sample.beta / TILT_FULL_SCALE_DEG).clamp(-GRAVITY_CLAMP, GRAVITY_CLAMP);
    Some(Vec2::new(x, y))
}
