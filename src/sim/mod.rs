//! Deterministic simulation module
//!
//! Both demo variants live here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (layout jitter)
//! - Stable iteration order (by body ID)
//! - No rendering or platform dependencies

pub mod body;
pub mod contact;
pub mod gravity;
pub mod letters;
pub mod world;

pub use body::CircleBody;
pub use contact::{Contact, circle_circle_contact, circle_wall_contacts};
pub use gravity::{TiltSample, gravity_from_tilt};
pub use letters::LetterField;
pub use world::{RigidLetters, World};

use glam::Vec2;

/// One rendered glyph for the current frame.
///
/// `x`/`y` are the top-left corner of the glyph box in container coordinates;
/// `angle` is radians (always 0.0 for the point-mass variant).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPose {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub glyph: char,
}

/// A demo simulation, either variant, stepped once per fixed timestep.
pub enum LetterSim {
    Points(LetterField),
    Rigid(RigidLetters),
}

impl LetterSim {
    /// Advance one fixed timestep under the given gravity vector.
    ///
    /// `gravity` is in clamped tilt units (see [`gravity_from_tilt`]), not
    /// pixels per second squared; each variant applies its own scale.
    pub fn step(&mut self, gravity: Vec2, dt: f32) {
        match self {
            LetterSim::Points(field) => field.step(gravity),
            LetterSim::Rigid(rigid) => rigid.step(gravity, dt),
        }
    }

    /// Current glyph poses, one per letter, in spawn order.
    pub fn poses(&self) -> Vec<GlyphPose> {
        match self {
            LetterSim::Points(field) => field.poses(),
            LetterSim::Rigid(rigid) => rigid.poses(),
        }
    }
}
