//! Point-mass letter field (the hand-rolled Euler variant)
//!
//! Each glyph is a point with position and velocity, integrated once per
//! fixed 60 Hz step. Constants are in pixels per step: accelerate by
//! gravity, damp, integrate, then clamp against the container walls with a
//! bounce coefficient.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::GlyphPose;
use crate::consts::*;
use crate::settings::Tuning;

/// A single simulated letter
#[derive(Debug, Clone, Copy)]
pub struct Letter {
    pub glyph: char,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// All letters of the demo text plus the physics constants that drive them.
#[derive(Debug, Clone)]
pub struct LetterField {
    letters: Vec<Letter>,
    /// Acceleration per step per tilt unit (px/step^2)
    gravity_strength: f32,
    /// Velocity retained each step
    friction: f32,
    /// Wall restitution
    bounce: f32,
}

impl LetterField {
    /// Lay the text out in a row with a seeded vertical jitter per glyph.
    pub fn new(text: &str, seed: u64, tuning: &Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let letters = text
            .chars()
            .enumerate()
            .map(|(i, glyph)| Letter {
                glyph,
                pos: Vec2::new(
                    LAYOUT_START_X + i as f32 * LAYOUT_SPACING,
                    LAYOUT_START_Y + rng.random_range(0.0..LAYOUT_JITTER_Y),
                ),
                vel: Vec2::ZERO,
            })
            .collect();

        Self {
            letters,
            gravity_strength: tuning.gravity_strength,
            friction: tuning.friction,
            bounce: tuning.bounce,
        }
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    /// Advance one fixed step under `gravity` (clamped tilt units).
    ///
    /// Wall handling clamps the position to the container and reflects the
    /// offending velocity component scaled by the bounce coefficient, so a
    /// letter can never end a step outside the box.
    pub fn step(&mut self, gravity: Vec2) {
        let max_x = CONTAINER_WIDTH - LETTER_SIZE;
        let max_y = CONTAINER_HEIGHT - LETTER_SIZE;

        for letter in &mut self.letters {
            letter.vel += gravity * self.gravity_strength;
            letter.vel *= self.friction;
            letter.pos += letter.vel;

            if letter.pos.x < 0.0 {
                letter.pos.x = 0.0;
                letter.vel.x *= -self.bounce;
            }
            if letter.pos.x > max_x {
                letter.pos.x = max_x;
                letter.vel.x *= -self.bounce;
            }
            if letter.pos.y < 0.0 {
                letter.pos.y = 0.0;
                letter.vel.y *= -self.bounce;
            }
            if letter.pos.y > max_y {
                letter.pos.y = max_y;
                letter.vel.y *= -self.bounce;
            }
        }
    }

    /// Glyph poses in spawn order. Point letters never rotate.
    pub fn poses(&self) -> Vec<GlyphPose> {
        self.letters
            .iter()
            .map(|l| GlyphPose {
                x: l.pos.x,
                y: l.pos.y,
                angle: 0.0,
                glyph: l.glyph,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field() -> LetterField {
        LetterField::new(DEMO_TEXT, 42, &Tuning::default())
    }

    fn in_bounds(field: &LetterField) -> bool {
        field.letters().iter().all(|l| {
            l.pos.x >= 0.0
                && l.pos.x <= CONTAINER_WIDTH - LETTER_SIZE
                && l.pos.y >= 0.0
                && l.pos.y <= CONTAINER_HEIGHT - LETTER_SIZE
        })
    }

    #[test]
    fn test_layout_is_deterministic_for_seed() {
        let a = LetterField::new(DEMO_TEXT, 7, &Tuning::default());
        let b = LetterField::new(DEMO_TEXT, 7, &Tuning::default());
        for (la, lb) in a.letters().iter().zip(b.letters()) {
            assert_eq!(la.pos, lb.pos);
            assert_eq!(la.glyph, lb.glyph);
        }
    }

    #[test]
    fn test_layout_row_and_jitter() {
        let f = field();
        assert_eq!(f.len(), DEMO_TEXT.chars().count());
        for (i, l) in f.letters().iter().enumerate() {
            assert_eq!(l.pos.x, LAYOUT_START_X + i as f32 * LAYOUT_SPACING);
            assert!(l.pos.y >= LAYOUT_START_Y);
            assert!(l.pos.y < LAYOUT_START_Y + LAYOUT_JITTER_Y);
        }
    }

    #[test]
    fn test_letters_settle_on_floor_under_downward_gravity() {
        let mut f = field();
        for _ in 0..2000 {
            f.step(Vec2::new(0.0, 1.0));
        }
        assert!(in_bounds(&f));
        for l in f.letters() {
            assert!((l.pos.y - (CONTAINER_HEIGHT - LETTER_SIZE)).abs() < 1.0);
            assert!(l.vel.length() < 5.0);
        }
    }

    #[test]
    fn test_velocity_decays_under_zero_gravity() {
        let mut f = field();
        // Kick everything, then let damping do its thing
        for _ in 0..10 {
            f.step(Vec2::new(1.5, -1.5));
        }
        let speed_before: f32 = f.letters().iter().map(|l| l.vel.length()).sum();
        for _ in 0..300 {
            f.step(Vec2::ZERO);
        }
        let speed_after: f32 = f.letters().iter().map(|l| l.vel.length()).sum();
        assert!(speed_before > 0.0);
        assert!(speed_after < speed_before * 0.01);
    }

    #[test]
    fn test_wall_bounce_reflects_velocity() {
        let mut f = field();
        // Slam everything into the right wall
        for _ in 0..200 {
            f.step(Vec2::new(2.0, 0.0));
        }
        assert!(in_bounds(&f));
        // Flip gravity; letters must come back off the wall
        for _ in 0..200 {
            f.step(Vec2::new(-2.0, 0.0));
        }
        assert!(in_bounds(&f));
        for l in f.letters() {
            assert!(l.pos.x < CONTAINER_WIDTH - LETTER_SIZE);
        }
    }

    proptest! {
        #[test]
        fn prop_positions_stay_bounded(
            seed in any::<u64>(),
            steps in 1usize..400,
            gx in -2.0f32..2.0,
            gy in -2.0f32..2.0,
        ) {
            let mut f = LetterField::new(DEMO_TEXT, seed, &Tuning::default());
            let g = Vec2::new(gx, gy);
            for _ in 0..steps {
                f.step(g);
            }
            prop_assert!(in_bounds(&f));
        }
    }
}
