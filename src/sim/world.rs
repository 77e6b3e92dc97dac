//! Rigid-body world (the solver-backed variant)
//!
//! A minimal sequential-impulse world: integrate, generate contacts, resolve
//! them over a few iterations, clamp to the container. Seven circle letters
//! make the O(n^2) broadphase a non-issue.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::GlyphPose;
use super::body::CircleBody;
use super::contact::{circle_circle_contact, circle_wall_contacts, resolve_pair, resolve_wall};
use crate::consts::*;
use crate::settings::Tuning;

/// Physics world holding the circle bodies and solver parameters.
#[derive(Debug, Clone)]
pub struct World {
    /// Bodies in id order; never reordered, so iteration is deterministic
    bodies: Vec<CircleBody>,
    /// px/s^2 per tilt unit
    gravity_scale: f32,
    /// Linear velocity damping per second
    air_damping: f32,
    solver_iterations: u32,
}

impl World {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            bodies: Vec::new(),
            gravity_scale: tuning.gravity_scale,
            air_damping: tuning.air_damping,
            solver_iterations: tuning.solver_iterations.max(1),
        }
    }

    pub fn add_body(&mut self, body: CircleBody) {
        self.bodies.push(body);
    }

    pub fn bodies(&self) -> &[CircleBody] {
        &self.bodies
    }

    /// Advance the world by `dt` seconds under `gravity` (clamped tilt units).
    pub fn step(&mut self, gravity: Vec2, dt: f32) {
        let accel = gravity * self.gravity_scale;
        let damping = (1.0 - self.air_damping * dt).max(0.0);

        for body in &mut self.bodies {
            body.vel += accel * dt;
            body.vel *= damping;
            body.angular_vel *= damping;
            body.pos += body.vel * dt;
            body.angle += body.angular_vel * dt;
        }

        // Contacts are regenerated each iteration because positional
        // correction moves bodies between passes.
        for _ in 0..self.solver_iterations {
            let n = self.bodies.len();
            for i in 0..n {
                let (head, tail) = self.bodies.split_at_mut(i + 1);
                let a = &mut head[i];
                for b in tail.iter_mut() {
                    if let Some(contact) = circle_circle_contact(a, b) {
                        resolve_pair(a, b, &contact);
                    }
                }
            }
            for body in &mut self.bodies {
                for contact in circle_wall_contacts(body) {
                    resolve_wall(body, &contact);
                }
            }
        }

        // Correction is fractional, so finish with a hard clamp: no body ends
        // a step outside the container.
        for body in &mut self.bodies {
            let r = body.radius;
            body.pos.x = body.pos.x.clamp(r, CONTAINER_WIDTH - r);
            body.pos.y = body.pos.y.clamp(r, CONTAINER_HEIGHT - r);
        }
    }
}

/// The demo text as one circle body per glyph.
#[derive(Debug, Clone)]
pub struct RigidLetters {
    world: World,
    glyphs: Vec<char>,
}

impl RigidLetters {
    /// Same row layout as the point variant, with each glyph box wrapped in
    /// a disc of half the letter size.
    pub fn new(text: &str, seed: u64, tuning: &Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut world = World::new(tuning);
        let radius = LETTER_SIZE / 2.0;

        let glyphs: Vec<char> = text.chars().collect();
        for (i, _) in glyphs.iter().enumerate() {
            let top_left = Vec2::new(
                LAYOUT_START_X + i as f32 * LAYOUT_SPACING,
                LAYOUT_START_Y + rng.random_range(0.0..LAYOUT_JITTER_Y),
            );
            world.add_body(CircleBody::new(
                i as u32 + 1,
                top_left + Vec2::splat(radius),
                radius,
                tuning.restitution,
                tuning.body_friction,
            ));
        }

        Self { world, glyphs }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn step(&mut self, gravity: Vec2, dt: f32) {
        self.world.step(gravity, dt);
    }

    /// Glyph poses in spawn order, converting body centers back to the
    /// top-left corner convention the renderer uses.
    pub fn poses(&self) -> Vec<GlyphPose> {
        self.world
            .bodies()
            .iter()
            .zip(&self.glyphs)
            .map(|(body, &glyph)| GlyphPose {
                x: body.pos.x - body.radius,
                y: body.pos.y - body.radius,
                angle: body.angle,
                glyph,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rigid() -> RigidLetters {
        RigidLetters::new(DEMO_TEXT, 42, &Tuning::default())
    }

    fn in_bounds(world: &World) -> bool {
        world.bodies().iter().all(|b| {
            b.pos.x >= b.radius
                && b.pos.x <= CONTAINER_WIDTH - b.radius
                && b.pos.y >= b.radius
                && b.pos.y <= CONTAINER_HEIGHT - b.radius
        })
    }

    fn kinetic_energy(world: &World) -> f32 {
        world
            .bodies()
            .iter()
            .map(|b| {
                let m = 1.0 / b.inv_mass;
                let i = 1.0 / b.inv_inertia;
                0.5 * m * b.vel.length_squared() + 0.5 * i * b.angular_vel * b.angular_vel
            })
            .sum()
    }

    #[test]
    fn test_bodies_stay_inside_container() {
        let mut r = rigid();
        for _ in 0..600 {
            r.step(Vec2::new(0.0, 2.0), SIM_DT);
        }
        assert!(in_bounds(r.world()));
    }

    #[test]
    fn test_letters_pile_up_without_overlap() {
        let mut r = rigid();
        for _ in 0..1200 {
            r.step(Vec2::new(0.0, 1.0), SIM_DT);
        }
        let bodies = r.world().bodies();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let dist = (bodies[i].pos - bodies[j].pos).length();
                let min_dist = bodies[i].radius + bodies[j].radius;
                // Resting overlap stays within the solver's tolerance
                assert!(dist > min_dist - 2.0, "bodies {i} and {j} overlap: {dist}");
            }
        }
    }

    #[test]
    fn test_energy_decays_under_zero_gravity() {
        let mut r = rigid();
        // Kick the pile, then coast
        for _ in 0..30 {
            r.step(Vec2::new(2.0, -1.5), SIM_DT);
        }
        let before = kinetic_energy(r.world());
        for _ in 0..1200 {
            r.step(Vec2::ZERO, SIM_DT);
        }
        let after = kinetic_energy(r.world());
        assert!(before > 0.0);
        assert!(after < before);
    }

    #[test]
    fn test_poses_keep_spawn_order_and_glyphs() {
        let mut r = rigid();
        for _ in 0..120 {
            r.step(Vec2::new(0.5, 1.0), SIM_DT);
        }
        let poses = r.poses();
        let expected: Vec<char> = DEMO_TEXT.chars().collect();
        let got: Vec<char> = poses.iter().map(|p| p.glyph).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_tumbling_letters_report_rotation() {
        let mut r = rigid();
        // Sideways gravity drags letters along the floor; friction spins them
        for _ in 0..600 {
            r.step(Vec2::new(0.0, 1.0), SIM_DT);
        }
        for _ in 0..600 {
            r.step(Vec2::new(1.5, 1.0), SIM_DT);
        }
        let spun = r.poses().iter().any(|p| p.angle.abs() > 0.01);
        assert!(spun);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]
        #[test]
        fn prop_bodies_stay_bounded(
            seed in any::<u64>(),
            steps in 1usize..240,
            gx in -2.0f32..2.0,
            gy in -2.0f32..2.0,
        ) {
            let mut r = RigidLetters::new(DEMO_TEXT, seed, &Tuning::default());
            let g = Vec2::new(gx, gy);
            for _ in 0..steps {
                r.step(g, SIM_DT);
            }
            prop_assert!(in_bounds(r.world()));
        }
    }
}
