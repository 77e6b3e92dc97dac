//! Circle rigid body
//!
//! The rigid variant treats each glyph as a solid disc. Only circles exist,
//! so the inertia tensor is the scalar I = m r^2 / 2 and contact geometry
//! stays trivial; the interesting part is the impulse response.

use glam::Vec2;

/// A dynamic circle body.
///
/// Inverse mass/inertia are stored so static geometry could use zero, though
/// in this demo every body is dynamic and the walls are handled separately.
#[derive(Debug, Clone, Copy)]
pub struct CircleBody {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Orientation (radians)
    pub angle: f32,
    pub angular_vel: f32,
    pub radius: f32,
    pub inv_mass: f32,
    pub inv_inertia: f32,
    /// Bounciness, 0 = dead, 1 = fully elastic
    pub restitution: f32,
    /// Coulomb friction coefficient
    pub friction: f32,
}

impl CircleBody {
    pub fn new(id: u32, pos: Vec2, radius: f32, restitution: f32, friction: f32) -> Self {
        // Unit density; mass only matters relative to the other letters
        let mass = std::f32::consts::PI * radius * radius;
        let inertia = 0.5 * mass * radius * radius;
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
            angular_vel: 0.0,
            radius,
            inv_mass: 1.0 / mass,
            inv_inertia: 1.0 / inertia,
            restitution: restitution.clamp(0.0, 1.0),
            friction: friction.max(0.0),
        }
    }

    /// Velocity of the body surface at a world-space point.
    #[inline]
    pub fn velocity_at(&self, point: Vec2) -> Vec2 {
        let r = point - self.pos;
        // v + omega x r in 2D
        self.vel + Vec2::new(-self.angular_vel * r.y, self.angular_vel * r.x)
    }

    /// Apply an impulse at a world-space point (linear + angular response).
    pub fn apply_impulse(&mut self, impulse: Vec2, point: Vec2) {
        let r = point - self.pos;
        self.vel += impulse * self.inv_mass;
        self.angular_vel += self.inv_inertia * r.perp_dot(impulse);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_central_impulse_is_purely_linear() {
        let mut body = CircleBody::new(1, Vec2::ZERO, 20.0, 0.6, 0.2);
        body.apply_impulse(Vec2::new(100.0, 0.0), Vec2::ZERO);
        assert!(body.vel.x > 0.0);
        assert_eq!(body.vel.y, 0.0);
        assert_eq!(body.angular_vel, 0.0);
    }

    #[test]
    fn test_offset_impulse_spins_the_body() {
        let mut body = CircleBody::new(1, Vec2::ZERO, 20.0, 0.6, 0.2);
        // Push tangentially at the top edge: should spin clockwise
        body.apply_impulse(Vec2::new(100.0, 0.0), Vec2::new(0.0, 20.0));
        assert!(body.angular_vel < 0.0);
    }

    #[test]
    fn test_surface_velocity_includes_spin() {
        let mut body = CircleBody::new(1, Vec2::ZERO, 10.0, 0.6, 0.2);
        body.angular_vel = 1.0;
        let v = body.velocity_at(Vec2::new(10.0, 0.0));
        // omega x r for r = (10, 0), omega = 1 is (0, 10)
        assert!((v.y - 10.0).abs() < 1e-6);
        assert!(v.x.abs() < 1e-6);
    }
}
