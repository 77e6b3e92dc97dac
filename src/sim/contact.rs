//! Contact generation and impulse resolution for circle bodies
//!
//! Only two contact shapes exist: circle-vs-circle and circle-vs-wall (the
//! four axis-aligned container walls). Normals always point in the direction
//! the circle (body `b` for pairs) should be pushed to separate.

use glam::Vec2;

use super::body::CircleBody;
use crate::consts::{CONTAINER_HEIGHT, CONTAINER_WIDTH};

/// Allowed overlap before positional correction kicks in (px)
const PENETRATION_SLOP: f32 = 0.01;
/// Fraction of the remaining penetration corrected per solver iteration
const CORRECTION_PERCENT: f32 = 0.2;
/// Closing speeds below this get no restitution, so stacks can rest (px/s)
const RESTING_SPEED: f32 = 1.0;

/// A single contact point between a body and another body or a wall.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Separation direction for the (second) body
    pub normal: Vec2,
    pub penetration: f32,
    /// World-space contact point
    pub point: Vec2,
}

/// Overlap test between two circles.
///
/// The normal points from `a` toward `b`; concentric circles get an
/// arbitrary fixed normal so the solver can still separate them.
pub fn circle_circle_contact(a: &CircleBody, b: &CircleBody) -> Option<Contact> {
    let delta = b.pos - a.pos;
    let dist_sq = delta.length_squared();
    let min_dist = a.radius + b.radius;
    if dist_sq >= min_dist * min_dist {
        return None;
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > 1e-6 {
        delta / dist
    } else {
        Vec2::X
    };

    Some(Contact {
        normal,
        penetration: min_dist - dist,
        point: a.pos + normal * a.radius,
    })
}

/// Contacts between a circle and the container walls (up to two at once,
/// e.g. resting in a corner).
pub fn circle_wall_contacts(body: &CircleBody) -> Vec<Contact> {
    let mut contacts = Vec::new();
    let r = body.radius;

    if body.pos.x - r < 0.0 {
        contacts.push(Contact {
            normal: Vec2::X,
            penetration: r - body.pos.x,
            point: Vec2::new(0.0, body.pos.y),
        });
    }
    if body.pos.x + r > CONTAINER_WIDTH {
        contacts.push(Contact {
            normal: -Vec2::X,
            penetration: body.pos.x + r - CONTAINER_WIDTH,
            point: Vec2::new(CONTAINER_WIDTH, body.pos.y),
        });
    }
    if body.pos.y - r < 0.0 {
        contacts.push(Contact {
            normal: Vec2::Y,
            penetration: r - body.pos.y,
            point: Vec2::new(body.pos.x, 0.0),
        });
    }
    if body.pos.y + r > CONTAINER_HEIGHT {
        contacts.push(Contact {
            normal: -Vec2::Y,
            penetration: body.pos.y + r - CONTAINER_HEIGHT,
            point: Vec2::new(body.pos.x, CONTAINER_HEIGHT),
        });
    }

    contacts
}

/// Resolve a body-body contact with restitution and Coulomb friction.
pub fn resolve_pair(a: &mut CircleBody, b: &mut CircleBody, contact: &Contact) {
    let n = contact.normal;
    let rv = b.velocity_at(contact.point) - a.velocity_at(contact.point);
    let vel_n = rv.dot(n);

    // Already separating
    if vel_n > 0.0 {
        return;
    }

    let ra = contact.point - a.pos;
    let rb = contact.point - b.pos;
    let ra_n = ra.perp_dot(n);
    let rb_n = rb.perp_dot(n);
    let inv_mass_n =
        a.inv_mass + b.inv_mass + a.inv_inertia * ra_n * ra_n + b.inv_inertia * rb_n * rb_n;

    let e = if -vel_n < RESTING_SPEED {
        0.0
    } else {
        a.restitution.min(b.restitution)
    };
    let jn = -(1.0 + e) * vel_n / inv_mass_n;
    let normal_impulse = n * jn;
    a.apply_impulse(-normal_impulse, contact.point);
    b.apply_impulse(normal_impulse, contact.point);

    // Friction along the tangent, clamped by the normal impulse
    let rv = b.velocity_at(contact.point) - a.velocity_at(contact.point);
    let tangent = (rv - n * rv.dot(n)).normalize_or_zero();
    if tangent != Vec2::ZERO {
        let ra_t = ra.perp_dot(tangent);
        let rb_t = rb.perp_dot(tangent);
        let inv_mass_t =
            a.inv_mass + b.inv_mass + a.inv_inertia * ra_t * ra_t + b.inv_inertia * rb_t * rb_t;
        let mu = (a.friction * b.friction).sqrt();
        let jt = (-rv.dot(tangent) / inv_mass_t).clamp(-mu * jn, mu * jn);
        let friction_impulse = tangent * jt;
        a.apply_impulse(-friction_impulse, contact.point);
        b.apply_impulse(friction_impulse, contact.point);
    }

    // Positional correction so stacks don't sink into each other
    let correction =
        n * (CORRECTION_PERCENT * (contact.penetration - PENETRATION_SLOP).max(0.0)
            / (a.inv_mass + b.inv_mass));
    a.pos -= correction * a.inv_mass;
    b.pos += correction * b.inv_mass;
}

/// Resolve a body-wall contact; the wall is static with infinite mass.
pub fn resolve_wall(body: &mut CircleBody, contact: &Contact) {
    let n = contact.normal;
    let rv = body.velocity_at(contact.point);
    let vel_n = rv.dot(n);

    if vel_n < 0.0 {
        let r = contact.point - body.pos;
        let r_n = r.perp_dot(n);
        let inv_mass_n = body.inv_mass + body.inv_inertia * r_n * r_n;

        let e = if -vel_n < RESTING_SPEED {
            0.0
        } else {
            body.restitution
        };
        let jn = -(1.0 + e) * vel_n / inv_mass_n;
        body.apply_impulse(n * jn, contact.point);

        let rv = body.velocity_at(contact.point);
        let tangent = (rv - n * rv.dot(n)).normalize_or_zero();
        if tangent != Vec2::ZERO {
            let r_t = r.perp_dot(tangent);
            let inv_mass_t = body.inv_mass + body.inv_inertia * r_t * r_t;
            let jt =
                (-rv.dot(tangent) / inv_mass_t).clamp(-body.friction * jn, body.friction * jn);
            body.apply_impulse(tangent * jt, contact.point);
        }
    }

    let correction = CORRECTION_PERCENT * (contact.penetration - PENETRATION_SLOP).max(0.0);
    body.pos += n * correction;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(id: u32, x: f32, y: f32) -> CircleBody {
        CircleBody::new(id, Vec2::new(x, y), 20.0, 0.6, 0.2)
    }

    #[test]
    fn test_separated_circles_have_no_contact() {
        let a = body(1, 100.0, 100.0);
        let b = body(2, 150.0, 100.0);
        assert!(circle_circle_contact(&a, &b).is_none());
    }

    #[test]
    fn test_overlapping_circles_contact_geometry() {
        let a = body(1, 100.0, 100.0);
        let b = body(2, 130.0, 100.0);
        let c = circle_circle_contact(&a, &b).unwrap();
        assert!((c.normal - Vec2::X).length() < 1e-6);
        assert!((c.penetration - 10.0).abs() < 1e-4);
        assert!((c.point - Vec2::new(120.0, 100.0)).length() < 1e-4);
    }

    #[test]
    fn test_concentric_circles_still_separate() {
        let a = body(1, 100.0, 100.0);
        let b = body(2, 100.0, 100.0);
        let c = circle_circle_contact(&a, &b).unwrap();
        assert!((c.penetration - 40.0).abs() < 1e-4);
        assert!(c.normal.length() > 0.9);
    }

    #[test]
    fn test_wall_contacts_in_corner() {
        let mut b = body(1, 10.0, 10.0);
        b.radius = 20.0;
        let contacts = circle_wall_contacts(&b);
        assert_eq!(contacts.len(), 2);
        assert!(contacts.iter().any(|c| c.normal == Vec2::X));
        assert!(contacts.iter().any(|c| c.normal == Vec2::Y));
    }

    #[test]
    fn test_head_on_impact_bounces_with_restitution() {
        let mut a = body(1, 100.0, 100.0);
        let mut b = body(2, 138.0, 100.0);
        a.vel = Vec2::new(100.0, 0.0);
        b.vel = Vec2::new(-100.0, 0.0);
        let c = circle_circle_contact(&a, &b).unwrap();
        resolve_pair(&mut a, &mut b, &c);
        // Equal masses: velocities swap direction, scaled by restitution
        assert!(a.vel.x < 0.0);
        assert!(b.vel.x > 0.0);
        assert!(a.vel.x.abs() <= 100.0 + 1e-3);
    }

    #[test]
    fn test_separating_bodies_get_no_impulse() {
        let mut a = body(1, 100.0, 100.0);
        let mut b = body(2, 130.0, 100.0);
        a.vel = Vec2::new(-50.0, 0.0);
        b.vel = Vec2::new(50.0, 0.0);
        let c = circle_circle_contact(&a, &b).unwrap();
        let (va, vb) = (a.vel, b.vel);
        resolve_pair(&mut a, &mut b, &c);
        assert_eq!(a.vel, va);
        assert_eq!(b.vel, vb);
    }

    #[test]
    fn test_wall_impact_reflects_normal_velocity() {
        let mut b = body(1, 15.0, 300.0);
        b.vel = Vec2::new(-200.0, 0.0);
        let contacts = circle_wall_contacts(&b);
        assert_eq!(contacts.len(), 1);
        resolve_wall(&mut b, &contacts[0]);
        assert!(b.vel.x > 0.0);
        assert!(b.vel.x <= 200.0 * b.restitution + 1e-3);
    }

    #[test]
    fn test_glancing_wall_impact_picks_up_spin() {
        // Sliding down the left wall while pressed into it
        let mut b = body(1, 15.0, 300.0);
        b.vel = Vec2::new(-50.0, 120.0);
        let contacts = circle_wall_contacts(&b);
        resolve_wall(&mut b, &contacts[0]);
        // Friction against the wall torques the body
        assert!(b.angular_vel != 0.0);
        // And slows the slide
        assert!(b.vel.y < 120.0);
    }
}
