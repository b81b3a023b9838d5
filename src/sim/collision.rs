//! Collision detection and response
//!
//! The interesting contact here is ball versus ring barrier: a radial
//! distance test against the ring circle, then a gap-membership decision in
//! degrees against the ring's rotation at the current frame. A gap pass
//! kills the ring; anything else reflects the ball about the radial normal.
//!
//! Ball-ball contact is detection only. The baked trace never applies a
//! velocity response to it; the event exists for downstream signaling such
//! as sound cues. See the module tests, which pin that behavior down.

use glam::DVec2;

use super::ring::RingBarrier;
use super::state::Ball;
use crate::consts::CONTACT_EPSILON;
use crate::normalize_deg;

/// Outcome of a resolved ball-ring contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingContact {
    /// Ball hit the barrier and was reflected
    Bounce,
    /// Ball was inside the gap arc; the ring is done
    GapPass,
}

/// Reflect velocity off a surface: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: DVec2, normal: DVec2) -> DVec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Resolve a ball against one live ring for the current frame.
///
/// Returns `None` when there is no contact, or when the ball is inside the
/// contact band but already moving away from the barrier (reflecting again
/// would glue it to the ring). A `GapPass` leaves the ball untouched; the
/// stepper latches the ring and scores. A `Bounce` reflects the velocity
/// about the radial unit normal and nudges the ball a fixed epsilon off the
/// barrier so it cannot tunnel into it on the next step.
pub fn resolve_ring_contact(
    ball: &mut Ball,
    ring: &RingBarrier,
    center: DVec2,
    frame: u32,
    fps: u32,
) -> Option<RingContact> {
    let rel = ball.pos - center;
    let dist = rel.length();
    let signed = dist - ring.radius;
    if signed.abs() > ball.radius {
        return None;
    }

    let angle = normalize_deg(rel.y.atan2(rel.x).to_degrees());
    if ring.angle_in_gap(angle, frame, fps) {
        return Some(RingContact::GapPass);
    }

    // Radial unit normal at the contact point. A ball sitting exactly on the
    // center has no usable normal; skip it this step.
    if dist <= f64::EPSILON {
        return None;
    }
    let normal = rel / dist;

    // Only reflect while closing on the barrier surface
    let radial_vel = ball.vel.dot(normal);
    if signed * radial_vel > 0.0 {
        return None;
    }

    ball.vel = reflect_velocity(ball.vel, normal);
    let side = if signed >= 0.0 { 1.0 } else { -1.0 };
    ball.pos += normal * side * CONTACT_EPSILON;
    Some(RingContact::Bounce)
}

/// Whether the two balls are in contact: distance <= sum of radii
#[inline]
pub fn balls_touching(a: &Ball, b: &Ball) -> bool {
    a.pos.distance(b.pos) <= a.radius + b.radius
}
