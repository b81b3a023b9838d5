//! Fixed timestep simulation step
//!
//! One call advances the world by exactly one frame. The order inside a
//! step is fixed: integrate balls, resolve collisions, clamp speeds, run
//! the ring lifecycle. Ring rotation is not advanced here at all; it is a
//! pure function of the frame index (see [`super::ring::RingBarrier`]).
//! Steps are strictly sequential; frame n+1 consumes frame n's output.

use super::collision::{RingContact, balls_touching, reflect_velocity, resolve_ring_contact};
use super::lifecycle;
use super::state::{Side, WorldState};
use crate::config::BakeConfig;

/// Discrete events produced by one step, for logging and downstream cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// A ball passed through a ring's gap; that side scored
    RingExploded { ring_id: u32, side: Side },
    /// The lifecycle manager created a ring this frame
    RingSpawned { ring_id: u32 },
    /// A ring shrank to the retirement radius and left play
    RingRetired { ring_id: u32 },
    /// The two balls touched. Signal only: velocities are untouched, the
    /// event exists for downstream consumers such as sound cues
    BallsTouched,
}

/// Advance the world by one fixed step, producing frame `frame`'s state
pub fn step(world: &mut WorldState, config: &BakeConfig, frame: u32) -> Vec<SimEvent> {
    let dt = config.dt();
    let mut events = Vec::new();

    // Integrate: constant downward bias, light drag, then move
    for ball in &mut world.balls {
        ball.vel.y += config.gravity * dt;
        ball.vel *= config.drag;
        ball.pos += ball.vel * dt;

        // Outer arena wall keeps balls in play once rings are gone
        let rel = ball.pos - config.arena_center;
        let r = rel.length();
        if r + ball.radius > config.arena_radius && r > f64::EPSILON {
            let normal = -rel / r;
            ball.vel = reflect_velocity(ball.vel, normal);
            let penetration = r + ball.radius - config.arena_radius;
            ball.pos += normal * (penetration + 1.0);
        }
    }

    // Ball-ring contacts, balls in side order, rings in id order
    for ball_idx in 0..world.balls.len() {
        for ring_idx in 0..world.rings.len() {
            if world.rings[ring_idx].exploded {
                continue;
            }
            let outcome = resolve_ring_contact(
                &mut world.balls[ball_idx],
                &world.rings[ring_idx],
                config.arena_center,
                frame,
                config.fps,
            );
            if outcome == Some(RingContact::GapPass) {
                let side = world.balls[ball_idx].side;
                world.rings[ring_idx].explode(frame, Some(side));
                world.score.award(side);
                events.push(SimEvent::RingExploded {
                    ring_id: world.rings[ring_idx].id,
                    side,
                });
            }
        }
    }

    // Ball-ball proximity is an event, never a velocity response
    if balls_touching(&world.balls[0], &world.balls[1]) {
        events.push(SimEvent::BallsTouched);
    }

    // Unconditional speed clamp, every step; this is a hard rescale, not drag
    for ball in &mut world.balls {
        let speed = ball.speed();
        if speed > 0.0 && speed < config.min_speed {
            ball.vel = ball.vel.normalize_or_zero() * config.min_speed;
        } else if speed > config.max_speed {
            ball.vel = ball.vel.normalize_or_zero() * config.max_speed;
        }
    }

    // Ring lifecycle for this frame
    for id in lifecycle::spawn_due_rings(world, config, frame) {
        events.push(SimEvent::RingSpawned { ring_id: id });
    }
    for id in lifecycle::shrink_and_retire(world, config, frame) {
        events.push(SimEvent::RingRetired { ring_id: id });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RingPolicy;
    use crate::sim::ring::RingBarrier;
    use glam::DVec2;

    /// Config with the lifecycle and force terms quiet so individual step
    /// behaviors can be pinned down in isolation
    fn quiet_config() -> BakeConfig {
        BakeConfig {
            gravity: 0.0,
            drag: 1.0,
            ring_policy: RingPolicy::AllAtStart,
            ..Default::default()
        }
    }

    #[test]
    fn test_gravity_pulls_downward() {
        let mut config = quiet_config();
        config.gravity = 120.0;
        let mut world = WorldState::new(&config);
        let vy_before = world.balls[0].vel.y;

        step(&mut world, &config, 0);
        let expected = (vy_before + 120.0 * config.dt()) * config.drag;
        assert!((world.balls[0].vel.y - expected).abs() < 1e-9);
    }

    #[test]
    fn test_speed_clamp_rescales_both_ways() {
        let config = quiet_config();
        let mut world = WorldState::new(&config);
        world.balls[0].vel = DVec2::new(10.0, 0.0); // far below min
        world.balls[1].vel = DVec2::new(0.0, 9000.0); // far above max

        step(&mut world, &config, 0);
        assert!((world.balls[0].speed() - config.min_speed).abs() < 1e-9);
        assert!((world.balls[1].speed() - config.max_speed).abs() < 1e-9);
    }

    #[test]
    fn test_gap_pass_scores_and_latches() {
        let config = quiet_config();
        let mut world = WorldState::new(&config);
        // Gap covers the seam around angle 0; ball arrives head-on
        world.rings.push(RingBarrier::new(0, 200.0, 350.0, 0.0, 20.0));
        world.balls[0].pos = DVec2::new(190.0, 0.0);
        world.balls[0].vel = DVec2::new(150.0, 0.0);
        // Park the other ball far from the action
        world.balls[1].pos = DVec2::new(0.0, -300.0);
        world.balls[1].vel = DVec2::new(0.0, -150.0);

        let events = step(&mut world, &config, 0);
        assert!(events.contains(&SimEvent::RingExploded {
            ring_id: 0,
            side: Side::Yes
        }));
        assert!(world.rings[0].exploded);
        assert_eq!(world.rings[0].explosion_frame, Some(0));
        assert_eq!(world.rings[0].explosion_color, Some(Side::Yes));
        assert_eq!(world.score.yes, 1);
        assert_eq!(world.score.no, 0);
    }

    #[test]
    fn test_bounce_outside_gap_keeps_score() {
        let config = quiet_config();
        let mut world = WorldState::new(&config);
        // Gap on the far side of the ring
        world.rings.push(RingBarrier::new(0, 200.0, 170.0, 0.0, 20.0));
        world.balls[0].pos = DVec2::new(190.0, 0.0);
        world.balls[0].vel = DVec2::new(150.0, 0.0);
        world.balls[1].pos = DVec2::new(0.0, -300.0);
        world.balls[1].vel = DVec2::new(0.0, -150.0);

        step(&mut world, &config, 0);
        assert!(!world.rings[0].exploded);
        assert_eq!(world.score, crate::sim::Score::default());
        // Reflected back inward
        assert!(world.balls[0].vel.x < 0.0);
    }

    #[test]
    fn test_exploded_ring_is_transparent() {
        let config = quiet_config();
        let mut world = WorldState::new(&config);
        let mut ring = RingBarrier::new(0, 200.0, 170.0, 0.0, 20.0);
        ring.explode(0, Some(Side::No));
        world.rings.push(ring);
        world.balls[0].pos = DVec2::new(190.0, 0.0);
        world.balls[0].vel = DVec2::new(150.0, 0.0);
        world.balls[1].pos = DVec2::new(0.0, -300.0);
        world.balls[1].vel = DVec2::new(0.0, -150.0);

        let events = step(&mut world, &config, 1);
        // No bounce, no second explosion: the ball sails through
        assert!(world.balls[0].vel.x > 0.0);
        assert!(!events.iter().any(|e| matches!(e, SimEvent::RingExploded { .. })));
        assert_eq!(world.score.no, 0);
    }

    #[test]
    fn test_ball_contact_emits_signal_without_response() {
        let config = quiet_config();
        let mut world = WorldState::new(&config);
        world.balls[0].pos = DVec2::new(-5.0, 0.0);
        world.balls[0].vel = DVec2::new(150.0, 0.0);
        world.balls[1].pos = DVec2::new(5.0, 0.0);
        world.balls[1].vel = DVec2::new(-150.0, 0.0);

        let events = step(&mut world, &config, 0);
        assert!(events.contains(&SimEvent::BallsTouched));
        // Velocities pass through the contact unchanged (documented source
        // behavior, possibly unintended; see DESIGN.md)
        assert_eq!(world.balls[0].vel, DVec2::new(150.0, 0.0));
        assert_eq!(world.balls[1].vel, DVec2::new(-150.0, 0.0));
    }

    #[test]
    fn test_arena_wall_reflects() {
        let config = quiet_config();
        let mut world = WorldState::new(&config);
        world.balls[0].pos = DVec2::new(config.arena_radius - 1.0, 0.0);
        world.balls[0].vel = DVec2::new(200.0, 0.0);
        world.balls[1].pos = DVec2::new(0.0, 0.0);
        world.balls[1].vel = DVec2::new(0.0, 150.0);

        step(&mut world, &config, 0);
        let r = (world.balls[0].pos - config.arena_center).length();
        assert!(r + world.balls[0].radius <= config.arena_radius);
        assert!(world.balls[0].vel.x < 0.0);
    }
}
