//! Ring lifecycle management
//!
//! Creates ring barriers on a fixed schedule, shrinks them under the
//! progressive policy, and retires them when they bottom out. Ids are
//! assigned monotonically and rings are never removed from the world;
//! retirement reuses the same one-way latch a gap explosion uses, so both
//! terminal states look identical to the collision detector.

use rand::Rng;

use super::ring::RingBarrier;
use super::state::WorldState;
use crate::config::{BakeConfig, RingPolicy};

/// Spawn every ring up front. Used by the `AllAtStart` policy at bake start.
pub fn seed_initial_rings(world: &mut WorldState, config: &BakeConfig) {
    while (world.rings.len() as u32) < config.ring_count {
        spawn_ring(world, config);
    }
}

/// Spawn any rings whose schedule time has arrived. Returns new ring ids.
///
/// Under `Progressive`, ring `i` is due once `i * spawn_interval` seconds of
/// simulated time have elapsed. `AllAtStart` spawns nothing here.
pub fn spawn_due_rings(world: &mut WorldState, config: &BakeConfig, frame: u32) -> Vec<u32> {
    let RingPolicy::Progressive {
        spawn_interval_seconds,
        ..
    } = config.ring_policy
    else {
        return Vec::new();
    };

    let elapsed = frame as f64 / config.fps as f64;
    let mut spawned = Vec::new();
    while (world.rings.len() as u32) < config.ring_count
        && world.rings.len() as f64 * spawn_interval_seconds <= elapsed
    {
        let id = spawn_ring(world, config);
        log::info!("ring {id} spawned at frame {frame}");
        spawned.push(id);
    }
    spawned
}

/// Shrink live rings and retire those that bottom out. Returns retired ids.
pub fn shrink_and_retire(world: &mut WorldState, config: &BakeConfig, frame: u32) -> Vec<u32> {
    let RingPolicy::Progressive { shrink_rate, .. } = config.ring_policy else {
        return Vec::new();
    };

    let dt = config.dt();
    let mut retired = Vec::new();
    for ring in world.rings.iter_mut().filter(|r| !r.exploded) {
        ring.radius -= shrink_rate * dt;
        if ring.radius <= config.ring_retire_radius {
            ring.radius = config.ring_retire_radius;
            ring.explode(frame, None);
            log::info!("ring {} retired at frame {frame}", ring.id);
            retired.push(ring.id);
        }
    }
    retired
}

/// Create one ring: monotonic id, radius interpolated across the total ring
/// count, phase offset evenly distributed, gap drawn once from the world RNG.
fn spawn_ring(world: &mut WorldState, config: &BakeConfig) -> u32 {
    let id = world.rings.len() as u32;
    let t = if config.ring_count > 1 {
        id as f64 / (config.ring_count - 1) as f64
    } else {
        0.0
    };
    let radius = config.ring_min_radius + t * (config.ring_max_radius - config.ring_min_radius);
    let base_rotation = id as f64 * 360.0 / config.ring_count as f64;
    let gap_angle = world
        .rng
        .random_range(config.min_gap_angle_deg..=config.max_gap_angle_deg);

    world.rings.push(RingBarrier::new(
        id,
        radius,
        base_rotation,
        config.rotation_speed,
        gap_angle,
    ));
    id
}
