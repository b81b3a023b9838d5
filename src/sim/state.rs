//! World state and core simulation types
//!
//! Everything that must be persisted for checkpointing and determinism
//! lives here. Rings are an arena addressed by stable id: they are pushed in
//! creation order and never removed, so indices stay valid for a whole bake.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ring::RingBarrier;
use crate::config::BakeConfig;
use crate::polar_to_cartesian;

/// Which of the two balls, and which side of the score tally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Yes,
    No,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Yes => "yes",
            Side::No => "no",
        }
    }
}

/// Running score tally; each field only ever increases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub yes: u32,
    pub no: u32,
}

impl Score {
    /// Award exactly one point to a side
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Yes => self.yes += 1,
            Side::No => self.no += 1,
        }
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub side: Side,
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
}

impl Ball {
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }
}

/// Complete mutable simulation state (deterministic, serializable).
///
/// Owned exclusively by the baker during the stepped loop; after baking
/// only immutable snapshots of it survive.
#[derive(Clone, Serialize, Deserialize)]
pub struct WorldState {
    /// The two balls, always ordered yes then no
    pub balls: [Ball; 2],
    /// Ring barriers in creation order; never removed, only latched out
    pub rings: Vec<RingBarrier>,
    /// Score tally
    pub score: Score,
    /// Seeded RNG; serialized so checkpoints capture the stream position
    pub rng: Pcg32,
}

impl WorldState {
    /// Create the bake-start state: both balls mirrored about the arena
    /// center with opposite tangential velocities of equal magnitude, and
    /// no rings yet (the lifecycle manager creates those).
    pub fn new(config: &BakeConfig) -> Self {
        let theta = config.spawn_angle_deg.to_radians();
        let offset = polar_to_cartesian(config.spawn_radius, theta);
        let tangent = DVec2::new(-theta.sin(), theta.cos());

        let yes = Ball {
            side: Side::Yes,
            pos: config.arena_center + offset,
            vel: tangent * config.start_speed,
            radius: config.ball_radius,
        };
        let no = Ball {
            side: Side::No,
            pos: config.arena_center - offset,
            vel: -tangent * config.start_speed,
            radius: config.ball_radius,
        };

        Self {
            balls: [yes, no],
            rings: Vec::with_capacity(config.ring_count as usize),
            score: Score::default(),
            rng: Pcg32::seed_from_u64(config.seed),
        }
    }

    pub fn ball(&self, side: Side) -> &Ball {
        match side {
            Side::Yes => &self.balls[0],
            Side::No => &self.balls[1],
        }
    }

    /// Rings still participating in collision checks
    pub fn live_rings(&self) -> impl Iterator<Item = &RingBarrier> {
        self.rings.iter().filter(|r| !r.exploded)
    }
}
