//! Ring barrier geometry
//!
//! A ring barrier is a full circle at some radius around the arena center
//! with a single angular gap. The ring's rotation is never stored as mutable
//! state: the current rotation is a pure function of the frame index, so any
//! frame can be recomputed without replaying the ones before it.
//!
//! All gap arithmetic happens in degree space, angles in [0, 360).

use serde::{Deserialize, Serialize};

use super::state::Side;
use crate::normalize_deg;

/// A rotating circular barrier with one angular gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingBarrier {
    /// Stable id, assigned monotonically at creation
    pub id: u32,
    /// Current radius; shrinks over time under the progressive policy
    pub radius: f64,
    /// Rotation phase offset at frame 0, degrees
    pub base_rotation_deg: f64,
    /// Rotation rate, revolutions per simulated second
    pub rotation_speed: f64,
    /// Angular width of the gap, degrees; fixed at creation
    pub gap_angle_deg: f64,
    /// One-way latch; once set the ring is permanently out of play
    pub exploded: bool,
    /// Frame at which the ring left play, if it has
    pub explosion_frame: Option<u32>,
    /// Side whose ball triggered the explosion; `None` for shrink retirement
    pub explosion_color: Option<Side>,
}

impl RingBarrier {
    pub fn new(
        id: u32,
        radius: f64,
        base_rotation_deg: f64,
        rotation_speed: f64,
        gap_angle_deg: f64,
    ) -> Self {
        Self {
            id,
            radius,
            base_rotation_deg: normalize_deg(base_rotation_deg),
            rotation_speed,
            gap_angle_deg,
            exploded: false,
            explosion_frame: None,
            explosion_color: None,
        }
    }

    /// Current rotation at a frame, degrees in [0, 360).
    ///
    /// Derived from elapsed simulated time, not from accumulated mutation.
    pub fn rotation_at(&self, frame: u32, fps: u32) -> f64 {
        let elapsed = frame as f64 / fps as f64;
        normalize_deg(self.base_rotation_deg + elapsed * self.rotation_speed * 360.0)
    }

    /// The gap arc at a frame as (start, end) degrees, both in [0, 360).
    ///
    /// The arc may wrap past 360: end < start then.
    pub fn gap_arc_at(&self, frame: u32, fps: u32) -> (f64, f64) {
        let start = self.rotation_at(frame, fps);
        let end = normalize_deg(start + self.gap_angle_deg);
        (start, end)
    }

    /// Whether an angle (degrees, any range) falls inside the gap at a frame.
    ///
    /// A gap of 0 degrees or less admits nothing; a gap of 360 degrees or
    /// more admits everything. In between, membership handles the arc
    /// wrapping past 360.
    pub fn angle_in_gap(&self, angle_deg: f64, frame: u32, fps: u32) -> bool {
        if self.gap_angle_deg <= 0.0 {
            return false;
        }
        if self.gap_angle_deg >= 360.0 {
            return true;
        }
        let (start, end) = self.gap_arc_at(frame, fps);
        let a = normalize_deg(angle_deg);
        if start <= end {
            start <= a && a <= end
        } else {
            a >= start || a <= end
        }
    }

    /// Latch the ring out of play. Idempotent: the first explosion wins and
    /// later calls change nothing.
    pub fn explode(&mut self, frame: u32, side: Option<Side>) {
        if self.exploded {
            return;
        }
        self.exploded = true;
        self.explosion_frame = Some(frame);
        self.explosion_color = side;
    }
}
