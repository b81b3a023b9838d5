//! ringbake - deterministic physics baking for a two-ball ring duel
//!
//! Two balls ("yes" and "no") fly inside a circular arena surrounded by
//! concentric rotating ring barriers, each with a single angular gap. A ball
//! that reaches a barrier either slips through the gap (the ring explodes and
//! that side scores) or bounces off. The whole simulation is baked once,
//! frame by frame, into an immutable trace that a renderer replays later.
//!
//! Core modules:
//! - `config`: bake configuration and fail-fast validation
//! - `sim`: deterministic simulation (fixed timestep, collisions, lifecycle)
//! - `trace`: frame snapshots, the baked trace, and read-side playback
//! - `error`: bake and trace-load error types

pub mod config;
pub mod error;
pub mod sim;
pub mod trace;

pub use config::{BakeConfig, RingPolicy};
pub use error::{BakeError, TraceError};
pub use sim::bake::{BakeCheckpoint, Baker, CancelFlag};
pub use trace::{SimulationTrace, TracePlayer};

use glam::DVec2;

/// Fixed simulation constants shared across modules
pub mod consts {
    /// Distance a bouncing ball is nudged off a barrier to prevent it from
    /// tunneling or sticking on the next step
    pub const CONTACT_EPSILON: f64 = 1.0;

    /// Tolerance for floating-point comparisons in invariant checks
    pub const FLOAT_TOLERANCE: f64 = 1e-9;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_deg(angle: f64) -> f64 {
    let a = angle % 360.0;
    if a < 0.0 { a + 360.0 } else { a }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: DVec2) -> (f64, f64) {
    (pos.length(), pos.y.atan2(pos.x))
}
