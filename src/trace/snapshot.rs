//! Frame snapshots and the trace artifact schema
//!
//! A snapshot captures the entire world for one frame, never a delta, and
//! never references other snapshots. Field names serialize in camelCase to
//! match the artifact format consumed by the renderer pipeline.

use chrono::{DateTime, Utc};
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::TraceError;
use crate::sim::ring::RingBarrier;
use crate::sim::state::{Ball, Score, Side, WorldState};

/// A 2D point or vector in artifact form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl From<DVec2> for Coord {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Coord> for DVec2 {
    fn from(c: Coord) -> Self {
        Self::new(c.x, c.y)
    }
}

/// One ball's state in one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallFrame {
    pub position: Coord,
    pub velocity: Coord,
}

impl BallFrame {
    fn capture(ball: &Ball) -> Self {
        Self {
            position: ball.pos.into(),
            velocity: ball.vel.into(),
        }
    }
}

/// One ring's state in one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RingFrame {
    pub id: u32,
    pub radius: f64,
    pub base_rotation: f64,
    pub gap_angle: f64,
    pub is_exploding: bool,
    pub explosion_frame: Option<u32>,
    pub explosion_color: Option<Side>,
}

impl RingFrame {
    fn capture(ring: &RingBarrier) -> Self {
        Self {
            id: ring.id,
            radius: ring.radius,
            base_rotation: ring.base_rotation_deg,
            gap_angle: ring.gap_angle_deg,
            is_exploding: ring.exploded,
            explosion_frame: ring.explosion_frame,
            explosion_color: ring.explosion_color,
        }
    }
}

/// Immutable capture of the entire world state for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSnapshot {
    /// 0-based frame index, contiguous across the trace
    pub frame: u32,
    pub yes_ball: BallFrame,
    pub no_ball: BallFrame,
    pub circles: Vec<RingFrame>,
    pub scores: Score,
}

impl FrameSnapshot {
    /// Capture the full current world, not a delta
    pub fn capture(world: &WorldState, frame: u32) -> Self {
        Self {
            frame,
            yes_ball: BallFrame::capture(world.ball(Side::Yes)),
            no_ball: BallFrame::capture(world.ball(Side::No)),
            circles: world.rings.iter().map(RingFrame::capture).collect(),
            scores: world.score,
        }
    }

    pub fn ball(&self, side: Side) -> &BallFrame {
        match side {
            Side::Yes => &self.yes_ball,
            Side::No => &self.no_ball,
        }
    }
}

/// Trace-wide metadata stamped at finalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceMetadata {
    pub total_frames: u32,
    pub fps: u32,
    /// Simulated duration in seconds
    pub duration: f64,
    pub generated_at: DateTime<Utc>,
}

/// A finished bake: the ordered frame sequence plus metadata.
///
/// Produced exactly once, then only ever read. Playback takes shared
/// borrows; nothing mutates a trace after finalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationTrace {
    pub frames: Vec<FrameSnapshot>,
    pub metadata: TraceMetadata,
}

impl SimulationTrace {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Serialize to the JSON artifact format
    pub fn to_json(&self) -> Result<String, TraceError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and structurally validate a trace artifact. Any failure is
    /// fatal: there is no partial-trace playback.
    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        let trace: Self = serde_json::from_str(json)?;
        trace.validate()?;
        Ok(trace)
    }

    /// Load a trace artifact from disk
    pub fn load(path: &std::path::Path) -> Result<Self, TraceError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Structural checks shared by loading and finalization consumers
    pub fn validate(&self) -> Result<(), TraceError> {
        if self.frames.is_empty() {
            return Err(TraceError::Invalid {
                message: "trace contains no frames".into(),
            });
        }
        if self.metadata.fps == 0 {
            return Err(TraceError::Invalid {
                message: "metadata fps is zero".into(),
            });
        }
        if self.metadata.total_frames as usize != self.frames.len() {
            return Err(TraceError::Invalid {
                message: format!(
                    "metadata claims {} frames but {} are present",
                    self.metadata.total_frames,
                    self.frames.len()
                ),
            });
        }
        for (i, snap) in self.frames.iter().enumerate() {
            if snap.frame as usize != i {
                return Err(TraceError::Invalid {
                    message: format!("frame index gap: position {i} holds frame {}", snap.frame),
                });
            }
        }
        Ok(())
    }
}
