//! The bake loop
//!
//! Runs exactly `fps * duration_seconds` fixed steps, records a snapshot
//! after each one, and finalizes the immutable trace. Baking is strictly
//! single-threaded; the only parallelism this design admits is across
//! independent bake runs with different seeds.
//!
//! Long bakes can be cancelled cooperatively between steps and checkpointed
//! periodically; a resumed baker replays nothing and produces frames
//! byte-identical to an uninterrupted run because the checkpoint carries the
//! exact RNG stream position.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lifecycle;
use super::state::WorldState;
use super::step::{SimEvent, step};
use crate::config::{BakeConfig, RingPolicy};
use crate::error::BakeError;
use crate::trace::recorder::TraceRecorder;
use crate::trace::snapshot::{FrameSnapshot, SimulationTrace};

/// Shared flag for cooperative cancellation, checked between frame steps
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Serializable resume point: everything a bake needs to continue,
/// including the RNG stream position inside the world state
#[derive(Clone, Serialize, Deserialize)]
pub struct BakeCheckpoint {
    pub config: BakeConfig,
    pub next_frame: u32,
    pub world: WorldState,
    pub frames: Vec<FrameSnapshot>,
}

/// Owns the world exclusively for the duration of one bake
pub struct Baker {
    config: BakeConfig,
    world: WorldState,
    recorder: TraceRecorder,
    frame: u32,
    total_frames: u32,
    cancel: CancelFlag,
}

impl Baker {
    /// Validate the config and set up the bake-start world. Fails fast:
    /// nothing is stepped if the config is rejected.
    pub fn new(config: BakeConfig) -> Result<Self, BakeError> {
        config.validate()?;
        let total_frames = config.total_frames();

        let mut world = WorldState::new(&config);
        if config.ring_policy == RingPolicy::AllAtStart {
            lifecycle::seed_initial_rings(&mut world, &config);
        }

        log::info!(
            "bake start: seed {}, {total_frames} frames at {} fps",
            config.seed,
            config.fps
        );
        Ok(Self {
            recorder: TraceRecorder::new(total_frames),
            world,
            frame: 0,
            total_frames,
            cancel: CancelFlag::new(),
            config,
        })
    }

    /// Handle callers can use to cancel this bake from another thread
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn config(&self) -> &BakeConfig {
        &self.config
    }

    pub fn frames_baked(&self) -> u32 {
        self.frame
    }

    pub fn is_complete(&self) -> bool {
        self.frame >= self.total_frames
    }

    /// Advance one frame: step the world, check invariants, record.
    pub fn step_frame(&mut self) -> Result<(), BakeError> {
        if self.is_complete() {
            return Err(BakeError::Invariant {
                frame: self.frame,
                message: "stepped past the final frame".into(),
            });
        }
        let events = step(&mut self.world, &self.config, self.frame);
        for event in &events {
            match event {
                SimEvent::RingExploded { ring_id, side } => {
                    log::info!(
                        "frame {}: ring {ring_id} exploded by {}",
                        self.frame,
                        side.as_str()
                    );
                }
                SimEvent::BallsTouched => {
                    log::debug!("frame {}: balls touched", self.frame);
                }
                // Lifecycle logs its own spawn/retire lines
                SimEvent::RingSpawned { .. } | SimEvent::RingRetired { .. } => {}
            }
        }
        self.check_invariants()?;
        self.recorder
            .record(FrameSnapshot::capture(&self.world, self.frame))?;
        self.frame += 1;
        Ok(())
    }

    /// Run to completion, checking the cancel flag between steps.
    pub fn run(mut self, generated_at: DateTime<Utc>) -> Result<SimulationTrace, BakeError> {
        while !self.is_complete() {
            if self.cancel.is_cancelled() {
                log::warn!("bake cancelled at frame {}", self.frame);
                return Err(BakeError::Cancelled { frame: self.frame });
            }
            self.step_frame()?;
        }
        self.finalize(generated_at)
    }

    /// Stamp metadata and yield the immutable trace. Consumes the baker.
    pub fn finalize(self, generated_at: DateTime<Utc>) -> Result<SimulationTrace, BakeError> {
        self.recorder.finalize(
            self.config.fps,
            self.config.duration_seconds,
            generated_at,
        )
    }

    /// Capture a resume point for this bake, including the partial trace
    /// and the RNG stream position.
    pub fn checkpoint(&self) -> BakeCheckpoint {
        BakeCheckpoint {
            config: self.config.clone(),
            next_frame: self.frame,
            world: self.world.clone(),
            frames: self.recorder.frames().to_vec(),
        }
    }

    /// Rebuild a baker from a checkpoint. The resumed run produces frames
    /// identical to one that was never interrupted.
    pub fn resume(checkpoint: BakeCheckpoint) -> Result<Self, BakeError> {
        checkpoint.config.validate()?;
        let total_frames = checkpoint.config.total_frames();
        if checkpoint.next_frame as usize != checkpoint.frames.len() {
            return Err(BakeError::Invariant {
                frame: checkpoint.next_frame,
                message: format!(
                    "checkpoint next frame {} does not match {} recorded frames",
                    checkpoint.next_frame,
                    checkpoint.frames.len()
                ),
            });
        }
        let recorder = TraceRecorder::from_frames(total_frames, checkpoint.frames)?;
        log::info!(
            "bake resumed at frame {} of {total_frames}",
            checkpoint.next_frame
        );
        Ok(Self {
            config: checkpoint.config,
            world: checkpoint.world,
            recorder,
            frame: checkpoint.next_frame,
            total_frames,
            cancel: CancelFlag::new(),
        })
    }

    /// Fatal mid-bake checks. A violation poisons the whole trace, so
    /// nothing is retried or recovered.
    fn check_invariants(&self) -> Result<(), BakeError> {
        for ring in &self.world.rings {
            if !ring.radius.is_finite() || ring.radius <= 0.0 {
                return Err(BakeError::Invariant {
                    frame: self.frame,
                    message: format!("ring {} has radius {}", ring.id, ring.radius),
                });
            }
        }
        for ball in &self.world.balls {
            if !ball.pos.is_finite() || !ball.vel.is_finite() {
                return Err(BakeError::Invariant {
                    frame: self.frame,
                    message: format!("{} ball state is not finite", ball.side.as_str()),
                });
            }
        }
        Ok(())
    }
}
