//! Frame recorder
//!
//! Appends one full snapshot per step and refuses anything out of order.
//! Finalization consumes the recorder, so a finished trace can never grow
//! another frame.

use chrono::{DateTime, Utc};

use super::snapshot::{FrameSnapshot, SimulationTrace, TraceMetadata};
use crate::error::BakeError;

/// Write-side of a trace; exists only while a bake is running
#[derive(Debug, Clone)]
pub struct TraceRecorder {
    frames: Vec<FrameSnapshot>,
    expected_frames: u32,
}

impl TraceRecorder {
    pub fn new(expected_frames: u32) -> Self {
        Self {
            frames: Vec::with_capacity(expected_frames as usize),
            expected_frames,
        }
    }

    /// Rebuild a recorder from frames captured before a checkpoint
    pub fn from_frames(
        expected_frames: u32,
        frames: Vec<FrameSnapshot>,
    ) -> Result<Self, BakeError> {
        for (i, snap) in frames.iter().enumerate() {
            if snap.frame as usize != i {
                return Err(BakeError::Invariant {
                    frame: snap.frame,
                    message: format!("checkpoint frame index gap at position {i}"),
                });
            }
        }
        Ok(Self {
            frames,
            expected_frames,
        })
    }

    pub fn len(&self) -> u32 {
        self.frames.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[FrameSnapshot] {
        &self.frames
    }

    /// Append the next snapshot. The index must be exactly the next frame.
    pub fn record(&mut self, snapshot: FrameSnapshot) -> Result<(), BakeError> {
        if snapshot.frame as usize != self.frames.len() {
            return Err(BakeError::Invariant {
                frame: snapshot.frame,
                message: format!(
                    "frame index gap: recorded {} frames, got frame {}",
                    self.frames.len(),
                    snapshot.frame
                ),
            });
        }
        self.frames.push(snapshot);
        Ok(())
    }

    /// Stamp metadata and produce the immutable trace. Consumes the
    /// recorder; a short or overlong bake is an invariant violation.
    pub fn finalize(
        self,
        fps: u32,
        duration: f64,
        generated_at: DateTime<Utc>,
    ) -> Result<SimulationTrace, BakeError> {
        let baked = self.frames.len() as u32;
        if baked != self.expected_frames {
            return Err(BakeError::Invariant {
                frame: baked,
                message: format!(
                    "bake finalized with {baked} frames, expected {}",
                    self.expected_frames
                ),
            });
        }
        log::info!("trace finalized: {baked} frames at {fps} fps");
        Ok(SimulationTrace {
            frames: self.frames,
            metadata: TraceMetadata {
                total_frames: baked,
                fps,
                duration,
                generated_at,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BakeConfig;
    use crate::sim::state::WorldState;

    fn snap(frame: u32) -> FrameSnapshot {
        let world = WorldState::new(&BakeConfig::default());
        FrameSnapshot::capture(&world, frame)
    }

    #[test]
    fn test_contiguous_appends() {
        let mut rec = TraceRecorder::new(2);
        rec.record(snap(0)).unwrap();
        rec.record(snap(1)).unwrap();
        let trace = rec
            .finalize(60, 2.0 / 60.0, "2026-08-07T00:00:00Z".parse().unwrap())
            .unwrap();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.metadata.total_frames, 2);
    }

    #[test]
    fn test_rejects_out_of_order_frame() {
        let mut rec = TraceRecorder::new(3);
        rec.record(snap(0)).unwrap();
        let err = rec.record(snap(2)).unwrap_err();
        assert!(matches!(err, BakeError::Invariant { frame: 2, .. }));
    }

    #[test]
    fn test_finalize_rejects_short_bake() {
        let mut rec = TraceRecorder::new(5);
        rec.record(snap(0)).unwrap();
        let err = rec
            .finalize(60, 5.0 / 60.0, "2026-08-07T00:00:00Z".parse().unwrap())
            .unwrap_err();
        assert!(matches!(err, BakeError::Invariant { .. }));
    }

    #[test]
    fn test_from_frames_validates_contiguity() {
        let good = vec![snap(0), snap(1)];
        assert!(TraceRecorder::from_frames(4, good).is_ok());

        let bad = vec![snap(0), snap(3)];
        assert!(TraceRecorder::from_frames(4, bad).is_err());
    }
}
