//! Read-side trace playback
//!
//! A player is a borrowed, read-only view over a finished trace. Lookups
//! for different frames have no ordering dependency on each other, so
//! parallel renderers can share one trace freely; nothing here mutates.

use super::snapshot::{Coord, FrameSnapshot, SimulationTrace};
use crate::sim::state::Side;

/// Trailing position history for both balls, oldest frame first
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    pub yes: Vec<Coord>,
    pub no: Vec<Coord>,
}

/// Read-only lookup over a finished, validated trace
#[derive(Debug, Clone, Copy)]
pub struct TracePlayer<'a> {
    trace: &'a SimulationTrace,
}

impl<'a> TracePlayer<'a> {
    /// Borrow a finished trace for playback. The trace must be non-empty,
    /// which [`SimulationTrace::validate`] guarantees for loaded artifacts.
    pub fn new(trace: &'a SimulationTrace) -> Self {
        debug_assert!(!trace.is_empty());
        Self { trace }
    }

    pub fn total_frames(&self) -> u32 {
        self.trace.metadata.total_frames
    }

    /// Clamp any requested frame into the valid range. Out-of-range
    /// requests are not errors by design.
    pub fn clamp_frame(&self, frame: i64) -> usize {
        let last = self.trace.frames.len() - 1;
        frame.clamp(0, last as i64) as usize
    }

    /// O(1) snapshot lookup with silent clamping
    pub fn snapshot(&self, frame: i64) -> &'a FrameSnapshot {
        &self.trace.frames[self.clamp_frame(frame)]
    }

    /// Reconstruct a bounded trailing history of up to `len` positions per
    /// ball, ending at the requested frame. Walks backward through prior
    /// snapshots and clamps at the start of the trace, so early frames
    /// yield shorter trails.
    pub fn trail(&self, frame: i64, len: usize) -> Trail {
        if len == 0 {
            return Trail {
                yes: Vec::new(),
                no: Vec::new(),
            };
        }
        let end = self.clamp_frame(frame);
        let start = end.saturating_sub(len.saturating_sub(1));

        let mut yes = Vec::with_capacity(end - start + 1);
        let mut no = Vec::with_capacity(end - start + 1);
        for snap in &self.trace.frames[start..=end] {
            yes.push(snap.ball(Side::Yes).position);
            no.push(snap.ball(Side::No).position);
        }
        Trail { yes, no }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::snapshot::{BallFrame, TraceMetadata};

    /// Hand-built trace where each ball's x coordinate equals its frame
    fn staircase_trace(n: u32) -> SimulationTrace {
        let frames = (0..n)
            .map(|i| {
                let at = |x: f64| BallFrame {
                    position: Coord { x, y: 0.0 },
                    velocity: Coord { x: 0.0, y: 0.0 },
                };
                FrameSnapshot {
                    frame: i,
                    yes_ball: at(i as f64),
                    no_ball: at(-(i as f64)),
                    circles: Vec::new(),
                    scores: Default::default(),
                }
            })
            .collect();
        SimulationTrace {
            frames,
            metadata: TraceMetadata {
                total_frames: n,
                fps: 60,
                duration: n as f64 / 60.0,
                generated_at: "2026-08-07T00:00:00Z".parse().unwrap(),
            },
        }
    }

    #[test]
    fn test_lookup_clamps_below_and_above() {
        let trace = staircase_trace(10);
        let player = TracePlayer::new(&trace);

        assert_eq!(player.snapshot(-5).frame, 0);
        assert_eq!(player.snapshot(0).frame, 0);
        assert_eq!(player.snapshot(9).frame, 9);
        assert_eq!(player.snapshot(110).frame, 9);
    }

    #[test]
    fn test_trail_clamps_at_trace_start() {
        let trace = staircase_trace(10);
        let player = TracePlayer::new(&trace);

        // A 5-long trail at frame 2 has only frames 0..=2 to draw from
        let trail = player.trail(2, 5);
        assert_eq!(trail.yes.len(), 3);
        let xs: Vec<f64> = trail.yes.iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_trail_full_window_oldest_first() {
        let trace = staircase_trace(10);
        let player = TracePlayer::new(&trace);

        let trail = player.trail(8, 4);
        let xs: Vec<f64> = trail.yes.iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![5.0, 6.0, 7.0, 8.0]);
        let no_xs: Vec<f64> = trail.no.iter().map(|c| c.x).collect();
        assert_eq!(no_xs, vec![-5.0, -6.0, -7.0, -8.0]);
    }

    #[test]
    fn test_trail_of_one_is_just_the_frame() {
        let trace = staircase_trace(10);
        let player = TracePlayer::new(&trace);
        let trail = player.trail(4, 1);
        assert_eq!(trail.yes.len(), 1);
        assert_eq!(trail.yes[0].x, 4.0);
    }

    #[test]
    fn test_repeated_reads_are_stable() {
        let trace = staircase_trace(10);
        let player = TracePlayer::new(&trace);

        // Any order, any repetition: identical answers
        let a = player.trail(7, 3);
        let _ = player.snapshot(3);
        let b = player.trail(7, 3);
        assert_eq!(a, b);
    }
}
