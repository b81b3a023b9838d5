//! The baked trace: snapshot schema, recording, and read-side playback
//!
//! A trace is write-once/read-many. The recorder is the only writer and it
//! is consumed by finalization; afterwards the trace is plain immutable data
//! and any number of players may read it concurrently.

pub mod playback;
pub mod recorder;
pub mod snapshot;

pub use playback::{TracePlayer, Trail};
pub use recorder::TraceRecorder;
pub use snapshot::{BallFrame, Coord, FrameSnapshot, RingFrame, SimulationTrace, TraceMetadata};
