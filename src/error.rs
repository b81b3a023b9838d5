//! Error types for baking and trace loading
//!
//! [`BakeError`] covers everything that can stop a bake: a rejected
//! configuration, a mid-loop invariant violation, or cooperative
//! cancellation. [`TraceError`] covers loading a finished trace for
//! playback. Out-of-range playback lookups are not errors; they clamp.

use thiserror::Error;

use crate::config::ConfigError;

/// A bake that could not start or could not finish.
///
/// Invariant violations are fatal and never retried: the trace is only
/// valid as a complete, contiguous whole.
#[derive(Debug, Error)]
pub enum BakeError {
    /// Configuration rejected before the first step.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An internal invariant broke mid-bake.
    #[error("simulation invariant violated at frame {frame}: {message}")]
    Invariant { frame: u32, message: String },

    /// The bake was cancelled between steps via a [`crate::CancelFlag`].
    #[error("bake cancelled at frame {frame}")]
    Cancelled { frame: u32 },
}

/// A trace artifact that could not be loaded for playback.
///
/// All variants are fatal: there is no partial-trace playback.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The artifact file is missing or unreadable.
    #[error("failed to read trace artifact: {0}")]
    Io(#[from] std::io::Error),

    /// The artifact is not valid JSON for the trace schema.
    #[error("failed to parse trace artifact: {0}")]
    Parse(#[from] serde_json::Error),

    /// The artifact parsed but is structurally invalid.
    #[error("invalid trace: {message}")]
    Invalid { message: String },
}
