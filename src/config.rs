//! Bake configuration
//!
//! Everything a bake needs to be reproducible lives here: the seed, the
//! timing grid, arena geometry, ball tuning, and the ring lifecycle policy.
//! Validation is fail-fast: a config is checked once before any stepping
//! begins and never re-checked inside the loop.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How ring barriers come into existence over the course of a bake.
///
/// The two variants are deliberately kept separate rather than merged into
/// one ambiguous behavior. `Progressive` is the canonical policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RingPolicy {
    /// Rings appear one at a time at a fixed interval and shrink at a
    /// constant rate until they retire at the retirement radius.
    Progressive {
        /// Seconds between consecutive ring spawns
        spawn_interval_seconds: f64,
        /// Shrink rate in world units per second
        shrink_rate: f64,
    },
    /// Every ring exists from frame 0 at its initial radius; rings die only
    /// by a ball passing through their gap.
    AllAtStart,
}

/// Complete configuration for one bake run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BakeConfig {
    /// RNG seed; two bakes with identical config and seed produce
    /// byte-identical traces
    pub seed: u64,
    /// Frames per second of the baked trace
    pub fps: u32,
    /// Simulated duration in seconds
    pub duration_seconds: f64,

    /// Arena center in world coordinates
    pub arena_center: DVec2,
    /// Outer arena wall radius; balls reflect off it
    pub arena_radius: f64,

    /// Ball radius (both balls)
    pub ball_radius: f64,
    /// Distance of each ball's spawn point from the arena center
    pub spawn_radius: f64,
    /// Angle of the "yes" spawn point in degrees; "no" spawns mirrored
    pub spawn_angle_deg: f64,
    /// Launch speed at frame 0
    pub start_speed: f64,
    /// Speed floor; a slower (nonzero) ball is rescaled up every step
    pub min_speed: f64,
    /// Speed ceiling; a faster ball is rescaled down every step
    pub max_speed: f64,
    /// Constant downward acceleration (+y), world units per second squared
    pub gravity: f64,
    /// Per-step velocity retention factor, just below 1.0
    pub drag: f64,

    /// Total number of rings the lifecycle manager will create
    pub ring_count: u32,
    /// Initial radius of the innermost ring
    pub ring_min_radius: f64,
    /// Initial radius of the outermost ring
    pub ring_max_radius: f64,
    /// Radius at which a shrinking ring retires (Progressive policy only)
    pub ring_retire_radius: f64,
    /// Rotation rate shared by all rings, revolutions per simulated second
    pub rotation_speed: f64,
    /// Smallest gap a ring can be created with, degrees
    pub min_gap_angle_deg: f64,
    /// Largest gap a ring can be created with, degrees
    pub max_gap_angle_deg: f64,
    /// Ring lifecycle policy
    pub ring_policy: RingPolicy,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            fps: 60,
            duration_seconds: 30.0,
            arena_center: DVec2::ZERO,
            arena_radius: 400.0,
            ball_radius: 8.0,
            spawn_radius: 60.0,
            spawn_angle_deg: 45.0,
            start_speed: 200.0,
            min_speed: 150.0,
            max_speed: 400.0,
            gravity: 120.0,
            drag: 0.9995,
            ring_count: 10,
            ring_min_radius: 120.0,
            ring_max_radius: 380.0,
            ring_retire_radius: 50.0,
            rotation_speed: 0.15,
            min_gap_angle_deg: 30.0,
            max_gap_angle_deg: 70.0,
            ring_policy: RingPolicy::Progressive {
                spawn_interval_seconds: 2.0,
                shrink_rate: 4.0,
            },
        }
    }
}

impl BakeConfig {
    /// Number of frames this config bakes: `fps * duration_seconds`
    pub fn total_frames(&self) -> u32 {
        (self.fps as f64 * self.duration_seconds).round() as u32
    }

    /// Fixed timestep in seconds (1000/fps ms)
    pub fn dt(&self) -> f64 {
        1.0 / self.fps as f64
    }

    /// Validate the configuration before any stepping begins
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if !(self.duration_seconds > 0.0) || !self.duration_seconds.is_finite() {
            return Err(ConfigError::InvalidDuration {
                duration: self.duration_seconds,
            });
        }
        // A duration shorter than one frame bakes nothing
        if self.total_frames() == 0 {
            return Err(ConfigError::InvalidDuration {
                duration: self.duration_seconds,
            });
        }
        if self.ring_count == 0 {
            return Err(ConfigError::NoRings);
        }
        if self.ring_min_radius >= self.ring_max_radius {
            return Err(ConfigError::RingRadiusBounds {
                min: self.ring_min_radius,
                max: self.ring_max_radius,
            });
        }
        if self.ring_min_radius <= 0.0 {
            return Err(ConfigError::RingRadiusBounds {
                min: self.ring_min_radius,
                max: self.ring_max_radius,
            });
        }
        if self.ring_retire_radius >= self.ring_min_radius || self.ring_retire_radius <= 0.0 {
            return Err(ConfigError::RetireRadius {
                retire: self.ring_retire_radius,
                min: self.ring_min_radius,
            });
        }
        if self.min_speed >= self.max_speed || self.min_speed <= 0.0 {
            return Err(ConfigError::SpeedBounds {
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        if self.min_gap_angle_deg < 0.0
            || self.max_gap_angle_deg > 360.0
            || self.min_gap_angle_deg > self.max_gap_angle_deg
        {
            return Err(ConfigError::GapBounds {
                min: self.min_gap_angle_deg,
                max: self.max_gap_angle_deg,
            });
        }
        if self.ball_radius <= 0.0 {
            return Err(ConfigError::BallRadius {
                radius: self.ball_radius,
            });
        }
        if self.spawn_radius + self.ball_radius >= self.arena_radius {
            return Err(ConfigError::SpawnOutsideArena {
                spawn: self.spawn_radius,
                arena: self.arena_radius,
            });
        }
        Ok(())
    }
}

/// A configuration rejected before stepping began
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("fps must be greater than zero")]
    ZeroFps,
    #[error("duration must be a positive number of seconds, got {duration}")]
    InvalidDuration { duration: f64 },
    #[error("ring count must be greater than zero")]
    NoRings,
    #[error("ring radius bounds invalid: min {min} must be positive and below max {max}")]
    RingRadiusBounds { min: f64, max: f64 },
    #[error("retirement radius {retire} must be positive and below ring min radius {min}")]
    RetireRadius { retire: f64, min: f64 },
    #[error("speed bounds invalid: min {min} must be positive and below max {max}")]
    SpeedBounds { min: f64, max: f64 },
    #[error("gap angle bounds invalid: [{min}, {max}] must sit inside [0, 360]")]
    GapBounds { min: f64, max: f64 },
    #[error("ball radius must be positive, got {radius}")]
    BallRadius { radius: f64 },
    #[error("spawn radius {spawn} puts balls outside the arena wall at {arena}")]
    SpawnOutsideArena { spawn: f64, arena: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(BakeConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_total_frames() {
        let config = BakeConfig {
            fps: 30,
            duration_seconds: 10.0,
            ..Default::default()
        };
        assert_eq!(config.total_frames(), 300);
    }

    #[test]
    fn test_rejects_zero_rings() {
        let config = BakeConfig {
            ring_count: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoRings));
    }

    #[test]
    fn test_rejects_inverted_radius_bounds() {
        let config = BakeConfig {
            ring_min_radius: 300.0,
            ring_max_radius: 200.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RingRadiusBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_speed_bounds() {
        let config = BakeConfig {
            min_speed: 500.0,
            max_speed: 400.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpeedBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_gap_bounds() {
        let config = BakeConfig {
            min_gap_angle_deg: 50.0,
            max_gap_angle_deg: 380.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GapBounds { .. })
        ));

        let config = BakeConfig {
            min_gap_angle_deg: 80.0,
            max_gap_angle_deg: 40.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GapBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_fps_and_duration() {
        let config = BakeConfig {
            fps: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroFps));

        let config = BakeConfig {
            duration_seconds: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDuration { .. })
        ));
    }
}
