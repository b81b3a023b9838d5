//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only, never wall-clock derived
//! - Seeded RNG only
//! - Stable iteration order (balls by side, rings by id)
//! - No rendering or platform dependencies

pub mod bake;
pub mod collision;
pub mod lifecycle;
pub mod ring;
pub mod state;
pub mod step;

pub use bake::{BakeCheckpoint, Baker, CancelFlag};
pub use collision::{RingContact, balls_touching, reflect_velocity, resolve_ring_contact};
pub use ring::RingBarrier;
pub use state::{Ball, Score, Side, WorldState};
pub use step::{SimEvent, step};
