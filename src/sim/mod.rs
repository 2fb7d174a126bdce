//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod obstacles;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{Hit, WorldBounds, check, hit};
pub use effects::{EXPLOSION_COLORS, Effects, FLAP_COLOR};
pub use obstacles::ObstacleField;
pub use state::{
    Actor, ActorPose, FloatingText, GamePhase, GameState, Medal, Obstacle, Particle, Snapshot,
    TextKind,
};
pub use tick::Command;
