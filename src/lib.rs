//! Flapper - a single-screen gated-obstacle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, effects, game state)
//! - `config`: World constants, fixed for a run and validated up front
//! - `renderer`: Half-block terminal renderer that draws simulation snapshots
//! - `platform`: Terminal input mapping and the fixed-cadence loop driver

pub mod config;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::WorldConfig;
pub use error::ConfigError;

/// Default world constants and fixed effect tuning
pub mod consts {
    /// World dimensions
    pub const WORLD_WIDTH: f32 = 480.0;
    pub const WORLD_HEIGHT: f32 = 640.0;
    /// Height of the ground strip at the bottom of the world
    pub const GROUND_HEIGHT: f32 = 60.0;

    /// Fixed tick interval (~60 Hz)
    pub const TICK_INTERVAL_MS: u64 = 16;

    /// Actor physics
    pub const GRAVITY: f32 = 0.5;
    pub const FLAP_IMPULSE: f32 = -9.0;
    pub const MAX_FALL: f32 = 12.0;

    /// Actor placement
    pub const ACTOR_X: f32 = 100.0;
    pub const ACTOR_RADIUS: f32 = 18.0;
    /// Collision radius shrink so grazes don't count
    pub const HIT_FORGIVENESS: f32 = 4.0;

    /// Obstacles
    pub const GAP_HEIGHT: f32 = 160.0;
    pub const OBSTACLE_WIDTH: f32 = 70.0;
    pub const OBSTACLE_SPEED: f32 = 3.2;
    /// Horizontal distance between consecutive spawns
    pub const SPAWN_SPACING: f32 = 220.0;
    /// Minimum distance from gap to ceiling and ground
    pub const GAP_MARGIN: i32 = 90;
    /// Extra distance past the left edge before an obstacle is dropped
    pub const RETIRE_MARGIN: f32 = 10.0;

    /// Display rotation (degrees) = velocity * factor, clamped
    pub const ROTATION_FACTOR: f32 = 5.0;
    pub const ROTATION_MIN: f32 = -30.0;
    pub const ROTATION_MAX: f32 = 90.0;

    /// Idle bob while waiting or dead
    pub const BOB_FREQUENCY: f32 = 0.05;
    pub const BOB_AMPLITUDE: f32 = 10.0;

    /// Wing flap animation (degrees per tick, flips past the limit)
    pub const WING_STEP: f32 = 12.0;
    pub const WING_LIMIT: f32 = 30.0;

    /// Ground texture repeats every this many units
    pub const GROUND_TILE_PERIOD: f32 = 48.0;

    /// Particle tuning
    pub const FLAP_PARTICLES: usize = 4;
    /// Flap particles come off just below the actor's centre
    pub const FLAP_PARTICLE_OFFSET_Y: f32 = 6.0;
    pub const DEATH_PARTICLES: usize = 20;
    pub const PARTICLE_DECAY: f32 = 0.04;
    pub const PARTICLE_GRAVITY: f32 = 0.2;

    /// Floating text tuning
    pub const TEXT_RISE_SPEED: f32 = 1.5;
    pub const TEXT_DECAY: f32 = 0.03;
    pub const POINT_TEXT_LIFE: f32 = 1.0;
    /// "+1" appears ahead of and above the actor
    pub const POINT_TEXT_OFFSET_X: f32 = 20.0;
    pub const POINT_TEXT_OFFSET_Y: f32 = -30.0;
    pub const MILESTONE_TEXT_LIFE: f32 = 1.5;
    /// Every Nth point is a milestone
    pub const MILESTONE_PERIOD: u32 = 10;
}

/// Pack an RGB triple into `0xRRGGBB`
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Unpack `0xRRGGBB` into an RGB triple
#[inline]
pub const fn unpack_rgb(color: u32) -> (u8, u8, u8) {
    ((color >> 16) as u8, (color >> 8) as u8, color as u8)
}
