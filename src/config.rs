//! World configuration
//!
//! Every constant the simulation reads comes from here. A config is fixed for
//! the lifetime of a `GameState` and validated once, before the first tick.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// World constants for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    pub ground_height: f32,
    /// Milliseconds between ticks
    pub tick_interval_ms: u64,

    pub gravity: f32,
    /// Velocity set by a flap (negative = up)
    pub flap_impulse: f32,
    pub max_fall: f32,

    pub actor_x: f32,
    pub actor_radius: f32,
    pub hit_forgiveness: f32,

    pub gap_height: f32,
    pub obstacle_width: f32,
    pub obstacle_speed: f32,
    pub spawn_spacing: f32,
    pub gap_margin: i32,
    pub retire_margin: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            ground_height: GROUND_HEIGHT,
            tick_interval_ms: TICK_INTERVAL_MS,

            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            max_fall: MAX_FALL,

            actor_x: ACTOR_X,
            actor_radius: ACTOR_RADIUS,
            hit_forgiveness: HIT_FORGIVENESS,

            gap_height: GAP_HEIGHT,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_spacing: SPAWN_SPACING,
            gap_margin: GAP_MARGIN,
            retire_margin: RETIRE_MARGIN,
        }
    }
}

impl WorldConfig {
    /// Parse a (possibly partial) JSON document; missing fields take defaults.
    /// The result is validated.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject degenerate worlds
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("ground_height", self.ground_height),
            ("gravity", self.gravity),
            ("max_fall", self.max_fall),
            ("actor_radius", self.actor_radius),
            ("gap_height", self.gap_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_speed", self.obstacle_speed),
            ("spawn_spacing", self.spawn_spacing),
            ("tick_interval_ms", self.tick_interval_ms as f32),
        ];
        for (field, value) in positive {
            // `!(v > 0)` also catches NaN
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if !(self.flap_impulse < 0.0) {
            return Err(ConfigError::FlapNotUpward {
                impulse: self.flap_impulse,
            });
        }

        if !(0.0..self.width).contains(&self.actor_x) {
            return Err(ConfigError::ActorOutsideWorld {
                actor_x: self.actor_x,
                width: self.width,
            });
        }

        if !(self.hit_forgiveness >= 0.0) || self.hit_forgiveness >= self.actor_radius {
            return Err(ConfigError::ForgivenessTooLarge {
                forgiveness: self.hit_forgiveness,
                radius: self.actor_radius,
            });
        }

        if self.ground_height >= self.height {
            return Err(ConfigError::GroundTooTall {
                ground: self.ground_height,
                height: self.height,
            });
        }

        if !(self.retire_margin >= 0.0) {
            return Err(ConfigError::Negative {
                field: "retire_margin",
                value: self.retire_margin,
            });
        }

        let (min_top, max_top) = self.gap_top_range();
        if self.gap_margin < 0 || min_top > max_top {
            return Err(ConfigError::GapDoesNotFit { min_top, max_top });
        }

        Ok(())
    }

    /// Inclusive range a gap top is drawn from
    pub fn gap_top_range(&self) -> (i32, i32) {
        let min_top = self.gap_margin;
        let max_top =
            (self.height - self.ground_height - self.gap_height).floor() as i32 - self.gap_margin;
        (min_top, max_top)
    }

    /// y of the ground line
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - self.ground_height
    }

    /// Resting height of the actor (integer half of the world height)
    #[inline]
    pub fn center_y(&self) -> f32 {
        (self.height as i32 / 2) as f32
    }

    /// x where new obstacles appear
    #[inline]
    pub fn spawn_x(&self) -> f32 {
        self.width + self.obstacle_width
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
