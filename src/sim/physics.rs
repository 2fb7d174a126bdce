//! Actor physics
//!
//! Vertical-only integration. The actor never moves horizontally; the world
//! scrolls past it instead.

use super::state::Actor;
use crate::config::WorldConfig;
use crate::consts::*;

/// One gravity step: returns the new `(y, vel)`.
///
/// Velocity is capped at `max_fall` before it is applied.
#[inline]
pub fn integrate(y: f32, vel: f32, gravity: f32, max_fall: f32) -> (f32, f32) {
    let vel = (vel + gravity).min(max_fall);
    (y + vel, vel)
}

/// Display tilt for a velocity, in degrees (positive = nose down)
#[inline]
pub fn rotation_for(vel: f32) -> f32 {
    (vel * ROTATION_FACTOR).clamp(ROTATION_MIN, ROTATION_MAX)
}

/// Idle height at a given frame.
///
/// Phase is computed in f64 so long idle stretches stay smooth past 2^24 frames.
#[inline]
pub fn bob_height(center: f32, frame: u64) -> f32 {
    let phase = frame as f64 * f64::from(BOB_FREQUENCY);
    center + phase.sin() as f32 * BOB_AMPLITUDE
}

impl Actor {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            x: config.actor_x,
            y: config.center_y(),
            vel: 0.0,
            rotation: 0.0,
            radius: config.actor_radius,
            wing_angle: 0.0,
            wing_dir: 1.0,
        }
    }

    /// Override velocity with the upward impulse
    pub fn flap(&mut self, impulse: f32) {
        self.vel = impulse;
    }

    /// Advance one playing tick
    pub fn integrate(&mut self, gravity: f32, max_fall: f32) {
        let (y, vel) = integrate(self.y, self.vel, gravity, max_fall);
        self.y = y;
        self.vel = vel;
        self.rotation = rotation_for(vel);
    }

    /// Follow the idle bob instead of physics
    pub fn bob(&mut self, center: f32, frame: u64) {
        self.y = bob_height(center, frame);
    }

    /// Swing the wing back and forth; runs in every phase
    pub fn animate_wing(&mut self) {
        self.wing_angle += WING_STEP * self.wing_dir;
        if self.wing_angle.abs() > WING_LIMIT {
            self.wing_dir = -self.wing_dir;
        }
    }
}
