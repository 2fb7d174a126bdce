//! Game state and core simulation types
//!
//! One `GameState` owns every entity. Nothing outside the sim mutates it except
//! through `flap()` / `update()`; renderers read a `Snapshot`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::Effects;
use super::obstacles::ObstacleField;
use crate::config::WorldConfig;
use crate::error::ConfigError;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle bob, waiting for the first flap
    Waiting,
    /// Active gameplay
    Playing,
    /// Run ended; next flap resets
    Dead,
}

/// The player-controlled actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Fixed horizontal position
    pub x: f32,
    /// Vertical position of the centre (grows downward)
    pub y: f32,
    /// Vertical velocity (negative = up)
    pub vel: f32,
    /// Display tilt in degrees, derived from velocity
    pub rotation: f32,
    pub radius: f32,
    /// Cosmetic wing angle in degrees
    pub wing_angle: f32,
    pub(crate) wing_dir: f32,
}

/// One gated obstacle: an upper and lower body around a gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// y of the top of the gap, fixed at spawn
    pub gap_top: i32,
}

impl Obstacle {
    /// Right edge for a given obstacle width
    #[inline]
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }

    #[inline]
    pub fn gap_bottom(&self, gap_height: f32) -> f32 {
        self.gap_top as f32 + gap_height
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// 0xRRGGBB
    pub color: u32,
    /// 0-1, decreases every tick
    pub life: f32,
}

/// What a floating text celebrates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextKind {
    /// "+1" next to the actor
    Point,
    /// Every tenth point, centred on screen
    Milestone,
}

/// Rising, fading text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingText {
    pub pos: Vec2,
    pub text: String,
    pub kind: TextKind,
    /// Starts at 1.0 (1.5 for milestones) and decays every tick
    pub life: f32,
}

/// Award shown on the game-over card
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Medal {
    None,
    Bronze,
    Silver,
    Gold,
}

impl Medal {
    pub fn for_score(score: u32) -> Self {
        match score {
            20.. => Medal::Gold,
            10..=19 => Medal::Silver,
            5..=9 => Medal::Bronze,
            _ => Medal::None,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: WorldConfig,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub actor: Actor,
    pub obstacles: ObstacleField,
    pub effects: Effects,
    pub score: u32,
    /// Highest score reached at a death this process
    pub best: u32,
    /// Ticks since the last reset
    pub frame: u64,
}

impl GameState {
    /// Create a new game with the given seed
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }

    /// Create a new game drawing all randomness from `rng`
    pub fn with_rng(config: WorldConfig, rng: Pcg32) -> Result<Self, ConfigError> {
        config.validate()?;
        let actor = Actor::new(&config);
        Ok(Self {
            config,
            rng,
            phase: GamePhase::Waiting,
            actor,
            obstacles: ObstacleField::default(),
            effects: Effects::default(),
            score: 0,
            best: 0,
            frame: 0,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Start over in `Waiting`. Best score survives.
    pub fn reset(&mut self) {
        self.actor = Actor::new(&self.config);
        self.obstacles.clear();
        self.effects.clear();
        self.score = 0;
        self.frame = 0;
        self.phase = GamePhase::Waiting;
    }

    /// Immutable copy of everything a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            actor: ActorPose {
                x: self.actor.x,
                y: self.actor.y,
                rotation: self.actor.rotation,
                radius: self.actor.radius,
                wing_angle: self.actor.wing_angle,
                vel: self.actor.vel,
            },
            obstacles: self.obstacles.obstacles().to_vec(),
            particles: self.effects.particles.clone(),
            texts: self.effects.texts.clone(),
            score: self.score,
            best: self.best,
            medal: Medal::for_score(self.score),
            ground_offset: self.obstacles.ground_offset(),
            frame: self.frame,
        }
    }
}

/// Actor fields a renderer draws
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActorPose {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub radius: f32,
    pub wing_angle: f32,
    pub vel: f32,
}

/// Read-only view of one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub actor: ActorPose,
    /// Oldest (leftmost) first
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    pub texts: Vec<FloatingText>,
    pub score: u32,
    pub best: u32,
    pub medal: Medal,
    /// Ground texture scroll, within one `GROUND_TILE_PERIOD`
    pub ground_offset: f32,
    pub frame: u64,
}
