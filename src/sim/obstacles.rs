//! Obstacle manager
//!
//! Spawns gated obstacles at the right edge, scrolls them left, reports the
//! tick an obstacle's trailing edge sweeps past the actor, and drops them once
//! they are fully off screen.

use rand::Rng;

use super::state::Obstacle;
use crate::config::WorldConfig;
use crate::consts::GROUND_TILE_PERIOD;

/// Live obstacles plus the ground scroll that moves with them
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    /// Spawn order, which is also left-to-right order
    obstacles: Vec<Obstacle>,
    ground_offset: f32,
}

impl ObstacleField {
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn ground_offset(&self) -> f32 {
        self.ground_offset
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.ground_offset = 0.0;
    }

    /// Scroll the ground texture by one tick
    pub fn scroll(&mut self, config: &WorldConfig) {
        self.ground_offset =
            (self.ground_offset - config.obstacle_speed).rem_euclid(GROUND_TILE_PERIOD);
    }

    /// True when the field is empty or the newest obstacle has moved far
    /// enough from the spawn edge
    pub fn should_spawn(&self, config: &WorldConfig) -> bool {
        match self.obstacles.last() {
            None => true,
            Some(last) => last.x < config.width - config.spawn_spacing,
        }
    }

    /// Append a new obstacle at the spawn edge with a random gap
    pub fn spawn<R: Rng>(&mut self, config: &WorldConfig, rng: &mut R) -> Obstacle {
        let (min_top, max_top) = config.gap_top_range();
        let obstacle = Obstacle {
            x: config.spawn_x(),
            gap_top: rng.random_range(min_top..=max_top),
        };
        self.obstacles.push(obstacle);
        obstacle
    }

    /// Move every obstacle left by one tick.
    ///
    /// Returns the index of the first obstacle whose trailing edge crossed
    /// the actor's x during this tick. Later crossings in the same tick are
    /// not reported.
    pub fn advance(&mut self, config: &WorldConfig) -> Option<usize> {
        let mut scored = None;
        for (i, obstacle) in self.obstacles.iter_mut().enumerate() {
            let before = obstacle.trailing_edge(config.obstacle_width);
            obstacle.x -= config.obstacle_speed;
            let after = obstacle.trailing_edge(config.obstacle_width);

            if scored.is_none() && before >= config.actor_x && after < config.actor_x {
                scored = Some(i);
            }
        }
        scored
    }

    /// Drop obstacles that have left the screen; returns how many
    pub fn retire(&mut self, config: &WorldConfig) -> usize {
        let threshold = -(config.obstacle_width + config.retire_margin);
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.x > threshold);
        before - self.obstacles.len()
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }
}
