//! Collision detection
//!
//! Circle-vs-rectangle against axis-aligned obstacle bodies, plus the ground
//! line and the ceiling. Pure: nothing here mutates state.

use glam::Vec2;

use super::state::Obstacle;
use crate::config::WorldConfig;

/// What the actor ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Index into the obstacle list
    Obstacle(usize),
    Ground,
    Ceiling,
}

/// Static geometry collision needs besides the obstacles themselves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    /// y of the ground line
    pub ground_y: f32,
    pub obstacle_width: f32,
    pub gap_height: f32,
    /// Subtracted from the actor radius before testing
    pub forgiveness: f32,
}

impl From<&WorldConfig> for WorldBounds {
    fn from(config: &WorldConfig) -> Self {
        Self {
            ground_y: config.ground_y(),
            obstacle_width: config.obstacle_width,
            gap_height: config.gap_height,
            forgiveness: config.hit_forgiveness,
        }
    }
}

/// First thing the actor overlaps, if any. Obstacles are tested in order
/// before the ground and ceiling.
pub fn check(
    actor_pos: Vec2,
    actor_radius: f32,
    obstacles: &[Obstacle],
    bounds: &WorldBounds,
) -> Option<Hit> {
    let r = actor_radius - bounds.forgiveness;
    let (x, y) = (actor_pos.x, actor_pos.y);

    for (i, obstacle) in obstacles.iter().enumerate() {
        let overlaps_x = x + r > obstacle.x && x - r < obstacle.trailing_edge(bounds.obstacle_width);
        if !overlaps_x {
            continue;
        }
        let above_gap = y - r < obstacle.gap_top as f32;
        let below_gap = y + r > obstacle.gap_bottom(bounds.gap_height);
        if above_gap || below_gap {
            return Some(Hit::Obstacle(i));
        }
    }

    if y + r >= bounds.ground_y {
        return Some(Hit::Ground);
    }
    if y - r <= 0.0 {
        return Some(Hit::Ceiling);
    }

    None
}

/// True if the actor touches an obstacle body, the ground or the ceiling
#[inline]
pub fn hit(actor_pos: Vec2, actor_radius: f32, obstacles: &[Obstacle], bounds: &WorldBounds) -> bool {
    check(actor_pos, actor_radius, obstacles, bounds).is_some()
}
