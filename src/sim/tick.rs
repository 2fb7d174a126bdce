//! Fixed timestep simulation tick
//!
//! The state machine: `Waiting -> Playing` on the first flap, `Playing -> Dead`
//! on collision, `Dead -> Waiting` on the next flap.

use glam::Vec2;

use super::collision::{self, Hit, WorldBounds};
use super::effects::is_milestone;
use super::state::{GamePhase, GameState};
use crate::consts::FLAP_PARTICLE_OFFSET_Y;

/// Input events, applied in arrival order on a single logical queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Flap,
    Tick,
}

impl GameState {
    /// Apply one queued event
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Flap => self.flap(),
            Command::Tick => self.update(),
        }
    }

    /// Player input. Takes effect immediately, not at the next tick.
    ///
    /// While dead this only resets; the flap that starts a new run is the
    /// next one.
    pub fn flap(&mut self) {
        match self.phase {
            GamePhase::Dead => {
                log::info!("Reset (best {})", self.best);
                self.reset();
                return;
            }
            GamePhase::Waiting => {
                log::info!("Run started");
                self.phase = GamePhase::Playing;
            }
            GamePhase::Playing => {}
        }

        let impulse = self.config().flap_impulse;
        self.actor.flap(impulse);
        let at = Vec2::new(self.actor.x, self.actor.y + FLAP_PARTICLE_OFFSET_Y);
        self.effects.spawn_flap_burst(&mut self.rng, at);
    }

    /// Advance the game by one fixed timestep
    pub fn update(&mut self) {
        self.frame += 1;
        self.actor.animate_wing();

        if self.phase != GamePhase::Playing {
            let center = self.config().center_y();
            self.actor.bob(center, self.frame);
            return;
        }

        // Config is immutable for the run; clone sidesteps borrowing self
        let config = self.config().clone();

        self.actor.integrate(config.gravity, config.max_fall);
        self.obstacles.scroll(&config);

        if self.obstacles.should_spawn(&config) {
            let obstacle = self.obstacles.spawn(&config, &mut self.rng);
            log::debug!("Spawned obstacle at x={} gap_top={}", obstacle.x, obstacle.gap_top);
        }

        if self.obstacles.advance(&config).is_some() {
            self.award_point(Vec2::new(config.width / 2.0, config.height / 2.0));
        }

        let retired = self.obstacles.retire(&config);
        if retired > 0 {
            log::debug!("Retired {} obstacle(s)", retired);
        }

        self.effects.step();

        let actor_pos = Vec2::new(self.actor.x, self.actor.y);
        let bounds = WorldBounds::from(&config);
        if let Some(hit) = collision::check(
            actor_pos,
            self.actor.radius,
            self.obstacles.obstacles(),
            &bounds,
        ) {
            self.die(hit);
        }
    }

    fn award_point(&mut self, world_center: Vec2) {
        self.score += 1;
        let actor_pos = Vec2::new(self.actor.x, self.actor.y);
        self.effects.spawn_score_text(actor_pos, self.score, world_center);
        if is_milestone(self.score) {
            log::debug!("Milestone: {}", self.score);
        }
    }

    fn die(&mut self, hit: Hit) {
        self.phase = GamePhase::Dead;
        log::info!("Died ({:?}) with score {}", hit, self.score);
        if self.score > self.best {
            self.best = self.score;
            log::info!("New best: {}", self.best);
        }
        let at = Vec2::new(self.actor.x, self.actor.y);
        self.effects.spawn_death_burst(&mut self.rng, at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::consts::*;
    use crate::sim::state::{Obstacle, TextKind};
    use proptest::prelude::*;

    fn new_game() -> GameState {
        GameState::new(WorldConfig::default(), 12345).unwrap()
    }

    /// Flap whenever the actor sinks below the centre of the next gap
    fn autopilot(state: &mut GameState) {
        let config = state.config().clone();
        let target = state
            .obstacles
            .obstacles()
            .iter()
            .find(|o| o.trailing_edge(config.obstacle_width) >= state.actor.x - state.actor.radius)
            .map(|o| o.gap_top as f32 + config.gap_height * 0.6)
            .unwrap_or(config.center_y());
        if state.actor.y > target && state.actor.vel > 0.0 {
            state.flap();
        }
    }

    #[test]
    fn test_first_flap_starts_and_lifts() {
        let mut state = new_game();
        state.flap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.actor.vel, FLAP_IMPULSE);
        assert_eq!(state.effects.particles.len(), FLAP_PARTICLES);
    }

    #[test]
    fn test_flap_while_playing_only_lifts() {
        let mut state = new_game();
        state.flap();
        for _ in 0..5 {
            state.update();
        }
        state.flap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.actor.vel, FLAP_IMPULSE);
    }

    #[test]
    fn test_velocity_after_flap_then_tick() {
        let mut state = new_game();
        state.flap();
        state.update();
        assert_eq!(state.actor.vel, FLAP_IMPULSE + GRAVITY);
        assert_eq!(state.actor.rotation, ROTATION_MIN);
    }

    #[test]
    fn test_waiting_never_starts_on_its_own() {
        let mut state = new_game();
        for _ in 0..2000 {
            state.update();
            assert_eq!(state.phase, GamePhase::Waiting);
            assert!((310.0..=330.0).contains(&state.actor.y));
        }
        assert!(state.obstacles.obstacles().is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.frame, 2000);
    }

    #[test]
    fn test_falls_to_ground_and_dies() {
        let mut state = new_game();
        state.flap();
        let mut ticks = 0;
        while state.phase == GamePhase::Playing {
            state.update();
            ticks += 1;
            assert!(ticks < 200, "never hit the ground");
        }
        assert_eq!(state.phase, GamePhase::Dead);
        assert_eq!(state.best, 0);
        // Flap puff has long faded; only the death burst remains
        assert!(ticks > 26);
        assert_eq!(state.effects.particles.len(), DEATH_PARTICLES);
    }

    #[test]
    fn test_ceiling_kills() {
        let mut state = new_game();
        state.flap();
        state.actor.y = 20.0;
        state.actor.vel = FLAP_IMPULSE;
        state.update();
        assert_eq!(state.phase, GamePhase::Dead);
    }

    #[test]
    fn test_flap_while_dead_resets_without_lift() {
        let mut state = new_game();
        state.flap();
        while state.phase == GamePhase::Playing {
            state.update();
        }
        state.best = 3;
        state.score = 3;

        state.flap();
        assert_eq!(state.phase, GamePhase::Waiting);
        assert_eq!(state.score, 0);
        assert_eq!(state.best, 3);
        assert_eq!(state.actor.vel, 0.0);
        assert_eq!(state.actor.y, 320.0);
        assert_eq!(state.frame, 0);
        assert!(state.obstacles.obstacles().is_empty());
        assert!(state.effects.particles.is_empty());
        assert!(state.effects.texts.is_empty());

        state.flap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.actor.vel, FLAP_IMPULSE);
    }

    #[test]
    fn test_dead_state_is_frozen_except_bob() {
        let mut state = new_game();
        state.flap();
        while state.phase == GamePhase::Playing {
            state.update();
        }
        let particles = state.effects.particles.clone();
        let obstacles = state.obstacles.obstacles().to_vec();
        for _ in 0..50 {
            state.update();
            assert_eq!(state.phase, GamePhase::Dead);
        }
        assert_eq!(state.effects.particles, particles);
        assert_eq!(state.obstacles.obstacles(), &obstacles[..]);
        assert!((310.0..=330.0).contains(&state.actor.y));
    }

    #[test]
    fn test_score_increments_when_obstacle_passes() {
        let mut state = new_game();
        state.flap();
        // An obstacle whose trailing edge is about to cross x=100, gap around the actor
        state.obstacles.push(Obstacle {
            x: 31.0,
            gap_top: 200,
        });
        state.actor.y = 300.0;
        state.actor.vel = -0.5;
        state.update();
        assert_eq!(state.score, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        let point = state
            .effects
            .texts
            .iter()
            .find(|t| t.kind == TextKind::Point)
            .unwrap();
        assert_eq!(point.text, "+1");

        state.update();
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_milestone_spawns_center_text() {
        let mut state = new_game();
        state.flap();
        state.score = 9;
        state.obstacles.push(Obstacle {
            x: 31.0,
            gap_top: 200,
        });
        state.actor.y = 300.0;
        state.actor.vel = -0.5;
        state.update();
        assert_eq!(state.score, 10);
        let milestone = state
            .effects
            .texts
            .iter()
            .find(|t| t.kind == TextKind::Milestone)
            .unwrap();
        assert_eq!(milestone.text, "10!");
    }

    #[test]
    fn test_best_keeps_highest_score() {
        let mut state = new_game();
        state.flap();
        state.score = 7;
        state.actor.y = 570.0;
        state.actor.vel = 0.0;
        state.update();
        assert_eq!(state.phase, GamePhase::Dead);
        assert_eq!(state.best, 7);

        state.flap();
        state.flap();
        state.score = 2;
        state.actor.y = 570.0;
        state.actor.vel = 0.0;
        state.update();
        assert_eq!(state.phase, GamePhase::Dead);
        assert_eq!(state.best, 7);
    }

    #[test]
    fn test_autopilot_scores() {
        let mut state = new_game();
        state.flap();
        for _ in 0..3000 {
            if state.phase != GamePhase::Playing {
                break;
            }
            autopilot(&mut state);
            state.update();
        }
        assert!(state.score > 0, "autopilot should clear at least one gap");
    }

    #[test]
    fn test_determinism() {
        let mut a = new_game();
        let mut b = new_game();
        let script = [Command::Flap, Command::Tick, Command::Tick, Command::Flap];
        for _ in 0..60 {
            for &command in &script {
                a.apply(command);
                b.apply(command);
            }
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    proptest! {
        #[test]
        fn prop_reset_clears_everything(
            seed in any::<u64>(),
            commands in proptest::collection::vec(any::<bool>(), 0..400)
        ) {
            let mut state = GameState::new(WorldConfig::default(), seed).unwrap();
            for flap in commands {
                state.apply(if flap { Command::Flap } else { Command::Tick });
            }
            // Make sure we are dead, then flap
            state.phase = GamePhase::Dead;
            let best = state.best;
            state.flap();
            prop_assert_eq!(state.phase, GamePhase::Waiting);
            prop_assert_eq!(state.score, 0);
            prop_assert_eq!(state.best, best);
            prop_assert!(state.obstacles.obstacles().is_empty());
            prop_assert!(state.effects.particles.is_empty());
            prop_assert!(state.effects.texts.is_empty());
        }

        #[test]
        fn prop_playing_velocity_bounded(
            seed in any::<u64>(),
            commands in proptest::collection::vec(any::<bool>(), 1..400)
        ) {
            let mut state = GameState::new(WorldConfig::default(), seed).unwrap();
            for flap in commands {
                state.apply(if flap { Command::Flap } else { Command::Tick });
                if !flap && state.phase == GamePhase::Playing {
                    prop_assert!(state.actor.vel <= MAX_FALL);
                    prop_assert!(state.actor.vel >= FLAP_IMPULSE);
                }
                if state.phase == GamePhase::Dead {
                    prop_assert!(state.best >= state.score);
                }
            }
        }
    }
}
