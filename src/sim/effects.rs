//! Particles and floating texts
//!
//! Purely visual: nothing here feeds back into gameplay. Every spread is drawn
//! from the game's RNG so a seeded run replays identically.

use glam::Vec2;
use rand::Rng;

use super::state::{FloatingText, Particle, TextKind};
use crate::consts::*;
use crate::rgb;

/// Flap debris colour
pub const FLAP_COLOR: u32 = rgb(0xff, 0xff, 0xff);

/// Death burst palette
pub const EXPLOSION_COLORS: [u32; 4] = [
    rgb(0xff, 0xdd, 0x00),
    rgb(0xff, 0x88, 0x00),
    rgb(0xff, 0x44, 0x00),
    rgb(0xff, 0xff, 0xff),
];

impl Particle {
    /// Drift, fall, fade
    pub fn step(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.life -= PARTICLE_DECAY;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

impl FloatingText {
    /// Rise and fade
    pub fn step(&mut self) {
        self.pos.y -= TEXT_RISE_SPEED;
        self.life -= TEXT_DECAY;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// All live effects. Order carries no meaning.
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub texts: Vec<FloatingText>,
}

impl Effects {
    pub fn clear(&mut self) {
        self.particles.clear();
        self.texts.clear();
    }

    /// Advance everything one tick and drop what has faded
    pub fn step(&mut self) {
        for particle in &mut self.particles {
            particle.step();
        }
        self.particles.retain(Particle::is_alive);

        for text in &mut self.texts {
            text.step();
        }
        self.texts.retain(FloatingText::is_alive);
    }

    /// Small white puff under the actor on every flap
    pub fn spawn_flap_burst<R: Rng>(&mut self, rng: &mut R, at: Vec2) {
        for _ in 0..FLAP_PARTICLES {
            self.particles.push(Particle {
                pos: at,
                vel: Vec2::new(rng.random_range(-2.0..=2.0), rng.random_range(1.0..=4.0)),
                size: rng.random_range(3..=6) as f32,
                color: FLAP_COLOR,
                life: 1.0,
            });
        }
    }

    /// Wide multicoloured burst on death
    pub fn spawn_death_burst<R: Rng>(&mut self, rng: &mut R, at: Vec2) {
        for _ in 0..DEATH_PARTICLES {
            let color = EXPLOSION_COLORS[rng.random_range(0..EXPLOSION_COLORS.len())];
            self.particles.push(Particle {
                pos: at,
                vel: Vec2::new(rng.random_range(-5.0..=5.0), rng.random_range(-6.0..=2.0)),
                size: rng.random_range(5..=12) as f32,
                color,
                life: 1.0,
            });
        }
    }

    /// "+1" next to the actor, plus a centred celebration on every
    /// `MILESTONE_PERIOD`th point
    pub fn spawn_score_text(&mut self, actor: Vec2, score: u32, world_center: Vec2) {
        self.texts.push(FloatingText {
            pos: actor + Vec2::new(POINT_TEXT_OFFSET_X, POINT_TEXT_OFFSET_Y),
            text: "+1".to_string(),
            kind: TextKind::Point,
            life: POINT_TEXT_LIFE,
        });

        if is_milestone(score) {
            self.texts.push(FloatingText {
                pos: world_center,
                text: format!("{score}!"),
                kind: TextKind::Milestone,
                life: MILESTONE_TEXT_LIFE,
            });
        }
    }
}

#[inline]
pub fn is_milestone(score: u32) -> bool {
    score > 0 && score % MILESTONE_PERIOD == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_flap_burst_contract() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut fx = Effects::default();
        fx.spawn_flap_burst(&mut rng, Vec2::new(100.0, 326.0));

        assert_eq!(fx.particles.len(), FLAP_PARTICLES);
        for p in &fx.particles {
            assert_eq!(p.pos, Vec2::new(100.0, 326.0));
            assert!((-2.0..=2.0).contains(&p.vel.x));
            assert!((1.0..=4.0).contains(&p.vel.y));
            assert!((3.0..=6.0).contains(&p.size));
            assert_eq!(p.color, FLAP_COLOR);
            assert_eq!(p.life, 1.0);
        }
    }

    #[test]
    fn test_death_burst_contract() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut fx = Effects::default();
        fx.spawn_death_burst(&mut rng, Vec2::new(100.0, 400.0));

        assert_eq!(fx.particles.len(), DEATH_PARTICLES);
        for p in &fx.particles {
            assert!((-5.0..=5.0).contains(&p.vel.x));
            assert!((-6.0..=2.0).contains(&p.vel.y));
            assert!((5.0..=12.0).contains(&p.size));
            assert!(EXPLOSION_COLORS.contains(&p.color));
        }
    }

    #[test]
    fn test_particle_motion() {
        let mut p = Particle {
            pos: Vec2::new(0.0, 0.0),
            vel: Vec2::new(1.0, -2.0),
            size: 4.0,
            color: FLAP_COLOR,
            life: 1.0,
        };
        p.step();
        assert_eq!(p.pos, Vec2::new(1.0, -2.0));
        assert!((p.vel.y - (-1.8)).abs() < 1e-6);
        assert!((p.life - 0.96).abs() < 1e-6);
    }

    #[test]
    fn test_particles_fade_out() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut fx = Effects::default();
        fx.spawn_flap_burst(&mut rng, Vec2::ZERO);

        // 1.0 / 0.04 = 25 ticks of life
        for _ in 0..24 {
            fx.step();
        }
        assert_eq!(fx.particles.len(), FLAP_PARTICLES);
        for _ in 0..2 {
            fx.step();
        }
        assert!(fx.particles.is_empty());
    }

    #[test]
    fn test_texts_outlive_particles() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut fx = Effects::default();
        fx.spawn_flap_burst(&mut rng, Vec2::ZERO);
        fx.spawn_score_text(Vec2::new(100.0, 300.0), 1, Vec2::new(240.0, 320.0));

        for _ in 0..30 {
            fx.step();
        }
        assert!(fx.particles.is_empty());
        assert_eq!(fx.texts.len(), 1);
        assert_eq!(fx.texts[0].pos.y, 270.0 - 30.0 * TEXT_RISE_SPEED);

        // 1.0 / 0.03 ~ 33.3 ticks
        for _ in 0..4 {
            fx.step();
        }
        assert!(fx.texts.is_empty());
    }

    #[test]
    fn test_score_text_and_milestone() {
        let mut fx = Effects::default();
        let center = Vec2::new(240.0, 320.0);

        fx.spawn_score_text(Vec2::new(100.0, 300.0), 9, center);
        assert_eq!(fx.texts.len(), 1);
        assert_eq!(fx.texts[0].text, "+1");
        assert_eq!(fx.texts[0].pos, Vec2::new(120.0, 270.0));

        fx.spawn_score_text(Vec2::new(100.0, 300.0), 10, center);
        assert_eq!(fx.texts.len(), 3);
        let milestone = &fx.texts[2];
        assert_eq!(milestone.kind, TextKind::Milestone);
        assert_eq!(milestone.text, "10!");
        assert_eq!(milestone.pos, center);
        assert_eq!(milestone.life, MILESTONE_TEXT_LIFE);
    }

    #[test]
    fn test_milestones() {
        assert!(!is_milestone(0));
        assert!(!is_milestone(9));
        assert!(is_milestone(10));
        assert!(is_milestone(30));
    }
}
