//! Visual effects: particle bursts played over the stage.
//!
//! Effects are presentational only; nothing in the player reads them back.

mod particle;
mod rng;

pub use particle::{Particle, END_SCALE};
pub use rng::Rng;

use glam::Vec2;

use crate::config;

/// Container for live particles plus the RNG that seeds new bursts.
pub struct EffectsState {
    pub particles: Vec<Particle>,
    pub rng: Rng,
}

impl EffectsState {
    /// Create a new EffectsState with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        EffectsState {
            particles: Vec::new(),
            rng: Rng::new(seed.wrapping_add(7919)),
        }
    }

    /// Create a new EffectsState with room for `max_particles` before reallocating.
    pub fn with_capacity(seed: u64, max_particles: usize) -> Self {
        EffectsState {
            particles: Vec::with_capacity(max_particles),
            rng: Rng::new(seed.wrapping_add(7919)),
        }
    }

    /// Celebration burst: particles fly outward in random directions and fade.
    pub fn spawn_fireworks(&mut self, center: Vec2) {
        self.spawn_burst(center, config::FIREWORK_COUNT);
    }

    pub fn spawn_burst(&mut self, center: Vec2, count: usize) {
        for _ in 0..count {
            let radius = self.rng.range(config::FIREWORK_RADIUS.0, config::FIREWORK_RADIUS.1);
            let color = config::FIREWORK_COLORS[self.rng.next_int(config::FIREWORK_COLORS.len() as u32) as usize];
            let angle = self.rng.next_f32() * std::f32::consts::TAU;
            let distance = self.rng.range(config::FIREWORK_DISTANCE.0, config::FIREWORK_DISTANCE.1);
            let lifetime = self.rng.range(config::FIREWORK_LIFETIME.0, config::FIREWORK_LIFETIME.1);
            let destination = center + Vec2::from_angle(angle) * distance;
            self.particles.push(Particle::new(center, destination, radius, color, lifetime));
        }
    }

    /// Advance every particle, dropping the ones that landed.
    pub fn tick(&mut self, dt: f32) {
        self.particles.retain_mut(|p| p.tick(dt));
    }

    /// Clear all effects.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fireworks_spawn_the_configured_count() {
        let mut effects = EffectsState::new(42);
        effects.spawn_fireworks(Vec2::new(640.0, 400.0));
        assert_eq!(effects.len(), config::FIREWORK_COUNT);
        for p in &effects.particles {
            let travel = p.destination.distance(p.origin);
            assert!(travel >= config::FIREWORK_DISTANCE.0 - 0.01);
            assert!(travel <= config::FIREWORK_DISTANCE.1 + 0.01);
            assert!(config::FIREWORK_COLORS.contains(&p.color));
        }
    }

    #[test]
    fn burst_is_gone_after_longest_lifetime() {
        let mut effects = EffectsState::new(1);
        effects.spawn_fireworks(Vec2::ZERO);
        effects.tick(config::FIREWORK_LIFETIME.0 - 0.1);
        assert_eq!(effects.len(), config::FIREWORK_COUNT);
        effects.tick(config::FIREWORK_LIFETIME.1);
        assert!(effects.is_empty());
    }

    #[test]
    fn effects_state_clear() {
        let mut effects = EffectsState::with_capacity(42, 64);
        effects.spawn_burst(Vec2::ZERO, 5);
        effects.clear();
        assert!(effects.is_empty());
    }
}
