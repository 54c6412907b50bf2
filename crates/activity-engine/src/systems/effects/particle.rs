//! Firework particles: a dot flying from a burst center to a fixed destination.

use glam::Vec2;
use serde::Serialize;

use crate::extensions::easing::{ease, ease_vec2, Easing};

/// Scale a particle shrinks to by the end of its flight.
pub const END_SCALE: f32 = 0.1;

/// A single burst particle. Position, alpha and scale are derived from elapsed time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Particle {
    pub origin: Vec2,
    pub destination: Vec2,
    pub radius: f32,
    pub color: &'static str,
    /// Flight duration in seconds.
    pub lifetime: f32,
    pub elapsed: f32,
}

impl Particle {
    pub fn new(origin: Vec2, destination: Vec2, radius: f32, color: &'static str, lifetime: f32) -> Self {
        Particle {
            origin,
            destination,
            radius,
            color,
            lifetime,
            elapsed: 0.0,
        }
    }

    fn t(&self) -> f32 {
        if self.lifetime <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.lifetime).clamp(0.0, 1.0)
        }
    }

    pub fn position(&self) -> Vec2 {
        ease_vec2(self.origin, self.destination, self.t(), Easing::ExpoOut)
    }

    pub fn alpha(&self) -> f32 {
        ease(1.0, 0.0, self.t(), Easing::ExpoOut)
    }

    pub fn scale(&self) -> f32 {
        ease(1.0, END_SCALE, self.t(), Easing::ExpoOut)
    }

    /// Advance the flight. Returns false once the particle has landed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.elapsed < self.lifetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_expires() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(100.0, 0.0), 4.0, "#EF4444", 0.1);
        assert!(!p.tick(0.2), "particle should expire");
    }

    #[test]
    fn particle_lives_while_in_flight() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(100.0, 0.0), 4.0, "#EF4444", 1.0);
        assert!(p.tick(0.1));
        assert!(p.position().x > 0.0 && p.position().x < 100.0);
        assert!(p.alpha() < 1.0);
    }

    #[test]
    fn particle_lands_faded_and_shrunk() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(0.0, 200.0), 4.0, "#6366F1", 1.0);
        p.tick(1.0);
        assert!((p.position().y - 200.0).abs() < 1e-3);
        assert!(p.alpha().abs() < 1e-3);
        assert!((p.scale() - END_SCALE).abs() < 1e-3);
    }
}
