// extensions/tween.rs
//
// Tween system — animated property transitions keyed by EntityId.
// Completion is reported as data (the tween's payload), never as a callback.
//
// Usage:
//   let mut tweens: TweenState<MyEvent> = TweenState::new();
//   tweens.add(id, Tween::position(from, to, 0.5, Easing::QuadOut).with_on_complete(MyEvent::Landed));
//   for (entity, event) in tweens.tick(dt, &mut scene) { ... }

use glam::Vec2;

use super::easing::{ease, ease_vec2, Easing};
use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// What property a tween animates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenTarget {
    Position { from: Vec2, to: Vec2 },
    PositionX { from: f32, to: f32 },
    PositionY { from: f32, to: f32 },
    Scale { from: Vec2, to: Vec2 },
    /// Degrees.
    Rotation { from: f32, to: f32 },
    Alpha { from: f32, to: f32 },
}

/// What happens when a tween reaches its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenLoop {
    /// Stop and remove the tween.
    #[default]
    Once,
    /// Restart from the beginning until removed.
    Loop,
    /// Play forward, then back to the start once, then stop.
    Return,
}

/// A single tween animation.
#[derive(Debug, Clone)]
pub struct Tween<E> {
    pub target: TweenTarget,
    /// Duration in seconds.
    pub duration: f32,
    pub elapsed: f32,
    pub easing: Easing,
    pub loop_mode: TweenLoop,
    /// For Return: whether the backward leg is playing.
    returning: bool,
    /// Payload reported by `TweenState::tick` when the tween finishes.
    pub on_complete: Option<E>,
}

impl<E> Tween<E> {
    fn new(target: TweenTarget, duration: f32, easing: Easing) -> Self {
        Self {
            target,
            duration,
            elapsed: 0.0,
            easing,
            loop_mode: TweenLoop::Once,
            returning: false,
            on_complete: None,
        }
    }

    pub fn position(from: Vec2, to: Vec2, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Position { from, to }, duration, easing)
    }

    pub fn position_x(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::PositionX { from, to }, duration, easing)
    }

    pub fn position_y(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::PositionY { from, to }, duration, easing)
    }

    pub fn scale(from: Vec2, to: Vec2, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Scale { from, to }, duration, easing)
    }

    pub fn scale_uniform(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::scale(Vec2::splat(from), Vec2::splat(to), duration, easing)
    }

    pub fn rotation(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Rotation { from, to }, duration, easing)
    }

    pub fn alpha(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Alpha { from, to }, duration, easing)
    }

    // -- Builder methods --

    pub fn with_loop(mut self, mode: TweenLoop) -> Self {
        self.loop_mode = mode;
        self
    }

    pub fn with_on_complete(mut self, event: E) -> Self {
        self.on_complete = Some(event);
        self
    }

    /// Normalized progress [0, 1] of the current leg.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    fn apply(&self, scene: &mut Scene, entity_id: EntityId) {
        let t = if self.returning { 1.0 - self.progress() } else { self.progress() };
        let Some(entity) = scene.get_mut(entity_id) else {
            return;
        };
        match self.target {
            TweenTarget::Position { from, to } => entity.pos = ease_vec2(from, to, t, self.easing),
            TweenTarget::PositionX { from, to } => entity.pos.x = ease(from, to, t, self.easing),
            TweenTarget::PositionY { from, to } => entity.pos.y = ease(from, to, t, self.easing),
            TweenTarget::Scale { from, to } => entity.scale = ease_vec2(from, to, t, self.easing),
            TweenTarget::Rotation { from, to } => entity.rotation = ease(from, to, t, self.easing),
            TweenTarget::Alpha { from, to } => entity.alpha = ease(from, to, t, self.easing),
        }
    }
}

/// Handle to a tween for later reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(pub u32);

/// Manages all active tweens. Tweens run and complete in the order they were added.
#[derive(Debug)]
pub struct TweenState<E> {
    tweens: Vec<(TweenId, EntityId, Tween<E>)>,
    next_id: u32,
}

impl<E> Default for TweenState<E> {
    fn default() -> Self {
        Self {
            tweens: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E> TweenState<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tween for an entity. Returns a handle for later control.
    pub fn add(&mut self, entity: EntityId, tween: Tween<E>) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.push((id, entity, tween));
        id
    }

    /// Remove a tween by handle. Its completion payload is dropped.
    pub fn remove(&mut self, id: TweenId) -> bool {
        let before = self.tweens.len();
        self.tweens.retain(|(t, _, _)| *t != id);
        before != self.tweens.len()
    }

    /// Cancel every tween animating `entity`.
    pub fn remove_entity(&mut self, entity: EntityId) {
        self.tweens.retain(|(_, e, _)| *e != entity);
    }

    /// Whether any tween is animating `entity`.
    pub fn is_animating(&self, entity: EntityId) -> bool {
        self.tweens.iter().any(|(_, e, _)| *e == entity)
    }

    pub fn get(&self, id: TweenId) -> Option<&Tween<E>> {
        self.tweens.iter().find(|(t, _, _)| *t == id).map(|(_, _, tween)| tween)
    }

    /// Advance all tweens and apply them to the scene.
    /// Returns the completion payloads of tweens that finished this tick, in start order.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> Vec<(EntityId, E)> {
        let mut finished = Vec::new();

        for (id, entity_id, tween) in self.tweens.iter_mut() {
            tween.elapsed += dt;
            tween.apply(scene, *entity_id);

            if tween.elapsed < tween.duration {
                continue;
            }
            match tween.loop_mode {
                TweenLoop::Once => finished.push(*id),
                TweenLoop::Loop => tween.elapsed = 0.0,
                TweenLoop::Return if !tween.returning => {
                    tween.returning = true;
                    tween.elapsed = 0.0;
                }
                TweenLoop::Return => finished.push(*id),
            }
        }

        let mut completions = Vec::new();
        if finished.is_empty() {
            return completions;
        }
        let mut kept = Vec::with_capacity(self.tweens.len());
        for (id, entity_id, tween) in self.tweens.drain(..) {
            if finished.contains(&id) {
                if let Some(event) = tween.on_complete {
                    completions.push((entity_id, event));
                }
            } else {
                kept.push((id, entity_id, tween));
            }
        }
        self.tweens = kept;
        completions
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::{Entity, Shape};

    fn scene_with(id: EntityId) -> Scene {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(id, Shape::Circle { radius: 4.0 }));
        scene
    }

    #[test]
    fn tween_position() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut tweens: TweenState<()> = TweenState::new();
        tweens.add(id, Tween::position(Vec2::ZERO, Vec2::new(100.0, 0.0), 1.0, Easing::Linear));

        tweens.tick(0.5, &mut scene);
        assert!((scene.get(id).unwrap().pos.x - 50.0).abs() < 0.01);

        tweens.tick(0.5, &mut scene);
        assert!((scene.get(id).unwrap().pos.x - 100.0).abs() < 0.01);
        assert!(tweens.is_empty());
    }

    #[test]
    fn completion_payload_is_returned_once() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut tweens = TweenState::new();
        tweens.add(id, Tween::alpha(1.0, 0.0, 0.5, Easing::Linear).with_on_complete("faded"));

        assert!(tweens.tick(0.25, &mut scene).is_empty());
        assert_eq!(tweens.tick(0.25, &mut scene), vec![(id, "faded")]);
        assert!(tweens.tick(0.25, &mut scene).is_empty());
        assert_eq!(scene.get(id).unwrap().alpha, 0.0);
    }

    #[test]
    fn return_plays_back_to_start() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut tweens = TweenState::new();
        tweens.add(
            id,
            Tween::scale_uniform(1.0, 0.8, 0.1, Easing::Linear)
                .with_loop(TweenLoop::Return)
                .with_on_complete(()),
        );

        assert!(tweens.tick(0.1, &mut scene).is_empty());
        assert!((scene.get(id).unwrap().scale.x - 0.8).abs() < 1e-4);
        assert_eq!(tweens.tick(0.1, &mut scene).len(), 1);
        assert!((scene.get(id).unwrap().scale.x - 1.0).abs() < 1e-4);
    }

    #[test]
    fn loop_never_completes() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut tweens = TweenState::new();
        tweens.add(id, Tween::alpha(0.6, 0.0, 1.0, Easing::Linear).with_loop(TweenLoop::Loop).with_on_complete(()));
        for _ in 0..5 {
            assert!(tweens.tick(1.0, &mut scene).is_empty());
        }
        assert_eq!(tweens.len(), 1);
    }

    #[test]
    fn remove_entity_cancels_without_completion() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut tweens = TweenState::new();
        tweens.add(id, Tween::position(Vec2::ZERO, Vec2::ONE, 1.0, Easing::Linear).with_on_complete(1));
        tweens.add(id, Tween::rotation(0.0, 1.0, 1.0, Easing::Linear).with_on_complete(2));
        assert!(tweens.is_animating(id));

        tweens.remove_entity(id);
        assert!(tweens.is_empty());
        assert!(tweens.tick(2.0, &mut scene).is_empty());
    }
}
