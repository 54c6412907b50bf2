use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Simple entity storage using a flat Vec.
/// A stage holds a few dozen objects; spawn order is draw order within a layer.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(128),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    /// Remove an entity by ID, keeping the order of the rest.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    /// Remove every entity carrying `tag`. Returns how many were removed.
    pub fn despawn_tagged(&mut self, tag: &str) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| e.tag != tag);
        before - self.entities.len()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// Find the first entity with the given tag (mutable).
    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.tag == tag)
    }

    /// Topmost interactive entity under `p` (last spawned in the highest layer wins).
    pub fn pick(&self, p: Vec2) -> Option<&Entity> {
        self.entities
            .iter()
            .filter(|e| e.interactive && e.contains_point(p))
            .max_by_key(|e| e.layer)
    }

    /// Move an entity to the end of its layer so it draws above its siblings.
    pub fn bring_to_front(&mut self, id: EntityId) {
        if let Some(entity) = self.despawn(id) {
            self.entities.push(entity);
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities.
    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::{Anchor, Shape};
    use crate::components::layer::RenderLayer;

    fn card(id: u32, layer: RenderLayer) -> Entity {
        Entity::new(EntityId(id), Shape::Rect { size: Vec2::splat(50.0), radius: 0.0 })
            .with_anchor(Anchor::Center)
            .with_layer(layer)
            .interactive()
    }

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = scene.spawn(card(1, RenderLayer::Tiles).with_pos(Vec2::new(10.0, 20.0)));
        assert_eq!(scene.get(id).unwrap().pos, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn despawn_keeps_order() {
        let mut scene = Scene::new();
        for i in 1..=3 {
            scene.spawn(card(i, RenderLayer::Tiles));
        }
        scene.despawn(EntityId(1));
        let ids: Vec<_> = scene.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn despawn_tagged_removes_all_matches() {
        let mut scene = Scene::new();
        scene.spawn(card(1, RenderLayer::Tiles).with_tag("eval-char"));
        scene.spawn(card(2, RenderLayer::Tiles).with_tag("eval-char"));
        scene.spawn(card(3, RenderLayer::Tiles).with_tag("mic-btn"));
        assert_eq!(scene.despawn_tagged("eval-char"), 2);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn pick_prefers_higher_layer_then_later_spawn() {
        let mut scene = Scene::new();
        scene.spawn(card(1, RenderLayer::Overlay));
        scene.spawn(card(2, RenderLayer::Tiles));
        scene.spawn(card(3, RenderLayer::Tiles));
        assert_eq!(scene.pick(Vec2::ZERO).unwrap().id, EntityId(1));
        scene.despawn(EntityId(1));
        assert_eq!(scene.pick(Vec2::ZERO).unwrap().id, EntityId(3));
    }
}
