use glam::Vec2;
use serde::Serialize;

use crate::components::entity::Entity;
use crate::core::scene::Scene;
use crate::systems::effects::EffectsState;

/// A particle as the host draws it this frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticleView {
    pub pos: Vec2,
    pub radius: f32,
    pub color: &'static str,
    pub alpha: f32,
    pub scale: f32,
}

/// Everything the rendering collaborator needs for one frame, back to front.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame<'a> {
    pub entities: Vec<&'a Entity>,
    pub particles: Vec<ParticleView>,
}

/// Snapshot the scene: visible entities sorted by layer (spawn order within a layer),
/// particles drawn on top.
pub fn build_frame<'a>(scene: &'a Scene, effects: &EffectsState) -> Frame<'a> {
    let mut entities: Vec<&Entity> = scene.iter().filter(|e| e.visible).collect();
    entities.sort_by_key(|e| e.layer);
    let particles = effects
        .particles
        .iter()
        .map(|p| ParticleView {
            pos: p.position(),
            radius: p.radius,
            color: p.color,
            alpha: p.alpha(),
            scale: p.scale(),
        })
        .collect();
    Frame { entities, particles }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::entity::Shape;
    use crate::components::layer::RenderLayer;

    fn dot(id: u32, layer: RenderLayer) -> Entity {
        Entity::new(EntityId(id), Shape::Circle { radius: 1.0 }).with_layer(layer)
    }

    #[test]
    fn frame_groups_by_layer() {
        let mut scene = Scene::new();
        scene.spawn(dot(1, RenderLayer::Overlay));
        scene.spawn(dot(2, RenderLayer::Background));
        scene.spawn(dot(3, RenderLayer::Tiles));
        scene.spawn(dot(4, RenderLayer::Background));
        let effects = EffectsState::new(1);
        let ids: Vec<u32> = build_frame(&scene, &effects).entities.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[test]
    fn hidden_entities_are_skipped() {
        let mut scene = Scene::new();
        let mut hidden = dot(1, RenderLayer::Tiles);
        hidden.visible = false;
        scene.spawn(hidden);
        scene.spawn(dot(2, RenderLayer::Tiles));
        let mut effects = EffectsState::new(1);
        effects.spawn_burst(Vec2::ZERO, 3);
        let frame = build_frame(&scene, &effects);
        assert_eq!(frame.entities.len(), 1);
        assert_eq!(frame.particles.len(), 3);
    }

    #[test]
    fn frame_serializes_for_the_host() {
        let mut scene = Scene::new();
        scene.spawn(dot(7, RenderLayer::Targets).with_tag("mic-btn"));
        let effects = EffectsState::new(1);
        let json = serde_json::to_value(build_frame(&scene, &effects)).unwrap();
        assert_eq!(json["entities"][0]["tag"], "mic-btn");
        assert_eq!(json["entities"][0]["shape"]["type"], "circle");
        assert_eq!(json["entities"][0]["layer"], "targets");
    }
}
