//! Small constructors shared by the stage builders.

use glam::Vec2;

use super::session::Sprite;
use crate::api::game::EngineContext;
use crate::api::types::EntityId;
use crate::components::entity::{Anchor, Entity, Font, Shape, Style};
use crate::components::layer::RenderLayer;
use crate::config;

/// Centered text on the target layer.
pub fn text(id: EntityId, content: impl Into<String>, font_size: f32, weight: u16, font: Font, fill: &str) -> Entity {
    Entity::new(
        id,
        Shape::Text {
            content: content.into(),
            font_size,
            weight,
            font,
        },
    )
    .with_anchor(Anchor::Center)
    .with_style(Style::filled(fill))
}

/// Full-canvas background image centered on the stage.
pub fn spawn_background(ctx: &mut EngineContext, src: &str, scale: f32) -> EntityId {
    let id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(id, Shape::Image { src: src.trim().to_string() })
            .with_tag("background")
            .with_pos(Vec2::new(config::CANVAS_WIDTH / 2.0, config::CANVAS_HEIGHT / 2.0))
            .with_anchor(Anchor::Center)
            .with_scale(Vec2::splat(scale))
            .with_layer(RenderLayer::Background),
    );
    id
}

/// Hidden character sprite waiting at `home`.
pub fn spawn_sprite(ctx: &mut EngineContext, src: &str, home: Vec2, scale: f32, tag: &str) -> Sprite {
    let id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(id, Shape::Image { src: src.to_string() })
            .with_tag(tag)
            .with_pos(home)
            .with_anchor(Anchor::Center)
            .with_scale(Vec2::splat(scale))
            .with_alpha(0.0)
            .with_layer(RenderLayer::Effects),
    );
    Sprite { id, home }
}

/// Named icon button the host draws itself.
pub fn icon_button(id: EntityId, name: &str, size: f32, pos: Vec2, tag: &str) -> Entity {
    Entity::new(id, Shape::Icon { name: name.to_string(), size })
        .with_tag(tag)
        .with_pos(pos)
        .with_anchor(Anchor::Center)
        .with_layer(RenderLayer::Tiles)
        .with_style(Style::filled(config::colors::ACCENT))
        .interactive()
}
