//! Drag-and-drop stages: pinyin tiles onto hanja and letters onto slots.

use glam::Vec2;

use super::feedback;
use super::session::{Completion, Grab, Session, TileState, Tweens};
use super::visuals;
use crate::api::game::EngineContext;
use crate::api::types::{EntityId, SoundEvent};
use crate::components::entity::{Anchor, Entity, Font, Shape, Style};
use crate::components::layer::RenderLayer;
use crate::config::{self, colors};
use crate::extensions::tween::Tween;
use crate::stage::kind::{AlphabetStage, DragStage};
use crate::systems::snap::{resolve_drop, DropOutcome, DropTarget};

pub const TILE_TAG: &str = "drag-tile";
pub const SLOT_TAG: &str = "drop-slot";
pub const BOY_TAG: &str = "feedback-boy";
pub const GIRL_TAG: &str = "feedback-girl";

/// Font sizes chosen with the author sliders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    pub pinyin: f32,
    pub hanja: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            pinyin: config::PINYIN_SIZE,
            hanja: config::HANJA_SIZE,
        }
    }
}

/// x of item `i` in a row of `count` items centered on the stage.
fn row_x(i: usize, count: usize, spacing: f32) -> f32 {
    config::DRAG_CENTER_X - (count.saturating_sub(1)) as f32 * spacing / 2.0 + i as f32 * spacing
}

pub fn build_pinyin(stage: &DragStage, session: &mut Session, ctx: &mut EngineContext, sizes: FontSizes) {
    if let Some(sub) = &stage.sub_text {
        let id = ctx.next_id();
        ctx.scene.spawn(
            visuals::text(id, sub.clone(), 36.0, 500, Font::Main, colors::SECONDARY)
                .with_pos(Vec2::new(config::DRAG_CENTER_X, config::SUBTEXT_Y)),
        );
    }

    let slot_y = config::TOKEN_Y - config::SLOT_OFFSET_Y;
    for (i, token) in stage.tokens.iter().enumerate() {
        let x = row_x(i, stage.tokens.len(), config::TOKEN_SPACING);
        let id = ctx.next_id();
        ctx.scene.spawn(
            visuals::text(id, token.hanja.clone(), sizes.hanja, 400, Font::Chinese, colors::TEXT)
                .with_pos(Vec2::new(x, config::TOKEN_Y)),
        );

        if token.fixed {
            let id = ctx.next_id();
            ctx.scene.spawn(
                visuals::text(id, token.pinyin.clone(), sizes.pinyin, 700, Font::Main, colors::ACCENT)
                    .with_pos(Vec2::new(x, slot_y)),
            );
            continue;
        }

        let slot = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(slot, Shape::Rect { size: Vec2::new(140.0, 80.0), radius: 12.0 })
                .with_tag(SLOT_TAG)
                .with_pos(Vec2::new(x, slot_y))
                .with_anchor(Anchor::Center)
                .with_style(Style::filled(colors::ACTIVE_ZONE).with_stroke(colors::ACCENT, 2.0).dashed()),
        );
        let label = ctx.next_id();
        ctx.scene.spawn(
            visuals::text(label, (session.drop_targets.len() + 1).to_string(), 16.0, 800, Font::Main, colors::ACCENT)
                .with_anchor(Anchor::TopLeft)
                .with_pos(Vec2::new(x - 60.0, slot_y - 30.0)),
        );
        session.drop_targets.push(DropTarget {
            center: Vec2::new(x, slot_y),
            expected: token.pinyin.clone(),
            handle: slot,
        });
    }

    for (i, label) in stage.sources.iter().enumerate() {
        let pos = Vec2::new(row_x(i, stage.sources.len(), config::SOURCE_SPACING), config::SOURCE_Y);
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(
                id,
                Shape::Tile { size: Vec2::new(160.0, 80.0), radius: 16.0, label: label.clone(), font_size: 32.0 },
            )
            .with_tag(TILE_TAG)
            .with_pos(pos)
            .with_anchor(Anchor::Center)
            .with_layer(RenderLayer::Tiles)
            .with_style(Style::filled(colors::TILE).with_stroke(colors::BORDER, 2.0))
            .interactive(),
        );
        session.tiles.push(TileState { id, value: label.clone(), origin: pos, locked: false });
    }
}

pub fn build_alphabet(stage: &AlphabetStage, session: &mut Session, ctx: &mut EngineContext) {
    if let Some(sprites) = &stage.feedback {
        let (bx, by) = config::BOY_HOME;
        let (gx, gy) = config::GIRL_HOME;
        session.boy = Some(visuals::spawn_sprite(ctx, &sprites.boy, Vec2::new(bx, by), config::SPRITE_SCALE, BOY_TAG));
        session.girl = Some(visuals::spawn_sprite(ctx, &sprites.girl, Vec2::new(gx, gy), config::SPRITE_SCALE, GIRL_TAG));
    }

    for slot in &stage.slots {
        if slot.fixed {
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(
                    id,
                    Shape::Tile { size: Vec2::splat(90.0), radius: 15.0, label: slot.letter.clone(), font_size: 54.0 },
                )
                .with_pos(slot.center)
                .with_anchor(Anchor::Center)
                .with_style(Style::filled("rgba(255,255,255,0.8)")),
            );
            continue;
        }
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id, Shape::Rect { size: Vec2::splat(90.0), radius: 15.0 })
                .with_tag(SLOT_TAG)
                .with_pos(slot.center)
                .with_anchor(Anchor::Center)
                .with_style(Style::filled("rgba(255,255,255,0.2)").with_stroke("#FFFFFF", 3.0).dashed()),
        );
        let label = ctx.next_id();
        ctx.scene.spawn(
            visuals::text(label, (session.drop_targets.len() + 1).to_string(), 16.0, 800, Font::Main, "#FFFFFF")
                .with_anchor(Anchor::TopLeft)
                .with_pos(slot.center - Vec2::splat(35.0)),
        );
        session.drop_targets.push(DropTarget {
            center: slot.center,
            expected: slot.letter.clone(),
            handle: id,
        });
    }

    for item in &stage.sources {
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(
                id,
                Shape::Tile { size: Vec2::splat(100.0), radius: 20.0, label: item.letter.clone(), font_size: 60.0 },
            )
            .with_tag(TILE_TAG)
            .with_pos(item.pos)
            .with_anchor(Anchor::Center)
            .with_layer(RenderLayer::Tiles)
            .with_style(Style::filled(colors::TILE).with_stroke(colors::LETTER, 3.0))
            .interactive(),
        );
        session.tiles.push(TileState { id, value: item.letter.clone(), origin: item.pos, locked: false });
    }
}

/// Grab the topmost free tile under the pointer.
pub fn pointer_down(session: &mut Session, ctx: &mut EngineContext, tweens: &mut Tweens, p: Vec2) {
    if session.is_moving {
        return;
    }
    let Some(hit) = ctx.scene.pick(p).map(|e| (e.id, e.pos)) else {
        return;
    };
    let (id, pos) = hit;
    if !session.tile(id).is_some_and(|t| !t.locked) {
        return;
    }
    tweens.remove_entity(id);
    ctx.scene.bring_to_front(id);
    session.grab = Some(Grab { tile: id, offset: p - pos });
}

pub fn pointer_move(session: &mut Session, ctx: &mut EngineContext, p: Vec2) {
    let Some(grab) = session.grab else { return };
    if let Some(e) = ctx.scene.get_mut(grab.tile) {
        e.pos = p - grab.offset;
    }
}

/// Release the held tile and resolve it against the drop targets.
pub fn pointer_up(session: &mut Session, ctx: &mut EngineContext, tweens: &mut Tweens, p: Vec2, check_identity: bool) {
    pointer_move(session, ctx, p);
    let Some(grab) = session.grab.take() else { return };
    let Some(tile) = session.tile(grab.tile).cloned() else { return };
    let Some(pos) = ctx.scene.get(tile.id).map(|e| e.pos) else { return };

    match resolve_drop(pos, &tile.value, &session.drop_targets, config::SNAP_TOLERANCE, check_identity) {
        DropOutcome::Snap(index) => {
            let center = session.drop_targets[index].center;
            tweens.add(
                tile.id,
                Tween::position(pos, center, config::SNAP_DURATION, config::SNAP_EASING)
                    .with_on_complete(Completion::TileSnapped { target: index }),
            );
            session.is_moving = true;
        }
        DropOutcome::Mismatch(index) => {
            log::debug!("'{}' does not belong in slot {}", tile.value, index + 1);
            wrong(session, ctx, tweens);
        }
        DropOutcome::Return => {
            tweens.add(
                tile.id,
                Tween::position(pos, tile.origin, config::SPRING_BACK_DURATION, config::SPRING_BACK_EASING),
            );
        }
    }
}

/// A tile landed on drop target `target`.
pub fn snapped(
    session: &mut Session,
    ctx: &mut EngineContext,
    tweens: &mut Tweens,
    tile: EntityId,
    target: usize,
    check_identity: bool,
) {
    session.is_moving = false;
    if check_identity {
        if let Some(t) = session.tile_mut(tile) {
            t.locked = true;
        }
        if let Some(e) = ctx.scene.get_mut(tile) {
            e.interactive = false;
        }
        correct(session, ctx, tweens);
    } else if let Some(slot) = session.drop_targets.get(target).map(|t| t.handle) {
        if let Some(e) = ctx.scene.get_mut(slot) {
            e.alpha = 0.0;
        }
    }
}

fn correct(session: &mut Session, ctx: &mut EngineContext, tweens: &mut Tweens) {
    feedback::celebrate(ctx, config::DRAG_BURST_AT);
    if let Some(boy) = session.boy {
        feedback::pop_up(ctx, tweens, boy, config::BOY_JUMP_Y, config::SPRITE_POP, true);
    }
}

fn wrong(session: &mut Session, ctx: &mut EngineContext, tweens: &mut Tweens) {
    ctx.emit_sound(SoundEvent::WRONG);
    if let Some(girl) = session.girl {
        feedback::shake(ctx, tweens, girl);
    }
}
