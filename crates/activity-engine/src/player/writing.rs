//! Handwriting stages: pad or direct capture, idle commit into slots.

use glam::Vec2;

use super::session::{Completion, Session, Tweens};
use super::visuals;
use crate::api::game::EngineContext;
use crate::api::types::{EntityId, HostCommand};
use crate::components::entity::{Anchor, Entity, Font, Shape, Style};
use crate::components::layer::RenderLayer;
use crate::config::{self, colors};
use crate::core::geometry::{point_in_expanded_rect, ExpansionFactor};
use crate::core::time::{TimerKey, TimerScope};
use crate::extensions::easing::Easing;
use crate::extensions::tween::{Tween, TweenLoop};
use crate::stage::kind::{InputMode, WritingStage, WritingVariant};
use crate::systems::placement::{fit_scale, Glyph};

pub const PAD_TAG: &str = "writing-pad";
pub const CLOSE_TAG: &str = "close-pad-btn";
pub const SPEAKER_TAG: &str = "speaker-btn";
pub const TARGET_TAG: &str = "target-box";
pub const ZONE_TAG: &str = "active-zone";
pub const HINT_TAG: &str = "hint";
pub const INK_TAG: &str = "pending-ink";
pub const GLYPH_TAG: &str = "glyph";

pub fn build(stage: &WritingStage, session: &mut Session, ctx: &mut EngineContext, expansion: ExpansionFactor) {
    if stage.input == InputMode::Pad {
        let pad = config::WRITING_PAD;
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id, Shape::Rect { size: pad.size(), radius: config::PAD_RADIUS })
                .with_tag(PAD_TAG)
                .with_pos(pad.min())
                .with_alpha(stage.pad.opacity)
                .with_style(Style::filled(&stage.pad.color).with_stroke(colors::BORDER, 2.0)),
        );
        let id = ctx.next_id();
        let close_at = Vec2::new(pad.x + pad.width - 30.0, pad.y + 30.0);
        ctx.scene.spawn(
            visuals::icon_button(id, "close", config::PAD_CLOSE_RADIUS * 2.0, close_at, CLOSE_TAG)
                .with_style(Style::filled(colors::MUTED)),
        );
    }

    for (i, t) in stage.targets.iter().enumerate() {
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id, Shape::Rect { size: t.size(), radius: 20.0 })
                .with_tag(TARGET_TAG)
                .with_pos(t.min())
                .with_style(Style::filled(colors::TARGET_FILL).with_stroke(colors::TARGET_STROKE, 2.0)),
        );
        session.target_boxes.push(id);
        let label = ctx.next_id();
        ctx.scene.spawn(
            visuals::text(label, (i + 1).to_string(), 18.0, 800, Font::Main, colors::INDEX)
                .with_anchor(Anchor::TopLeft)
                .with_pos(t.min() + Vec2::splat(10.0)),
        );
    }

    if let (Some(sentence), Some(first), Some(last)) = (&stage.sentence, stage.targets.first(), stage.targets.last()) {
        let center_y = first.center().y;
        let id = ctx.next_id();
        ctx.scene.spawn(
            visuals::text(id, sentence.pre.clone(), config::SENTENCE_FONT, 800, Font::Main, colors::TEXT)
                .with_anchor(Anchor::RightCenter)
                .with_pos(Vec2::new(first.x - config::SENTENCE_GAP, center_y)),
        );
        let id = ctx.next_id();
        ctx.scene.spawn(
            visuals::text(id, sentence.post.clone(), config::SENTENCE_FONT, 800, Font::Main, colors::TEXT)
                .with_anchor(Anchor::LeftCenter)
                .with_pos(Vec2::new(last.x + last.width + config::SENTENCE_GAP, center_y)),
        );
    }

    if stage.variant == WritingVariant::HintAudio {
        spawn_hints(stage, ctx);
        spawn_speaker(stage, ctx);
    }

    refresh_slot_visuals(stage, session, ctx, expansion);
}

fn spawn_hints(stage: &WritingStage, ctx: &mut EngineContext) {
    for (t, hint) in stage.targets.iter().zip(&stage.hints) {
        let id = ctx.next_id();
        ctx.scene.spawn(
            visuals::text(id, hint.clone(), 72.0, 400, Font::Chinese, colors::HINT)
                .with_tag(HINT_TAG)
                .with_pos(t.center())
                .with_alpha(config::HINT_ALPHA),
        );
        ctx.timers.schedule(TimerKey::HintFade(id), config::HINT_VISIBLE, TimerScope::Stage);
    }
}

fn spawn_speaker(stage: &WritingStage, ctx: &mut EngineContext) {
    let (Some(_), Some(first)) = (&stage.audio, stage.targets.first()) else {
        return;
    };
    let y = stage.sentence.as_ref().and_then(|s| s.y).unwrap_or(first.y);
    let id = ctx.next_id();
    ctx.scene.spawn(visuals::icon_button(id, "speaker", 43.0, Vec2::new(first.x - 120.0, y - 70.0), SPEAKER_TAG));
}

/// Start fading a hint glyph; it is removed when fully transparent.
pub fn fade_hint(ctx: &mut EngineContext, tweens: &mut Tweens, hint: EntityId) {
    let Some(entity) = ctx.scene.get(hint) else { return };
    tweens.add(
        hint,
        Tween::alpha(entity.alpha, 0.0, config::HINT_FADE, Easing::Linear).with_on_complete(Completion::Despawn),
    );
}

pub fn pointer_down(
    stage: &WritingStage,
    session: &mut Session,
    ctx: &mut EngineContext,
    tweens: &mut Tweens,
    expansion: ExpansionFactor,
    p: Vec2,
) {
    match ctx.scene.pick(p).map(|e| (e.id, e.tag.clone())) {
        Some((_, tag)) if tag == CLOSE_TAG => {
            set_pad_visible(session, ctx, false);
            session.strokes.cancel_gesture();
            sync_ink(session, ctx);
            return;
        }
        Some((id, tag)) if tag == SPEAKER_TAG => {
            play_audio(stage, session, ctx, tweens, id);
            return;
        }
        _ => {}
    }

    if session.is_moving {
        return;
    }

    let can_draw = match stage.input {
        InputMode::Pad => {
            if !session.pad_open && stage.targets.iter().any(|t| t.contains(p)) {
                set_pad_visible(session, ctx, true);
            }
            session.pad_open && config::WRITING_PAD.contains(p)
        }
        InputMode::Direct => stage
            .targets
            .get(session.active_slot)
            .is_some_and(|t| point_in_expanded_rect(p, *t, expansion.value())),
        InputMode::Drag | InputMode::None => false,
    };

    if can_draw {
        session.strokes.begin(p);
    } else {
        session.strokes.cancel_gesture();
    }
    sync_ink(session, ctx);
}

pub fn pointer_move(session: &mut Session, ctx: &mut EngineContext, p: Vec2) {
    if session.strokes.is_drawing() {
        session.strokes.extend(p);
        sync_ink(session, ctx);
    }
}

/// Finish the gesture; an accepted stroke restarts the idle window.
pub fn pointer_up(session: &mut Session, ctx: &mut EngineContext, p: Vec2) {
    if !session.strokes.is_drawing() {
        return;
    }
    session.strokes.extend(p);
    if session.strokes.finish() {
        ctx.timers.schedule(TimerKey::IdleCommit, config::IDLE_COMMIT, TimerScope::Stage);
    }
    sync_ink(session, ctx);
}

/// Idle window elapsed: merge pending strokes and fly them into the active slot.
pub fn commit(stage: &WritingStage, session: &mut Session, ctx: &mut EngineContext, tweens: &mut Tweens) {
    if session.strokes.is_empty() || session.is_moving {
        return;
    }
    let Some(target) = stage.targets.get(session.active_slot).copied() else {
        log::debug!("no slot left; dropping {} strokes", session.strokes.len());
        session.strokes.clear();
        sync_ink(session, ctx);
        return;
    };
    let Some(glyph) = Glyph::merge(&session.strokes.take()) else {
        return;
    };
    session.strokes.cancel_gesture();
    sync_ink(session, ctx);

    let scale = fit_scale(target.size(), glyph.size).unwrap_or(1.0);
    let id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(id, Shape::Ink { strokes: glyph.strokes, width: config::INK_WIDTH })
            .with_tag(GLYPH_TAG)
            .with_pos(glyph.center)
            .with_layer(RenderLayer::Ink)
            .with_style(Style::default().with_stroke(colors::TEXT, config::INK_WIDTH)),
    );
    tweens.add(
        id,
        Tween::position(glyph.center, target.center(), config::COMMIT_DURATION, config::COMMIT_EASING)
            .with_on_complete(Completion::GlyphPlaced),
    );
    tweens.add(id, Tween::scale_uniform(1.0, scale, config::COMMIT_DURATION, config::COMMIT_EASING));
    session.is_moving = true;
    log::debug!("committing glyph into slot {} at scale {scale:.3}", session.active_slot);
}

/// The committed glyph landed: advance to the next slot and re-enable drawing.
pub fn glyph_placed(stage: &WritingStage, session: &mut Session, ctx: &mut EngineContext, expansion: ExpansionFactor) {
    session.active_slot = (session.active_slot + 1).min(stage.targets.len());
    session.is_moving = false;
    refresh_slot_visuals(stage, session, ctx, expansion);
}

/// Re-derive the active-zone and blink highlight for the current slot.
pub fn refresh_slot_visuals(stage: &WritingStage, session: &mut Session, ctx: &mut EngineContext, expansion: ExpansionFactor) {
    update_active_zone(stage, session, ctx, expansion);
    if stage.variant == WritingVariant::BlinkPad {
        restart_blink(stage, session, ctx);
    }
}

pub fn update_active_zone(stage: &WritingStage, session: &mut Session, ctx: &mut EngineContext, expansion: ExpansionFactor) {
    if let Some(old) = session.active_zone.take() {
        ctx.scene.despawn(old);
    }
    if stage.input != InputMode::Direct {
        return;
    }
    let Some(target) = stage.targets.get(session.active_slot) else {
        return;
    };
    let zone = target.expanded(expansion.value());
    let id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(id, Shape::Rect { size: zone.size(), radius: 24.0 })
            .with_tag(ZONE_TAG)
            .with_pos(zone.min())
            .with_layer(RenderLayer::Guides)
            .with_style(Style::filled(colors::ACTIVE_ZONE).with_stroke(colors::ACCENT, 2.5).dashed()),
    );
    session.active_zone = Some(id);
}

fn restart_blink(stage: &WritingStage, session: &mut Session, ctx: &mut EngineContext) {
    ctx.timers.cancel(TimerKey::Blink);
    session.blink_on = false;
    for id in &session.target_boxes {
        if let Some(e) = ctx.scene.get_mut(*id) {
            e.style = e.style.clone().with_stroke(colors::TARGET_STROKE, 2.0);
        }
    }
    if session.active_slot < stage.targets.len() {
        ctx.timers.schedule_interval(TimerKey::Blink, config::BLINK_INTERVAL, TimerScope::Stage);
    }
}

/// One blink period elapsed: toggle the active slot's outline.
pub fn blink(session: &mut Session, ctx: &mut EngineContext) {
    let Some(id) = session.target_boxes.get(session.active_slot).copied() else {
        ctx.timers.cancel(TimerKey::Blink);
        return;
    };
    session.blink_on = !session.blink_on;
    let (stroke, width) = if session.blink_on {
        (colors::ACCENT, 4.0)
    } else {
        (colors::TARGET_STROKE, 2.0)
    };
    if let Some(e) = ctx.scene.get_mut(id) {
        e.style = e.style.clone().with_stroke(stroke, width);
    }
}

fn set_pad_visible(session: &mut Session, ctx: &mut EngineContext, visible: bool) {
    session.pad_open = visible;
    for tag in [PAD_TAG, CLOSE_TAG] {
        if let Some(e) = ctx.scene.find_by_tag_mut(tag) {
            e.visible = visible;
        }
    }
}

fn play_audio(
    stage: &WritingStage,
    session: &mut Session,
    ctx: &mut EngineContext,
    tweens: &mut Tweens,
    speaker: EntityId,
) {
    let Some(audio) = &stage.audio else { return };
    if audio.max_plays.is_some_and(|max| session.audio_plays >= max) {
        return;
    }
    session.audio_plays += 1;
    ctx.emit_command(HostCommand::Speak {
        text: audio.word.clone(),
        lang: config::DEFAULT_LANG.to_string(),
    });
    tweens.remove_entity(speaker);
    tweens.add(speaker, Tween::scale_uniform(1.0, 0.8, 0.1, Easing::Linear).with_loop(TweenLoop::Return));
    if audio.max_plays.is_some_and(|max| session.audio_plays >= max) {
        if let Some(e) = ctx.scene.get_mut(speaker) {
            e.style = Style::filled(colors::MUTED);
            e.alpha = 0.5;
            e.interactive = false;
        }
    }
}

/// Mirror pending strokes plus the gesture in progress into one ink entity.
fn sync_ink(session: &mut Session, ctx: &mut EngineContext) {
    let mut strokes: Vec<Vec<Vec2>> = session.strokes.pending().to_vec();
    if let Some(current) = session.strokes.current() {
        strokes.push(current.to_vec());
    }
    match session.live_ink {
        Some(id) if strokes.is_empty() => {
            ctx.scene.despawn(id);
            session.live_ink = None;
        }
        Some(id) => {
            if let Some(e) = ctx.scene.get_mut(id) {
                e.shape = Shape::Ink { strokes, width: config::INK_WIDTH };
            }
        }
        None if strokes.is_empty() => {}
        None => {
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id, Shape::Ink { strokes, width: config::INK_WIDTH })
                    .with_tag(INK_TAG)
                    .with_layer(RenderLayer::Ink)
                    .with_style(Style::default().with_stroke(colors::TEXT, config::INK_WIDTH)),
            );
            session.live_ink = Some(id);
        }
    }
}
