//! Correct/wrong reactions: fireworks, tones and character sprites.

use glam::Vec2;

use super::session::{Completion, Sprite, Tweens};
use crate::api::game::EngineContext;
use crate::api::types::{EntityId, SoundEvent};
use crate::config;
use crate::core::time::{TimerKey, TimerScope};
use crate::extensions::easing::Easing;
use crate::extensions::tween::Tween;

pub fn celebrate(ctx: &mut EngineContext, at: (f32, f32)) {
    ctx.effects.spawn_fireworks(Vec2::new(at.0, at.1));
    ctx.emit_sound(SoundEvent::CORRECT);
}

/// Pop a sprite up to `top`, spinning a full turn when `spin` is set.
pub fn pop_up(ctx: &mut EngineContext, tweens: &mut Tweens, sprite: Sprite, top: f32, duration: f32, spin: bool) {
    tweens.remove_entity(sprite.id);
    ctx.timers.cancel(TimerKey::SpriteHide(sprite.id));
    let Some(entity) = ctx.scene.get_mut(sprite.id) else { return };
    entity.alpha = 1.0;
    entity.pos = sprite.home;
    entity.rotation = 0.0;
    tweens.add(
        sprite.id,
        Tween::position_y(sprite.home.y, top, duration, Easing::BackOut).with_on_complete(Completion::SpriteShown),
    );
    if spin {
        tweens.add(sprite.id, Tween::rotation(0.0, 360.0, duration, Easing::BackOut));
    }
}

/// Flash the sprite in and shake it sideways, then let it fade after a rest.
pub fn shake(ctx: &mut EngineContext, tweens: &mut Tweens, sprite: Sprite) {
    tweens.remove_entity(sprite.id);
    let Some(entity) = ctx.scene.get_mut(sprite.id) else { return };
    entity.alpha = 1.0;
    entity.pos = sprite.home;
    shake_leg(tweens, sprite, 0);
    ctx.timers.schedule(TimerKey::SpriteHide(sprite.id), config::GIRL_REST, TimerScope::Stage);
}

/// Legs: home -> left, left -> right, right -> home.
pub fn shake_leg(tweens: &mut Tweens, sprite: Sprite, leg: u8) {
    let x = sprite.home.x;
    let d = config::SHAKE_OFFSET;
    let (from, to) = match leg {
        0 => (x, x - d),
        1 => (x - d, x + d),
        2 => (x + d, x),
        _ => return,
    };
    tweens.add(
        sprite.id,
        Tween::position_x(from, to, config::SHAKE_STEP, Easing::Linear).with_on_complete(Completion::ShakeLeg { leg }),
    );
}

/// The sprite finished popping up: rest, then hide.
pub fn shown(ctx: &mut EngineContext, sprite: EntityId, rest: f32) {
    ctx.timers.schedule(TimerKey::SpriteHide(sprite), rest, TimerScope::Stage);
}

/// Fade the sprite out on its way back home.
pub fn hide(ctx: &mut EngineContext, tweens: &mut Tweens, sprite: Sprite) {
    tweens.remove_entity(sprite.id);
    let Some(entity) = ctx.scene.get(sprite.id) else { return };
    let (pos, alpha, rotation) = (entity.pos, entity.alpha, entity.rotation);
    let ease = Easing::SineInOut;
    tweens.add(sprite.id, Tween::position(pos, sprite.home, config::SPRITE_RETURN, ease));
    tweens.add(sprite.id, Tween::alpha(alpha, 0.0, config::SPRITE_RETURN, ease));
    if rotation != 0.0 {
        tweens.add(sprite.id, Tween::rotation(rotation, 0.0, config::SPRITE_RETURN, ease));
    }
}
