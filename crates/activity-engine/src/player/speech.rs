//! Speech drill: listen, record, and color the target sentence by what was heard.

use glam::Vec2;

use super::feedback;
use super::session::{Session, Tweens};
use super::visuals;
use crate::api::game::EngineContext;
use crate::api::types::{EntityId, HostCommand, SoundEvent};
use crate::components::entity::{Anchor, Entity, Font, Shape, Style};
use crate::components::layer::RenderLayer;
use crate::config::{self, colors};
use crate::extensions::easing::Easing;
use crate::extensions::tween::{Tween, TweenLoop};
use crate::stage::kind::SpeechStage;
use crate::systems::speech::{evaluate, RecognitionError};

pub const LISTEN_TAG: &str = "listen-btn";
pub const MIC_TAG: &str = "mic-btn";
pub const PULSE_TAG: &str = "mic-pulse";
pub const TARGET_TEXT_TAG: &str = "speech-target";
pub const EVAL_TAG: &str = "eval-char";
pub const BOY_TAG: &str = "speech-boy";

pub const LISTEN_FIRST: &str = "먼저 위의 '듣기' 버튼을 눌러 정답을 들어보세요!";

pub fn build(stage: &SpeechStage, session: &mut Session, ctx: &mut EngineContext) {
    let (cx, cy) = config::SPEECH_CENTER;

    let id = ctx.next_id();
    ctx.scene.spawn(visuals::icon_button(id, "listen", 120.0, Vec2::new(cx, 200.0), LISTEN_TAG));

    let id = ctx.next_id();
    ctx.scene.spawn(
        visuals::text(id, stage.text.clone(), config::SPEECH_FONT, 700, Font::Chinese, colors::TEXT)
            .with_tag(TARGET_TEXT_TAG)
            .with_pos(Vec2::new(cx, cy)),
    );
    let id = ctx.next_id();
    ctx.scene.spawn(
        visuals::text(id, stage.sub_text.clone(), 44.0, 500, Font::Main, colors::SECONDARY)
            .with_pos(Vec2::new(cx, cy + 100.0)),
    );
    if !stage.meaning.is_empty() {
        let id = ctx.next_id();
        ctx.scene.spawn(
            visuals::text(id, format!("\"{}\"", stage.meaning), 34.0, 400, Font::Main, colors::HINT)
                .with_pos(Vec2::new(cx, cy + 170.0)),
        );
    }

    let id = ctx.next_id();
    let (mx, my) = (cx, 790.0);
    ctx.scene.spawn(
        Entity::new(id, Shape::Circle { radius: config::MIC_RADIUS })
            .with_tag(MIC_TAG)
            .with_pos(Vec2::new(mx, my))
            .with_anchor(Anchor::Center)
            .with_alpha(config::MIC_DISABLED_ALPHA)
            .with_layer(RenderLayer::Tiles)
            .with_style(Style::filled(colors::ACCENT))
            .interactive(),
    );

    let (bx, by) = config::SPEECH_BOY_HOME;
    session.boy = Some(visuals::spawn_sprite(
        ctx,
        config::SPEECH_BOY_SRC,
        Vec2::new(bx, by),
        1.5,
        BOY_TAG,
    ));
}

pub fn pointer_down(stage: &SpeechStage, session: &mut Session, ctx: &mut EngineContext, tweens: &mut Tweens, p: Vec2) {
    let Some((id, tag)) = ctx.scene.pick(p).map(|e| (e.id, e.tag.clone())) else {
        return;
    };
    match tag.as_str() {
        LISTEN_TAG => {
            pop(tweens, id, 1.1, 0.2);
            listen(stage, session, ctx);
        }
        MIC_TAG if !session.has_listened => {
            ctx.emit_command(HostCommand::Notice { message: LISTEN_FIRST.to_string() });
            if let Some(listen) = ctx.scene.find_by_tag(LISTEN_TAG).map(|e| e.id) {
                pop(tweens, listen, 1.2, 0.15);
            }
        }
        MIC_TAG if session.recording => {
            stop_recording(session, ctx, tweens);
            ctx.emit_command(HostCommand::StopRecognition);
        }
        MIC_TAG => start_recording(stage, session, ctx, tweens),
        _ => {}
    }
}

/// Speak the target sentence and enable the microphone.
pub fn listen(stage: &SpeechStage, session: &mut Session, ctx: &mut EngineContext) {
    ctx.emit_command(HostCommand::Speak {
        text: stage.text.clone(),
        lang: stage.lang.clone(),
    });
    session.has_listened = true;
    if let Some(mic) = ctx.scene.find_by_tag_mut(MIC_TAG) {
        mic.alpha = 1.0;
    }
}

fn pop(tweens: &mut Tweens, id: EntityId, to: f32, duration: f32) {
    tweens.remove_entity(id);
    tweens.add(id, Tween::scale_uniform(1.0, to, duration, Easing::Linear).with_loop(TweenLoop::Return));
}

fn start_recording(stage: &SpeechStage, session: &mut Session, ctx: &mut EngineContext, tweens: &mut Tweens) {
    let Some(center) = ctx.scene.find_by_tag(MIC_TAG).map(|e| e.pos) else {
        return;
    };
    session.recording = true;
    let id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(id, Shape::Circle { radius: config::MIC_RADIUS })
            .with_tag(PULSE_TAG)
            .with_pos(center)
            .with_anchor(Anchor::Center)
            .with_alpha(0.6)
            .with_layer(RenderLayer::Targets)
            .with_style(Style::filled(colors::PULSE)),
    );
    tweens.add(
        id,
        Tween::scale_uniform(1.0, 1.8, config::PULSE_PERIOD, Easing::QuadOut).with_loop(TweenLoop::Loop),
    );
    tweens.add(id, Tween::alpha(0.6, 0.0, config::PULSE_PERIOD, Easing::QuadOut).with_loop(TweenLoop::Loop));
    ctx.emit_command(HostCommand::StartRecognition { lang: stage.lang.clone() });
    log::debug!("recording started ({})", stage.lang);
}

/// Drop the pulse ring. Does not talk to the recognizer.
pub fn stop_recording(session: &mut Session, ctx: &mut EngineContext, tweens: &mut Tweens) {
    session.recording = false;
    if let Some(id) = ctx.scene.find_by_tag(PULSE_TAG).map(|e| e.id) {
        tweens.remove_entity(id);
        ctx.scene.despawn(id);
    }
}

/// Color the sentence by the transcript and react to an exact match.
pub fn on_result(stage: &SpeechStage, session: &mut Session, ctx: &mut EngineContext, tweens: &mut Tweens, transcript: &str) {
    stop_recording(session, ctx, tweens);
    let verdict = evaluate(transcript, &stage.text);
    log::info!("heard {transcript:?}, success: {}", verdict.success);

    let (cx, cy) = config::SPEECH_CENTER;
    ctx.scene.despawn_tagged(TARGET_TEXT_TAG);
    ctx.scene.despawn_tagged(EVAL_TAG);
    let count = verdict.chars.len();
    for (i, (c, ok)) in verdict.chars.iter().enumerate() {
        let x = cx - count.saturating_sub(1) as f32 * config::SPEECH_CHAR_SPACING / 2.0
            + i as f32 * config::SPEECH_CHAR_SPACING;
        let fill = if *ok { colors::SUCCESS } else { colors::ERROR };
        let id = ctx.next_id();
        ctx.scene.spawn(
            visuals::text(id, c.to_string(), config::SPEECH_FONT, 700, Font::Chinese, fill)
                .with_tag(EVAL_TAG)
                .with_pos(Vec2::new(x, cy)),
        );
        pop(tweens, id, 1.1, 0.2);
    }

    if verdict.success {
        feedback::celebrate(ctx, config::SPEECH_BURST_AT);
        if let Some(boy) = session.boy {
            feedback::pop_up(ctx, tweens, boy, config::SPEECH_BOY_JUMP_Y, config::SPEECH_BOY_POP, false);
        }
    } else {
        ctx.emit_sound(SoundEvent::SPEECH_MISS);
    }
    session.verdict = Some(verdict);
}

pub fn on_error(session: &mut Session, ctx: &mut EngineContext, tweens: &mut Tweens, error: &RecognitionError) {
    log::warn!("{error}");
    stop_recording(session, ctx, tweens);
    ctx.emit_command(HostCommand::Notice { message: error.notice().to_string() });
}

/// The recognizer stopped on its own.
pub fn on_ended(session: &mut Session, ctx: &mut EngineContext, tweens: &mut Tweens) {
    if session.recording {
        stop_recording(session, ctx, tweens);
    }
}
