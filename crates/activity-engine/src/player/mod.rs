//! The stage player: owns the catalog, the live session and every per-stage flow.

pub mod drag;
pub mod feedback;
pub mod session;
pub mod speech;
pub mod status;
pub mod visuals;
pub mod writing;

use glam::Vec2;

use crate::api::game::{EngineContext, Game, GameConfig};
use crate::api::types::{EntityId, HostCommand};
use crate::config;
use crate::core::geometry::ExpansionFactor;
use crate::core::time::{Fired, TimerKey};
use crate::editor::CheatEditor;
use crate::input::queue::{HostEvent, InputEvent, InputQueue, UiAction};
use crate::stage::catalog::{Catalog, CatalogError};
use crate::stage::kind::{InputMode, StageKind};

pub use drag::FontSizes;
pub use session::{Completion, Session, Tweens};
pub use status::PlayerStatus;

/// Runs one stage at a time out of a catalog.
pub struct StagePlayer {
    catalog: Catalog,
    index: usize,
    /// `None` when the current descriptor failed to convert.
    kind: Option<StageKind>,
    load_error: Option<String>,
    session: Session,
    tweens: Tweens,
    editor: CheatEditor,
    expansion: ExpansionFactor,
    sizes: FontSizes,
}

impl StagePlayer {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            index: 0,
            kind: None,
            load_error: None,
            session: Session::new(),
            tweens: Tweens::new(),
            editor: CheatEditor::new(),
            expansion: ExpansionFactor::default(),
            sizes: FontSizes::default(),
        }
    }

    /// Parse a catalog in JSON or `const STAGES = [...];` form.
    pub fn from_source(source: &str) -> Result<Self, CatalogError> {
        Catalog::from_source(source).map(Self::new)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> Option<&StageKind> {
        self.kind.as_ref()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn tweens(&self) -> &Tweens {
        &self.tweens
    }

    pub fn editor(&self) -> &CheatEditor {
        &self.editor
    }

    pub fn expansion(&self) -> ExpansionFactor {
        self.expansion
    }

    pub fn status(&self) -> PlayerStatus {
        let stage = self.catalog.get(self.index);
        let input = self.kind.as_ref().map(StageKind::input);
        PlayerStatus {
            title: stage.map(|s| s.title.clone()).unwrap_or_default(),
            index: self.index,
            count: self.catalog.len(),
            can_prev: self.index > 0,
            can_next: self.index + 1 < self.catalog.len(),
            show_expansion: input == Some(InputMode::Direct),
            show_font_size: matches!(self.kind, Some(StageKind::PinyinDrag(_))),
            expansion: self.expansion.value(),
            pinyin_size: self.sizes.pinyin,
            hanja_size: self.sizes.hanja,
            active_slot: self.session.active_slot,
            slot_count: self.kind.as_ref().map_or(0, |k| k.slots().len()),
            is_moving: self.session.is_moving,
            pending_strokes: self.session.strokes.len(),
            recording: self.session.recording,
            cheat: stage.map(|s| self.editor.status(s)).unwrap_or_default(),
            load_error: self.load_error.clone(),
        }
    }

    /// Tear the current stage down and build stage `index`. Out of range is a no-op.
    pub fn load_stage(&mut self, ctx: &mut EngineContext, index: usize) -> bool {
        let Some(stage) = self.catalog.get(index) else {
            log::warn!("stage {index} out of range (0..{})", self.catalog.len());
            return false;
        };

        if self.session.recording {
            ctx.emit_command(HostCommand::StopRecognition);
        }
        ctx.scene.clear();
        ctx.effects.clear();
        self.tweens.clear();
        ctx.timers.cancel_stage();
        self.session = Session::new();
        self.index = index;

        if let Some(src) = stage.bg_image.as_deref().filter(|s| !s.trim().is_empty()) {
            visuals::spawn_background(ctx, src, stage.bg_scale.unwrap_or(1.0) as f32);
        }

        match StageKind::from_descriptor(stage) {
            Ok(kind) => {
                build(&kind, &mut self.session, ctx, self.expansion, self.sizes);
                self.kind = Some(kind);
                self.load_error = None;
            }
            Err(e) => {
                log::warn!("stage '{}' renders no activity: {e}", stage.title);
                self.kind = None;
                self.load_error = Some(e.to_string());
            }
        }

        if self.editor.is_active() {
            self.editor.rebuild(ctx, stage);
        }
        log::info!("loaded stage {}/{}: '{}'", index + 1, self.catalog.len(), stage.title);
        true
    }

    /// Convert the current descriptor again after the editor changed it.
    fn rederive(&mut self) {
        let Some(stage) = self.catalog.get(self.index) else { return };
        match StageKind::from_descriptor(stage) {
            Ok(kind) => self.kind = Some(kind),
            Err(e) => log::warn!("edited stage no longer converts: {e}"),
        }
    }

    fn handle_event(&mut self, ctx: &mut EngineContext, event: &InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(ctx, Vec2::new(*x, *y)),
            InputEvent::PointerMove { x, y } => self.pointer_move(ctx, Vec2::new(*x, *y)),
            InputEvent::PointerUp { x, y } => self.pointer_up(ctx, Vec2::new(*x, *y)),
            InputEvent::Ui(action) => self.handle_ui(ctx, action),
            InputEvent::Host(event) => self.handle_host(ctx, event),
        }
    }

    fn pointer_down(&mut self, ctx: &mut EngineContext, p: Vec2) {
        if self.editor.is_active() {
            self.editor.hover(p);
            self.editor.pointer_down(p);
            return;
        }
        let Self { kind, session, tweens, expansion, .. } = self;
        match kind {
            Some(StageKind::Writing(w)) => writing::pointer_down(w, session, ctx, tweens, *expansion, p),
            Some(StageKind::PinyinDrag(_)) | Some(StageKind::AlphabetDrag(_)) => {
                drag::pointer_down(session, ctx, tweens, p)
            }
            Some(StageKind::Speech(s)) => speech::pointer_down(s, session, ctx, tweens, p),
            None => {}
        }
    }

    fn pointer_move(&mut self, ctx: &mut EngineContext, p: Vec2) {
        if self.editor.is_active() {
            self.editor.hover(p);
            let changed = match self.catalog.get_mut(self.index) {
                Some(stage) => self.editor.pointer_move(ctx, stage, p),
                None => false,
            };
            if changed {
                self.rederive();
            }
            return;
        }
        match self.kind {
            Some(StageKind::Writing(_)) => writing::pointer_move(&mut self.session, ctx, p),
            Some(StageKind::PinyinDrag(_)) | Some(StageKind::AlphabetDrag(_)) => {
                drag::pointer_move(&mut self.session, ctx, p)
            }
            _ => {}
        }
    }

    fn pointer_up(&mut self, ctx: &mut EngineContext, p: Vec2) {
        if self.editor.is_active() {
            self.pointer_move(ctx, p);
            self.editor.pointer_up();
            return;
        }
        match self.kind {
            Some(StageKind::Writing(_)) => writing::pointer_up(&mut self.session, ctx, p),
            Some(StageKind::PinyinDrag(_)) => drag::pointer_up(&mut self.session, ctx, &mut self.tweens, p, false),
            Some(StageKind::AlphabetDrag(_)) => drag::pointer_up(&mut self.session, ctx, &mut self.tweens, p, true),
            _ => {}
        }
    }

    fn handle_ui(&mut self, ctx: &mut EngineContext, action: &UiAction) {
        match action {
            UiAction::PrevStage => {
                if let Some(prev) = self.index.checked_sub(1) {
                    self.load_stage(ctx, prev);
                }
            }
            UiAction::NextStage => {
                self.load_stage(ctx, self.index + 1);
            }
            UiAction::ResetStage => {
                self.load_stage(ctx, self.index);
            }
            UiAction::GoToStage(index) => {
                self.load_stage(ctx, *index);
            }
            UiAction::SetExpansion(factor) => {
                self.expansion = *factor;
                if let Some(StageKind::Writing(w)) = &self.kind {
                    writing::update_active_zone(w, &mut self.session, ctx, self.expansion);
                }
            }
            UiAction::SetPinyinSize(size) => {
                self.sizes.pinyin = clamp_font(*size);
                self.reload_drag(ctx);
            }
            UiAction::SetHanjaSize(size) => {
                self.sizes.hanja = clamp_font(*size);
                self.reload_drag(ctx);
            }
            UiAction::ToggleCheat => self.toggle_cheat(ctx),
            UiAction::CheatEdit { index, field, value } => {
                if !self.editor.is_active() {
                    return;
                }
                let changed = match self.catalog.get_mut(self.index) {
                    Some(stage) => self.editor.edit(ctx, stage, *index, *field, value),
                    None => false,
                };
                if changed {
                    self.rederive();
                }
            }
            UiAction::CheatSave => {
                if let Some(command) = self.editor.begin_save(&self.catalog) {
                    ctx.emit_command(command);
                }
            }
        }
    }

    fn reload_drag(&mut self, ctx: &mut EngineContext) {
        if matches!(self.kind, Some(StageKind::PinyinDrag(_))) {
            self.load_stage(ctx, self.index);
        }
    }

    fn toggle_cheat(&mut self, ctx: &mut EngineContext) {
        if self.editor.is_active() {
            self.editor.close(ctx);
            log::info!("cheat editor closed");
            return;
        }
        let Some(stage) = self.catalog.get(self.index) else { return };
        self.session.strokes.cancel_gesture();
        self.session.grab = None;
        self.editor.open(ctx, stage);
    }

    fn handle_host(&mut self, ctx: &mut EngineContext, event: &HostEvent) {
        if let HostEvent::ImageFailed(id) = event {
            self.image_failed(ctx, *id);
            return;
        }
        let Self { kind, session, tweens, editor, .. } = self;
        match event {
            HostEvent::RecognitionResult(transcript) => {
                if let Some(StageKind::Speech(s)) = kind {
                    speech::on_result(s, session, ctx, tweens, transcript);
                }
            }
            HostEvent::RecognitionError(error) => match kind {
                Some(StageKind::Speech(_)) => speech::on_error(session, ctx, tweens, error),
                _ => log::debug!("ignoring late recognition error: {error}"),
            },
            HostEvent::RecognitionEnded => {
                if let Some(StageKind::Speech(_)) = kind {
                    speech::on_ended(session, ctx, tweens);
                }
            }
            HostEvent::SaveFinished(result) => {
                if let Some(notice) = editor.save_finished(ctx, result.clone()) {
                    ctx.emit_command(notice);
                }
            }
            HostEvent::ImageFailed(_) => {}
        }
    }

    fn image_failed(&mut self, ctx: &mut EngineContext, id: EntityId) {
        let Some(entity) = ctx.scene.get(id) else { return };
        log::warn!("image for '{}' failed to load; skipping it", entity.tag);
        self.session.drop_sprite(id);
        self.tweens.remove_entity(id);
        ctx.timers.cancel(TimerKey::SpriteHide(id));
        ctx.scene.despawn(id);
    }

    fn handle_timer(&mut self, ctx: &mut EngineContext, fired: Fired) {
        if fired.key != TimerKey::SaveStatus && fired.epoch != ctx.timers.epoch() {
            log::debug!("discarding {:?} from a previous stage", fired.key);
            return;
        }
        let Self { kind, session, tweens, editor, .. } = self;
        match fired.key {
            TimerKey::IdleCommit => {
                if let Some(StageKind::Writing(w)) = kind {
                    writing::commit(w, session, ctx, tweens);
                }
            }
            TimerKey::Blink => writing::blink(session, ctx),
            TimerKey::HintFade(id) => writing::fade_hint(ctx, tweens, id),
            TimerKey::SpriteHide(id) => {
                if let Some(sprite) = [session.boy, session.girl].into_iter().flatten().find(|s| s.id == id) {
                    feedback::hide(ctx, tweens, sprite);
                }
            }
            TimerKey::SaveStatus => {
                if editor.status_elapsed() {
                    editor.close(ctx);
                    log::info!("cheat editor closed after save");
                }
            }
        }
    }

    fn handle_completion(&mut self, ctx: &mut EngineContext, entity: EntityId, completion: Completion) {
        let Self { kind, session, tweens, expansion, .. } = self;
        match completion {
            Completion::GlyphPlaced => {
                if let Some(StageKind::Writing(w)) = kind {
                    writing::glyph_placed(w, session, ctx, *expansion);
                }
            }
            Completion::TileSnapped { target } => {
                let check_identity = matches!(kind, Some(StageKind::AlphabetDrag(_)));
                drag::snapped(session, ctx, tweens, entity, target, check_identity);
            }
            Completion::SpriteShown => {
                let rest = match kind {
                    Some(StageKind::Speech(_)) => config::SPEECH_BOY_REST,
                    _ => config::BOY_REST,
                };
                feedback::shown(ctx, entity, rest);
            }
            Completion::ShakeLeg { leg } => {
                if let Some(girl) = session.girl.filter(|g| g.id == entity) {
                    feedback::shake_leg(tweens, girl, leg + 1);
                }
            }
            Completion::Despawn => {
                ctx.scene.despawn(entity);
            }
        }
    }
}

impl Game for StagePlayer {
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.load_stage(ctx, 0);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            self.handle_event(ctx, event);
        }

        let dt = ctx.dt();
        for fired in ctx.timers.advance(dt) {
            self.handle_timer(ctx, fired);
        }
        for (entity, completion) in self.tweens.tick(dt, &mut ctx.scene) {
            self.handle_completion(ctx, entity, completion);
        }
        ctx.effects.tick(dt);
    }
}

fn build(kind: &StageKind, session: &mut Session, ctx: &mut EngineContext, expansion: ExpansionFactor, sizes: FontSizes) {
    match kind {
        StageKind::Writing(w) => writing::build(w, session, ctx, expansion),
        StageKind::PinyinDrag(d) => drag::build_pinyin(d, session, ctx, sizes),
        StageKind::AlphabetDrag(a) => drag::build_alphabet(a, session, ctx),
        StageKind::Speech(s) => speech::build(s, session, ctx),
    }
}

fn clamp_font(size: f32) -> f32 {
    let (min, max) = config::FONT_SIZE_RANGE;
    size.clamp(min, max)
}
