//! Authoring overlay for repositioning a stage's target boxes.
//!
//! Every move, resize or table edit is written straight into the stage
//! descriptor; nothing is staged and there is no undo. Saving sends the whole
//! catalog to the host, which posts it to the save endpoint.

use glam::Vec2;
use serde::Serialize;

use crate::api::game::EngineContext;
use crate::api::types::{EntityId, HostCommand};
use crate::components::entity::{Entity, Font, Shape, Style};
use crate::components::layer::RenderLayer;
use crate::config::{self, colors};
use crate::core::geometry::Rect;
use crate::core::time::{TimerKey, TimerScope};
use crate::stage::catalog::Catalog;
use crate::stage::descriptor::{StageDescriptor, TargetSpec};

pub const BOX_TAG: &str = "cheat-box";
pub const LABEL_TAG: &str = "cheat-text";
const LABEL_INSET: f32 = 10.0;
const SAVE_FAILED_NOTICE: &str = "서버 저장 실패! 저장 서버가 실행 중인지 확인하세요.";

/// Column of the cheat table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CheatField {
    X,
    Y,
    Width,
    Height,
}

impl CheatField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "x" => Some(CheatField::X),
            "y" => Some(CheatField::Y),
            "width" => Some(CheatField::Width),
            "height" => Some(CheatField::Height),
            _ => None,
        }
    }
}

/// One row of the cheat table, values rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheatRow {
    /// 1-based, as labeled on the canvas.
    pub index: usize,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Saved,
    Failed,
}

/// Snapshot of the editor for the page around the canvas.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheatStatus {
    pub active: bool,
    pub rows: Vec<CheatRow>,
    pub selected: Option<usize>,
    pub save: SaveStatus,
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Move { index: usize, grab: Vec2 },
    Resize { index: usize },
}

#[derive(Debug, Clone, Copy)]
struct CheatBox {
    rect: Rect,
    frame: EntityId,
    label: EntityId,
}

#[derive(Debug, Default)]
pub struct CheatEditor {
    active: bool,
    boxes: Vec<CheatBox>,
    selected: Option<usize>,
    gesture: Option<Gesture>,
    cursor: Option<Vec2>,
    save: SaveStatus,
}

impl CheatEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn save_status(&self) -> SaveStatus {
        self.save
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Show the overlay for `stage`.
    pub fn open(&mut self, ctx: &mut EngineContext, stage: &StageDescriptor) {
        self.active = true;
        self.rebuild(ctx, stage);
        log::info!("cheat editor opened on '{}'", stage.title);
    }

    /// Remove the overlay and forget any gesture in progress.
    pub fn close(&mut self, ctx: &mut EngineContext) {
        self.clear_overlay(ctx);
        self.active = false;
        self.cursor = None;
        log::info!("cheat editor closed");
    }

    /// Recreate one box and label per target of `stage`.
    pub fn rebuild(&mut self, ctx: &mut EngineContext, stage: &StageDescriptor) {
        self.clear_overlay(ctx);
        if !self.active {
            return;
        }
        for (i, target) in stage.targets.iter().flatten().enumerate() {
            let rect = box_rect(target);
            let frame = ctx.next_id();
            let label = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(frame, Shape::Rect { size: rect.size(), radius: 0.0 })
                    .with_tag(BOX_TAG)
                    .with_pos(rect.min())
                    .with_layer(RenderLayer::Overlay)
                    .with_style(Style::filled(colors::CHEAT_FILL).with_stroke(colors::CHEAT, 2.0).dashed())
                    .interactive(),
            );
            ctx.scene.spawn(
                Entity::new(
                    label,
                    Shape::Text {
                        content: (i + 1).to_string(),
                        font_size: 24.0,
                        weight: 900,
                        font: Font::Main,
                    },
                )
                .with_tag(LABEL_TAG)
                .with_pos(rect.min() + Vec2::splat(LABEL_INSET))
                .with_layer(RenderLayer::Overlay)
                .with_style(Style::filled(colors::CHEAT)),
            );
            self.boxes.push(CheatBox { rect, frame, label });
        }
    }

    fn clear_overlay(&mut self, ctx: &mut EngineContext) {
        for b in self.boxes.drain(..) {
            ctx.scene.despawn(b.frame);
            ctx.scene.despawn(b.label);
        }
        self.selected = None;
        self.gesture = None;
    }

    /// Table rows for `stage`; empty when it has no targets.
    pub fn rows(stage: &StageDescriptor) -> Vec<CheatRow> {
        stage
            .targets
            .iter()
            .flatten()
            .enumerate()
            .map(|(i, t)| CheatRow {
                index: i + 1,
                x: t.x.round() as i64,
                y: t.y.round() as i64,
                width: t.width.unwrap_or(0.0).round() as i64,
                height: t.height.unwrap_or(0.0).round() as i64,
            })
            .collect()
    }

    pub fn status(&self, stage: &StageDescriptor) -> CheatStatus {
        CheatStatus {
            active: self.active,
            rows: Self::rows(stage),
            selected: self.selected,
            save: self.save,
            cursor: self.cursor.map(|p| format!("({}, {})", p.x.round(), p.y.round())),
        }
    }

    /// Select the box under `p` and start moving or resizing it.
    /// Returns whether a box was hit.
    pub fn pointer_down(&mut self, p: Vec2) -> bool {
        self.cursor = Some(p);
        let half = config::CHEAT_HANDLE / 2.0;
        let handle = self.boxes.iter().rposition(|b| {
            let corner = b.rect.max();
            (p.x - corner.x).abs() <= half && (p.y - corner.y).abs() <= half
        });
        if let Some(index) = handle {
            self.selected = Some(index);
            self.gesture = Some(Gesture::Resize { index });
            return true;
        }
        match self.boxes.iter().rposition(|b| b.rect.contains(p)) {
            Some(index) => {
                self.selected = Some(index);
                self.gesture = Some(Gesture::Move {
                    index,
                    grab: p - self.boxes[index].rect.min(),
                });
                true
            }
            None => {
                self.selected = None;
                false
            }
        }
    }

    /// Drag the active gesture to `p`, writing rounded geometry into `stage`.
    /// Returns whether a target changed.
    pub fn pointer_move(&mut self, ctx: &mut EngineContext, stage: &mut StageDescriptor, p: Vec2) -> bool {
        self.cursor = Some(p);
        let Some(gesture) = self.gesture else {
            return false;
        };
        let (index, rect) = match gesture {
            Gesture::Move { index, grab } => {
                let Some(b) = self.boxes.get(index) else { return false };
                let min = (p - grab).round();
                (index, Rect::new(min.x, min.y, b.rect.width, b.rect.height))
            }
            Gesture::Resize { index } => {
                let Some(b) = self.boxes.get(index) else { return false };
                let size = (p - b.rect.min()).round().max(Vec2::ONE);
                (index, Rect::new(b.rect.x, b.rect.y, size.x, size.y))
            }
        };
        let Some(target) = stage.targets.as_mut().and_then(|t| t.get_mut(index)) else {
            return false;
        };
        target.x = rect.x as f64;
        target.y = rect.y as f64;
        target.width = Some(rect.width as f64);
        target.height = Some(rect.height as f64);
        self.place_box(ctx, index, rect);
        true
    }

    pub fn pointer_up(&mut self) {
        self.gesture = None;
    }

    /// Track the cursor for the coordinate readout.
    pub fn hover(&mut self, p: Vec2) {
        self.cursor = Some(p);
    }

    /// Apply a table edit. Unparsable input writes 0. Returns whether a target changed.
    pub fn edit(
        &mut self,
        ctx: &mut EngineContext,
        stage: &mut StageDescriptor,
        index: usize,
        field: CheatField,
        value: &str,
    ) -> bool {
        let Some(target) = stage.targets.as_mut().and_then(|t| t.get_mut(index)) else {
            log::warn!("cheat edit for missing target {index}");
            return false;
        };
        let value = parse_int_prefix(value) as f64;
        match field {
            CheatField::X => target.x = value,
            CheatField::Y => target.y = value,
            CheatField::Width => target.width = Some(value),
            CheatField::Height => target.height = Some(value),
        }
        let rect = box_rect(target);
        self.place_box(ctx, index, rect);
        true
    }

    fn place_box(&mut self, ctx: &mut EngineContext, index: usize, rect: Rect) {
        let Some(b) = self.boxes.get_mut(index) else { return };
        b.rect = rect;
        if let Some(frame) = ctx.scene.get_mut(b.frame) {
            frame.pos = rect.min();
            frame.shape = Shape::Rect { size: rect.size(), radius: 0.0 };
        }
        if let Some(label) = ctx.scene.get_mut(b.label) {
            label.pos = rect.min() + Vec2::splat(LABEL_INSET);
        }
    }

    /// Serialize the whole catalog for the save endpoint.
    /// `None` while a previous save has not settled.
    pub fn begin_save(&mut self, catalog: &Catalog) -> Option<HostCommand> {
        if self.save != SaveStatus::Idle {
            log::warn!("save ignored: previous save is {:?}", self.save);
            return None;
        }
        match catalog.to_json() {
            Ok(payload) => {
                self.save = SaveStatus::Saving;
                log::info!("saving {} stages", catalog.len());
                Some(HostCommand::SaveCatalog { payload })
            }
            Err(e) => {
                log::error!("could not serialize catalog: {e}");
                None
            }
        }
    }

    /// Settle the save in flight. Returns a notice to show on failure.
    pub fn save_finished(&mut self, ctx: &mut EngineContext, result: Result<(), String>) -> Option<HostCommand> {
        if self.save != SaveStatus::Saving {
            log::warn!("unexpected save result in state {:?}", self.save);
            return None;
        }
        match result {
            Ok(()) => {
                self.save = SaveStatus::Saved;
                ctx.timers.schedule(TimerKey::SaveStatus, config::SAVED_RESET, TimerScope::Editor);
                log::info!("catalog saved");
                None
            }
            Err(message) => {
                self.save = SaveStatus::Failed;
                ctx.timers.schedule(TimerKey::SaveStatus, config::FAILED_RESET, TimerScope::Editor);
                log::error!("catalog save failed: {message}");
                Some(HostCommand::Notice {
                    message: SAVE_FAILED_NOTICE.to_string(),
                })
            }
        }
    }

    /// The save status timer fired. Returns true when the editor should close.
    pub fn status_elapsed(&mut self) -> bool {
        let close = self.save == SaveStatus::Saved;
        self.save = SaveStatus::Idle;
        close && self.active
    }
}

/// Box geometry for a target; missing sizes fall back to the default box.
fn box_rect(target: &TargetSpec) -> Rect {
    Rect::new(
        target.x as f32,
        target.y as f32,
        target.width.unwrap_or(config::CHEAT_DEFAULT_SIZE as f64) as f32,
        target.height.unwrap_or(config::CHEAT_DEFAULT_SIZE as f64) as f32,
    )
}

/// Leading integer of `text` ("42px" -> 42); anything else is 0.
pub fn parse_int_prefix(text: &str) -> i64 {
    let text = text.trim_start();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    digits[..end].parse::<i64>().map_or(0, |n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage() -> StageDescriptor {
        serde_json::from_str(
            r#"{"type": "normal", "inputType": "pad", "title": "L2",
                "targets": [{"x": 440, "y": 340, "width": 140, "height": 121},
                            {"x": 600, "y": 340, "width": 140, "height": 121}]}"#,
        )
        .unwrap()
    }

    fn open() -> (CheatEditor, EngineContext, StageDescriptor) {
        let mut ctx = EngineContext::new();
        let stage = stage();
        let mut editor = CheatEditor::new();
        editor.open(&mut ctx, &stage);
        (editor, ctx, stage)
    }

    #[test]
    fn open_spawns_box_and_label_per_target() {
        let (editor, ctx, stage) = open();
        assert!(editor.is_active());
        assert_eq!(ctx.scene.iter().filter(|e| e.tag == BOX_TAG).count(), 2);
        assert_eq!(ctx.scene.iter().filter(|e| e.tag == LABEL_TAG).count(), 2);
        let rows = CheatEditor::rows(&stage);
        assert_eq!(rows[1], CheatRow { index: 2, x: 600, y: 340, width: 140, height: 121 });
    }

    #[test]
    fn close_removes_overlay() {
        let (mut editor, mut ctx, _) = open();
        editor.close(&mut ctx);
        assert!(ctx.scene.is_empty());
        assert!(!editor.is_active());
    }

    #[test]
    fn moving_a_box_writes_rounded_position() {
        let (mut editor, mut ctx, mut stage) = open();
        assert!(editor.pointer_down(Vec2::new(450.0, 350.0)));
        assert!(editor.pointer_move(&mut ctx, &mut stage, Vec2::new(470.4, 360.6)));
        editor.pointer_up();
        let t = &stage.targets.as_ref().unwrap()[0];
        assert_eq!((t.x, t.y, t.width, t.height), (460.0, 351.0, Some(140.0), Some(121.0)));
        let label = ctx.scene.iter().find(|e| e.tag == LABEL_TAG).unwrap();
        assert_eq!(label.pos, Vec2::new(470.0, 361.0));
        assert!(!editor.pointer_move(&mut ctx, &mut stage, Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn corner_handle_resizes() {
        let (mut editor, mut ctx, mut stage) = open();
        assert!(editor.pointer_down(Vec2::new(740.0, 461.0)));
        editor.pointer_move(&mut ctx, &mut stage, Vec2::new(800.0, 500.0));
        let t = &stage.targets.as_ref().unwrap()[1];
        assert_eq!((t.x, t.y, t.width, t.height), (600.0, 340.0, Some(200.0), Some(160.0)));
        assert_eq!(editor.selected(), Some(1));
    }

    #[test]
    fn table_edit_parses_like_a_number_input() {
        let (mut editor, mut ctx, mut stage) = open();
        editor.edit(&mut ctx, &mut stage, 0, CheatField::Width, "200");
        editor.edit(&mut ctx, &mut stage, 0, CheatField::X, "abc");
        let t = &stage.targets.as_ref().unwrap()[0];
        assert_eq!((t.x, t.width), (0.0, Some(200.0)));
        assert!(!editor.edit(&mut ctx, &mut stage, 9, CheatField::X, "1"));
    }

    #[test]
    fn parse_int_prefix_matches_lenient_parsing() {
        assert_eq!(parse_int_prefix("42"), 42);
        assert_eq!(parse_int_prefix(" 3.7"), 3);
        assert_eq!(parse_int_prefix("-15px"), -15);
        assert_eq!(parse_int_prefix(""), 0);
        assert_eq!(parse_int_prefix("x1"), 0);
    }

    #[test]
    fn save_cycle_closes_after_success() {
        let (mut editor, mut ctx, stage) = open();
        let catalog = Catalog::new(vec![stage]).unwrap();
        let Some(HostCommand::SaveCatalog { payload }) = editor.begin_save(&catalog) else {
            panic!("expected a save command");
        };
        assert!(payload.starts_with('['));
        assert_eq!(editor.save_status(), SaveStatus::Saving);
        assert!(editor.begin_save(&catalog).is_none());
        assert!(editor.save_finished(&mut ctx, Ok(())).is_none());
        assert_eq!(editor.save_status(), SaveStatus::Saved);
        assert!(ctx.timers.is_pending(TimerKey::SaveStatus));
        assert!(editor.status_elapsed());
        assert_eq!(editor.save_status(), SaveStatus::Idle);
    }

    #[test]
    fn failed_save_notifies_and_stays_open() {
        let (mut editor, mut ctx, stage) = open();
        let catalog = Catalog::new(vec![stage]).unwrap();
        editor.begin_save(&catalog);
        let notice = editor.save_finished(&mut ctx, Err("connection refused".into()));
        assert!(matches!(notice, Some(HostCommand::Notice { .. })));
        assert_eq!(editor.save_status(), SaveStatus::Failed);
        assert!(editor.begin_save(&catalog).is_none());
        assert!(!editor.status_elapsed());
        assert!(editor.begin_save(&catalog).is_some());
    }
}
