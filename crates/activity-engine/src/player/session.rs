//! Per-stage mutable state. Rebuilt from scratch on every stage load.

use glam::Vec2;

use crate::api::types::EntityId;
use crate::extensions::tween::TweenState;
use crate::input::strokes::StrokeAccumulator;
use crate::systems::snap::DropTarget;
use crate::systems::speech::SpeechVerdict;

/// What a finished tween means to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// A committed glyph reached its slot.
    GlyphPlaced,
    /// A dropped tile finished snapping onto drop target `target`.
    TileSnapped { target: usize },
    /// A feedback sprite finished popping up.
    SpriteShown,
    /// Shake leg `leg` of the wrong-answer sprite ended.
    ShakeLeg { leg: u8 },
    /// Remove the entity.
    Despawn,
}

pub type Tweens = TweenState<Completion>;

/// A draggable tile and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct TileState {
    pub id: EntityId,
    pub value: String,
    pub origin: Vec2,
    /// Accepted by an identity-checked target; no longer draggable.
    pub locked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grab {
    pub tile: EntityId,
    /// Pointer offset from the tile position at grab time.
    pub offset: Vec2,
}

/// Character sprite used for correct/wrong feedback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub id: EntityId,
    pub home: Vec2,
}

#[derive(Debug, Default)]
pub struct Session {
    // -- writing --
    pub active_slot: usize,
    pub strokes: StrokeAccumulator,
    /// A commit or snap animation is in flight; drawing and dragging are rejected.
    pub is_moving: bool,
    pub pad_open: bool,
    pub target_boxes: Vec<EntityId>,
    pub active_zone: Option<EntityId>,
    pub blink_on: bool,
    /// Ink entity showing the pending strokes and the gesture in progress.
    pub live_ink: Option<EntityId>,
    pub audio_plays: u32,

    // -- drag --
    pub drop_targets: Vec<DropTarget<EntityId>>,
    pub tiles: Vec<TileState>,
    pub grab: Option<Grab>,

    // -- feedback --
    pub boy: Option<Sprite>,
    pub girl: Option<Sprite>,

    // -- speech --
    pub has_listened: bool,
    pub recording: bool,
    pub verdict: Option<SpeechVerdict>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            pad_open: true,
            ..Self::default()
        }
    }

    pub fn tile(&self, id: EntityId) -> Option<&TileState> {
        self.tiles.iter().find(|t| t.id == id)
    }

    pub fn tile_mut(&mut self, id: EntityId) -> Option<&mut TileState> {
        self.tiles.iter_mut().find(|t| t.id == id)
    }

    /// Forget a sprite whose image failed to load.
    pub fn drop_sprite(&mut self, id: EntityId) -> bool {
        if self.boy.is_some_and(|s| s.id == id) {
            self.boy = None;
            true
        } else if self.girl.is_some_and(|s| s.id == id) {
            self.girl = None;
            true
        } else {
            false
        }
    }
}
