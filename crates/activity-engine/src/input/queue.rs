use crate::api::types::EntityId;
use crate::core::geometry::ExpansionFactor;
use crate::editor::cheat::CheatField;
use crate::systems::speech::RecognitionError;

/// Toolbar / panel actions from the page around the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    PrevStage,
    NextStage,
    /// Reload the current stage from scratch.
    ResetStage,
    /// Jump from the level sidebar.
    GoToStage(usize),
    SetExpansion(ExpansionFactor),
    SetPinyinSize(f32),
    SetHanjaSize(f32),
    ToggleCheat,
    /// Numeric edit from the cheat table; `value` is the raw input text.
    CheatEdit { index: usize, field: CheatField, value: String },
    CheatSave,
}

/// Results of asynchronous work the host performed for the player.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    RecognitionResult(String),
    RecognitionError(RecognitionError),
    /// The recognizer stopped on its own.
    RecognitionEnded,
    SaveFinished(Result<(), String>),
    /// An image entity could not be loaded.
    ImageFailed(EntityId),
}

/// Input event types the player understands.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at canvas coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at canvas coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to canvas coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    Ui(UiAction),
    Host(HostEvent),
}

/// A queue of input events.
/// The host writes events into the queue; the player drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
