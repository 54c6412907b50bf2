use serde::{Deserialize, Serialize};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// A feedback tone emitted by the player.
/// The value is the start frequency in Hz; the host plays a short rising sine beep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

impl SoundEvent {
    pub const CORRECT: SoundEvent = SoundEvent(600);
    pub const WRONG: SoundEvent = SoundEvent(200);
    pub const SPEECH_MISS: SoundEvent = SoundEvent(300);
}

/// Requests from the player to the host page (speech APIs, alerts, persistence).
/// The host drains these after every tick and reports results back as input events.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HostCommand {
    /// Speak `text` with the browser speech synthesizer. Fire and forget.
    Speak { text: String, lang: String },
    /// Start single-shot speech recognition in `lang`.
    StartRecognition { lang: String },
    /// Stop a running recognition session.
    StopRecognition,
    /// Show a blocking notice to the user.
    Notice { message: String },
    /// POST the serialized catalog to the save endpoint.
    SaveCatalog { payload: String },
}
