pub mod api;
pub mod components;
pub mod config;
pub mod core;
pub mod editor;
pub mod extensions;
pub mod input;
pub mod player;
pub mod stage;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig};
pub use api::types::{EntityId, HostCommand, SoundEvent};
pub use components::entity::{Anchor, Entity, Font, Shape, Style};
pub use components::layer::RenderLayer;
pub use core::geometry::{near_point, point_in_expanded_rect, ExpansionFactor, Rect};
pub use core::scene::Scene;
pub use core::time::{FixedTimestep, TimerKey, TimerScope, Timers};
pub use editor::{CheatEditor, CheatField, CheatRow, CheatStatus, SaveStatus};
pub use input::queue::{HostEvent, InputEvent, InputQueue, UiAction};
pub use input::strokes::StrokeAccumulator;
pub use player::{PlayerStatus, Session, StagePlayer};
pub use stage::{Catalog, CatalogError, InputMode, StageDescriptor, StageError, StageKind};
pub use systems::effects::{EffectsState, Particle};
pub use systems::render::{build_frame, Frame, ParticleView};
pub use systems::snap::{resolve_drop, DropOutcome, DropTarget};
pub use systems::speech::{evaluate, RecognitionError, SpeechVerdict};

// Extensions — decoupled optional systems
pub use extensions::{ease, ease_vec2, lerp, lerp_vec2, Easing, Tween, TweenId, TweenLoop, TweenState, TweenTarget};
