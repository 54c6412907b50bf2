//! Behavior constants of the activity player.
//!
//! Durations are seconds, distances are canvas pixels on the 1280x1024 stage.

use crate::core::geometry::Rect;
use crate::extensions::easing::Easing;

pub const CANVAS_WIDTH: f32 = 1280.0;
pub const CANVAS_HEIGHT: f32 = 1024.0;

// -- Writing --

/// Inactivity after the last accepted stroke before the glyph is committed.
pub const IDLE_COMMIT: f32 = 2.0;
pub const COMMIT_DURATION: f32 = 0.8;
pub const COMMIT_EASING: Easing = Easing::QuartInOut;
/// Share of the target box a committed glyph may fill on either axis.
pub const GLYPH_FIT: f32 = 0.8;
pub const WRITING_PAD: Rect = Rect::new(240.0, 640.0, 800.0, 280.0);
pub const PAD_RADIUS: f32 = 24.0;
pub const PAD_CLOSE_RADIUS: f32 = 18.0;
pub const INK_WIDTH: f32 = 8.0;
pub const BLINK_INTERVAL: f32 = 0.5;
pub const HINT_VISIBLE: f32 = 1.8;
pub const HINT_FADE: f32 = 0.8;
pub const HINT_ALPHA: f32 = 0.3;
pub const SENTENCE_FONT: f32 = 64.0;
pub const SENTENCE_GAP: f32 = 60.0;

// -- Drag --

/// Per-axis distance under which a released tile snaps to a target.
pub const SNAP_TOLERANCE: f32 = 70.0;
pub const SNAP_DURATION: f32 = 0.3;
pub const SNAP_EASING: Easing = Easing::QuintOut;
pub const SPRING_BACK_DURATION: f32 = 0.5;
pub const SPRING_BACK_EASING: Easing = Easing::BackOut;
pub const DRAG_CENTER_X: f32 = 640.0;
pub const TOKEN_SPACING: f32 = 180.0;
pub const TOKEN_Y: f32 = 520.0;
pub const SLOT_OFFSET_Y: f32 = 120.0;
pub const SUBTEXT_Y: f32 = 750.0;
pub const SOURCE_Y: f32 = 250.0;
pub const SOURCE_SPACING: f32 = 200.0;
pub const PINYIN_SIZE: f32 = 40.0;
pub const HANJA_SIZE: f32 = 80.0;
pub const FONT_SIZE_RANGE: (f32, f32) = (12.0, 160.0);

// -- Feedback --

pub const FIREWORK_COUNT: usize = 40;
pub const FIREWORK_RADIUS: (f32, f32) = (3.0, 8.0);
pub const FIREWORK_DISTANCE: (f32, f32) = (150.0, 500.0);
pub const FIREWORK_LIFETIME: (f32, f32) = (1.2, 2.0);
pub const FIREWORK_COLORS: [&str; 5] = ["#6366F1", "#10B981", "#F59E0B", "#EF4444", "#EC4899"];
pub const DRAG_BURST_AT: (f32, f32) = (640.0, 400.0);
pub const SPEECH_BURST_AT: (f32, f32) = (640.0, 450.0);
pub const SPRITE_SCALE: f32 = 1.4;
pub const BOY_HOME: (f32, f32) = (150.0, 820.0);
pub const GIRL_HOME: (f32, f32) = (1130.0, 820.0);
pub const BOY_JUMP_Y: f32 = 700.0;
pub const SPRITE_POP: f32 = 0.7;
pub const SPRITE_RETURN: f32 = 0.6;
pub const BOY_REST: f32 = 1.2;
pub const GIRL_REST: f32 = 1.5;
pub const SHAKE_OFFSET: f32 = 40.0;
pub const SHAKE_STEP: f32 = 0.08;

// -- Speech --

pub const SPEECH_CENTER: (f32, f32) = (640.0, 450.0);
pub const SPEECH_FONT: f32 = 130.0;
pub const SPEECH_CHAR_SPACING: f32 = 130.0;
pub const SPEECH_BOY_SRC: &str = "images/boy-1.png";
pub const SPEECH_BOY_HOME: (f32, f32) = (1100.0, 800.0);
pub const SPEECH_BOY_JUMP_Y: f32 = 680.0;
pub const SPEECH_BOY_POP: f32 = 0.6;
pub const SPEECH_BOY_REST: f32 = 2.0;
pub const MIC_RADIUS: f32 = 70.0;
pub const MIC_DISABLED_ALPHA: f32 = 0.4;
pub const PULSE_PERIOD: f32 = 1.0;
pub const DEFAULT_LANG: &str = "zh-CN";

// -- Cheat editor --

pub const CHEAT_DEFAULT_SIZE: f32 = 100.0;
pub const CHEAT_HANDLE: f32 = 10.0;
pub const SAVED_RESET: f32 = 1.5;
pub const FAILED_RESET: f32 = 2.0;

pub mod colors {
    pub const TEXT: &str = "#1E293B";
    pub const SECONDARY: &str = "#64748B";
    pub const BORDER: &str = "#E2E8F0";
    pub const TARGET_FILL: &str = "rgba(99, 102, 241, 0.02)";
    pub const TARGET_STROKE: &str = "#E2E8F0";
    pub const INDEX: &str = "#CBD5E1";
    pub const HINT: &str = "#94A3B8";
    pub const ACTIVE_ZONE: &str = "rgba(99, 102, 241, 0.05)";
    pub const ACCENT: &str = "#6366F1";
    pub const SUCCESS: &str = "#10B981";
    pub const ERROR: &str = "#EF4444";
    pub const PAD: &str = "#F8FAFC";
    pub const MUTED: &str = "#94A3B8";
    pub const TILE: &str = "#FFFFFF";
    pub const LETTER: &str = "#3B82F6";
    pub const PULSE: &str = "rgba(99, 102, 241, 0.15)";
    pub const CHEAT: &str = "#16A34A";
    pub const CHEAT_FILL: &str = "rgba(22, 163, 74, 0.15)";
}
