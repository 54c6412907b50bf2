use serde::Serialize;

use crate::editor::CheatStatus;

/// Everything the page around the canvas shows: indicator, navigation, panels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatus {
    pub title: String,
    pub index: usize,
    pub count: usize,
    pub can_prev: bool,
    pub can_next: bool,
    /// Expansion-factor panel, direct input only.
    pub show_expansion: bool,
    /// Font-size sliders, pinyin drag stages only.
    pub show_font_size: bool,
    pub expansion: f32,
    pub pinyin_size: f32,
    pub hanja_size: f32,
    pub active_slot: usize,
    pub slot_count: usize,
    pub is_moving: bool,
    pub pending_strokes: usize,
    pub recording: bool,
    pub cheat: CheatStatus,
    /// Why the current stage renders no activity, if it failed to convert.
    pub load_error: Option<String>,
}
