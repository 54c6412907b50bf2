//! Browser bridge for the activity player.
//!
//! The page calls `init` with the catalog source, then `tick` once per
//! animation frame. Pointer, toolbar and host callbacks are queued as input
//! events and applied on the next fixed step. After every tick the page reads
//! the frame, the host commands and the tones to play.

pub mod runner;

pub use runner::GameRunner;

use std::cell::RefCell;

use activity_engine::{
    CheatField, ExpansionFactor, HostEvent, InputEvent, RecognitionError, StagePlayer, UiAction,
};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner<StagePlayer>>> = const { RefCell::new(None) };
}

/// Run `f` against the live runner. `None` before `init` succeeded.
fn with_runner<R>(f: impl FnOnce(&mut GameRunner<StagePlayer>) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                web_sys::console::warn_1(&"activity player not initialized; call init() first".into());
                None
            }
        }
    })
}

fn push(event: InputEvent) {
    with_runner(|r| r.push_input(event));
}

/// Load the catalog (JSON or `const STAGES = [...];`) and show the first stage.
#[wasm_bindgen]
pub fn init(catalog_source: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let player = StagePlayer::from_source(catalog_source).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let count = player.catalog().len();
    let mut runner = GameRunner::new(player);
    runner.init();
    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
    log::info!("activity player: initialized with {count} stages");
    Ok(())
}

#[wasm_bindgen]
pub fn tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

// ---- Pointer ----

#[wasm_bindgen]
pub fn pointer_down(x: f32, y: f32) {
    push(InputEvent::PointerDown { x, y });
}

#[wasm_bindgen]
pub fn pointer_move(x: f32, y: f32) {
    push(InputEvent::PointerMove { x, y });
}

#[wasm_bindgen]
pub fn pointer_up(x: f32, y: f32) {
    push(InputEvent::PointerUp { x, y });
}

// ---- Toolbar and panels ----

#[wasm_bindgen]
pub fn prev_stage() {
    push(InputEvent::Ui(UiAction::PrevStage));
}

#[wasm_bindgen]
pub fn next_stage() {
    push(InputEvent::Ui(UiAction::NextStage));
}

#[wasm_bindgen]
pub fn reset_stage() {
    push(InputEvent::Ui(UiAction::ResetStage));
}

#[wasm_bindgen]
pub fn go_to_stage(index: usize) {
    push(InputEvent::Ui(UiAction::GoToStage(index)));
}

/// `value` is the select-box value: 1.0, 1.2 or 1.5.
#[wasm_bindgen]
pub fn set_expansion(value: f32) {
    match ExpansionFactor::from_value(value) {
        Some(factor) => push(InputEvent::Ui(UiAction::SetExpansion(factor))),
        None => log::warn!("unsupported expansion factor {value}"),
    }
}

#[wasm_bindgen]
pub fn set_pinyin_size(size: f32) {
    push(InputEvent::Ui(UiAction::SetPinyinSize(size)));
}

#[wasm_bindgen]
pub fn set_hanja_size(size: f32) {
    push(InputEvent::Ui(UiAction::SetHanjaSize(size)));
}

// ---- Cheat editor ----

#[wasm_bindgen]
pub fn toggle_cheat() {
    push(InputEvent::Ui(UiAction::ToggleCheat));
}

/// Table edit; `index` is 0-based, `field` one of `x`, `y`, `width`, `height`.
#[wasm_bindgen]
pub fn cheat_edit(index: usize, field: &str, value: &str) {
    match CheatField::parse(field) {
        Some(field) => push(InputEvent::Ui(UiAction::CheatEdit {
            index,
            field,
            value: value.to_string(),
        })),
        None => log::warn!("unknown cheat field '{field}'"),
    }
}

#[wasm_bindgen]
pub fn cheat_save() {
    push(InputEvent::Ui(UiAction::CheatSave));
}

// ---- Host callbacks ----

#[wasm_bindgen]
pub fn recognition_result(transcript: &str) {
    push(InputEvent::Host(HostEvent::RecognitionResult(transcript.to_string())));
}

/// `code` is the recognizer's error string (`not-allowed`, `network`, ...).
#[wasm_bindgen]
pub fn recognition_error(code: &str) {
    push(InputEvent::Host(HostEvent::RecognitionError(RecognitionError::from_code(code))));
}

#[wasm_bindgen]
pub fn recognition_ended() {
    push(InputEvent::Host(HostEvent::RecognitionEnded));
}

#[wasm_bindgen]
pub fn save_finished(ok: bool, message: &str) {
    let result = if ok { Ok(()) } else { Err(message.to_string()) };
    push(InputEvent::Host(HostEvent::SaveFinished(result)));
}

#[wasm_bindgen]
pub fn image_failed(entity_id: u32) {
    push(InputEvent::Host(HostEvent::ImageFailed(activity_engine::EntityId(entity_id))));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn frame_json() -> String {
    with_runner(|r| r.frame_json().to_string()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn commands_json() -> String {
    with_runner(|r| r.commands_json().to_string()).unwrap_or_else(|| "[]".to_string())
}

#[wasm_bindgen]
pub fn status_json() -> String {
    with_runner(|r| match serde_json::to_string(&r.game().status()) {
        Ok(json) => json,
        Err(e) => {
            log::error!("status serialization failed: {e}");
            String::from("null")
        }
    })
    .unwrap_or_else(|| "null".to_string())
}

/// Tone frequencies (Hz) to play for the last frame.
#[wasm_bindgen]
pub fn sound_events() -> js_sys::Uint32Array {
    with_runner(|r| js_sys::Uint32Array::from(r.sound_events()))
        .unwrap_or_else(|| js_sys::Uint32Array::new_with_length(0))
}

#[wasm_bindgen]
pub fn world_width() -> f32 {
    with_runner(|r| r.world_width()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn world_height() -> f32 {
    with_runner(|r| r.world_height()).unwrap_or_default()
}
