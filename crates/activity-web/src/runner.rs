use activity_engine::{build_frame, EngineContext, FixedTimestep, Game, GameConfig, InputEvent, InputQueue};

/// Generic runner that wires a game to the page's animation frame.
///
/// wasm-bindgen cannot export generic structs, so `lib.rs` keeps one concrete
/// runner in a `thread_local!` and exports free functions around it.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    /// Handed to every fixed step after the first one in a frame.
    no_input: InputQueue,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
    frame_json: String,
    commands_json: String,
    /// Tone frequencies emitted this frame.
    sound_buffer: Vec<u32>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let sound_buffer = Vec::with_capacity(config.max_sounds);

        Self {
            game,
            ctx: EngineContext::with_config(&config),
            input: InputQueue::new(),
            no_input: InputQueue::new(),
            timestep,
            config,
            initialized: false,
            frame_json: String::new(),
            commands_json: String::from("[]"),
            sound_buffer,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.publish();
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run the fixed steps due for `dt` seconds and publish the results.
    /// Queued input is delivered to the first step only.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            let input = if step == 0 { &self.input } else { &self.no_input };
            self.game.update(&mut self.ctx, input);
        }
        if steps > 0 {
            self.input.drain();
        }

        self.publish();
    }

    fn publish(&mut self) {
        match serde_json::to_string(&build_frame(&self.ctx.scene, &self.ctx.effects)) {
            Ok(json) => self.frame_json = json,
            Err(e) => log::error!("frame serialization failed: {e}"),
        }
        match serde_json::to_string(&self.ctx.commands) {
            Ok(json) => self.commands_json = json,
            Err(e) => log::error!("command serialization failed: {e}"),
        }
        self.sound_buffer.clear();
        self.sound_buffer.extend(self.ctx.sounds.iter().map(|s| s.0));
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Drawable snapshot of the last frame, back to front.
    pub fn frame_json(&self) -> &str {
        &self.frame_json
    }

    /// Host commands emitted during the last frame.
    pub fn commands_json(&self) -> &str {
        &self.commands_json
    }

    pub fn sound_events(&self) -> &[u32] {
        &self.sound_buffer
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use activity_engine::{StagePlayer, UiAction};

    const CATALOG: &str = r#"[
        { "id": 1, "type": "normal", "inputType": "pad", "title": "One",
          "targets": [ { "x": 100, "y": 100, "width": 200, "height": 200 } ] },
        { "id": 2, "type": "speech_recognition", "inputType": "none", "title": "Two", "text": "你好" },
        { "id": 3, "type": "normal", "inputType": "pad", "title": "Three", "targets": [] }
    ]"#;

    fn runner() -> GameRunner<StagePlayer> {
        let mut runner = GameRunner::new(StagePlayer::from_source(CATALOG).unwrap());
        runner.init();
        runner
    }

    #[test]
    fn input_is_applied_once_per_frame() {
        let mut r = runner();
        r.push_input(InputEvent::Ui(UiAction::NextStage));
        // three fixed steps in one frame
        r.tick(3.0 / 60.0 + 0.001);
        assert_eq!(r.game().index(), 1);
    }

    #[test]
    fn input_waits_for_a_step() {
        let mut r = runner();
        r.push_input(InputEvent::Ui(UiAction::NextStage));
        r.tick(0.001);
        assert_eq!(r.game().index(), 0);
        r.tick(1.0 / 60.0);
        assert_eq!(r.game().index(), 1);
    }

    #[test]
    fn commands_and_frame_are_published() {
        let mut r = runner();
        assert!(r.frame_json().contains("\"entities\""));
        r.push_input(InputEvent::Ui(UiAction::NextStage));
        r.tick(1.0 / 60.0);
        r.push_input(InputEvent::PointerDown { x: 640.0, y: 200.0 });
        r.tick(1.0 / 60.0);
        let commands: Vec<serde_json::Value> = serde_json::from_str(r.commands_json()).unwrap();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0]["kind"], "speak");

        r.tick(1.0 / 60.0);
        assert_eq!(r.commands_json(), "[]");
    }
}
