use crate::api::types::{EntityId, HostCommand, SoundEvent};
use crate::config;
use crate::core::scene::Scene;
use crate::core::time::Timers;
use crate::input::queue::InputQueue;
use crate::systems::effects::EffectsState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in canvas units.
    pub world_width: f32,
    /// World height in canvas units.
    pub world_height: f32,
    /// Particles preallocated for bursts (default: 256).
    pub max_particles: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of host commands per frame (default: 32).
    pub max_commands: usize,
    /// Seed for effect randomness.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: config::CANVAS_WIDTH,
            world_height: config::CANVAS_HEIGHT,
            max_particles: 256,
            max_sounds: 32,
            max_commands: 32,
            seed: 42,
        }
    }
}

/// The core contract every activity must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state and build the first screen.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step. `input` holds the events that arrived since the previous step.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub effects: EffectsState,
    pub timers: Timers,
    pub sounds: Vec<SoundEvent>,
    pub commands: Vec<HostCommand>,
    dt: f32,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::new(),
            effects: EffectsState::with_capacity(config.seed, config.max_particles),
            timers: Timers::new(),
            sounds: Vec::with_capacity(config.max_sounds),
            commands: Vec::with_capacity(config.max_commands),
            dt: config.fixed_dt,
            next_id: 1,
        }
    }

    /// Length of one fixed step in seconds.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a feedback tone to be played by the host.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Ask the host to do something on the player's behalf.
    pub fn emit_command(&mut self, command: HostCommand) {
        log::debug!("host command: {command:?}");
        self.commands.push(command);
    }

    /// Clear per-frame transient data (sounds, host commands).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.commands.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_start_at_one() {
        let mut ctx = EngineContext::new();
        assert_eq!(ctx.next_id(), EntityId(1));
        assert_eq!(ctx.next_id(), EntityId(2));
    }

    #[test]
    fn frame_data_is_cleared() {
        let mut ctx = EngineContext::new();
        ctx.emit_sound(SoundEvent::CORRECT);
        ctx.emit_command(HostCommand::StopRecognition);
        ctx.clear_frame_data();
        assert!(ctx.sounds.is_empty());
        assert!(ctx.commands.is_empty());
    }

    #[test]
    fn default_config_matches_the_canvas() {
        let config = GameConfig::default();
        assert_eq!(config.world_width, 1280.0);
        assert_eq!(config.world_height, 1024.0);
        assert!((EngineContext::with_config(&config).dt() - 1.0 / 60.0).abs() < 1e-9);
    }
}
