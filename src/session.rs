// Session: the single owner of the game and the controllers

use tracing::info;

use crate::controls::{compute_control_state, ActiveKeys, ControlSetting, Controls, PointerTargets};
use crate::game::{ControlState, Game, GameSnapshot, PhysicsEvents, Player};

/// Inputs gathered by the frontend for one tick
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    pub active_keys: ActiveKeys,
    pub pointer_targets: PointerTargets,
}

/// Owns the match and the controllers, and steps them together so control
/// state and physics can never interleave.
#[derive(Debug)]
pub struct Session {
    game: Option<Game>,
    controls: Controls,
    seed: Option<u64>,
    last_control_state: ControlState,
}

impl Session {
    pub fn new(controls: Controls) -> Self {
        Self {
            game: None,
            controls,
            seed: None,
            last_control_state: ControlState::default(),
        }
    }

    /// Seed every new game and every AI controller from `seed` for
    /// reproducible matches
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.controls.reseed(seed);
        self
    }

    /// Start a fresh match, replacing any game in progress
    pub fn new_game(&mut self) {
        let game = match self.seed {
            Some(seed) => {
                self.controls.reseed(seed);
                Game::with_seed(seed)
            }
            None => Game::new(),
        };
        info!(
            "New game: P1 {:?}, P2 {:?}",
            self.controls.get(Player::P1).kind(),
            self.controls.get(Player::P2).kind()
        );
        self.game = Some(game);
        self.last_control_state = ControlState::default();
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn has_game(&self) -> bool {
        self.game.is_some()
    }

    pub fn snapshot(&self) -> Option<GameSnapshot> {
        self.game.as_ref().map(Game::snapshot)
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    pub fn set_control(&mut self, player: Player, setting: &ControlSetting) {
        self.controls.set(player, setting);
    }

    pub fn last_control_state(&self) -> ControlState {
        self.last_control_state
    }

    /// Compute intents, apply them and advance the game by `frames`
    pub fn step(&mut self, inputs: &InputSnapshot, frames: f32) -> PhysicsEvents {
        let game = match self.game.as_mut() {
            Some(game) => game,
            None => return PhysicsEvents::default(),
        };

        let snapshot = game.snapshot();
        let control_state = compute_control_state(
            &mut self.controls,
            &snapshot,
            &inputs.active_keys,
            &inputs.pointer_targets,
        );
        game.update_paddle_directions(&control_state);
        self.last_control_state = control_state;
        game.advance(frames)
    }
}
