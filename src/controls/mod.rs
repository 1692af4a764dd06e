// Control abstraction: per-paddle controllers and per-tick control state

mod key;
mod pointer;
mod registry;
mod setting;

pub use key::KeyController;
pub use pointer::PointerController;
pub use registry::{is_valid_key_name, KeyBindingError, KeyRegistry, NAMED_KEYS, RESERVED_KEYS};
pub use setting::ControlSetting;

use std::collections::HashSet;

use tracing::debug;

use crate::ai::{AiController, Difficulty};
use crate::game::{ControlState, Direction, GameSnapshot, Player};

/// Direction that moves `value` towards `target`, or None within `slack`
///
/// The two comparisons are evaluated in order and the second wins, so with a
/// negative slack an overlapping range resolves to Down.
pub fn seek(value: f32, target: f32, slack: f32) -> Direction {
    let mut d = if value > target + slack {
        Direction::Up
    } else {
        Direction::None
    };
    if value < target - slack {
        d = Direction::Down;
    }
    d
}

/// Identifiers of the keys currently held down
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveKeys {
    keys: HashSet<String>,
}

impl ActiveKeys {
    pub fn press(&mut self, key: &str) {
        self.keys.insert(key.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for ActiveKeys {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(str::to_string).collect(),
        }
    }
}

/// Latest normalized pointer target per player, if any
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTargets {
    targets: [Option<f32>; 2],
}

impl PointerTargets {
    pub fn get(&self, player: Player) -> Option<f32> {
        self.targets[player.index()]
    }

    pub fn set(&mut self, player: Player, target: f32) {
        self.targets[player.index()] = Some(target.clamp(0.0, 1.0));
    }

    pub fn clear(&mut self, player: Player) {
        self.targets[player.index()] = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Key,
    Pointer,
    Ai,
}

impl ControlKind {
    pub fn display_name(&self) -> &str {
        match self {
            ControlKind::Key => "Keyboard",
            ControlKind::Pointer => "Mouse",
            ControlKind::Ai => "Computer",
        }
    }
}

/// A paddle controller, one variant per input source
#[derive(Debug, Clone)]
pub enum Controller {
    Key(KeyController),
    Pointer(PointerController),
    Ai(AiController),
}

impl Controller {
    pub fn from_setting(player: Player, setting: &ControlSetting) -> Self {
        Self::build(player, setting, None)
    }

    /// Same as `from_setting`, but an AI draws its noise from `seed`
    pub fn from_setting_seeded(player: Player, setting: &ControlSetting, seed: u64) -> Self {
        Self::build(player, setting, Some(seed))
    }

    fn build(player: Player, setting: &ControlSetting, seed: Option<u64>) -> Self {
        match setting {
            ControlSetting::Keys { up_keys, down_keys } => {
                Controller::Key(KeyController::new(up_keys.clone(), down_keys.clone()))
            }
            ControlSetting::Ai { difficulty } => Controller::Ai(match seed {
                Some(seed) => AiController::with_seed(player, *difficulty, seed),
                None => AiController::new(player, *difficulty),
            }),
            ControlSetting::Pointer {} => Controller::Pointer(PointerController::new(player)),
        }
    }

    pub fn kind(&self) -> ControlKind {
        match self {
            Controller::Key(_) => ControlKind::Key,
            Controller::Pointer(_) => ControlKind::Pointer,
            Controller::Ai(_) => ControlKind::Ai,
        }
    }

    /// The setting this controller would be rebuilt from
    pub fn setting(&self) -> ControlSetting {
        match self {
            Controller::Key(c) => ControlSetting::Keys {
                up_keys: c.up_keys().to_vec(),
                down_keys: c.down_keys().to_vec(),
            },
            Controller::Pointer(_) => ControlSetting::pointer(),
            Controller::Ai(c) => ControlSetting::ai(c.difficulty()),
        }
    }

    pub fn get_direction(
        &mut self,
        snapshot: &GameSnapshot,
        active_keys: &ActiveKeys,
        pointer_targets: &PointerTargets,
    ) -> Direction {
        match self {
            Controller::Key(c) => c.get_direction(active_keys),
            Controller::Pointer(c) => c.get_direction(pointer_targets, snapshot),
            Controller::Ai(c) => c.get_direction(snapshot),
        }
    }
}

/// The controller assigned to each player
#[derive(Debug, Clone)]
pub struct Controls {
    slots: [Controller; 2],
    /// When set, every controller built from here on gets a seed derived from it
    seed: Option<u64>,
    builds: u64,
}

impl Controls {
    pub fn new(p1: &ControlSetting, p2: &ControlSetting) -> Self {
        Self {
            slots: [
                Controller::from_setting(Player::P1, p1),
                Controller::from_setting(Player::P2, p2),
            ],
            seed: None,
            builds: 0,
        }
    }

    /// Rebuild both controllers from their settings with seeds derived from
    /// `seed`, so the same sequence of calls replays the same AI noise.
    /// AI prediction state starts over.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = Some(seed);
        self.builds = 0;
        for player in Player::ALL {
            let setting = self.get(player).setting();
            self.slots[player.index()] = self.build(player, &setting);
        }
    }

    fn build(&mut self, player: Player, setting: &ControlSetting) -> Controller {
        match self.seed {
            Some(seed) => {
                self.builds += 1;
                let derived = seed ^ (self.builds << 1 | player.index() as u64)
                    .wrapping_mul(0x9E37_79B9_7F4A_7C15);
                Controller::from_setting_seeded(player, setting, derived)
            }
            None => Controller::from_setting(player, setting),
        }
    }

    pub fn get(&self, player: Player) -> &Controller {
        &self.slots[player.index()]
    }

    /// Swap one player's controller wholesale; the other slot is untouched
    pub fn set(&mut self, player: Player, setting: &ControlSetting) {
        debug!("{} controls set to {:?}", player.label(), setting);
        self.slots[player.index()] = self.build(player, setting);
    }

    /// Ai -> Keys -> Pointer -> Ai
    pub fn cycle_type(&mut self, player: Player) {
        let next = match self.get(player).kind() {
            ControlKind::Ai => ControlSetting::default_keys(player),
            ControlKind::Key => ControlSetting::pointer(),
            ControlKind::Pointer => ControlSetting::ai(Difficulty::Easy),
        };
        self.set(player, &next);
    }

    /// Next difficulty for an AI, default bindings for keys, nothing for pointer
    pub fn cycle_setting(&mut self, player: Player) {
        let next = match self.get(player) {
            Controller::Ai(c) => ControlSetting::ai(c.difficulty().next()),
            Controller::Key(_) => ControlSetting::default_keys(player),
            Controller::Pointer(_) => return,
        };
        self.set(player, &next);
    }

    /// Registry of every key currently bound by a key controller
    pub fn key_registry(&self) -> KeyRegistry {
        let mut registry = KeyRegistry::new();
        for player in Player::ALL {
            if let Controller::Key(c) = self.get(player) {
                registry.reserve(
                    player,
                    c.up_keys().iter().chain(c.down_keys()).cloned(),
                );
            }
        }
        registry
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(
            &ControlSetting::default_for(Player::P1),
            &ControlSetting::default_for(Player::P2),
        )
    }
}

/// Ask each player's controller for this tick's direction
pub fn compute_control_state(
    controls: &mut Controls,
    snapshot: &GameSnapshot,
    active_keys: &ActiveKeys,
    pointer_targets: &PointerTargets,
) -> ControlState {
    let mut state = ControlState::default();
    for player in Player::ALL {
        let direction =
            controls.slots[player.index()].get_direction(snapshot, active_keys, pointer_targets);
        state.set(player, direction);
    }
    state
}
