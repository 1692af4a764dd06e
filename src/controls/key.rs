// Keyboard controller: maps the set of held keys to a paddle direction

use super::ActiveKeys;
use crate::game::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyController {
    up_keys: Vec<String>,
    down_keys: Vec<String>,
}

impl KeyController {
    pub fn new(up_keys: Vec<String>, down_keys: Vec<String>) -> Self {
        Self { up_keys, down_keys }
    }

    pub fn up_keys(&self) -> &[String] {
        &self.up_keys
    }

    pub fn down_keys(&self) -> &[String] {
        &self.down_keys
    }

    /// Up or down only when exactly one of the two groups is held
    pub fn get_direction(&self, active_keys: &ActiveKeys) -> Direction {
        let up = self.up_keys.iter().any(|k| active_keys.contains(k));
        let down = self.down_keys.iter().any(|k| active_keys.contains(k));
        match (up, down) {
            (true, false) => Direction::Up,
            (false, true) => Direction::Down,
            _ => Direction::None,
        }
    }
}
