// Pointer/touch controller: steers towards a normalized target height

use super::{seek, PointerTargets};
use crate::game::{Direction, GameSnapshot, Player};

#[derive(Debug, Clone, PartialEq)]
pub struct PointerController {
    player: Player,
    slack: f32,
}

impl PointerController {
    pub const SLACK: f32 = 0.05;

    pub fn new(player: Player) -> Self {
        Self {
            player,
            slack: Self::SLACK,
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// Holds position until the player has pointed somewhere
    pub fn get_direction(&self, targets: &PointerTargets, snapshot: &GameSnapshot) -> Direction {
        match targets.get(self.player) {
            Some(target) => seek(snapshot.paddle(self.player).pos.y, target, self.slack),
            None => Direction::None,
        }
    }
}
