// Configuration types
// All settings default to the values the game ships with

use serde::{Deserialize, Serialize};

use crate::controls::ControlSetting;
use crate::game::Player;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub controls: ControlsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControlsConfig {
    // Each player takes one of:
    //   up_keys = [..] and down_keys = [..]   keyboard
    //   difficulty = "easy" | "medium" | "hard"   computer
    //   an empty table                          mouse
    #[serde(default = "default_p1")]
    pub p1: ControlSetting,
    #[serde(default = "default_p2")]
    pub p2: ControlSetting,
}

fn default_p1() -> ControlSetting {
    ControlSetting::default_for(Player::P1)
}

fn default_p2() -> ControlSetting {
    ControlSetting::default_for(Player::P2)
}

impl ControlsConfig {
    pub fn get(&self, player: Player) -> &ControlSetting {
        match player {
            Player::P1 => &self.p1,
            Player::P2 => &self.p2,
        }
    }

    pub fn set(&mut self, player: Player, setting: ControlSetting) {
        match player {
            Player::P1 => self.p1 = setting,
            Player::P2 => self.p2 = setting,
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            p1: default_p1(),
            p2: default_p2(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    // Render loop rate
    pub target_fps: u64,

    // Clock callbacks closer together than this are coalesced
    pub min_tick_ms: f64,

    // Gaps longer than this are treated as a stall and not simulated
    pub stall_ms: f64,

    // Minimum interval between pointer target updates
    pub pointer_throttle_ms: u64,

    // Terminals without release events: a key with no repeat for this long
    // counts as released. Must cover the initial auto-repeat delay.
    pub key_hold_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            min_tick_ms: 12.0,
            stall_ms: 32.0,
            pointer_throttle_ms: 100,
            key_hold_ms: 550,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Score display color (RGB values 0-255)
    pub score_color: [u8; 3],

    // Paddle color
    pub paddle_color: [u8; 3],

    // Ball color
    pub ball_color: [u8; 3],

    // Center line color
    pub center_line_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            score_color: [255, 255, 255],       // White
            paddle_color: [255, 255, 255],      // White
            ball_color: [255, 255, 255],        // White
            center_line_color: [100, 100, 100], // Gray
        }
    }
}
