// Menu state management: main menu, controls menu and key capture

use crate::controls::{ControlKind, ControlSetting, Controller, Controls};
use crate::game::Player;

/// Application state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Currently in the menus
    Menu,
    /// Currently playing
    Playing,
    /// Graceful shutdown
    Exiting,
}

/// Main menu items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    SetControls,
    NewGame,
    Continue,
    Quit,
}

impl MenuItem {
    pub fn display_text(&self) -> &str {
        match self {
            MenuItem::SetControls => "Set Controls",
            MenuItem::NewGame => "New Game",
            MenuItem::Continue => "Continue Game",
            MenuItem::Quit => "Quit",
        }
    }

    /// Items in order; Continue only while a game exists
    pub fn available(game_active: bool) -> Vec<MenuItem> {
        let mut items = vec![MenuItem::SetControls, MenuItem::NewGame];
        if game_active {
            items.push(MenuItem::Continue);
        }
        items.push(MenuItem::Quit);
        items
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyList {
    Up,
    Down,
}

/// One bound key: which player, which list, which position in it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySlot {
    pub player: Player,
    pub list: KeyList,
    pub index: usize,
}

/// Rows of the controls menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlsRow {
    /// Cycle AI / keys / mouse
    Type(Player),
    /// Cycle difficulty, or reset keys to defaults
    Setting(Player),
    /// Rebind one key
    Key(KeySlot),
    Back,
}

impl ControlsRow {
    /// Rows for the current controllers; key rows only for key controllers
    pub fn for_controls(controls: &Controls) -> Vec<ControlsRow> {
        let mut rows = Vec::new();
        for player in Player::ALL {
            rows.push(ControlsRow::Type(player));
            match controls.get(player) {
                Controller::Key(c) => {
                    rows.push(ControlsRow::Setting(player));
                    for (list, keys) in [(KeyList::Up, c.up_keys()), (KeyList::Down, c.down_keys())] {
                        for index in 0..keys.len() {
                            rows.push(ControlsRow::Key(KeySlot { player, list, index }));
                        }
                    }
                }
                Controller::Ai(_) => rows.push(ControlsRow::Setting(player)),
                Controller::Pointer(_) => {}
            }
        }
        rows.push(ControlsRow::Back);
        rows
    }

    pub fn label(&self, controls: &Controls) -> String {
        match *self {
            ControlsRow::Type(player) => format!(
                "{} controls: {}",
                player.label(),
                controls.get(player).kind().display_name()
            ),
            ControlsRow::Setting(player) => match controls.get(player) {
                Controller::Ai(c) => {
                    format!("{} difficulty: {}", player.label(), c.difficulty().display_name())
                }
                _ => format!("{} reset keys", player.label()),
            },
            ControlsRow::Key(slot) => {
                let key = bound_key(controls, slot).unwrap_or_default();
                let list = match slot.list {
                    KeyList::Up => "up",
                    KeyList::Down => "down",
                };
                format!("{} {} {}: {}", slot.player.label(), list, slot.index + 1, key_label(&key))
            }
            ControlsRow::Back => "Go Back".to_string(),
        }
    }
}

/// Display label for a key id; arrows get glyphs
pub fn key_label(key: &str) -> String {
    match key {
        "ArrowUp" => "↑".to_string(),
        "ArrowDown" => "↓".to_string(),
        "ArrowLeft" => "←".to_string(),
        "ArrowRight" => "→".to_string(),
        other => other.to_string(),
    }
}

/// The key currently in `slot`, if the player is on keys and the slot exists
pub fn bound_key(controls: &Controls, slot: KeySlot) -> Option<String> {
    match controls.get(slot.player) {
        Controller::Key(c) => {
            let keys = match slot.list {
                KeyList::Up => c.up_keys(),
                KeyList::Down => c.down_keys(),
            };
            keys.get(slot.index).cloned()
        }
        _ => None,
    }
}

/// A key setting with `slot` replaced by `key`
pub fn with_key(controls: &Controls, slot: KeySlot, key: &str) -> Option<ControlSetting> {
    match controls.get(slot.player).setting() {
        ControlSetting::Keys {
            mut up_keys,
            mut down_keys,
        } => {
            let keys = match slot.list {
                KeyList::Up => &mut up_keys,
                KeyList::Down => &mut down_keys,
            };
            *keys.get_mut(slot.index)? = key.to_string();
            Some(ControlSetting::Keys { up_keys, down_keys })
        }
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    Controls,
}

/// Menu state
pub struct MenuState {
    pub screen: Screen,
    /// Currently selected row on the current screen
    pub selected_index: usize,
    /// Key slot waiting for a key press
    pub capturing: Option<KeySlot>,
    /// Last rejected binding, shown until the next key press
    pub notice: Option<String>,
}

impl MenuState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Main,
            selected_index: 0,
            capturing: None,
            notice: None,
        }
    }

    pub fn open_main(&mut self) {
        self.screen = Screen::Main;
        self.selected_index = 0;
        self.capturing = None;
    }

    pub fn open_controls(&mut self) {
        self.screen = Screen::Controls;
        self.selected_index = 0;
    }

    /// Move selection up, wrapping within `len` rows
    pub fn select_previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        if self.selected_index > 0 {
            self.selected_index = self.selected_index.min(len) - 1;
        } else {
            self.selected_index = len - 1;
        }
    }

    /// Move selection down, wrapping within `len` rows
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        if self.selected_index + 1 < len {
            self.selected_index += 1;
        } else {
            self.selected_index = 0;
        }
    }

    /// Selected index clamped to a list that may have shrunk
    pub fn selection(&self, len: usize) -> usize {
        self.selected_index.min(len.saturating_sub(1))
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new()
    }
}

/// Short description of a player's controls for the main menu
pub fn controls_summary(controls: &Controls, player: Player) -> String {
    let controller = controls.get(player);
    let detail = match controller {
        Controller::Ai(c) => c.difficulty().display_name().to_string(),
        Controller::Key(c) => {
            let join = |keys: &[String]| {
                keys.iter().map(|k| key_label(k)).collect::<Vec<_>>().join("/")
            };
            format!("{} {}", join(c.up_keys()), join(c.down_keys()))
        }
        Controller::Pointer(_) => "click".to_string(),
    };
    match controller.kind() {
        ControlKind::Pointer => format!("{}: Mouse", player.label()),
        kind => format!("{}: {} ({})", player.label(), kind.display_name(), detail),
    }
}
