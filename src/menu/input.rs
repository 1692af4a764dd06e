// Menu input handling

use crossterm::event::KeyCode;
use tracing::{debug, info};

use super::state::{bound_key, with_key, ControlsRow, KeySlot, MenuItem, MenuState, Screen};
use crate::controls::Controls;
use crate::input::key_name;

/// Menu action result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Stay in the menu
    None,
    /// Replace any game with a fresh one and play
    NewGame,
    /// Resume the game in progress
    Continue,
    /// A controller was changed
    ControlsChanged,
    /// Exit application
    Quit,
}

/// Handle one key press in the menus
pub fn handle_menu_key(
    menu: &mut MenuState,
    controls: &mut Controls,
    game_active: bool,
    key_code: KeyCode,
) -> MenuAction {
    menu.notice = None;

    if let Some(slot) = menu.capturing {
        return handle_key_capture(menu, controls, slot, key_code);
    }

    match menu.screen {
        Screen::Main => handle_main_key(menu, game_active, key_code),
        Screen::Controls => handle_controls_key(menu, controls, key_code),
    }
}

fn handle_main_key(menu: &mut MenuState, game_active: bool, key_code: KeyCode) -> MenuAction {
    let items = MenuItem::available(game_active);
    match key_code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            menu.select_previous(items.len());
            MenuAction::None
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            menu.select_next(items.len());
            MenuAction::None
        }
        KeyCode::Enter | KeyCode::Char(' ') => match items[menu.selection(items.len())] {
            MenuItem::SetControls => {
                menu.open_controls();
                MenuAction::None
            }
            MenuItem::NewGame => MenuAction::NewGame,
            MenuItem::Continue => MenuAction::Continue,
            MenuItem::Quit => MenuAction::Quit,
        },
        KeyCode::Esc if game_active => MenuAction::Continue,
        KeyCode::Char('q') | KeyCode::Char('Q') => MenuAction::Quit,
        _ => MenuAction::None,
    }
}

fn handle_controls_key(menu: &mut MenuState, controls: &mut Controls, key_code: KeyCode) -> MenuAction {
    let rows = ControlsRow::for_controls(controls);
    match key_code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            menu.select_previous(rows.len());
            MenuAction::None
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            menu.select_next(rows.len());
            MenuAction::None
        }
        KeyCode::Enter | KeyCode::Char(' ') => match rows[menu.selection(rows.len())] {
            ControlsRow::Type(player) => {
                controls.cycle_type(player);
                MenuAction::ControlsChanged
            }
            ControlsRow::Setting(player) => {
                controls.cycle_setting(player);
                MenuAction::ControlsChanged
            }
            ControlsRow::Key(slot) => {
                menu.capturing = Some(slot);
                MenuAction::None
            }
            ControlsRow::Back => {
                menu.open_main();
                MenuAction::None
            }
        },
        KeyCode::Esc => {
            menu.open_main();
            MenuAction::None
        }
        _ => MenuAction::None,
    }
}

/// The next key press rebinds `slot`, if the registry allows it
fn handle_key_capture(
    menu: &mut MenuState,
    controls: &mut Controls,
    slot: KeySlot,
    key_code: KeyCode,
) -> MenuAction {
    if key_code == KeyCode::Esc {
        menu.capturing = None;
        return MenuAction::None;
    }

    let key = match key_name(key_code) {
        Some(key) => key,
        None => {
            menu.notice = Some("That key cannot be bound".to_string());
            return MenuAction::None;
        }
    };

    let current = bound_key(controls, slot);
    if let Err(e) = controls.key_registry().validate(&key, current.as_deref()) {
        debug!("Rejected binding: {}", e);
        menu.notice = Some(e.to_string());
        return MenuAction::None;
    }

    menu.capturing = None;
    match with_key(controls, slot, &key) {
        Some(setting) => {
            info!("{} bound '{}'", slot.player.label(), key);
            controls.set(slot.player, &setting);
            MenuAction::ControlsChanged
        }
        None => MenuAction::None,
    }
}
