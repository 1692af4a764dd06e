// Menu module
// Handles the main menu, the controls menu and key rebinding

pub mod input;
pub mod render;
pub mod state;

pub use input::{handle_menu_key, MenuAction};
pub use render::render_menu;
pub use state::{AppState, ControlsRow, KeyList, KeySlot, MenuItem, MenuState, Screen};
