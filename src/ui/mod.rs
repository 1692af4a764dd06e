pub mod braille;
pub mod layout;
pub mod overlay;
pub mod render;

pub use layout::{display_rect, display_state, DisplayRect, DisplayState, Orientation};
pub use overlay::{render_overlay, OverlayMessage, OverlayStyle};
pub use render::{court_area, court_orientation, render, GameView};
