// Terminal input: key and mouse trackers feeding the controllers

mod keys;
mod pointer;

pub use keys::{key_name, KeyTracker};
pub use pointer::PointerTracker;
