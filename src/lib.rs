// Pong simulation and control core, with a terminal frontend

pub mod ai;
pub mod app;
pub mod clock;
pub mod config;
pub mod controls;
pub mod game;
pub mod input;
pub mod logging;
pub mod menu;
pub mod session;
pub mod ui;
