pub mod geometry;
pub mod physics;
pub mod state;

pub use geometry::{Axis, MobileRect, Vec2};
pub use physics::{Game, Phase, PhysicsEvents, Resume};
pub use state::{
    Ball, ControlState, Direction, EntityView, GameSnapshot, Paddle, Player, Score, WIN_SCORE,
};
