// Court entities (ball, paddles), player identities and the read-only snapshot

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{clamp, Axis, MobileRect, Vec2};

/// Score required to win a match
pub const WIN_SCORE: u8 = 11;

/// Nominal frame rate; 60 frame-equivalents make one second of simulated time
pub const FRAMES_PER_SECOND: f32 = 60.0;

/// Frames the ball stays frozen after a goal and again after the re-serve
pub const PAUSE_FRAMES: f32 = 60.0;

// Court layout, all in normalized units. The ball's height is stretched by the
// reference aspect ratio so it renders square on a 16:9 display.
const ASPECT_RATIO: f32 = 16.0 / 9.0;
pub const BALL_SIZE: Vec2 = Vec2::new(0.015, 0.015 * ASPECT_RATIO);
pub const PADDLE_SIZE: Vec2 = Vec2::new(0.015, 0.1);
pub const BALL_START: Vec2 = Vec2::new(0.5, 0.5);
pub const P1_START: Vec2 = Vec2::new(0.05, 0.5);
pub const P2_START: Vec2 = Vec2::new(0.95, 0.5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    P1,
    P2,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::P1, Player::P2];

    pub fn index(self) -> usize {
        match self {
            Player::P1 => 0,
            Player::P2 => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Player::P1 => "P1",
            Player::P2 => "P2",
        }
    }
}

/// Discrete paddle intent produced by a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Direction {
    Up,
    #[default]
    None,
    Down,
}

impl Direction {
    /// Velocity multiplier; y grows downwards on the court
    pub fn velocity(self) -> f32 {
        match self {
            Direction::Up => -1.0,
            Direction::None => 0.0,
            Direction::Down => 1.0,
        }
    }
}

/// One direction per player, produced fresh every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlState {
    directions: [Direction; 2],
}

impl ControlState {
    pub fn new(p1: Direction, p2: Direction) -> Self {
        Self {
            directions: [p1, p2],
        }
    }

    pub fn get(&self, player: Player) -> Direction {
        self.directions[player.index()]
    }

    pub fn set(&mut self, player: Player, direction: Direction) {
        self.directions[player.index()] = direction;
    }
}

/// JS-style sign: zero stays zero
pub(crate) fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.gen::<f32>() < 0.5 {
        -1.0
    } else {
        1.0
    }
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub rect: MobileRect,
}

impl Ball {
    pub const START_SPEED: f32 = 0.2;
    pub const SPEED_INCREASE: f32 = 0.08;
    pub const MAX_SPEED: Vec2 = Vec2::new(1.2, 0.6);

    pub fn new(center: Vec2) -> Self {
        Self {
            rect: MobileRect::new("ball", center, BALL_SIZE),
        }
    }

    /// Move and bounce off the top/bottom walls. Returns true on a wall bounce.
    pub fn move_by(&mut self, correction: f32) -> bool {
        self.rect.move_by(correction);
        let on_wall = self.rect.pos.y == self.rect.y_min || self.rect.pos.y == self.rect.y_max;
        if on_wall {
            self.rect.velocity.y *= -1.0;
        }
        on_wall
    }

    /// Ramp the x speed by `increment` (capped) and send the ball back the way it came
    pub fn increase_speed(&mut self, increment: f32) {
        let vx = self.rect.velocity.x;
        let speed = clamp(
            -Self::MAX_SPEED.x,
            vx + increment * sign(vx),
            Self::MAX_SPEED.x,
        );
        self.rect.velocity.x = -speed;
    }

    /// Bounce off `paddle`: realign outside it, speed up, and pick the new
    /// angle from where the ball hit relative to the paddle center.
    pub fn paddle_bounce(&mut self, paddle: &MobileRect) {
        self.rect.pos.x = self.rect.align(paddle, Axis::X);
        self.increase_speed(Self::SPEED_INCREASE);

        let from_center = (self.rect.pos.y - paddle.pos.y) / (paddle.offset.y + self.rect.offset.y);
        let vy = Self::MAX_SPEED.y * from_center;
        // Clamped against the x cap, matching the established bounce angles
        self.rect.velocity.y = clamp(-Self::MAX_SPEED.x, vy, Self::MAX_SPEED.x);
    }

    pub fn random_direction<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let vx = Self::START_SPEED * random_sign(rng);
        let vy = rng.gen_range(0.0..=Self::MAX_SPEED.y / 2.0) * random_sign(rng);
        self.rect.velocity = Vec2::new(vx, vy);
    }

    pub fn serve<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.rect.pos = BALL_START;
        self.random_direction(rng);
    }

    pub fn stop(&mut self) {
        self.rect.velocity = Vec2::ZERO;
    }
}

#[derive(Debug, Clone)]
pub struct Paddle {
    pub rect: MobileRect,
    pub score: u8,
}

impl Paddle {
    pub fn new(id: &'static str, center: Vec2) -> Self {
        Self {
            rect: MobileRect::new(id, center, PADDLE_SIZE),
            score: 0,
        }
    }

    pub fn for_player(player: Player) -> Self {
        match player {
            Player::P1 => Self::new("p1", P1_START),
            Player::P2 => Self::new("p2", P2_START),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Score {
    pub p1: u8,
    pub p2: u8,
}

impl Score {
    pub fn get(&self, player: Player) -> u8 {
        match player {
            Player::P1 => self.p1,
            Player::P2 => self.p2,
        }
    }

    pub fn total(&self) -> u16 {
        self.p1 as u16 + self.p2 as u16
    }
}

/// Read-only copy of one entity's geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityView {
    pub id: &'static str,
    pub pos: Vec2,
    pub size: Vec2,
    pub offset: Vec2,
    pub velocity: Vec2,
}

impl From<&MobileRect> for EntityView {
    fn from(rect: &MobileRect) -> Self {
        Self {
            id: rect.id,
            pos: rect.pos,
            size: rect.size,
            offset: rect.offset,
            velocity: rect.velocity,
        }
    }
}

/// Everything controllers and the presentation layer are allowed to see
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub ball: EntityView,
    pub p1: EntityView,
    pub p2: EntityView,
    pub winner: Option<Player>,
    pub score: Score,
}

impl GameSnapshot {
    pub fn paddle(&self, player: Player) -> &EntityView {
        match player {
            Player::P1 => &self.p1,
            Player::P2 => &self.p2,
        }
    }
}
