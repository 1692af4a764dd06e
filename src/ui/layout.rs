// Maps normalized court geometry to normalized screen geometry
//
// Horizontal orientation draws the court as-is. Vertical orientation rotates
// it so P1 sits at the top of the screen and paddles move left/right.

use crate::game::{EntityView, GameSnapshot, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Orientation for a drawing area measured in square pixels
    pub fn for_area(width: usize, height: usize) -> Self {
        if width > height {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

/// Screen rectangle as fractions of the drawing area, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub id: &'static str,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub ball: DisplayRect,
    pub p1: DisplayRect,
    pub p2: DisplayRect,
    pub winner: Option<Player>,
}

pub fn display_rect(entity: &EntityView, orientation: Orientation) -> DisplayRect {
    let left = entity.pos.x - entity.offset.x;
    let top = entity.pos.y - entity.offset.y;
    match orientation {
        Orientation::Horizontal => DisplayRect {
            id: entity.id,
            left,
            top,
            width: entity.size.x,
            height: entity.size.y,
        },
        Orientation::Vertical => DisplayRect {
            id: entity.id,
            left: top,
            top: left,
            width: entity.size.y,
            height: entity.size.x,
        },
    }
}

pub fn display_state(snapshot: &GameSnapshot, orientation: Orientation) -> DisplayState {
    DisplayState {
        ball: display_rect(&snapshot.ball, orientation),
        p1: display_rect(&snapshot.p1, orientation),
        p2: display_rect(&snapshot.p2, orientation),
        winner: snapshot.winner,
    }
}

/// Inverse mapping: a point given as screen fractions to court coordinates
pub fn screen_to_court(screen_x: f32, screen_y: f32, orientation: Orientation) -> (f32, f32) {
    match orientation {
        Orientation::Horizontal => (screen_x, screen_y),
        Orientation::Vertical => (screen_y, screen_x),
    }
}
