// Geometry primitives for the normalized unit court

use serde::Serialize;

/// Correction added by `align` so a realigned rect never re-collides due to float error
pub const ALIGN_EPSILON: f32 = 0.000001;

pub fn clamp(min: f32, value: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Axis-aligned rectangle with a velocity, positioned by its center
///
/// `offset` (half the size) and the vertical travel bounds are fixed at
/// construction. Every `move_by` clamps `pos.y` into `[y_min, y_max]`, which is
/// what keeps both paddles and the ball on the court.
#[derive(Debug, Clone, PartialEq)]
pub struct MobileRect {
    pub id: &'static str,
    pub pos: Vec2,
    pub size: Vec2,
    pub offset: Vec2,
    pub y_min: f32,
    pub y_max: f32,
    pub velocity: Vec2,
}

impl MobileRect {
    pub fn new(id: &'static str, center: Vec2, size: Vec2) -> Self {
        let offset = Vec2::new(size.x / 2.0, size.y / 2.0);
        Self {
            id,
            pos: center,
            size,
            offset,
            y_min: offset.y,
            y_max: 1.0 - offset.y,
            velocity: Vec2::ZERO,
        }
    }

    /// Strict AABB overlap test. Rects sharing an edge do not collide.
    pub fn is_colliding(&self, other: &MobileRect) -> bool {
        self.pos.x - self.offset.x < other.pos.x + other.offset.x
            && self.pos.x + self.offset.x > other.pos.x - other.offset.x
            && self.pos.y - self.offset.y < other.pos.y + other.offset.y
            && self.pos.y + self.offset.y > other.pos.y - other.offset.y
    }

    /// Closest coordinate on `axis` that places `self` just outside `fixed`,
    /// on the side `self` currently sits.
    pub fn align(&self, fixed: &MobileRect, axis: Axis) -> f32 {
        let d = fixed.offset.get(axis) + self.offset.get(axis) + ALIGN_EPSILON;
        if fixed.pos.get(axis) > self.pos.get(axis) {
            fixed.pos.get(axis) - d
        } else {
            fixed.pos.get(axis) + d
        }
    }

    pub fn move_by(&mut self, correction: f32) {
        self.pos.x += self.velocity.x * correction;
        self.pos.y += self.velocity.y * correction;
        self.pos.y = clamp(self.y_min, self.pos.y, self.y_max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_at(x: f32, y: f32, w: f32, h: f32) -> MobileRect {
        MobileRect::new("r", Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_offset_and_bounds_derived_from_size() {
        let r = rect_at(0.5, 0.5, 0.2, 0.1);
        assert_eq!(r.offset, Vec2::new(0.1, 0.05));
        assert!((r.y_min - 0.05).abs() < 1e-6);
        assert!((r.y_max - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_overlapping_rects_collide() {
        let a = rect_at(0.5, 0.5, 0.2, 0.2);
        let b = rect_at(0.55, 0.45, 0.2, 0.2);
        assert!(a.is_colliding(&b));
        assert!(b.is_colliding(&a));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        // Values chosen to be exact in binary floating point
        let a = rect_at(0.25, 0.5, 0.25, 0.25);
        let b = rect_at(0.5, 0.5, 0.25, 0.25);
        assert!(!a.is_colliding(&b));

        let c = rect_at(0.5, 0.75, 0.25, 0.25);
        assert!(!b.is_colliding(&c));
    }

    #[test]
    fn test_separated_rects_do_not_collide() {
        let a = rect_at(0.1, 0.1, 0.05, 0.05);
        let b = rect_at(0.9, 0.9, 0.05, 0.05);
        assert!(!a.is_colliding(&b));
    }

    #[test]
    fn test_align_places_rect_on_approach_side() {
        let fixed = rect_at(0.5, 0.5, 0.2, 0.2);

        let left = rect_at(0.45, 0.5, 0.1, 0.1);
        let x = left.align(&fixed, Axis::X);
        assert!((x - (0.5 - 0.15 - ALIGN_EPSILON)).abs() < 1e-7);

        let right = rect_at(0.55, 0.5, 0.1, 0.1);
        let x = right.align(&fixed, Axis::X);
        assert!((x - (0.5 + 0.15 + ALIGN_EPSILON)).abs() < 1e-7);

        let mut moved = right.clone();
        moved.pos.x = x;
        assert!(!moved.is_colliding(&fixed));
    }

    #[test]
    fn test_move_clamps_vertical_position() {
        let mut r = rect_at(0.5, 0.5, 0.1, 0.2);
        r.velocity = Vec2::new(0.0, 1.0);
        r.move_by(2.0);
        assert_eq!(r.pos.y, r.y_max);

        r.velocity = Vec2::new(0.1, -1.0);
        r.move_by(5.0);
        assert_eq!(r.pos.y, r.y_min);
        assert!((r.pos.x - 1.0).abs() < 1e-6);
    }
}
