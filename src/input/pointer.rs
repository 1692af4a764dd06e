// Mouse tracking: turns crossterm mouse events into per-player pointer targets

use std::time::{Duration, Instant};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::controls::PointerTargets;
use crate::game::Player;
use crate::ui::layout::{screen_to_court, Orientation};

/// Latest pointer target per player, throttled
///
/// The half of the court the pointer is over picks the player it steers.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    throttle: Duration,
    last_update: [Option<Instant>; 2],
    targets: PointerTargets,
}

impl PointerTracker {
    pub fn new(throttle: Duration) -> Self {
        Self {
            throttle,
            last_update: [None; 2],
            targets: PointerTargets::default(),
        }
    }

    /// Record a mouse event over the court drawn in `court` (terminal cells)
    ///
    /// Returns the player whose target changed, if any.
    pub fn handle(
        &mut self,
        event: &MouseEvent,
        court: Rect,
        orientation: Orientation,
        now: Instant,
    ) -> Option<Player> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left)
            | MouseEventKind::Drag(MouseButton::Left)
            | MouseEventKind::Moved => {}
            _ => return None,
        }

        let (court_x, court_y) = cell_to_court(event.column, event.row, court, orientation)?;
        let player = if court_x < 0.5 { Player::P1 } else { Player::P2 };

        let slot = &mut self.last_update[player.index()];
        if let Some(last) = *slot {
            if now.saturating_duration_since(last) < self.throttle {
                return None;
            }
        }
        *slot = Some(now);
        self.targets.set(player, court_y);
        Some(player)
    }

    pub fn targets(&self) -> PointerTargets {
        self.targets
    }

    pub fn clear(&mut self) {
        self.targets = PointerTargets::default();
        self.last_update = [None; 2];
    }
}

/// Court coordinates under a terminal cell, or None outside the court
fn cell_to_court(column: u16, row: u16, court: Rect, orientation: Orientation) -> Option<(f32, f32)> {
    if court.width == 0 || court.height == 0 {
        return None;
    }
    if column < court.x
        || column >= court.x + court.width
        || row < court.y
        || row >= court.y + court.height
    {
        return None;
    }

    let screen_x = (column - court.x) as f32 + 0.5;
    let screen_y = (row - court.y) as f32 + 0.5;
    Some(screen_to_court(
        screen_x / court.width as f32,
        screen_y / court.height as f32,
        orientation,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    const COURT: Rect = Rect {
        x: 0,
        y: 5,
        width: 100,
        height: 20,
    };

    #[test]
    fn test_left_half_steers_p1() {
        let mut tracker = PointerTracker::new(Duration::from_millis(100));
        let now = Instant::now();
        let event = mouse(MouseEventKind::Moved, 10, 9);

        assert_eq!(
            tracker.handle(&event, COURT, Orientation::Horizontal, now),
            Some(Player::P1)
        );
        let target = tracker.targets().get(Player::P1).unwrap();
        assert!((target - 4.5 / 20.0).abs() < 1e-6);
        assert_eq!(tracker.targets().get(Player::P2), None);
    }

    #[test]
    fn test_vertical_uses_rows_for_player() {
        let mut tracker = PointerTracker::new(Duration::ZERO);
        let now = Instant::now();
        // Bottom half of a vertical court belongs to P2
        let event = mouse(MouseEventKind::Drag(MouseButton::Left), 25, 22);

        assert_eq!(
            tracker.handle(&event, COURT, Orientation::Vertical, now),
            Some(Player::P2)
        );
        let target = tracker.targets().get(Player::P2).unwrap();
        assert!((target - 25.5 / 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_updates_are_throttled() {
        let mut tracker = PointerTracker::new(Duration::from_millis(100));
        let start = Instant::now();
        tracker.handle(&mouse(MouseEventKind::Moved, 10, 6), COURT, Orientation::Horizontal, start);
        let first = tracker.targets().get(Player::P1);

        let skipped = tracker.handle(
            &mouse(MouseEventKind::Moved, 10, 20),
            COURT,
            Orientation::Horizontal,
            start + Duration::from_millis(40),
        );
        assert_eq!(skipped, None);
        assert_eq!(tracker.targets().get(Player::P1), first);

        tracker.handle(
            &mouse(MouseEventKind::Moved, 10, 20),
            COURT,
            Orientation::Horizontal,
            start + Duration::from_millis(120),
        );
        assert_ne!(tracker.targets().get(Player::P1), first);
    }

    #[test]
    fn test_outside_court_ignored() {
        let mut tracker = PointerTracker::new(Duration::ZERO);
        let now = Instant::now();
        let above = mouse(MouseEventKind::Moved, 10, 2);
        assert_eq!(tracker.handle(&above, COURT, Orientation::Horizontal, now), None);

        let scroll = mouse(MouseEventKind::ScrollDown, 10, 10);
        assert_eq!(tracker.handle(&scroll, COURT, Orientation::Horizontal, now), None);
        assert_eq!(tracker.targets(), PointerTargets::default());
    }
}
