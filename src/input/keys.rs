// Keyboard tracking: turns crossterm key events into the set of held key ids

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::controls::ActiveKeys;

/// Identifier for a key code, in the same vocabulary key bindings use
///
/// Characters map to themselves, arrows to "ArrowUp" and friends.
pub fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(c) => return Some(c.to_string()),
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Esc => "Escape",
        KeyCode::Enter => "Enter",
        KeyCode::Tab => "Tab",
        KeyCode::Backspace => "Backspace",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::Insert => "Insert",
        KeyCode::Delete => "Delete",
        _ => return None,
    };
    Some(name.to_string())
}

/// Tracks which keys are held
///
/// Terminals that report release events clear keys exactly. Others only
/// repeat presses, so a key with no press for `hold` is treated as released.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    held: HashMap<String, Instant>,
    hold: Option<Duration>,
}

impl KeyTracker {
    /// `hold` of None trusts release events alone
    pub fn new(hold: Option<Duration>) -> Self {
        Self {
            held: HashMap::new(),
            hold,
        }
    }

    /// Record a key event, returning the key id if it was a fresh press
    pub fn handle(&mut self, event: &KeyEvent, now: Instant) -> Option<String> {
        let name = key_name(event.code)?;
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let fresh = self.held.insert(name.clone(), now).is_none();
                fresh.then_some(name)
            }
            KeyEventKind::Release => {
                self.held.remove(&name);
                None
            }
        }
    }

    /// Keys held as of `now`, dropping any that timed out
    pub fn active_keys(&mut self, now: Instant) -> ActiveKeys {
        if let Some(hold) = self.hold {
            self.held
                .retain(|_, pressed| now.saturating_duration_since(*pressed) <= hold);
        }
        self.held.keys().map(String::as_str).collect()
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn event(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_key_names() {
        assert_eq!(key_name(KeyCode::Char('w')).as_deref(), Some("w"));
        assert_eq!(key_name(KeyCode::Char(' ')).as_deref(), Some(" "));
        assert_eq!(key_name(KeyCode::Up).as_deref(), Some("ArrowUp"));
        assert_eq!(key_name(KeyCode::Esc).as_deref(), Some("Escape"));
        assert_eq!(key_name(KeyCode::F(5)), None);
    }

    #[test]
    fn test_release_events_clear_keys() {
        let mut tracker = KeyTracker::new(None);
        let now = Instant::now();

        let fresh = tracker.handle(&event(KeyCode::Up, KeyEventKind::Press), now);
        assert_eq!(fresh.as_deref(), Some("ArrowUp"));
        assert!(tracker.active_keys(now).contains("ArrowUp"));

        // Repeats keep the key held without reporting a fresh press
        let again = tracker.handle(&event(KeyCode::Up, KeyEventKind::Repeat), now);
        assert_eq!(again, None);

        tracker.handle(&event(KeyCode::Up, KeyEventKind::Release), now);
        assert!(tracker.active_keys(now).is_empty());
    }

    #[test]
    fn test_hold_timeout_releases_keys() {
        let mut tracker = KeyTracker::new(Some(Duration::from_millis(100)));
        let start = Instant::now();
        tracker.handle(&event(KeyCode::Char('s'), KeyEventKind::Press), start);

        assert!(tracker
            .active_keys(start + Duration::from_millis(50))
            .contains("s"));
        assert!(tracker
            .active_keys(start + Duration::from_millis(150))
            .is_empty());
    }

    #[test]
    fn test_unnamed_keys_ignored() {
        let mut tracker = KeyTracker::new(None);
        let now = Instant::now();
        assert_eq!(
            tracker.handle(&event(KeyCode::F(1), KeyEventKind::Press), now),
            None
        );
        assert!(tracker.active_keys(now).is_empty());
    }
}
