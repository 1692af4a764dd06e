// Frame coalescing between an irregular display clock and the simulation

/// Milliseconds per nominal frame
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// What the caller should do for one clock callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Too soon since the last accepted tick; keep the old baseline
    Skip,
    /// Gap too large (stall, suspend); baseline reset, nothing simulated
    Stalled,
    /// Simulate this many frame-equivalents
    Advance(f32),
}

/// Converts monotonically increasing timestamps into frame-equivalents,
/// dropping ticks that come too soon and refusing to catch up after stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    min_tick_ms: f64,
    stall_ms: f64,
    last: Option<f64>,
}

impl FrameClock {
    pub const DEFAULT_MIN_TICK_MS: f64 = 12.0;
    pub const DEFAULT_STALL_MS: f64 = 32.0;

    pub fn new(min_tick_ms: f64, stall_ms: f64) -> Self {
        Self {
            min_tick_ms,
            stall_ms,
            last: None,
        }
    }

    /// Forget the baseline, e.g. when returning from a menu
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn tick(&mut self, now_ms: f64) -> Tick {
        let last = match self.last {
            Some(last) => last,
            None => {
                self.last = Some(now_ms);
                return Tick::Stalled;
            }
        };

        let elapsed = now_ms - last;
        if elapsed < 0.0 || elapsed > self.stall_ms {
            self.last = Some(now_ms);
            return Tick::Stalled;
        }
        if elapsed <= self.min_tick_ms {
            return Tick::Skip;
        }

        self.last = Some(now_ms);
        Tick::Advance((elapsed / FRAME_MS) as f32)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_TICK_MS, Self::DEFAULT_STALL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_sets_baseline() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(1000.0), Tick::Stalled);
    }

    #[test]
    fn test_normal_tick_converts_to_frames() {
        let mut clock = FrameClock::default();
        clock.tick(0.0);
        match clock.tick(FRAME_MS) {
            Tick::Advance(frames) => assert!((frames - 1.0).abs() < 1e-5),
            other => panic!("expected advance, got {:?}", other),
        }
        match clock.tick(FRAME_MS + 25.0) {
            Tick::Advance(frames) => assert!((frames - 1.5).abs() < 1e-5),
            other => panic!("expected advance, got {:?}", other),
        }
    }

    #[test]
    fn test_early_ticks_are_coalesced() {
        let mut clock = FrameClock::default();
        clock.tick(0.0);
        assert_eq!(clock.tick(5.0), Tick::Skip);
        assert_eq!(clock.tick(10.0), Tick::Skip);
        // Measured from the last accepted tick, not the skipped ones
        match clock.tick(20.0) {
            Tick::Advance(frames) => assert!((frames - 1.2).abs() < 1e-5),
            other => panic!("expected advance, got {:?}", other),
        }
    }

    #[test]
    fn test_stall_advances_nothing_but_moves_baseline() {
        let mut clock = FrameClock::default();
        clock.tick(0.0);
        assert_eq!(clock.tick(5000.0), Tick::Stalled);
        match clock.tick(5016.0) {
            Tick::Advance(frames) => assert!(frames < 1.0),
            other => panic!("expected advance, got {:?}", other),
        }
    }

    #[test]
    fn test_clock_going_backwards_resets_baseline() {
        let mut clock = FrameClock::default();
        clock.tick(100.0);
        assert_eq!(clock.tick(50.0), Tick::Stalled);
        assert!(matches!(clock.tick(70.0), Tick::Advance(_)));
    }
}
