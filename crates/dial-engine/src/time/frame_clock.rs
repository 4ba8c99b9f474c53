use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Time since the previous tick. Zero for the first frame.
    pub since_last: Duration,

    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// The clock face only needs frame counts and rough pacing for diagnostics,
/// so unlike a simulation clock there is no delta clamping here.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: None,
            frame_index: 0,
        }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock using an externally sampled instant.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let since_last = self
            .last
            .map_or(Duration::ZERO, |prev| now.saturating_duration_since(prev));
        self.last = Some(now);

        let ft = FrameTime {
            now,
            since_last,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_has_zero_delta() {
        let mut clock = FrameClock::new();
        let ft = clock.tick_at(Instant::now());
        assert_eq!(ft.frame_index, 0);
        assert_eq!(ft.since_last, Duration::ZERO);
    }

    #[test]
    fn ticks_count_up_and_measure_delta() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        let ft = clock.tick_at(t0 + Duration::from_millis(16));
        assert_eq!(ft.frame_index, 1);
        assert_eq!(ft.since_last, Duration::from_millis(16));
    }

    #[test]
    fn going_backwards_saturates() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now() + Duration::from_secs(1);
        clock.tick_at(t0);
        let ft = clock.tick_at(t0 - Duration::from_millis(5));
        assert_eq!(ft.since_last, Duration::ZERO);
    }
}
