//! Fixed-timestep clock for the page's animated parts (the Home marquee).
//!
//! `draw_web()` fires at the browser's frame rate with uneven gaps. The clock
//! turns wall-clock milliseconds into a whole number of ticks so animation
//! speed does not depend on the display refresh rate.

/// Longest gap credited in one frame. A tab that was in the background
/// resumes without fast-forwarding the marquee.
const MAX_FRAME_MS: f64 = 500.0;

pub struct GameTime {
    ms_per_tick: f64,
    accumulator: f64,
    last_timestamp: Option<f64>,
}

impl GameTime {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec as f64,
            accumulator: 0.0,
            last_timestamp: None,
        }
    }

    /// Feed the current timestamp; returns how many ticks elapsed since the
    /// previous call. The first call only primes the clock.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = self
            .last_timestamp
            .map_or(0.0, |prev| (now_ms - prev).clamp(0.0, MAX_FRAME_MS));
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_update_primes_only() {
        let mut gt = GameTime::new(20);
        assert_eq!(gt.update(1234.0), 0);
        assert_eq!(gt.update(1234.0), 0);
    }

    #[test]
    fn whole_ticks_with_remainder_carried() {
        let mut gt = GameTime::new(20); // 50ms per tick
        gt.update(0.0);
        assert_eq!(gt.update(120.0), 2); // 20ms left over
        assert_eq!(gt.update(150.0), 1); // 20 + 30 = 50
        assert_eq!(gt.update(160.0), 0);
    }

    #[test]
    fn backgrounded_tab_is_clamped() {
        let mut gt = GameTime::new(20);
        gt.update(0.0);
        assert_eq!(gt.update(60_000.0), 10);
    }

    #[test]
    fn clock_going_backwards_yields_nothing() {
        let mut gt = GameTime::new(20);
        gt.update(500.0);
        assert_eq!(gt.update(100.0), 0);
    }

    #[test]
    fn sixty_fps_for_a_second() {
        let mut gt = GameTime::new(20);
        gt.update(0.0);
        let total: u32 = (1..=60).map(|i| gt.update(i as f64 * 1000.0 / 60.0)).sum();
        assert!((19..=21).contains(&total), "got {total}");
    }
}
