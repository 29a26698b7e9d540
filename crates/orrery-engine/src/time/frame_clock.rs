use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds, clamped.
    pub dt: f32,

    /// Wall-clock sample for this iteration. Animation gates compare against it.
    pub now: Instant,

    pub frame_index: u64,
}

impl FrameTime {
    /// A snapshot at an explicit instant, for driving the loop from simulated time.
    pub fn at(now: Instant, dt: f32, frame_index: u64) -> Self {
        Self {
            dt,
            now,
            frame_index,
        }
    }
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped so a stall (debugger, minimized window) does not turn into
/// a huge camera step. `now` itself is never clamped.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Clock whose first delta is measured from `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            last: start,
            frame_index: 0,
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
        }
    }

    pub fn with_clamps(mut self, dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        self.dt_min = dt_min;
        self.dt_max = dt_max;
        self
    }

    /// Resets the delta baseline, e.g. after the window regains focus.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now` and returns the snapshot.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime::at(now, dt.as_secs_f32(), self.frame_index);
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
    fn ticks_count_frames_and_measure_delta() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        let first = clock.tick_at(start + Duration::from_millis(16));
        let second = clock.tick_at(start + Duration::from_millis(40));

        assert_eq!(first.frame_index, 0);
        assert_eq!(second.frame_index, 1);
        assert!((first.dt - 0.016).abs() < 1e-6);
        assert!((second.dt - 0.024).abs() < 1e-6);
    }

    #[test]
    fn delta_is_clamped_but_now_is_not() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        let late = start + Duration::from_secs(3);
        let ft = clock.tick_at(late);
        assert!((ft.dt - 0.25).abs() < 1e-6);
        assert_eq!(ft.now, late);

        let same = clock.tick_at(late);
        assert!((same.dt - 0.0001).abs() < 1e-7);
    }
}
