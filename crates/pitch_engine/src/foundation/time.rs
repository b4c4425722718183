//! Time management utilities

/// Frame timer driven by an external clock
///
/// The windowing layer owns the clock (seconds since initialisation); the
/// timer only turns successive samples into per-frame deltas so that all
/// motion scales with measured rather than fixed time.
#[derive(Debug, Clone, Default)]
pub struct Timer {
    last_frame: f64,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Timer {
    /// Create a new timer whose previous frame is at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the frame sampled at `now` and return the delta in seconds
    pub fn tick(&mut self, now: f64) -> f32 {
        self.delta_time = (now - self.last_frame) as f32;
        self.last_frame = now;
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_measures_delta_from_previous_sample() {
        let mut timer = Timer::new();
        assert!((timer.tick(0.5) - 0.5).abs() < 1e-6);
        assert!((timer.tick(0.75) - 0.25).abs() < 1e-6);
        assert_eq!(timer.frame_count(), 2);
        assert!((timer.total_time() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_average_fps_is_zero_before_time_passes() {
        let timer = Timer::new();
        assert_eq!(timer.average_fps(), 0.0);
    }
}
