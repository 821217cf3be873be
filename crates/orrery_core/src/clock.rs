//! Simulation clock
//!
//! Converts real frame time into simulated seconds. The real delta is capped
//! before scaling so that a stalled frame (window drag, breakpoint) does not
//! make every body jump.

/// Longest real frame step that is passed through unchanged
pub const MAX_FRAME_STEP: f32 = 0.25;
pub const MIN_TIME_SCALE: f32 = 1.0 / 64.0;
pub const MAX_TIME_SCALE: f32 = 1024.0;

#[derive(Clone, Debug)]
pub struct SimulationClock {
    elapsed: f64,
    time_scale: f32,
    paused: bool,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl SimulationClock {
    /// Create a running clock at t = 0
    pub fn new(time_scale: f32) -> Self {
        Self {
            elapsed: 0.0,
            time_scale: time_scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE),
            paused: false,
        }
    }

    /// Start at a given simulated time
    pub fn starting_at(mut self, elapsed: f64) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// Advance by a real frame delta, returning the simulated step taken
    pub fn advance(&mut self, real_dt: f32) -> f64 {
        if self.paused || !real_dt.is_finite() || real_dt <= 0.0 {
            return 0.0;
        }
        let step = real_dt.min(MAX_FRAME_STEP) as f64 * self.time_scale as f64;
        self.elapsed += step;
        step
    }

    /// Simulated seconds since start
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE);
    }

    /// Double the time scale
    pub fn speed_up(&mut self) {
        self.set_time_scale(self.time_scale * 2.0);
    }

    /// Halve the time scale
    pub fn slow_down(&mut self) {
        self.set_time_scale(self.time_scale * 0.5);
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Toggle pause, returning the new state
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_scales() {
        let mut clock = SimulationClock::new(2.0);
        let step = clock.advance(0.1);
        assert!((step - 0.2).abs() < 1e-6);
        assert!((clock.elapsed() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_advance_caps_long_frames() {
        let mut clock = SimulationClock::new(1.0);
        clock.advance(5.0);
        assert!((clock.elapsed() - MAX_FRAME_STEP as f64).abs() < 1e-9);
    }

    #[test]
    fn test_paused_clock_does_not_advance() {
        let mut clock = SimulationClock::default();
        assert!(clock.toggle_pause());
        assert_eq!(clock.advance(0.1), 0.0);
        assert_eq!(clock.elapsed(), 0.0);
        assert!(!clock.toggle_pause());
        assert!(clock.advance(0.1) > 0.0);
    }

    #[test]
    fn test_rejects_bad_deltas() {
        let mut clock = SimulationClock::default();
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.advance(f32::NAN), 0.0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_time_scale_clamped() {
        let mut clock = SimulationClock::new(1.0);
        clock.set_time_scale(1e9);
        assert_eq!(clock.time_scale(), MAX_TIME_SCALE);
        clock.speed_up();
        assert_eq!(clock.time_scale(), MAX_TIME_SCALE);
        clock.set_time_scale(0.0);
        assert_eq!(clock.time_scale(), MIN_TIME_SCALE);
        clock.slow_down();
        assert_eq!(clock.time_scale(), MIN_TIME_SCALE);
    }

    #[test]
    fn test_speed_up_and_slow_down() {
        let mut clock = SimulationClock::new(1.0);
        clock.speed_up();
        assert_eq!(clock.time_scale(), 2.0);
        clock.slow_down();
        clock.slow_down();
        assert_eq!(clock.time_scale(), 0.5);
    }

    #[test]
    fn test_starting_at_and_reset() {
        let mut clock = SimulationClock::default().starting_at(100.0);
        assert_eq!(clock.elapsed(), 100.0);
        clock.reset();
        assert_eq!(clock.elapsed(), 0.0);
    }
}
