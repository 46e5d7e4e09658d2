//! Frame clock
//!
//! Converts `requestAnimationFrame` timestamps (milliseconds) into
//! simulation deltas (seconds).

use crate::consts::MAX_FRAME_DT;

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `timestamp_ms`, returning `(raw, clamped)` seconds.
    ///
    /// `raw` is the real time since the previous frame (0 on the first frame,
    /// never negative) and feeds wall-clock accrual. `clamped` is capped at
    /// [`MAX_FRAME_DT`] and feeds the simulation. Every call moves the
    /// reference point, so a long pause never shows up as a huge step later.
    pub fn step(&mut self, timestamp_ms: f64) -> (f64, f32) {
        let prev = self.last.unwrap_or(timestamp_ms);
        self.last = Some(timestamp_ms);
        let raw = ((timestamp_ms - prev) / 1000.0).max(0.0);
        (raw, clamp_delta(raw))
    }
}

fn clamp_delta(raw_seconds: f64) -> f32 {
    (raw_seconds as f32).min(MAX_FRAME_DT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.step(1234.0), (0.0, 0.0));
    }

    #[test]
    fn test_normal_frame() {
        let mut clock = FrameClock::new();
        clock.step(1000.0);
        let (raw, dt) = clock.step(1016.0);
        assert!((raw - 0.016).abs() < 1e-9);
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_tab_resume_is_clamped() {
        let mut clock = FrameClock::new();
        clock.step(1000.0);
        let (raw, dt) = clock.step(61_000.0);
        assert_eq!(raw, 60.0);
        assert_eq!(dt, MAX_FRAME_DT);
    }

    #[test]
    fn test_backwards_time_is_zero() {
        let mut clock = FrameClock::new();
        clock.step(1000.0);
        assert_eq!(clock.step(900.0), (0.0, 0.0));
    }

    #[test]
    fn test_pause_is_not_replayed() {
        let mut clock = FrameClock::new();
        clock.step(0.0);
        clock.step(2500.0);
        let (raw, _) = clock.step(2516.0);
        assert!((raw - 0.016).abs() < 1e-9);
    }
}
