use std::time::Duration;

/// Eased 0 -> target sweep for the risk gauge. Purely cosmetic; the target
/// itself lives in the report and is never modified here.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeAnimation {
    target: f64,
    delay: Duration,
    duration: Duration,
}

impl GaugeAnimation {
    pub fn new(target: f64, delay: Duration, duration: Duration) -> Self {
        Self { target, delay, duration }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Current value `elapsed` after the result arrived.
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        if elapsed <= self.delay {
            return 0.0;
        }

        let running = elapsed - self.delay;
        if self.duration.is_zero() || running >= self.duration {
            return self.target;
        }

        let t = running.as_secs_f64() / self.duration.as_secs_f64();
        self.target * ease_out_cubic(t)
    }

    /// What the gauge label shows.
    pub fn displayed_at(&self, elapsed: Duration) -> i64 {
        self.value_at(elapsed).round() as i64
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.delay + self.duration
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gauge(target: f64) -> GaugeAnimation {
        GaugeAnimation::new(target, Duration::from_millis(700), Duration::from_millis(2000))
    }

    #[test]
    fn test_starts_at_zero_and_converges() {
        let gauge = gauge(72.0);
        assert_eq!(gauge.displayed_at(Duration::ZERO), 0);
        assert_eq!(gauge.displayed_at(Duration::from_millis(700)), 0);
        assert_eq!(gauge.displayed_at(Duration::from_millis(2700)), 72);
        assert_eq!(gauge.displayed_at(Duration::from_secs(60)), 72);
        assert!(gauge.is_finished(Duration::from_millis(2700)));
        assert!(!gauge.is_finished(Duration::from_millis(2699)));
    }

    #[test]
    fn test_is_monotonic_and_eases_out() {
        let gauge = gauge(72.0);
        let mut previous = 0.0;
        for ms in (0..=2800).step_by(50) {
            let value = gauge.value_at(Duration::from_millis(ms));
            assert!(value >= previous);
            assert!(value <= 72.0);
            previous = value;
        }

        // Ease-out covers more than half the distance in the first half.
        assert!(gauge.value_at(Duration::from_millis(1700)) > 36.0);
    }

    #[test]
    fn test_zero_duration_jumps_to_target() {
        let gauge = GaugeAnimation::new(40.0, Duration::ZERO, Duration::ZERO);
        assert_eq!(gauge.value_at(Duration::from_millis(1)), 40.0);
        assert_eq!(gauge.target(), 40.0);
    }
}
