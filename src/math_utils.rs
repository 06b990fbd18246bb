// src/math_utils.rs
use statrs::distribution::{ContinuousCDF, Normal};
use std::time::Instant;

/// Two-sided standard normal quantile for a confidence level in (0, 1).
///
/// `z_score(0.95) ≈ 1.96`. Returns `None` for levels outside the open interval.
pub fn z_score(confidence: f64) -> Option<f64> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return None;
    }
    let standard = Normal::new(0.0, 1.0).ok()?;
    Some(standard.inverse_cdf(0.5 + confidence / 2.0))
}

/// Wall-clock stopwatch started on construction.
pub struct Timer {
    started: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_score() {
        let z = z_score(0.95).unwrap();
        assert!((z - 1.959964).abs() < 1e-4, "got {}", z);
        assert!(z_score(0.0).is_none());
        assert!(z_score(1.0).is_none());
        assert!(z_score(f64::NAN).is_none());
    }

    #[test]
    fn test_timer_is_monotonic() {
        let timer = Timer::new();
        let first = timer.elapsed_ms();
        let second = timer.elapsed_ms();
        assert!(first >= 0.0 && second >= first);
    }
}
