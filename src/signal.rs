use crate::config;
use crate::io::OutputValue;
use core::f64::consts::PI;

/// Rectified cosine generator: `floor(|cos(2π·t / period) · amplitude|)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Signal {
    pub period_secs: f64,
    pub amplitude: f64,
}

impl Default for Signal {
    fn default() -> Self {
        Self {
            period_secs: config::signal::PERIOD_SECS,
            amplitude: config::signal::AMPLITUDE,
        }
    }
}

impl Signal {
    pub fn sample(&self, elapsed_secs: f64) -> OutputValue {
        let y = libm::cos(2.0 * PI * elapsed_secs / self.period_secs) * self.amplitude;
        let y = libm::floor(libm::fabs(y));
        // float-to-int casts saturate, so an oversized amplitude pins to full scale
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let value = y as OutputValue;
        value
    }
}

/// Output value for the configured waveform at `elapsed_secs` since the loop started.
pub fn signal(elapsed_secs: f64) -> OutputValue {
    Signal::default().sample(elapsed_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_full_amplitude() {
        assert_eq!(signal(0.0), 65025);
    }

    #[test]
    fn rectified_at_half_period() {
        // cos(π) = -1, folded back to +amplitude
        assert_eq!(signal(config::signal::PERIOD_SECS / 2.0), 65025);
    }

    #[test]
    fn zero_crossing_at_quarter_period() {
        assert_eq!(signal(config::signal::PERIOD_SECS / 4.0), 0);
    }

    #[test]
    fn floors_towards_zero() {
        let s = Signal {
            period_secs: 6.0,
            amplitude: 10.0,
        };
        // cos(π/3) = 0.5 -> 5.0 (allow for 4.999..)
        assert!(matches!(s.sample(1.0), 4 | 5));
        // cos(2π/3) = -0.5 -> |−5.0|
        assert!(matches!(s.sample(2.0), 4 | 5));
    }

    #[test]
    fn stays_within_amplitude() {
        let s = Signal::default();
        for ms in 0..10_000 {
            let v = s.sample(f64::from(ms) * 1e-3);
            assert!(f64::from(v) <= s.amplitude);
        }
    }

    #[test]
    fn is_periodic() {
        let s = Signal::default();
        for ms in [0u32, 125, 1000, 2500, 3333] {
            let t = f64::from(ms) * 1e-3;
            let a = i32::from(s.sample(t));
            let b = i32::from(s.sample(t + s.period_secs));
            assert!((a - b).abs() <= 1, "{} vs {} at {}s", a, b, t);
        }
    }

    #[test]
    fn oversized_amplitude_saturates() {
        let s = Signal {
            period_secs: 1.0,
            amplitude: 1e9,
        };
        assert_eq!(s.sample(0.0), u16::MAX);
    }
}
