//! Utilities for complex arithmetic.

use core::f64::consts::PI;
use num_complex::Complex;

/// Twiddle factor `W(k, n, m) = exp(-i·2π·n·k / m)`.
///
/// `m` must be non-zero; the FFT only ever passes power-of-two lengths.
pub fn twiddle(k: usize, n: usize, m: usize) -> Complex<f64> {
    debug_assert!(m != 0);
    #[allow(clippy::cast_precision_loss)]
    let angle = -2.0 * PI * (n as f64) * (k as f64) / (m as f64);
    Complex::new(libm::cos(angle), libm::sin(angle))
}

/// Modulus of a complex number.
pub fn magnitude(x: Complex<f64>) -> f64 {
    libm::hypot(x.re, x.im)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn close(a: Complex<f64>, b: Complex<f64>) -> bool {
        (a.re - b.re).abs() < EPS && (a.im - b.im).abs() < EPS
    }

    #[test]
    fn twiddle_zero_exponent_is_one() {
        assert!(close(twiddle(0, 5, 8), Complex::new(1.0, 0.0)));
        assert!(close(twiddle(3, 0, 8), Complex::new(1.0, 0.0)));
    }

    #[test]
    fn twiddle_quarter_turns() {
        // exp(-i·π/2) = -i
        assert!(close(twiddle(1, 1, 4), Complex::new(0.0, -1.0)));
        // exp(-i·π) = -1
        assert!(close(twiddle(2, 1, 4), Complex::new(-1.0, 0.0)));
        // full turn
        assert!(close(twiddle(4, 1, 4), Complex::new(1.0, 0.0)));
    }

    #[test]
    fn twiddle_is_symmetric_in_k_and_n() {
        assert!(close(twiddle(3, 5, 16), twiddle(5, 3, 16)));
    }

    #[test]
    fn magnitude_of_3_4() {
        assert!((magnitude(Complex::new(3.0, -4.0)) - 5.0).abs() < EPS);
    }
}
