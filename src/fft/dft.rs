//! Direct O(N²) DFT.
//!
//! Used as the reference the FFT is checked against. It accepts any length.

use crate::math::twiddle;
use num_complex::Complex;

/// `X[k] = Σ x[n]·W(k, n, N)` for every bin.
pub fn direct<const N: usize>(x: &[Complex<f64>; N]) -> [Complex<f64>; N] {
    let mut out = [Complex::new(0.0, 0.0); N];
    for (k, bin) in out.iter_mut().enumerate() {
        *bin = x
            .iter()
            .enumerate()
            .map(|(n, &v)| v * twiddle(k, n, N))
            .sum();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::magnitude;

    #[test]
    fn impulse_is_flat() {
        let mut x = [Complex::new(0.0, 0.0); 5];
        x[0] = Complex::new(2.0, 0.0);
        for bin in direct(&x) {
            assert!(magnitude(bin - Complex::new(2.0, 0.0)) < 1e-12);
        }
    }

    #[test]
    fn shifted_impulse_rotates() {
        // x[1] = 1 -> X[k] = W(k, 1, N)
        let mut x = [Complex::new(0.0, 0.0); 4];
        x[1] = Complex::new(1.0, 0.0);
        let bins = direct(&x);
        let expected = [
            Complex::new(1.0, 0.0),
            Complex::new(0.0, -1.0),
            Complex::new(-1.0, 0.0),
            Complex::new(0.0, 1.0),
        ];
        for (b, e) in bins.iter().zip(expected) {
            assert!(magnitude(b - e) < 1e-12);
        }
    }
}
