use crate::io::Sample;
use crate::math::magnitude;
use core::fmt;
use num_complex::Complex;

pub mod dft;
mod imp;

/// Input rejected by the transform.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LengthError {
    /// Radix-2 only splits power-of-two lengths (this includes zero)
    NotPowerOfTwo(usize),
    /// Output slice length differs from the input
    Mismatch { input: usize, output: usize },
}

impl fmt::Display for LengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthError::NotPowerOfTwo(len) => write!(f, "length {} is not a power of two", len),
            LengthError::Mismatch { input, output } => write!(
                f,
                "output length {} does not match input length {}",
                output, input
            ),
        }
    }
}

/// Run a radix-2 decimation-in-time FFT, returning a new sequence.
///
/// Results are ordered by bin:
/// - index 0 to N/2: positive frequencies, with DC at 0 and Nyquist frequency at N/2
/// - index N/2 to N: negative frequencies (mirror images for real input)
pub fn transform<const N: usize>(
    x: &[Complex<f64>; N],
) -> Result<[Complex<f64>; N], LengthError> {
    let mut out = [Complex::new(0.0, 0.0); N];
    transform_into(x, &mut out)?;
    Ok(out)
}

/// Slice form of [`transform`], writing the bins into `out`.
pub fn transform_into(x: &[Complex<f64>], out: &mut [Complex<f64>]) -> Result<(), LengthError> {
    if !x.len().is_power_of_two() {
        return Err(LengthError::NotPowerOfTwo(x.len()));
    }
    if out.len() != x.len() {
        return Err(LengthError::Mismatch {
            input: x.len(),
            output: out.len(),
        });
    }
    imp::radix2(x, 1, out);
    Ok(())
}

/// Modulus of each bin.
pub fn magnitudes<const N: usize>(bins: &[Complex<f64>; N]) -> [f64; N] {
    let mut out = [0.0; N];
    for (m, bin) in out.iter_mut().zip(bins) {
        *m = magnitude(*bin);
    }
    out
}

/// Lift real samples onto the real axis.
pub fn complex_from_samples<const N: usize>(samples: &[Sample; N]) -> [Complex<f64>; N] {
    let mut out = [Complex::new(0.0, 0.0); N];
    for (c, &s) in out.iter_mut().zip(samples) {
        *c = Complex::new(f64::from(s), 0.0);
    }
    out
}
