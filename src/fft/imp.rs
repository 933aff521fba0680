use crate::math::twiddle;
use num_complex::Complex;

/// Recursive radix-2 decimation in time.
///
/// Transforms the subsequence `x[0], x[stride], x[2 * stride], ...` of length `out.len()`
/// into `out`. `out.len()` must be a power of two.
pub(super) fn radix2(x: &[Complex<f64>], stride: usize, out: &mut [Complex<f64>]) {
    let n = out.len();
    if n <= 1 {
        if let (Some(o), Some(&first)) = (out.first_mut(), x.first()) {
            *o = first;
        }
        return;
    }

    let half = n / 2;
    let (f, g) = out.split_at_mut(half);

    // even-indexed samples into the first half, odd-indexed into the second
    radix2(x, stride * 2, f);
    radix2(&x[stride..], stride * 2, g);

    // butterflies: X[k] = F[k] + W·G[k], X[k + N/2] = F[k] - W·G[k]
    for k in 0..half {
        let even = f[k];
        let odd = twiddle(k, 1, n) * g[k];
        f[k] = even + odd;
        g[k] = even - odd;
    }
}
