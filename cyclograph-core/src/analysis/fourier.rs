use std::collections::BTreeMap;
use std::f64::consts::TAU;

use rayon::prelude::*;

use crate::foundation::core::Complex;

/// Compute the complex discrete Fourier series coefficients of `points`.
///
/// `points` are `N` samples taken at uniform parameter spacing over exactly one
/// period of a closed path. For a harmonic count `H` the returned map covers
/// the symmetric index range `[-H/2, H/2]` (integer division), so it always
/// holds `2*(H/2) + 1` entries. For even `H` this truncation is intentionally
/// asymmetric relative to a naive `H + 1` count; the rendered geometry depends
/// on it.
///
/// Direct summation, `O(N * H)`:
///
/// - `c_0 = (1/N) * sum(x_j)`
/// - `a_i = (2/N) * sum(x_j * cos(2*pi*i*j/N))`
/// - `b_i = (2/N) * sum(x_j * sin(2*pi*i*j/N))`
/// - `c_i = (a_i + i*b_i) / 2`
///
/// The per-index sums are independent, so they run on the rayon pool. The
/// `BTreeMap` collection keeps the result ordering deterministic regardless.
///
/// Caller contract: `points` must be non-empty (the mean divides by `N`).
#[tracing::instrument(skip(points), fields(samples = points.len()))]
pub fn fourier_series(points: &[Complex], harmonics: u32) -> BTreeMap<i32, Complex> {
    debug_assert!(!points.is_empty(), "fourier_series needs at least one sample");

    let n = points.len() as f64;
    let end = (harmonics / 2) as i32;

    let mean = points
        .iter()
        .fold(Complex::ZERO, |acc, &p| acc + p)
        .scale(1.0 / n);

    (-end..=end)
        .into_par_iter()
        .map(|i| {
            if i == 0 {
                return (0, mean);
            }

            let mut a = Complex::ZERO;
            let mut b = Complex::ZERO;
            for (j, &x) in points.iter().enumerate() {
                let theta = TAU / n * f64::from(i) * j as f64;
                a += x.scale(2.0 / n * theta.cos());
                b += x.scale(2.0 / n * theta.sin());
            }
            (i, (a + b.mul_i()).scale(0.5))
        })
        .collect()
}

/// Evaluate the synthesis sum `sum(c_i * e^(-2*pi*i*i*j/period))` at sample `j`.
///
/// The exponent sign is the synthesis direction matching the sine/cosine
/// convention of [`fourier_series`] (which books an `e^(+i*theta)` signal
/// under index `-1`). With `harmonics >= period` this reconstructs the
/// original sample up to floating error; the property tests rely on it.
pub fn reconstruct(coeffs: &BTreeMap<i32, Complex>, j: usize, period: usize) -> Complex {
    coeffs.iter().fold(Complex::ZERO, |acc, (&i, &c)| {
        let angle = -(TAU * f64::from(i) * j as f64 / period as f64);
        acc + c.rotate(angle)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/fourier.rs"]
mod tests;
