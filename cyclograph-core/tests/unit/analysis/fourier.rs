use super::*;

/// Unit square sampled at its corners, traversed so the positive fundamental
/// carries the signal (`c_1 != 0`, `c_-1 == 0`).
fn unit_square() -> Vec<Complex> {
    vec![
        Complex::new(0.0, 0.0),
        Complex::new(0.0, 1.0),
        Complex::new(1.0, 1.0),
        Complex::new(1.0, 0.0),
    ]
}

fn circle_samples(n: usize) -> Vec<Complex> {
    (0..n)
        .map(|j| Complex::new(1.0, 0.0).rotate(TAU * j as f64 / n as f64))
        .collect()
}

#[test]
fn dc_term_is_sample_mean() {
    let points = unit_square();
    let coeffs = fourier_series(&points, 6);
    let c0 = coeffs[&0];
    assert!((c0.re - 0.5).abs() < 1e-12);
    assert!((c0.im - 0.5).abs() < 1e-12);
}

#[test]
fn map_size_follows_half_harmonic_formula() {
    let points = unit_square();
    for h in 0..=7u32 {
        let coeffs = fourier_series(&points, h);
        assert_eq!(coeffs.len(), 2 * (h as usize / 2) + 1, "H = {h}");
    }
}

#[test]
fn index_range_is_symmetric() {
    let points = unit_square();
    let coeffs = fourier_series(&points, 5);
    let keys: Vec<i32> = coeffs.keys().copied().collect();
    assert_eq!(keys, vec![-2, -1, 0, 1, 2]);
}

#[test]
fn square_fundamental_lands_on_positive_index() {
    let coeffs = fourier_series(&unit_square(), 2);
    assert!((coeffs[&1].abs() - 0.5_f64.sqrt()).abs() < 1e-12);
    assert!(coeffs[&-1].abs() < 1e-12);
}

#[test]
fn pure_rotation_lands_on_negative_one() {
    // x_j = e^(i*theta_j) books under index -1 in this sign convention.
    let coeffs = fourier_series(&circle_samples(8), 4);
    assert!((coeffs[&-1].abs() - 1.0).abs() < 1e-9);
    for (&i, c) in &coeffs {
        if i != -1 {
            assert!(c.abs() < 1e-9, "index {i} should be empty");
        }
    }
}

#[test]
fn reconstruction_is_complete_for_full_range() {
    for points in [unit_square(), circle_samples(6)] {
        let n = points.len();
        let coeffs = fourier_series(&points, n as u32);
        for (j, &expected) in points.iter().enumerate() {
            let got = reconstruct(&coeffs, j, n);
            assert!(
                (got - expected).abs() < 1e-9,
                "sample {j}: got {got:?}, expected {expected:?}"
            );
        }
    }
}

#[test]
fn single_sample_collapses_to_dc() {
    let points = vec![Complex::new(3.0, -2.0)];
    let coeffs = fourier_series(&points, 0);
    assert_eq!(coeffs.len(), 1);
    assert!((coeffs[&0].re - 3.0).abs() < 1e-12);
    assert!((coeffs[&0].im + 2.0).abs() < 1e-12);
}
