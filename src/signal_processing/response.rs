use num_complex::Complex;
use std::f64::consts::PI;

/// Frequency response of an FIR filter at normalized frequency `freq`
/// (cycles/sample)
pub fn frequency_response(coeffs: &[f32], freq: f64) -> Complex<f64> {
    coeffs
        .iter()
        .enumerate()
        .map(|(n, &c)| Complex::from_polar(c as f64, -2.0 * PI * freq * n as f64))
        .sum()
}

/// Magnitude response in dB relative to `reference`
pub fn magnitude_db(coeffs: &[f32], freq: f64, reference: f64) -> f64 {
    20.0 * (frequency_response(coeffs, freq).norm() / reference).log10()
}

/// Worst (highest) magnitude in dB over `[start, end]`, sampled at `points` frequencies
pub fn peak_magnitude_db(coeffs: &[f32], start: f64, end: f64, points: usize, reference: f64) -> f64 {
    let points = points.max(2);
    (0..points)
        .map(|k| start + (end - start) * k as f64 / (points - 1) as f64)
        .map(|f| magnitude_db(coeffs, f, reference))
        .fold(f64::NEG_INFINITY, f64::max)
}
