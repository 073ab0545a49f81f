use std::f64::consts::PI;

use super::window::blackman;
use crate::config::InterpolationFactor;
use crate::constants::MIN_TAPS;
use crate::error::{Result, UpsampleError, try_with_capacity};

/// Windowed-sinc lowpass prototype for the default 4x interpolator
///
/// Cutoff is fixed at 0.125 cycles/sample of the output rate.
pub fn build_prototype(num_taps: usize) -> Result<Vec<f32>> {
    design_lowpass(num_taps, InterpolationFactor::default().matched_cutoff())
}

/// Design a Blackman-windowed sinc lowpass filter
///
/// # Arguments
/// * `num_taps` - Filter length (at least 2)
/// * `cutoff` - Normalized cutoff in cycles/sample, in (0, 0.5]
///
/// The center tap (odd lengths only) is exactly `1.0` before windowing.
/// DC gain is not normalized: it is roughly `1 / (2 * cutoff)`, which is
/// the interpolation factor when the cutoff is matched to it.
///
/// # Errors
/// Returns `UpsampleError::FilterDesign` if the parameters are invalid
pub fn design_lowpass(num_taps: usize, cutoff: f64) -> Result<Vec<f32>> {
    if num_taps < MIN_TAPS {
        return Err(UpsampleError::FilterDesign(format!(
            "Prototype needs at least {} taps, got {}",
            MIN_TAPS, num_taps
        )));
    }
    if !(cutoff > 0.0 && cutoff <= 0.5) {
        return Err(UpsampleError::FilterDesign(format!(
            "Invalid cutoff {}, must be in (0, 0.5]",
            cutoff
        )));
    }

    let window = blackman(num_taps)?;
    let half_order = (num_taps - 1) as f64 / 2.0;

    let mut proto = try_with_capacity("prototype", num_taps)?;
    proto.extend(window.iter().enumerate().map(|(i, &w)| {
        let x = 2.0 * cutoff * (i as f64 - half_order);
        let sinc = if x == 0.0 {
            1.0
        } else {
            (PI * x).sin() / (PI * x)
        };
        (sinc * w) as f32
    }));

    log::debug!(
        "Designed {}-tap lowpass prototype, cutoff {:.4}",
        num_taps,
        cutoff
    );
    Ok(proto)
}
