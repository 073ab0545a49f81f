use std::f64::consts::PI;

use crate::constants::{BLACKMAN_A0, BLACKMAN_A1, BLACKMAN_A2, MIN_TAPS};
use crate::error::{Result, UpsampleError, try_with_capacity};

/// Blackman window of length `num_taps`
///
/// `w[i] = 0.42 - 0.5 cos(2πi/(N-1)) + 0.08 cos(4πi/(N-1))`
///
/// Each value is computed from the mirrored index `min(i, N-1-i)`, so the
/// window is exactly palindromic.
///
/// # Errors
/// Returns `UpsampleError::FilterDesign` if `num_taps < 2`
pub fn blackman(num_taps: usize) -> Result<Vec<f64>> {
    if num_taps < MIN_TAPS {
        return Err(UpsampleError::FilterDesign(format!(
            "Blackman window needs at least {} taps, got {}",
            MIN_TAPS, num_taps
        )));
    }

    let m = (num_taps - 1) as f64;
    let mut window = try_with_capacity("window", num_taps)?;
    window.extend((0..num_taps).map(|i| {
        let k = i.min(num_taps - 1 - i) as f64;
        let frac = k / m;
        BLACKMAN_A0 - BLACKMAN_A1 * (2.0 * PI * frac).cos()
            + BLACKMAN_A2 * (4.0 * PI * frac).cos()
    }));
    Ok(window)
}
