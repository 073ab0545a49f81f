//! Fixed parameters of the upsampler
//!
//! Defaults for the filter bank and the coefficients of the Blackman window.

/// Default ratio between output and input sample rates.
pub const DEFAULT_INTERPOLATION_FACTOR: usize = 4;

/// Default number of coefficients in each polyphase sub-filter.
/// The prototype filter length is this times the interpolation factor.
pub const DEFAULT_TAPS_PER_PHASE: usize = 64;

/// Smallest filter length the window and prototype designers accept.
pub const MIN_TAPS: usize = 2;

/// Blackman window coefficients (a0, a1, a2)
pub const BLACKMAN_A0: f64 = 0.42;
pub const BLACKMAN_A1: f64 = 0.5;
pub const BLACKMAN_A2: f64 = 0.08;

/// Input file used when none is given on the command line.
pub const DEFAULT_INPUT_PATH: &str = "input.wav";

/// Appended to the input file stem to name the output file.
pub const OUTPUT_SUFFIX: &str = "_resampled";
