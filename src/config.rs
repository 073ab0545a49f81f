//! Configuration for the polyphase upsampler.
//!
//! A single interpolation factor drives both the number of phases in the
//! filter bank and, unless overridden, the cutoff of the prototype filter:
//!
//! ```
//! use polyup::config::UpsampleConfig;
//!
//! let config = UpsampleConfig::default();
//! assert_eq!(config.num_taps(), 256);
//! assert_eq!(config.cutoff(), 0.125);
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::constants::{DEFAULT_INTERPOLATION_FACTOR, DEFAULT_TAPS_PER_PHASE, MIN_TAPS};
use crate::error::{Result, UpsampleError};

/// Integer upsampling ratio
///
/// # Parsing formats
/// - `4` - plain integer
/// - `4x` or `x4` - with a multiplier sign
///
/// # Example
/// ```
/// use polyup::config::InterpolationFactor;
///
/// let factor: InterpolationFactor = "4x".parse().unwrap();
/// assert_eq!(factor.get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpolationFactor(usize);

impl InterpolationFactor {
    pub fn new(factor: usize) -> Option<Self> {
        (factor > 0).then_some(Self(factor))
    }

    pub fn get(&self) -> usize {
        self.0
    }

    /// Normalized cutoff matched to this factor (half the input Nyquist band
    /// expressed at the output rate).
    pub fn matched_cutoff(&self) -> f64 {
        1.0 / (2.0 * self.0 as f64)
    }
}

impl Default for InterpolationFactor {
    fn default() -> Self {
        Self(DEFAULT_INTERPOLATION_FACTOR)
    }
}

impl fmt::Display for InterpolationFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

impl FromStr for InterpolationFactor {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let num = s
            .strip_suffix('x')
            .or_else(|| s.strip_suffix('X'))
            .or_else(|| s.strip_prefix('x'))
            .or_else(|| s.strip_prefix('X'))
            .unwrap_or(s);

        let factor: usize = num
            .trim()
            .parse()
            .map_err(|_| format!("invalid interpolation factor: {}", s))?;
        Self::new(factor).ok_or_else(|| "interpolation factor must be positive".to_string())
    }
}

/// Filter bank configuration
///
/// Missing keys in a TOML file take the defaults below.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UpsampleConfig {
    /// Output rate divided by input rate; also the number of polyphase phases
    pub interpolation_factor: usize,
    /// Coefficients per phase sub-filter
    pub taps_per_phase: usize,
    /// Normalized prototype cutoff (cycles/sample at the output rate).
    /// Derived from the interpolation factor when unset.
    pub cutoff: Option<f64>,
}

impl Default for UpsampleConfig {
    fn default() -> Self {
        Self {
            interpolation_factor: DEFAULT_INTERPOLATION_FACTOR,
            taps_per_phase: DEFAULT_TAPS_PER_PHASE,
            cutoff: None,
        }
    }
}

impl UpsampleConfig {
    pub fn with_factor(factor: InterpolationFactor) -> Self {
        Self {
            interpolation_factor: factor.get(),
            ..Self::default()
        }
    }

    /// Load a configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| UpsampleError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| UpsampleError::Config(e.to_string()))
    }

    /// Prototype filter length, or `None` if it does not fit in `usize`
    pub fn checked_num_taps(&self) -> Option<usize> {
        self.taps_per_phase.checked_mul(self.interpolation_factor)
    }

    /// Prototype filter length (saturates; `validate` rejects overflow)
    pub fn num_taps(&self) -> usize {
        self.taps_per_phase.saturating_mul(self.interpolation_factor)
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff.unwrap_or_else(|| {
            InterpolationFactor(self.interpolation_factor.max(1)).matched_cutoff()
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.interpolation_factor == 0 {
            return Err(UpsampleError::Config(
                "interpolation factor must be positive".to_string(),
            ));
        }
        let num_taps = self.checked_num_taps().ok_or_else(|| {
            UpsampleError::Config(format!(
                "filter length overflows: {} taps per phase x {}",
                self.taps_per_phase, self.interpolation_factor
            ))
        })?;
        if num_taps < MIN_TAPS {
            return Err(UpsampleError::Config(format!(
                "filter needs at least {} taps, got {}",
                MIN_TAPS, num_taps
            )));
        }
        let cutoff = self.cutoff();
        if !(cutoff > 0.0 && cutoff <= 0.5) {
            return Err(UpsampleError::Config(format!(
                "cutoff must be in (0, 0.5], got {}",
                cutoff
            )));
        }
        Ok(())
    }
}
