use super::prototype::design_lowpass;
use crate::config::UpsampleConfig;
use crate::constants::DEFAULT_INTERPOLATION_FACTOR;
use crate::error::{Result, UpsampleError, try_zeroed};

/// Polyphase decomposition of a lowpass prototype
///
/// Phase `p` holds every `phases`-th prototype coefficient starting at `p`,
/// stored in reverse so that `phase(p)[taps_per_phase - 1 - tap]` is
/// `prototype[tap * phases + p]`. The reversed order lets the interpolator
/// pair coefficient `k` with input sample `i - taps_per_phase + 1 + k`.
/// Slots with no prototype coefficient (when the prototype length is not a
/// multiple of the phase count) are zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyphaseFilterBank {
    coefficients: Vec<f32>,
    phases: usize,
    taps_per_phase: usize,
}

impl PolyphaseFilterBank {
    /// Decompose `prototype` into `phases` sub-filters
    ///
    /// # Errors
    /// Returns `UpsampleError::FilterDesign` if `phases` is zero or the
    /// prototype is empty
    pub fn from_prototype(prototype: &[f32], phases: usize) -> Result<Self> {
        if phases == 0 {
            return Err(UpsampleError::FilterDesign(
                "Filter bank needs at least one phase".to_string(),
            ));
        }
        if prototype.is_empty() {
            return Err(UpsampleError::FilterDesign(
                "Cannot decompose an empty prototype".to_string(),
            ));
        }

        let num_taps = prototype.len();
        let taps_per_phase = num_taps.div_ceil(phases);
        let mut coefficients = try_zeroed("filter bank", taps_per_phase * phases)?;

        for phase in 0..phases {
            let sub = &mut coefficients[phase * taps_per_phase..(phase + 1) * taps_per_phase];
            for (tap, &coeff) in prototype.iter().skip(phase).step_by(phases).enumerate() {
                sub[taps_per_phase - 1 - tap] = coeff;
            }
        }

        log::debug!(
            "Built {}-phase filter bank from {} taps ({} per phase)",
            phases,
            num_taps,
            taps_per_phase
        );

        Ok(Self {
            coefficients,
            phases,
            taps_per_phase,
        })
    }

    /// Design the prototype and decompose it according to `config`
    pub fn from_config(config: &UpsampleConfig) -> Result<Self> {
        config.validate()?;
        let prototype = design_lowpass(config.num_taps(), config.cutoff())?;
        Self::from_prototype(&prototype, config.interpolation_factor)
    }

    /// Number of phases (the interpolation factor)
    pub fn phases(&self) -> usize {
        self.phases
    }

    pub fn taps_per_phase(&self) -> usize {
        self.taps_per_phase
    }

    /// Coefficients of one phase, in reversed (history-walk) order
    ///
    /// # Panics
    /// Panics if `phase >= self.phases()`
    pub fn phase(&self, phase: usize) -> &[f32] {
        let start = phase * self.taps_per_phase;
        &self.coefficients[start..start + self.taps_per_phase]
    }

    /// All coefficients, phase-major
    pub fn coefficients(&self) -> &[f32] {
        &self.coefficients
    }

    /// Sum of each phase's coefficients (DC gain per output phase)
    pub fn phase_gains(&self) -> Vec<f64> {
        (0..self.phases)
            .map(|p| self.phase(p).iter().map(|&c| c as f64).sum())
            .collect()
    }
}

/// Decompose a prototype of `num_taps` coefficients into a 4-phase bank
///
/// # Errors
/// Returns `UpsampleError::LengthMismatch` if `num_taps` differs from the
/// prototype length
pub fn build_filter_bank(prototype: &[f32], num_taps: usize) -> Result<PolyphaseFilterBank> {
    if prototype.len() != num_taps {
        return Err(UpsampleError::LengthMismatch {
            expected: num_taps,
            actual: prototype.len(),
        });
    }
    PolyphaseFilterBank::from_prototype(prototype, DEFAULT_INTERPOLATION_FACTOR)
}
