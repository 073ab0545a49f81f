//! Interpolating convolution engine
//!
//! Every input sample produces one output per phase of the filter bank,
//! emitted in phase order. Output `i * phases + p` is the inner product of
//! phase `p` with the `taps_per_phase` most recent inputs ending at `i`.
//! Before the history is full, only the pairs whose sample index is
//! non-negative contribute (the input is treated as zero-padded on the left).

use super::polyphase::PolyphaseFilterBank;
use crate::error::{Result, UpsampleError, try_with_capacity};

/// Which part of the output the engine is producing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// History not yet full; leading coefficients are skipped
    Startup,
    /// Every coefficient pairs with a real input sample
    SteadyState,
}

impl EngineState {
    /// State of the engine while processing input index `index`
    pub fn at(index: usize, taps_per_phase: usize) -> Self {
        if index + 1 >= taps_per_phase {
            EngineState::SteadyState
        } else {
            EngineState::Startup
        }
    }
}

/// Inner product of equal-length coefficient and sample slices
#[inline]
fn dot(coeffs: &[f32], samples: &[f32]) -> f32 {
    debug_assert_eq!(coeffs.len(), samples.len());
    coeffs
        .iter()
        .zip(samples)
        .map(|(&c, &s)| c as f64 * s as f64)
        .sum::<f64>() as f32
}

/// Upsample a whole buffer
///
/// Returns exactly `count * bank.phases()` samples.
///
/// # Errors
/// Returns `UpsampleError::LengthMismatch` if `count != input.len()`, or
/// `UpsampleError::AllocationFailure` if the output buffer cannot be obtained
pub fn interpolate(bank: &PolyphaseFilterBank, input: &[f32], count: usize) -> Result<Vec<f32>> {
    if count != input.len() {
        return Err(UpsampleError::LengthMismatch {
            expected: count,
            actual: input.len(),
        });
    }

    let phases = bank.phases();
    let taps_per_phase = bank.taps_per_phase();
    let out_len = count
        .checked_mul(phases)
        .ok_or(UpsampleError::AllocationFailure {
            what: "output",
            len: usize::MAX,
        })?;
    let mut output = try_with_capacity("output", out_len)?;

    for i in 0..count {
        // Number of leading coefficients with no sample behind them
        let skip = (taps_per_phase - 1).saturating_sub(i);
        let start = i + 1 + skip - taps_per_phase;
        let samples = &input[start..=i];

        for phase in 0..phases {
            output.push(dot(&bank.phase(phase)[skip..], samples));
        }
    }

    debug_assert_eq!(output.len(), out_len);
    Ok(output)
}

/// Lazy upsampler over a sample iterator
///
/// Produces the same values as [`interpolate`], one output at a time.
/// History is kept twice in a buffer of `2 * taps_per_phase` so the most
/// recent window is always one contiguous slice in time order.
pub struct Interpolate<'a, I> {
    bank: &'a PolyphaseFilterBank,
    source: I,
    history: Vec<f32>,
    pos: usize,
    filled: usize,
    next_phase: usize,
}

impl<'a, I> Interpolate<'a, I>
where
    I: Iterator<Item = f32>,
{
    pub fn new(bank: &'a PolyphaseFilterBank, source: I) -> Self {
        let taps_per_phase = bank.taps_per_phase();
        Self {
            bank,
            source,
            history: vec![0.0; 2 * taps_per_phase],
            pos: taps_per_phase - 1,
            filled: 0,
            next_phase: bank.phases(),
        }
    }

    /// State for the most recently consumed input sample
    pub fn state(&self) -> EngineState {
        EngineState::at(self.filled.saturating_sub(1), self.bank.taps_per_phase())
    }

    fn push(&mut self, sample: f32) {
        let n = self.bank.taps_per_phase();
        self.pos += 1;
        if self.pos == n {
            self.pos = 0;
        }
        self.history[self.pos] = sample;
        self.history[self.pos + n] = sample;
        if self.filled < n {
            self.filled += 1;
        }
    }
}

impl<I> Iterator for Interpolate<'_, I>
where
    I: Iterator<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.next_phase == self.bank.phases() {
            let sample = self.source.next()?;
            self.push(sample);
            self.next_phase = 0;
        }

        let n = self.bank.taps_per_phase();
        let skip = n - self.filled;
        let window = &self.history[self.pos + 1..=self.pos + n];
        let out = dot(&self.bank.phase(self.next_phase)[skip..], &window[skip..]);
        self.next_phase += 1;
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let phases = self.bank.phases();
        let pending = phases - self.next_phase;
        let (lo, hi) = self.source.size_hint();
        (
            lo.saturating_mul(phases).saturating_add(pending),
            hi.and_then(|h| h.checked_mul(phases))
                .and_then(|h| h.checked_add(pending)),
        )
    }
}

/// Adapter for upsampling any `f32` iterator
pub trait InterpolateExt: Iterator<Item = f32> + Sized {
    fn upsample(self, bank: &PolyphaseFilterBank) -> Interpolate<'_, Self> {
        Interpolate::new(bank, self)
    }
}

impl<I: Iterator<Item = f32>> InterpolateExt for I {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpsampleConfig;
    use crate::signal_processing::{build_filter_bank, build_prototype};

    fn default_bank() -> PolyphaseFilterBank {
        let proto = build_prototype(256).unwrap();
        build_filter_bank(&proto, 256).unwrap()
    }

    #[test]
    fn test_output_length() {
        let bank = default_bank();
        for count in [0, 1, 3, 63, 64, 65, 500] {
            let input = vec![0.5f32; count];
            let output = interpolate(&bank, &input, count).unwrap();
            assert_eq!(output.len(), count * 4);
        }
    }

    #[test]
    fn test_count_mismatch() {
        let bank = default_bank();
        assert!(matches!(
            interpolate(&bank, &[1.0, 2.0], 3),
            Err(UpsampleError::LengthMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_zero_input() {
        let bank = default_bank();
        let output = interpolate(&bank, &[0.0; 200], 200).unwrap();
        assert_eq!(output.len(), 800);
        assert!(output.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_impulse_recovers_bank() {
        let bank = default_bank();
        let tpp = bank.taps_per_phase();
        let mut input = vec![0.0f32; tpp + 10];
        input[0] = 1.0;

        let output = interpolate(&bank, &input, input.len()).unwrap();

        // Input index i pairs the impulse with coefficient tpp - 1 - i
        for i in 0..tpp {
            for phase in 0..4 {
                assert_eq!(output[i * 4 + phase], bank.phase(phase)[tpp - 1 - i]);
            }
        }
        assert!(output[tpp * 4..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_single_sample_uses_last_tap() {
        let bank = default_bank();
        assert_eq!(bank.taps_per_phase(), 64);

        let output = interpolate(&bank, &[1.0], 1).unwrap();
        assert_eq!(output.len(), 4);
        for phase in 0..4 {
            assert_eq!(output[phase], bank.phase(phase)[63]);
        }
    }

    #[test]
    fn test_dc_settles_to_input_level() {
        let bank = default_bank();
        let input = vec![0.25f32; 400];
        let output = interpolate(&bank, &input, input.len()).unwrap();
        for &y in &output[64 * 4..] {
            assert!((y - 0.25).abs() < 0.0025, "steady-state output {}", y);
        }
    }

    #[test]
    fn test_deterministic() {
        let bank = default_bank();
        let input: Vec<f32> = (0..300).map(|i| ((i * 7919) % 101) as f32 / 50.0 - 1.0).collect();
        let a = interpolate(&bank, &input, input.len()).unwrap();
        let b = interpolate(&bank, &input, input.len()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_engine_state() {
        assert_eq!(EngineState::at(0, 64), EngineState::Startup);
        assert_eq!(EngineState::at(62, 64), EngineState::Startup);
        assert_eq!(EngineState::at(63, 64), EngineState::SteadyState);
        assert_eq!(EngineState::at(0, 1), EngineState::SteadyState);
    }

    #[test]
    fn test_streaming_matches_batch() {
        let bank = default_bank();
        let input: Vec<f32> = (0..257).map(|i| (i as f32 * 0.37).sin()).collect();
        let batch = interpolate(&bank, &input, input.len()).unwrap();
        let streamed: Vec<f32> = input.iter().copied().upsample(&bank).collect();
        assert_eq!(batch, streamed);
    }

    #[test]
    fn test_streaming_state_transition() {
        let bank = default_bank();
        let input = vec![1.0f32; 70];
        let mut iter = input.into_iter().upsample(&bank);
        for i in 0..70 {
            for _ in 0..4 {
                iter.next().unwrap();
            }
            assert_eq!(iter.state(), EngineState::at(i, 64));
        }
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_streaming_size_hint() {
        let bank = default_bank();
        let mut iter = vec![1.0f32; 5].into_iter().upsample(&bank);
        assert_eq!(iter.size_hint(), (20, Some(20)));
        iter.next();
        assert_eq!(iter.size_hint(), (19, Some(19)));
    }

    #[test]
    fn test_other_factor_length() {
        let config = UpsampleConfig {
            interpolation_factor: 3,
            taps_per_phase: 8,
            cutoff: None,
        };
        let bank = PolyphaseFilterBank::from_config(&config).unwrap();
        let output = interpolate(&bank, &[1.0; 10], 10).unwrap();
        assert_eq!(output.len(), 30);
    }
}
