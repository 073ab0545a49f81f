use std::path::Path;

use crate::config::UpsampleConfig;
use crate::error::{Result, UpsampleError};
use crate::signal_processing::{Interpolate, InterpolateExt, PolyphaseFilterBank, interpolate};
use crate::wav::{read_mono_wav, upsampled_spec, write_wav};

/// Summary of one file conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    pub input_frames: usize,
    pub output_frames: usize,
    pub input_rate: u32,
    pub output_rate: u32,
    pub short_read: bool,
}

/// Fixed-ratio upsampler built once from a configuration
pub struct Upsampler {
    bank: PolyphaseFilterBank,
}

impl Upsampler {
    pub fn new(config: &UpsampleConfig) -> Result<Self> {
        let bank = PolyphaseFilterBank::from_config(config)?;
        log::info!(
            "Upsampler ready: {}x, {} taps ({} per phase), cutoff {:.4}",
            config.interpolation_factor,
            config.num_taps(),
            bank.taps_per_phase(),
            config.cutoff()
        );
        Ok(Self { bank })
    }

    pub fn factor(&self) -> usize {
        self.bank.phases()
    }

    pub fn filter_bank(&self) -> &PolyphaseFilterBank {
        &self.bank
    }

    /// Upsample an in-memory buffer
    pub fn process(&self, input: &[f32]) -> Result<Vec<f32>> {
        interpolate(&self.bank, input, input.len())
    }

    /// Upsample a sample stream lazily
    pub fn stream<I>(&self, input: I) -> Interpolate<'_, I::IntoIter>
    where
        I: IntoIterator<Item = f32>,
    {
        input.into_iter().upsample(&self.bank)
    }

    /// Read a mono WAV file, upsample it, and write the result
    ///
    /// The output keeps the input's bit depth and sample format at
    /// `factor` times the sample rate. With `strict`, a truncated input
    /// is an error instead of a warning.
    pub fn process_file<P, Q>(&self, input: P, output: Q, strict: bool) -> Result<ProcessReport>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let audio = read_mono_wav(input.as_ref())?;
        if strict && audio.is_short() {
            return Err(UpsampleError::ShortRead {
                expected: audio.expected_frames,
                read: audio.samples.len(),
            });
        }

        let out_spec = upsampled_spec(audio.spec, self.factor())?;
        let upsampled = self.process(&audio.samples)?;
        log::debug!(
            "Upsampled {} frames to {}",
            audio.samples.len(),
            upsampled.len()
        );

        write_wav(output.as_ref(), &upsampled, out_spec)?;

        Ok(ProcessReport {
            input_frames: audio.samples.len(),
            output_frames: upsampled.len(),
            input_rate: audio.sample_rate(),
            output_rate: out_spec.sample_rate,
            short_read: audio.is_short(),
        })
    }
}
