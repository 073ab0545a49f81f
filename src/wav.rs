use std::io::Read;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::constants::OUTPUT_SUFFIX;
use crate::error::{Result, UpsampleError, try_with_capacity};

/// Mono audio loaded fully into memory
#[derive(Debug, Clone)]
pub struct MonoAudio {
    pub samples: Vec<f32>,
    pub spec: WavSpec,
    /// Frame count declared by the file header
    pub expected_frames: usize,
}

impl MonoAudio {
    pub fn sample_rate(&self) -> u32 {
        self.spec.sample_rate
    }

    /// True if the file ended before the declared frame count
    pub fn is_short(&self) -> bool {
        self.samples.len() < self.expected_frames
    }
}

/// Read a single-channel WAV file as normalized `f32` samples
///
/// Integer PCM is scaled to [-1, 1). A file whose data ends early yields
/// the samples that could be read; check [`MonoAudio::is_short`].
///
/// # Errors
/// Returns `UpsampleError::InvalidChannelConfiguration` for anything but
/// mono input, or `UpsampleError::Wav` if the file cannot be parsed
pub fn read_mono_wav<P: AsRef<Path>>(path: P) -> Result<MonoAudio> {
    let reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();

    if spec.channels != 1 {
        return Err(UpsampleError::InvalidChannelConfiguration(spec.channels));
    }

    let expected_frames = reader.duration() as usize;
    let samples = read_samples(reader, &spec, expected_frames)?;

    if samples.len() < expected_frames {
        log::warn!(
            "Expected {} frames, read {}",
            expected_frames,
            samples.len()
        );
    }

    Ok(MonoAudio {
        samples,
        spec,
        expected_frames,
    })
}

fn read_samples<R: Read>(
    mut reader: WavReader<R>,
    spec: &WavSpec,
    expected_frames: usize,
) -> Result<Vec<f32>> {
    let mut samples = try_with_capacity("input", expected_frames)?;
    match spec.sample_format {
        SampleFormat::Float => collect_until_eof(reader.samples::<f32>(), &mut samples)?,
        SampleFormat::Int => {
            let max_val = full_scale(spec.bits_per_sample);
            collect_until_eof(
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| (v as f64 / max_val) as f32)),
                &mut samples,
            )?
        }
    }
    Ok(samples)
}

/// Stops at the first I/O error, which hound reports for a data chunk
/// shorter than its header claims
fn collect_until_eof<I>(iter: I, out: &mut Vec<f32>) -> Result<()>
where
    I: Iterator<Item = hound::Result<f32>>,
{
    for sample in iter {
        match sample {
            Ok(s) => out.push(s),
            Err(hound::Error::IoError(e)) => {
                log::debug!("Sample data ended early: {}", e);
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn full_scale(bits_per_sample: u16) -> f64 {
    (1u64 << (bits_per_sample.clamp(1, 32) - 1)) as f64
}

/// Write samples with the given format
///
/// Integer formats are rescaled from [-1, 1) and clamped to the sample width.
///
/// # Errors
/// Returns `UpsampleError::WriteFailure` if the file cannot be created or written
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    let mut writer = WavWriter::create(path.as_ref(), spec).map_err(UpsampleError::WriteFailure)?;

    match spec.sample_format {
        SampleFormat::Float => {
            for &sample in samples {
                writer
                    .write_sample(sample)
                    .map_err(UpsampleError::WriteFailure)?;
            }
        }
        SampleFormat::Int => {
            let max_val = full_scale(spec.bits_per_sample);
            for &sample in samples {
                let v = (sample as f64 * max_val)
                    .round()
                    .clamp(-max_val, max_val - 1.0) as i32;
                writer.write_sample(v).map_err(UpsampleError::WriteFailure)?;
            }
        }
    }

    writer.finalize().map_err(UpsampleError::WriteFailure)?;
    Ok(())
}

/// Output format for an upsampled stream: same layout, rate times `factor`
pub fn upsampled_spec(spec: WavSpec, factor: usize) -> Result<WavSpec> {
    let sample_rate = u32::try_from(factor)
        .ok()
        .and_then(|f| spec.sample_rate.checked_mul(f))
        .ok_or_else(|| {
            UpsampleError::Config(format!(
                "Output sample rate overflows: {} Hz x {}",
                spec.sample_rate, factor
            ))
        })?;
    Ok(WavSpec {
        sample_rate,
        ..spec
    })
}

/// `dir/name.ext` -> `dir/name_resampled.wav`
pub fn resampled_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    let mut name = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "output".into());
    name.push(OUTPUT_SUFFIX);
    name.push(".wav");
    input.with_file_name(name)
}
