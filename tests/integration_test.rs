use std::fs::OpenOptions;
use std::path::PathBuf;

use hound::{SampleFormat, WavSpec, WavWriter};
use polyup::wav::{read_mono_wav, write_wav};
use polyup::{UpsampleConfig, UpsampleError, Upsampler};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("polyup_{}_{}.wav", std::process::id(), name))
}

fn sine(freq: f32, sample_rate: u32, len: usize, amplitude: f32) -> Vec<f32> {
    (0..len)
        .map(|i| amplitude * (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin())
        .collect()
}

fn mono_spec(sample_rate: u32, format: SampleFormat, bits: u16) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: bits,
        sample_format: format,
    }
}

#[test]
fn test_float_file_round_trip() {
    let input_path = temp_path("float_in");
    let output_path = temp_path("float_out");

    let samples = sine(1000.0, 48000, 4800, 0.5);
    write_wav(&input_path, &samples, mono_spec(48000, SampleFormat::Float, 32)).unwrap();

    let upsampler = Upsampler::new(&UpsampleConfig::default()).unwrap();
    let report = upsampler
        .process_file(&input_path, &output_path, true)
        .unwrap();

    assert_eq!(report.input_frames, 4800);
    assert_eq!(report.output_frames, 19200);
    assert_eq!(report.input_rate, 48000);
    assert_eq!(report.output_rate, 192000);
    assert!(!report.short_read);

    let out = read_mono_wav(&output_path).unwrap();
    assert_eq!(out.sample_rate(), 192000);
    assert_eq!(out.spec.sample_format, SampleFormat::Float);
    assert_eq!(out.samples, upsampler.process(&samples).unwrap());

    std::fs::remove_file(&input_path).ok();
    std::fs::remove_file(&output_path).ok();
}

#[test]
fn test_int16_file_keeps_format() {
    let input_path = temp_path("int16_in");
    let output_path = temp_path("int16_out");

    let samples = sine(440.0, 22050, 2205, 0.5);
    write_wav(&input_path, &samples, mono_spec(22050, SampleFormat::Int, 16)).unwrap();

    let upsampler = Upsampler::new(&UpsampleConfig::default()).unwrap();
    upsampler
        .process_file(&input_path, &output_path, false)
        .unwrap();

    let out = read_mono_wav(&output_path).unwrap();
    assert_eq!(out.spec.sample_rate, 88200);
    assert_eq!(out.spec.bits_per_sample, 16);
    assert_eq!(out.spec.sample_format, SampleFormat::Int);
    assert_eq!(out.samples.len(), 2205 * 4);

    // Steady-state amplitude of a passband tone is preserved
    let peak = out.samples[1000..]
        .iter()
        .fold(0.0f32, |acc, &x| acc.max(x.abs()));
    assert!((peak - 0.5).abs() < 0.02, "peak amplitude {}", peak);

    std::fs::remove_file(&input_path).ok();
    std::fs::remove_file(&output_path).ok();
}

#[test]
fn test_stereo_input_rejected() {
    let input_path = temp_path("stereo_in");
    let spec = WavSpec {
        channels: 2,
        sample_rate: 48000,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(&input_path, spec).unwrap();
    for _ in 0..200 {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();

    let err = read_mono_wav(&input_path).unwrap_err();
    assert!(matches!(err, UpsampleError::InvalidChannelConfiguration(2)));

    std::fs::remove_file(&input_path).ok();
}

#[test]
fn test_missing_file() {
    let upsampler = Upsampler::new(&UpsampleConfig::default()).unwrap();
    let err = upsampler
        .process_file(temp_path("does_not_exist"), temp_path("never"), false)
        .unwrap_err();
    assert!(matches!(err, UpsampleError::Wav(_)));
}

#[test]
fn test_truncated_input() {
    let input_path = temp_path("short_in");
    let output_path = temp_path("short_out");

    let samples = vec![0.25f32; 1000];
    write_wav(&input_path, &samples, mono_spec(8000, SampleFormat::Float, 32)).unwrap();

    // Drop the last 100 samples but leave the header's length untouched
    let file = OpenOptions::new().write(true).open(&input_path).unwrap();
    let len = file.metadata().unwrap().len();
    file.set_len(len - 400).unwrap();
    drop(file);

    let audio = read_mono_wav(&input_path).unwrap();
    assert_eq!(audio.expected_frames, 1000);
    assert_eq!(audio.samples.len(), 900);
    assert!(audio.is_short());

    let upsampler = Upsampler::new(&UpsampleConfig::default()).unwrap();
    let err = upsampler
        .process_file(&input_path, &output_path, true)
        .unwrap_err();
    assert!(matches!(
        err,
        UpsampleError::ShortRead {
            expected: 1000,
            read: 900
        }
    ));

    let report = upsampler
        .process_file(&input_path, &output_path, false)
        .unwrap();
    assert!(report.short_read);
    assert_eq!(report.output_frames, 3600);

    std::fs::remove_file(&input_path).ok();
    std::fs::remove_file(&output_path).ok();
}

#[test]
fn test_write_failure() {
    let bad = std::env::temp_dir()
        .join("polyup_no_such_dir")
        .join("out.wav");
    let err = write_wav(&bad, &[0.0], mono_spec(8000, SampleFormat::Float, 32)).unwrap_err();
    assert!(matches!(err, UpsampleError::WriteFailure(_)));
}
