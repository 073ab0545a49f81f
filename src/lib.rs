pub mod config;
pub mod constants;
pub mod error;
pub mod processing;
pub mod signal_processing;
pub mod wav;

pub use config::{InterpolationFactor, UpsampleConfig};
pub use error::{Result, UpsampleError};
pub use processing::{ProcessReport, Upsampler};
pub use signal_processing::{PolyphaseFilterBank, build_filter_bank, build_prototype, interpolate};
pub use wav::{read_mono_wav, resampled_path, write_wav};
