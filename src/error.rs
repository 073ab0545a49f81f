use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpsampleError {
    #[error("Filter design failed: {0}")]
    FilterDesign(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Memory allocation failed for {what} ({len} samples)")]
    AllocationFailure { what: &'static str, len: usize },

    #[error("Input must be mono (1 channel), found {0}")]
    InvalidChannelConfiguration(u16),

    #[error("Short read: expected {expected} frames, read {read}")]
    ShortRead { expected: usize, read: usize },

    #[error("WAV read error: {0}")]
    Wav(#[from] hound::Error),

    #[error("WAV write failed: {0}")]
    WriteFailure(hound::Error),
}

pub type Result<T> = std::result::Result<T, UpsampleError>;

/// Allocate a zeroed buffer, reporting failure instead of aborting.
pub(crate) fn try_zeroed<T: Clone + Default>(what: &'static str, len: usize) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| UpsampleError::AllocationFailure { what, len })?;
    buf.resize(len, T::default());
    Ok(buf)
}

/// Allocate an empty buffer with room for `len` items.
pub(crate) fn try_with_capacity<T>(what: &'static str, len: usize) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| UpsampleError::AllocationFailure { what, len })?;
    Ok(buf)
}
