use thiserror::Error;

use crate::core::emotion::MAX_PITCH_SHIFT_SEMITONES;

/// Errors raised while transforming or encoding audio.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Pitch shift of {0} semitones is outside [-{max}, {max}]", max = MAX_PITCH_SHIFT_SEMITONES)]
    PitchShiftOutOfRange(i32),
    #[error("Invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),
    #[error("Invalid channel count: {0}")]
    InvalidChannelCount(u16),
    #[error("Invalid gain: {0} dB")]
    InvalidGain(f32),
    #[error("Transform produced no audio")]
    EmptyOutput,
    #[error("Resampling failed: {0}")]
    Resample(String),
    #[error("Encoding failed: {0}")]
    Encode(String),
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Errors raised while decoding base-synthesizer audio.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported audio stream: {0}")]
    Unsupported(String),
    #[error("Malformed audio stream: {0}")]
    Malformed(String),
}

/// Result type for decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;
