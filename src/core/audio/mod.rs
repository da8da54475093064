//! Audio decoding, transformation and encoding.
//!
//! ```text
//! base audio bytes ─▶ decoder ─▶ RawAudioBuffer ─▶ shift_pitch ─▶ apply_gain ─▶ encoder ─▶ EncodedAudio
//!                   (symphonia)                     (rubato)                     (hound / LAME)
//! ```

pub mod buffer;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod resampler;
pub mod transform;

pub use buffer::{AudioFormat, EncodedAudio, RawAudioBuffer};
pub use decoder::{decode_bytes, decode_file};
pub use encoder::{MP3_BITRATE_KBPS, encode, quantize};
pub use error::{DecodeError, DecodeResult, TransformError, TransformResult};
pub use transform::{AudioTransformEngine, OUTPUT_SAMPLE_RATE, db_to_amplitude, declared_rate};
