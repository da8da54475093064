//! Audio containers passed between pipeline stages.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::error::{TransformError, TransformResult};

// =============================================================================
// Raw Audio Buffer
// =============================================================================

/// Decoded PCM audio: interleaved `f32` samples nominally in `[-1.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAudioBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl RawAudioBuffer {
    /// Creates a buffer.
    ///
    /// A trailing partial frame is dropped.
    pub fn new(mut samples: Vec<f32>, sample_rate: u32, channels: u16) -> TransformResult<Self> {
        if sample_rate == 0 {
            return Err(TransformError::InvalidSampleRate(sample_rate));
        }
        if channels == 0 {
            return Err(TransformError::InvalidChannelCount(channels));
        }
        let whole = samples.len() - samples.len() % usize::from(channels);
        samples.truncate(whole);
        Ok(Self {
            samples,
            sample_rate,
            channels,
        })
    }

    /// Mono convenience constructor.
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> TransformResult<Self> {
        Self::new(samples, sample_rate, 1)
    }

    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[inline]
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Number of frames (samples per channel).
    #[inline]
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback duration at the buffer's sample rate.
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frames() as f64 / f64::from(self.sample_rate))
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }
}

// =============================================================================
// Output Format
// =============================================================================

/// Output container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
    Wav,
}

impl AudioFormat {
    /// Picks the format from a path's extension; anything unrecognized is MP3.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .unwrap_or_default()
    }

    /// Matches a file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => Some(AudioFormat::Mp3),
            "wav" | "wave" => Some(AudioFormat::Wav),
            _ => None,
        }
    }

    #[inline]
    pub const fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// =============================================================================
// Encoded Audio
// =============================================================================

/// Container bytes ready to be written to disk.
#[derive(Debug, Clone)]
pub struct EncodedAudio {
    pub data: Bytes,
    pub format: AudioFormat,
    pub sample_rate: u32,
    pub channels: u16,
    /// Frames of PCM that went into the encoder.
    pub frames: usize,
}

impl EncodedAudio {
    /// Duration of the encoded signal.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames as f64 / f64::from(self.sample_rate))
    }
}
