//! Pitch, gain and encoding applied to base synthesizer audio.
//!
//! Pitch is shifted the way a tape machine does it: the samples are
//! reinterpreted at a faster or slower declared rate and then resampled to
//! [`OUTPUT_SAMPLE_RATE`], so pitch and duration change together.

use tracing::debug;

use super::buffer::{AudioFormat, EncodedAudio, RawAudioBuffer};
use super::encoder;
use super::error::{TransformError, TransformResult};
use super::resampler;
use crate::core::emotion::{AcousticProfile, MAX_PITCH_SHIFT_SEMITONES, semitone_ratio};

/// Sample rate of pitch-shifted output.
pub const OUTPUT_SAMPLE_RATE: u32 = 44_100;

/// Applies acoustic profiles to raw audio.
#[derive(Debug, Clone, Copy)]
pub struct AudioTransformEngine {
    output_sample_rate: u32,
}

impl Default for AudioTransformEngine {
    fn default() -> Self {
        Self {
            output_sample_rate: OUTPUT_SAMPLE_RATE,
        }
    }
}

impl AudioTransformEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the rate that pitch-shifted audio is resampled to.
    pub fn with_output_sample_rate(output_sample_rate: u32) -> TransformResult<Self> {
        if output_sample_rate == 0 {
            return Err(TransformError::InvalidSampleRate(0));
        }
        Ok(Self { output_sample_rate })
    }

    pub fn output_sample_rate(&self) -> u32 {
        self.output_sample_rate
    }

    /// Shifts pitch by `semitones`.
    ///
    /// Zero is an identity. Otherwise the declared rate is
    /// `floor(rate * 2^(semitones/12))` and the result has
    /// `round(frames * output_rate / declared)` frames at the output rate.
    pub fn shift_pitch(&self, raw: RawAudioBuffer, semitones: i32) -> TransformResult<RawAudioBuffer> {
        if semitones == 0 {
            return Ok(raw);
        }
        if semitones.abs() > MAX_PITCH_SHIFT_SEMITONES {
            return Err(TransformError::PitchShiftOutOfRange(semitones));
        }

        let declared = declared_rate(raw.sample_rate(), semitones)?;
        let channels = raw.channels();
        let frames_in = raw.frames();

        let samples = resampler::resample(
            raw.samples(),
            channels,
            declared,
            self.output_sample_rate,
        )?;
        if frames_in > 0 && samples.is_empty() {
            return Err(TransformError::EmptyOutput);
        }

        let shifted = RawAudioBuffer::new(samples, self.output_sample_rate, channels)?;
        debug!(
            semitones,
            original_rate = raw.sample_rate(),
            declared_rate = declared,
            frames_in,
            frames_out = shifted.frames(),
            "Pitch shifted"
        );
        Ok(shifted)
    }

    /// Scales every sample by `10^(db/20)` and clamps to `[-1.0, 1.0]`.
    ///
    /// Zero gain returns the buffer untouched.
    pub fn apply_gain(&self, mut raw: RawAudioBuffer, db: f32) -> TransformResult<RawAudioBuffer> {
        if !db.is_finite() {
            return Err(TransformError::InvalidGain(db));
        }
        if db == 0.0 {
            return Ok(raw);
        }
        let factor = db_to_amplitude(db);
        for sample in raw.samples_mut() {
            *sample = (*sample * factor).clamp(-1.0, 1.0);
        }
        Ok(raw)
    }

    /// Shifts pitch, applies gain and encodes.
    ///
    /// The profile's rate flag is consumed by the base synthesizer and
    /// ignored here.
    pub fn apply_profile(
        &self,
        raw: RawAudioBuffer,
        profile: &AcousticProfile,
        format: AudioFormat,
    ) -> TransformResult<EncodedAudio> {
        let shifted = self.shift_pitch(raw, profile.pitch_shift_semitones)?;
        let adjusted = self.apply_gain(shifted, profile.volume_gain_db)?;
        encoder::encode(&adjusted, format)
    }
}

/// Rate the buffer is reinterpreted at for a given shift, truncated to whole Hz.
pub fn declared_rate(sample_rate: u32, semitones: i32) -> TransformResult<u32> {
    if sample_rate == 0 {
        return Err(TransformError::InvalidSampleRate(sample_rate));
    }
    let declared = (f64::from(sample_rate) * semitone_ratio(semitones)).floor();
    if declared < 1.0 || declared > f64::from(u32::MAX) {
        return Err(TransformError::InvalidSampleRate(sample_rate));
    }
    Ok(declared as u32)
}

/// Linear amplitude factor for a gain in decibels.
#[inline]
pub fn db_to_amplitude(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}
