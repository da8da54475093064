//! Audio Test Fixtures
//!
//! Generated audio keeps inputs reproducible and free of external files.
//!
//! Base audio format:
//! - Sample rate: 24kHz (what hosted TTS backends typically return)
//! - Bit depth: 16-bit signed PCM
//! - Channels: Mono

use std::f32::consts::PI;
use std::io::Cursor;
use std::path::Path;

/// Sample rate of generated base audio
pub const BASE_SAMPLE_RATE: u32 = 24_000;

/// One second of base audio
pub const BASE_SECOND: usize = 24_000;

/// Default tone frequency
pub const TONE_HZ: f32 = 220.0;

/// Default tone amplitude; leaves headroom for positive gain
pub const TONE_AMPLITUDE: f32 = 0.25;

/// Generate a sine wave tone at `sample_rate`
pub fn generate_sine_wave(
    frames: usize,
    sample_rate: u32,
    frequency: f32,
    amplitude: f32,
) -> Vec<i16> {
    let max_amplitude = amplitude * i16::MAX as f32;
    let angular_freq = 2.0 * PI * frequency / sample_rate as f32;

    (0..frames)
        .map(|i| ((angular_freq * i as f32).sin() * max_amplitude) as i16)
        .collect()
}

/// Encode 16-bit mono samples as a WAV file in memory
pub fn wav_bytes(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &sample in samples {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

/// WAV bytes for a tone at the base sample rate
pub fn tone_wav(frames: usize, frequency: f32) -> Vec<u8> {
    wav_bytes(
        &generate_sine_wave(frames, BASE_SAMPLE_RATE, frequency, TONE_AMPLITUDE),
        BASE_SAMPLE_RATE,
    )
}

/// Decoded contents of a WAV file written by the engine
#[derive(Debug, Clone)]
pub struct WavContents {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<f32>,
}

impl WavContents {
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }
}

/// Read a 16-bit WAV file into normalized samples
pub fn read_wav(path: &Path) -> WavContents {
    let mut reader = hound::WavReader::open(path).unwrap();
    let spec = reader.spec();
    let samples = reader
        .samples::<i16>()
        .map(|s| s.unwrap() as f32 / i16::MAX as f32)
        .collect();
    WavContents {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        samples,
    }
}

/// Root-mean-square level of the middle half of a signal
///
/// Resampler edges are excluded.
pub fn rms(samples: &[f32]) -> f32 {
    let window = middle_half(samples);
    let sum: f64 = window.iter().map(|s| f64::from(*s).powi(2)).sum();
    (sum / window.len() as f64).sqrt() as f32
}

/// Estimate the dominant frequency of a pure tone from zero crossings
pub fn estimate_frequency(samples: &[f32], sample_rate: u32) -> f32 {
    let window = middle_half(samples);
    let crossings = window
        .windows(2)
        .filter(|pair| (pair[0] < 0.0) != (pair[1] < 0.0))
        .count();
    let seconds = window.len() as f32 / sample_rate as f32;
    crossings as f32 / (2.0 * seconds)
}

fn middle_half(samples: &[f32]) -> &[f32] {
    let quarter = samples.len() / 4;
    &samples[quarter..samples.len() - quarter]
}

/// Asserts `actual` is within `tolerance` (relative) of `expected`
pub fn assert_close(actual: f64, expected: f64, tolerance: f64, what: &str) {
    let error = ((actual - expected) / expected).abs();
    assert!(
        error <= tolerance,
        "{what}: expected {expected}, got {actual} (relative error {error:.4})"
    );
}
