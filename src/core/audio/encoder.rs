//! Output encoders.
//!
//! - WAV: 16-bit integer PCM via hound
//! - MP3: 128 kbps CBR via LAME (`mp3` feature)

use std::io::Cursor;

use bytes::Bytes;

use super::buffer::{AudioFormat, EncodedAudio, RawAudioBuffer};
use super::error::{TransformError, TransformResult};

/// MP3 bitrate in kbps.
pub const MP3_BITRATE_KBPS: u32 = 128;

/// Encodes a buffer into the requested container.
pub fn encode(raw: &RawAudioBuffer, format: AudioFormat) -> TransformResult<EncodedAudio> {
    if raw.is_empty() {
        return Err(TransformError::EmptyOutput);
    }
    let data = match format {
        AudioFormat::Wav => encode_wav(raw)?,
        AudioFormat::Mp3 => encode_mp3(raw)?,
    };
    Ok(EncodedAudio {
        data: Bytes::from(data),
        format,
        sample_rate: raw.sample_rate(),
        channels: raw.channels(),
        frames: raw.frames(),
    })
}

/// Converts a normalized sample to 16-bit PCM.
#[inline]
pub fn quantize(sample: f32) -> i16 {
    (sample * 32767.0).clamp(-32767.0, 32767.0) as i16
}

fn encode_wav(raw: &RawAudioBuffer) -> TransformResult<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: raw.channels(),
        sample_rate: raw.sample_rate(),
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(44 + raw.samples().len() * 2));
    let mut writer = hound::WavWriter::new(&mut cursor, spec)
        .map_err(|e| TransformError::Encode(format!("WAV header: {e}")))?;
    for &sample in raw.samples() {
        writer
            .write_sample(quantize(sample))
            .map_err(|e| TransformError::Encode(format!("WAV sample: {e}")))?;
    }
    writer
        .finalize()
        .map_err(|e| TransformError::Encode(format!("WAV finalize: {e}")))?;

    Ok(cursor.into_inner())
}

#[cfg(feature = "mp3")]
fn encode_mp3(raw: &RawAudioBuffer) -> TransformResult<Vec<u8>> {
    use mp3lame_encoder::{Bitrate, Builder, DualPcm, FlushNoGap, MonoPcm, Quality};

    let channels = raw.channels();
    if channels > 2 {
        return Err(TransformError::UnsupportedFormat(format!(
            "MP3 supports 1 or 2 channels, got {channels}"
        )));
    }

    let mut builder = Builder::new()
        .ok_or_else(|| TransformError::Encode("Failed to allocate LAME encoder".to_string()))?;
    builder
        .set_num_channels(channels as u8)
        .map_err(|e| TransformError::Encode(format!("LAME channels: {e:?}")))?;
    builder
        .set_sample_rate(raw.sample_rate())
        .map_err(|e| TransformError::Encode(format!("LAME sample rate: {e:?}")))?;
    builder
        .set_brate(Bitrate::Kbps128)
        .map_err(|e| TransformError::Encode(format!("LAME bitrate: {e:?}")))?;
    builder
        .set_quality(Quality::Best)
        .map_err(|e| TransformError::Encode(format!("LAME quality: {e:?}")))?;
    let mut encoder = builder
        .build()
        .map_err(|e| TransformError::Encode(format!("LAME init: {e:?}")))?;

    let pcm: Vec<i16> = raw.samples().iter().map(|s| quantize(*s)).collect();
    let frames = raw.frames();

    let mut out: Vec<u8> = Vec::with_capacity(mp3lame_encoder::max_required_buffer_size(frames));
    let written = if channels == 1 {
        encoder.encode(MonoPcm(&pcm), out.spare_capacity_mut())
    } else {
        let (left, right): (Vec<i16>, Vec<i16>) =
            pcm.chunks_exact(2).map(|f| (f[0], f[1])).unzip();
        encoder.encode(
            DualPcm {
                left: &left,
                right: &right,
            },
            out.spare_capacity_mut(),
        )
    }
    .map_err(|e| TransformError::Encode(format!("LAME encode: {e:?}")))?;
    // SAFETY: the encoder initialized exactly `written` bytes of spare capacity.
    unsafe {
        out.set_len(out.len().wrapping_add(written));
    }

    out.reserve(7200);
    let flushed = encoder
        .flush::<FlushNoGap>(out.spare_capacity_mut())
        .map_err(|e| TransformError::Encode(format!("LAME flush: {e:?}")))?;
    // SAFETY: the encoder initialized exactly `flushed` bytes of spare capacity.
    unsafe {
        out.set_len(out.len().wrapping_add(flushed));
    }

    Ok(out)
}

#[cfg(not(feature = "mp3"))]
fn encode_mp3(_raw: &RawAudioBuffer) -> TransformResult<Vec<u8>> {
    Err(TransformError::UnsupportedFormat(
        "MP3 output requires the `mp3` feature".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(rate: u32, frames: usize) -> RawAudioBuffer {
        let samples = (0..frames)
            .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / rate as f32).sin() * 0.4)
            .collect();
        RawAudioBuffer::mono(samples, rate).unwrap()
    }

    #[test]
    fn test_quantize_bounds() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 32767);
        assert_eq!(quantize(-1.0), -32767);
        assert_eq!(quantize(2.5), 32767);
        assert_eq!(quantize(-3.0), -32767);
    }

    #[test]
    fn test_wav_encoding_header_and_length() {
        let raw = tone(16_000, 1_600);
        let encoded = encode(&raw, AudioFormat::Wav).unwrap();

        assert_eq!(&encoded.data[0..4], b"RIFF");
        assert_eq!(&encoded.data[8..12], b"WAVE");
        assert_eq!(encoded.data.len(), 44 + 1_600 * 2);
        assert_eq!(encoded.frames, 1_600);

        let reader = hound::WavReader::new(Cursor::new(encoded.data.to_vec())).unwrap();
        assert_eq!(reader.spec().sample_rate, 16_000);
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.len(), 1_600);
    }

    #[test]
    fn test_wav_preserves_quantized_samples() {
        let raw = RawAudioBuffer::mono(vec![0.5, -0.5, 0.0], 8_000).unwrap();
        let encoded = encode(&raw, AudioFormat::Wav).unwrap();
        let mut reader = hound::WavReader::new(Cursor::new(encoded.data.to_vec())).unwrap();
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![16383, -16383, 0]);
    }

    #[test]
    fn test_empty_buffer_rejected() {
        let raw = RawAudioBuffer::mono(Vec::new(), 16_000).unwrap();
        assert!(matches!(
            encode(&raw, AudioFormat::Wav),
            Err(TransformError::EmptyOutput)
        ));
    }

    #[cfg(feature = "mp3")]
    #[test]
    fn test_mp3_encoding_produces_frames() {
        let raw = tone(44_100, 44_100);
        let encoded = encode(&raw, AudioFormat::Mp3).unwrap();

        assert_eq!(encoded.format, AudioFormat::Mp3);
        assert!(encoded.data.len() > 1_000);
        // MPEG frame sync in the first frame header
        let sync = encoded
            .data
            .windows(2)
            .any(|w| w[0] == 0xFF && (w[1] & 0xE0) == 0xE0);
        assert!(sync);
    }

    #[cfg(feature = "mp3")]
    #[test]
    fn test_mp3_stereo() {
        let samples = vec![0.1f32; 2 * 11_025];
        let raw = RawAudioBuffer::new(samples, 22_050, 2).unwrap();
        assert!(encode(&raw, AudioFormat::Mp3).is_ok());
    }
}
