//! Decoding of base-synthesizer output into [`RawAudioBuffer`].
//!
//! Supports whatever symphonia's default registry is built with (MP3 and
//! WAV/PCM in this crate's feature set).

use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, trace};

use super::buffer::RawAudioBuffer;
use super::error::{DecodeError, DecodeResult};

/// Decodes an audio file.
///
/// The extension, if any, is passed to the prober as a hint.
pub fn decode_file(path: &Path) -> DecodeResult<RawAudioBuffer> {
    let file = File::open(path)?;
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }
    decode_source(Box::new(file), hint)
}

/// Decodes an in-memory audio stream.
pub fn decode_bytes(data: impl Into<Vec<u8>>, extension: Option<&str>) -> DecodeResult<RawAudioBuffer> {
    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }
    decode_source(Box::new(Cursor::new(data.into())), hint)
}

fn decode_source(source: Box<dyn MediaSource>, hint: Hint) -> DecodeResult<RawAudioBuffer> {
    let mss = MediaSourceStream::new(source, Default::default());

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| DecodeError::Unsupported(format!("Unrecognized container: {e}")))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| DecodeError::Unsupported("No decodable audio track".to_string()))?;
    let track_id = track.id;

    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);
    let mut channels = track
        .codec_params
        .channels
        .map(|c| c.count() as u16)
        .unwrap_or(0);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| DecodeError::Unsupported(format!("Unsupported codec: {e}")))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut skipped_packets = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(DecodeError::Malformed(format!("Error reading packet: {e}"))),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                let needed = decoded.capacity() * spec.channels.count();
                if sample_buf.as_ref().is_none_or(|b| b.capacity() < needed) {
                    sample_buf = Some(SampleBuffer::new(decoded.capacity() as u64, spec));
                }
                if let Some(buf) = sample_buf.as_mut() {
                    buf.copy_interleaved_ref(decoded);
                    samples.extend_from_slice(buf.samples());
                }
                sample_rate = spec.rate;
                channels = spec.channels.count() as u16;
            }
            Err(SymphoniaError::IoError(_)) | Err(SymphoniaError::DecodeError(_)) => {
                skipped_packets += 1;
                trace!("Skipping undecodable packet");
            }
            Err(e) => return Err(DecodeError::Malformed(format!("Decode error: {e}"))),
        }
    }

    if sample_rate == 0 || channels == 0 {
        return Err(DecodeError::Malformed(
            "Stream declares no sample rate or channel layout".to_string(),
        ));
    }

    debug!(
        sample_rate,
        channels,
        samples = samples.len(),
        skipped_packets,
        "Decoded audio stream"
    );

    RawAudioBuffer::new(samples, sample_rate, channels)
        .map_err(|e| DecodeError::Malformed(e.to_string()))
}
