//! Sample rate conversion using rubato.
//!
//! Sinc interpolation with a Blackman-Harris window. The output is aligned
//! for the resampler's delay and trimmed or zero-padded to exactly
//! `round(frames * to / from)` frames.

use rubato::{
    Resampler as _, SincFixedIn, SincInterpolationParameters, SincInterpolationType,
    WindowFunction, calculate_cutoff,
};

use super::error::{TransformError, TransformResult};

/// Input frames per processing block.
const CHUNK_SIZE: usize = 1024;

const SINC_LEN: usize = 256;

/// Safety valve for the tail flush loop.
const MAX_FLUSH_BLOCKS: usize = 16;

/// Number of output frames produced for `frames` input frames.
#[inline]
pub fn expected_frames(frames: usize, from_rate: u32, to_rate: u32) -> usize {
    (frames as f64 * f64::from(to_rate) / f64::from(from_rate)).round() as usize
}

/// Resamples interleaved audio from `from_rate` to `to_rate`.
pub fn resample(
    samples: &[f32],
    channels: u16,
    from_rate: u32,
    to_rate: u32,
) -> TransformResult<Vec<f32>> {
    if from_rate == 0 {
        return Err(TransformError::InvalidSampleRate(from_rate));
    }
    if to_rate == 0 {
        return Err(TransformError::InvalidSampleRate(to_rate));
    }
    if channels == 0 {
        return Err(TransformError::InvalidChannelCount(channels));
    }
    if from_rate == to_rate {
        return Ok(samples.to_vec());
    }

    let channels = usize::from(channels);
    let frames = samples.len() / channels;
    if frames == 0 {
        return Ok(Vec::new());
    }
    let expected = expected_frames(frames, from_rate, to_rate);

    let planar = deinterleave(samples, channels, frames);

    let window = WindowFunction::BlackmanHarris2;
    let params = SincInterpolationParameters {
        sinc_len: SINC_LEN,
        f_cutoff: calculate_cutoff(SINC_LEN, window),
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window,
    };

    let mut resampler = SincFixedIn::<f32>::new(
        f64::from(to_rate) / f64::from(from_rate),
        1.0,
        params,
        CHUNK_SIZE,
        channels,
    )
    .map_err(|e| TransformError::Resample(format!("Failed to create resampler: {e}")))?;

    let delay = resampler.output_delay();
    let target = expected + delay;
    let mut output: Vec<Vec<f32>> = vec![Vec::with_capacity(target); channels];

    let mut pos = 0;
    loop {
        let needed = resampler.input_frames_next();
        if pos + needed > frames {
            break;
        }
        let block: Vec<&[f32]> = planar.iter().map(|c| &c[pos..pos + needed]).collect();
        let out = resampler
            .process(&block[..], None)
            .map_err(|e| TransformError::Resample(e.to_string()))?;
        append(&mut output, out);
        pos += needed;
    }

    if pos < frames {
        let rest: Vec<&[f32]> = planar.iter().map(|c| &c[pos..]).collect();
        let out = resampler
            .process_partial(Some(&rest[..]), None)
            .map_err(|e| TransformError::Resample(e.to_string()))?;
        append(&mut output, out);
    }

    // Push silence through until the delayed tail has come out.
    let mut flushes = 0;
    while output[0].len() < target && flushes < MAX_FLUSH_BLOCKS {
        let out = resampler
            .process_partial(None::<&[&[f32]]>, None)
            .map_err(|e| TransformError::Resample(e.to_string()))?;
        if out.first().is_none_or(|c| c.is_empty()) {
            break;
        }
        append(&mut output, out);
        flushes += 1;
    }

    for channel in output.iter_mut() {
        channel.drain(..delay.min(channel.len()));
        channel.resize(expected, 0.0);
    }

    Ok(interleave(&output, expected))
}

fn deinterleave(samples: &[f32], channels: usize, frames: usize) -> Vec<Vec<f32>> {
    let mut planar = vec![Vec::with_capacity(frames); channels];
    for frame in samples.chunks_exact(channels) {
        for (ch, sample) in frame.iter().enumerate() {
            planar[ch].push(*sample);
        }
    }
    planar
}

fn interleave(planar: &[Vec<f32>], frames: usize) -> Vec<f32> {
    let mut out = Vec::with_capacity(frames * planar.len());
    for i in 0..frames {
        for channel in planar {
            out.push(channel[i]);
        }
    }
    out
}

fn append(output: &mut [Vec<f32>], block: Vec<Vec<f32>>) {
    for (dst, src) in output.iter_mut().zip(block) {
        dst.extend(src);
    }
}
