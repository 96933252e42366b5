//! WAV decoding for synthesized speech and rendered clips.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::encode::EncodedClip;
use crate::error::{AudioError, AudioResult};
use crate::waveform::Waveform;

/// Decodes a WAV stream into a mono waveform.
///
/// Multi-channel input is mixed down by averaging channels. Integer samples
/// are scaled by their full-scale value; float samples are taken as-is.
pub fn decode_wav<R: Read>(source: R) -> AudioResult<Waveform> {
    let mut reader = WavReader::new(source)?;
    let spec = reader.spec();

    let interleaved: Vec<f64> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()?,
        (SampleFormat::Int, 8) => scale(reader.samples::<i8>(), 128.0)?,
        (SampleFormat::Int, 16) => scale(reader.samples::<i16>(), 32768.0)?,
        (SampleFormat::Int, 24) => scale(reader.samples::<i32>(), 8388608.0)?,
        (SampleFormat::Int, 32) => scale(reader.samples::<i32>(), 2147483648.0)?,
        (format, bits) => {
            return Err(AudioError::synthesis(format!(
                "unsupported WAV sample format: {:?} at {} bits",
                format, bits
            )))
        }
    };

    Ok(Waveform::new(
        mix_to_mono(&interleaved, spec.channels),
        spec.sample_rate,
    ))
}

/// Reads a WAV file into a mono waveform.
pub fn read_wav(path: impl AsRef<Path>) -> AudioResult<Waveform> {
    let file = File::open(path.as_ref())?;
    decode_wav(BufReader::new(file))
}

/// Reads a rendered 8-bit mono clip back without rescaling.
///
/// # Errors
/// Returns [`AudioError::Encoding`] when the file is not mono 8-bit PCM.
pub fn read_clip(path: impl AsRef<Path>) -> AudioResult<EncodedClip> {
    let file = File::open(path.as_ref())?;
    let mut reader = WavReader::new(BufReader::new(file))?;
    let spec = reader.spec();

    if spec.channels != 1 || spec.bits_per_sample != 8 || spec.sample_format != SampleFormat::Int
    {
        return Err(AudioError::encoding(format!(
            "expected mono 8-bit PCM, found {} channel(s) at {} bits",
            spec.channels, spec.bits_per_sample
        )));
    }

    // hound centres 8-bit samples around zero
    let samples = reader
        .samples::<i8>()
        .map(|s| s.map(|v| (v as i16 + 128) as u8))
        .collect::<Result<Vec<u8>, _>>()?;

    Ok(EncodedClip::new(samples, spec.sample_rate))
}

fn scale<T, I>(samples: I, full_scale: f64) -> AudioResult<Vec<f64>>
where
    T: Into<i32>,
    I: Iterator<Item = hound::Result<T>>,
{
    samples
        .map(|s| s.map(|v| v.into() as f64 / full_scale).map_err(AudioError::from))
        .collect()
}

fn mix_to_mono(interleaved: &[f64], channels: u16) -> Vec<f64> {
    let channels = channels.max(1) as usize;
    if channels == 1 {
        return interleaved.to_vec();
    }

    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f64>() / channels as f64)
        .collect()
}
