//! Mono unsigned 8-bit WAV writing.

use std::io::{self, Write};

use super::format::{WavFormat, WAV_HEADER_LEN};

/// Writes a mono 8-bit clip as a WAV file.
///
/// `samples` are unsigned bytes with 128 at rest, stored as-is after the
/// header.
pub fn write_wav<W: Write>(writer: &mut W, sample_rate: u32, samples: &[u8]) -> io::Result<()> {
    let header = WavFormat::mono_u8(sample_rate).header(samples.len());
    writer.write_all(&header)?;
    writer.write_all(samples)
}

/// Builds a complete mono 8-bit WAV file in memory.
pub fn wav_bytes(sample_rate: u32, samples: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(WAV_HEADER_LEN + samples.len());
    buffer.extend_from_slice(&WavFormat::mono_u8(sample_rate).header(samples.len()));
    buffer.extend_from_slice(samples);
    buffer
}
