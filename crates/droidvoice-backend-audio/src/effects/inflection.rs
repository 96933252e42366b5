//! Rising end-of-clip pitch bend.
//!
//! The tail of the clip is cut into [`INFLECTION_CHUNKS`] equal chunks. A
//! linear envelope rises from 0 to the requested bend across the tail, and
//! each chunk is pitch-shifted by the mean of the envelope over its own
//! samples. This approximates a continuous glide at a fixed cost of one
//! pitch shift per chunk; small steps at chunk boundaries are expected.

use std::ops::Range;

use crate::error::AudioResult;
use crate::stft::MIN_FFT_SIZE;

use super::pitch_shift::pitch_shift;

/// Number of chunks the tail is divided into.
pub const INFLECTION_CHUNKS: usize = 8;

/// Shortest tail that gets bent. Every chunk must fill a minimum FFT window.
pub const MIN_TAIL_SAMPLES: usize = INFLECTION_CHUNKS * MIN_FFT_SIZE;

/// One tail chunk and the shift applied to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkShift {
    /// Sample range within the tail.
    pub range: Range<usize>,
    /// Mean envelope value over the range, in semitones.
    pub semitones: f64,
}

/// Returns the number of tail samples for a clip of `len` samples.
pub fn tail_len(len: usize, fraction: f64) -> usize {
    ((len as f64 * fraction).round() as usize).min(len)
}

/// Plans the per-chunk shifts for a tail of `tail_len` samples.
///
/// The envelope value at tail position `j` is `semitones * j / (tail_len - 1)`,
/// so the mean over `[a, b)` is the envelope at `(a + b - 1) / 2`.
pub fn plan_chunks(tail_len: usize, semitones: f64) -> Vec<ChunkShift> {
    if tail_len < 2 {
        return Vec::new();
    }

    let last = (tail_len - 1) as f64;
    (0..INFLECTION_CHUNKS)
        .filter_map(|i| {
            let start = tail_len * i / INFLECTION_CHUNKS;
            let end = tail_len * (i + 1) / INFLECTION_CHUNKS;
            if end == start {
                return None;
            }
            let mean_position = (start + end - 1) as f64 / 2.0;
            Some(ChunkShift {
                range: start..end,
                semitones: semitones * mean_position / last,
            })
        })
        .collect()
}

/// Bends the last `fraction` of `samples` upward by up to `semitones`.
///
/// Tails shorter than [`MIN_TAIL_SAMPLES`] are left alone and the input is
/// returned unchanged. Output length always equals input length.
pub fn apply_inflection(samples: &[f64], semitones: f64, fraction: f64) -> AudioResult<Vec<f64>> {
    let tail = tail_len(samples.len(), fraction);
    if tail < MIN_TAIL_SAMPLES {
        return Ok(samples.to_vec());
    }

    let head_len = samples.len() - tail;
    let (head, tail_samples) = samples.split_at(head_len);

    let mut output = Vec::with_capacity(samples.len());
    output.extend_from_slice(head);
    for chunk in plan_chunks(tail, semitones) {
        let shifted = pitch_shift(&tail_samples[chunk.range], chunk.semitones)?;
        output.extend_from_slice(&shifted);
    }

    Ok(output)
}
