//! Short-time Fourier transform with Hann windows and 75% overlap.
//!
//! Signals are zero padded by half a window on each side so the first and
//! last samples sit at a frame centre. The inverse divides by the summed
//! squared window, which makes `istft(stft(x))` reconstruct `x`.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::error::{AudioError, AudioResult};

use std::f64::consts::PI;

/// Smallest FFT size the spectral transforms will run with.
pub const MIN_FFT_SIZE: usize = 256;

/// Largest FFT size; about 93 ms at 22.05 kHz.
pub const MAX_FFT_SIZE: usize = 2048;

/// Window length divided by hop length.
const OVERLAP_FACTOR: usize = 4;

/// Below this the overlap-add normalizer is treated as zero.
const WINDOW_SUM_FLOOR: f64 = 1e-10;

/// Picks the FFT size for a signal of `len` samples.
///
/// Returns the largest power of two not exceeding `len`, clamped to
/// [`MIN_FFT_SIZE`, `MAX_FFT_SIZE`]. Signals shorter than `MIN_FFT_SIZE`
/// cannot be processed.
pub fn fft_size_for(len: usize) -> AudioResult<usize> {
    if len < MIN_FFT_SIZE {
        return Err(AudioError::transform(format!(
            "waveform has {} samples, spectral transform needs at least {}",
            len, MIN_FFT_SIZE
        )));
    }

    let mut size = MIN_FFT_SIZE;
    while size < MAX_FFT_SIZE && size * 2 <= len {
        size *= 2;
    }
    Ok(size)
}

/// Non-negative frequency bins of each analysis frame.
#[derive(Debug, Clone)]
pub struct Spectrogram {
    /// One entry per frame, each holding `fft_size / 2 + 1` bins.
    pub frames: Vec<Vec<Complex<f64>>>,
    /// Analysis window length.
    pub fft_size: usize,
}

impl Spectrogram {
    /// Distance between consecutive frames in samples.
    pub fn hop(&self) -> usize {
        self.fft_size / OVERLAP_FACTOR
    }

    /// Number of frequency bins per frame.
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }
}

/// Computes the STFT of `samples`.
pub fn stft(samples: &[f64], fft_size: usize) -> Spectrogram {
    let hop = fft_size / OVERLAP_FACTOR;
    let pad = fft_size / 2;

    let mut padded = vec![0.0; samples.len() + 2 * pad];
    padded[pad..pad + samples.len()].copy_from_slice(samples);

    let num_frames = 1 + (padded.len() - fft_size) / hop;
    let window = hann(fft_size);

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);

    let mut frames = Vec::with_capacity(num_frames);
    let mut buffer = vec![Complex::new(0.0, 0.0); fft_size];

    for t in 0..num_frames {
        let start = t * hop;
        for (i, slot) in buffer.iter_mut().enumerate() {
            *slot = Complex::new(padded[start + i] * window[i], 0.0);
        }
        fft.process(&mut buffer);
        frames.push(buffer[..fft_size / 2 + 1].to_vec());
    }

    Spectrogram { frames, fft_size }
}

/// Inverts a spectrogram by weighted overlap-add, returning `length` samples.
pub fn istft(spectrogram: &Spectrogram, length: usize) -> Vec<f64> {
    let fft_size = spectrogram.fft_size;
    let hop = spectrogram.hop();
    let pad = fft_size / 2;
    let half = fft_size / 2;

    let window = hann(fft_size);
    let buffer_len = fft_size + hop * spectrogram.frames.len().saturating_sub(1);
    let mut output = vec![0.0; buffer_len];
    let mut window_sum = vec![0.0; buffer_len];

    let mut planner = FftPlanner::new();
    let ifft = planner.plan_fft_inverse(fft_size);
    let mut buffer = vec![Complex::new(0.0, 0.0); fft_size];

    for (t, frame) in spectrogram.frames.iter().enumerate() {
        // Rebuild the Hermitian-symmetric full spectrum
        for (k, slot) in buffer.iter_mut().enumerate() {
            *slot = if k <= half {
                frame[k]
            } else {
                frame[fft_size - k].conj()
            };
        }
        ifft.process(&mut buffer);

        let start = t * hop;
        for i in 0..fft_size {
            let sample = buffer[i].re / fft_size as f64;
            output[start + i] += sample * window[i];
            window_sum[start + i] += window[i] * window[i];
        }
    }

    (0..length)
        .map(|i| {
            let idx = pad + i;
            if idx >= buffer_len {
                0.0
            } else if window_sum[idx] > WINDOW_SUM_FLOOR {
                output[idx] / window_sum[idx]
            } else {
                output[idx]
            }
        })
        .collect()
}

/// Periodic Hann window of `size` points.
fn hann(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f64 / size as f64).cos()))
        .collect()
}
