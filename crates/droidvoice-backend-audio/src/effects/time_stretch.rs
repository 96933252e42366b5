//! Phase vocoder time-stretch.
//!
//! Changes duration without changing pitch. Frames are read from the input
//! spectrogram at fractional positions spaced `rate` apart; magnitudes are
//! interpolated between neighbouring frames and phases are advanced by each
//! bin's measured instantaneous frequency so partials stay continuous.

use rustfft::num_complex::Complex;

use crate::error::{AudioError, AudioResult};
use crate::stft::{fft_size_for, istft, stft, Spectrogram};

use std::f64::consts::PI;

/// Largest output/input length ratio a stretch may produce.
pub const MAX_EXPANSION: f64 = 16.0;

/// Stretches `samples` so the output has `round(len / rate)` samples.
///
/// `rate > 1` shortens (speeds up), `rate < 1` lengthens.
///
/// # Errors
/// Returns a transform error if `rate` is not a positive finite number, the
/// output would exceed [`MAX_EXPANSION`] times the input length, or the input
/// is shorter than the minimum FFT window.
pub fn time_stretch(samples: &[f64], rate: f64) -> AudioResult<Vec<f64>> {
    if !(rate.is_finite() && rate > 0.0) {
        return Err(AudioError::transform(format!(
            "time-stretch rate must be positive, got {}",
            rate
        )));
    }

    if rate < 1.0 / MAX_EXPANSION {
        return Err(AudioError::transform(format!(
            "time-stretch rate {} expands the signal more than {}x",
            rate, MAX_EXPANSION
        )));
    }

    let fft_size = fft_size_for(samples.len())?;
    let target_len = ((samples.len() as f64 / rate).round() as usize).max(1);

    let analysis = stft(samples, fft_size);
    let stretched = phase_vocoder(&analysis, rate);
    Ok(istft(&stretched, target_len))
}

/// Resamples a spectrogram in time by `rate`, keeping its frequency content.
pub(crate) fn phase_vocoder(spectrogram: &Spectrogram, rate: f64) -> Spectrogram {
    let num_frames = spectrogram.frames.len();
    let num_bins = spectrogram.num_bins();
    let hop = spectrogram.hop() as f64;
    let fft_size = spectrogram.fft_size as f64;

    // Expected phase advance per hop for each bin centre
    let phase_advance: Vec<f64> = (0..num_bins)
        .map(|k| 2.0 * PI * hop * k as f64 / fft_size)
        .collect();

    // Frames past the end read as silence
    let silent = vec![Complex::new(0.0, 0.0); num_bins];

    let mut phase_acc: Vec<f64> = frame_at(spectrogram, &silent, 0)
        .iter()
        .map(|c| c.arg())
        .collect();
    let mut frames = Vec::new();

    let mut step = 0.0_f64;
    while step < num_frames as f64 {
        let index = step.floor() as usize;
        let alpha = step - index as f64;
        let left = frame_at(spectrogram, &silent, index);
        let right = frame_at(spectrogram, &silent, index + 1);

        let frame: Vec<Complex<f64>> = (0..num_bins)
            .map(|k| {
                let magnitude = (1.0 - alpha) * left[k].norm() + alpha * right[k].norm();
                Complex::from_polar(magnitude, phase_acc[k])
            })
            .collect();
        frames.push(frame);

        for k in 0..num_bins {
            let deviation = right[k].arg() - left[k].arg() - phase_advance[k];
            phase_acc[k] += phase_advance[k] + wrap_phase(deviation);
        }

        step += rate;
    }

    Spectrogram {
        frames,
        fft_size: spectrogram.fft_size,
    }
}

fn frame_at<'a>(
    spectrogram: &'a Spectrogram,
    silent: &'a [Complex<f64>],
    index: usize,
) -> &'a [Complex<f64>] {
    spectrogram
        .frames
        .get(index)
        .map(Vec::as_slice)
        .unwrap_or(silent)
}

/// Wraps a phase into [-pi, pi].
#[inline]
fn wrap_phase(phase: f64) -> f64 {
    phase - 2.0 * PI * (phase / (2.0 * PI)).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(freq: f64, sample_rate: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| 0.5 * (2.0 * PI * freq * i as f64 / sample_rate).sin())
            .collect()
    }

    /// Counts upward zero crossings per second over the middle of a signal.
    fn estimate_frequency(samples: &[f64], sample_rate: f64) -> f64 {
        let start = samples.len() / 4;
        let end = samples.len() * 3 / 4;
        let crossings = samples[start..end]
            .windows(2)
            .filter(|w| w[0] < 0.0 && w[1] >= 0.0)
            .count();
        crossings as f64 * sample_rate / (end - start) as f64
    }

    #[test]
    fn test_output_length_follows_rate() {
        let input = tone(220.0, 16000.0, 16000);
        assert_eq!(time_stretch(&input, 2.0).unwrap().len(), 8000);
        assert_eq!(time_stretch(&input, 0.5).unwrap().len(), 32000);
        assert_eq!(time_stretch(&input, 1.12).unwrap().len(), 14286);
    }

    #[test]
    fn test_pitch_is_preserved() {
        let input = tone(440.0, 16000.0, 16000);
        for rate in [0.8, 1.25, 2.0] {
            let out = time_stretch(&input, rate).unwrap();
            let freq = estimate_frequency(&out, 16000.0);
            assert!(
                (freq - 440.0).abs() < 15.0,
                "rate {} moved pitch to {} Hz",
                rate,
                freq
            );
        }
    }

    #[test]
    fn test_unit_rate_is_near_identity() {
        let input = tone(330.0, 16000.0, 4000);
        let out = time_stretch(&input, 1.0).unwrap();
        assert_eq!(out.len(), input.len());
        let max_err = input
            .iter()
            .zip(&out)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0_f64, f64::max);
        assert!(max_err < 1e-6, "max error {}", max_err);
    }

    #[test]
    fn test_rejects_short_input() {
        let err = time_stretch(&[0.1; 100], 1.5).unwrap_err();
        assert!(matches!(err, AudioError::Transform { .. }));
    }

    #[test]
    fn test_rejects_bad_rate() {
        let input = tone(440.0, 16000.0, 1000);
        assert!(time_stretch(&input, 0.0).is_err());
        assert!(time_stretch(&input, -1.0).is_err());
        assert!(time_stretch(&input, f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_runaway_expansion() {
        let input = tone(440.0, 16000.0, 4096);
        let err = time_stretch(&input, 1e-6).unwrap_err();
        assert!(matches!(err, AudioError::Transform { .. }));
        assert_eq!(
            time_stretch(&input, 1.0 / MAX_EXPANSION).unwrap().len(),
            4096 * 16
        );
    }

    #[test]
    fn test_wrap_phase() {
        assert!((wrap_phase(3.0 * PI).abs() - PI).abs() < 1e-12);
        assert!((wrap_phase(0.5) - 0.5).abs() < 1e-12);
        assert!((wrap_phase(-2.0 * PI + 0.25) - 0.25).abs() < 1e-12);
    }
}
