//! Duration-preserving pitch shift.

use crate::error::{AudioError, AudioResult};
use crate::resample::resample_ratio;

use super::time_stretch::time_stretch;

/// Converts semitones to a frequency ratio.
#[inline]
pub fn semitones_to_ratio(semitones: f64) -> f64 {
    2.0_f64.powf(semitones / 12.0)
}

/// Shifts the pitch of `samples` by `semitones` without changing length.
///
/// The signal is time-stretched by `2^(-semitones/12)` and then resampled
/// by the same factor, which restores the original duration while scaling
/// every frequency by `2^(semitones/12)`. The result is trimmed or zero
/// padded to exactly the input length.
///
/// A shift of zero returns the input unchanged.
pub fn pitch_shift(samples: &[f64], semitones: f64) -> AudioResult<Vec<f64>> {
    if !semitones.is_finite() {
        return Err(AudioError::transform(format!(
            "pitch shift must be finite, got {}",
            semitones
        )));
    }
    if semitones == 0.0 {
        return Ok(samples.to_vec());
    }

    let rate = semitones_to_ratio(-semitones);
    let stretched = time_stretch(samples, rate)?;
    let mut shifted = resample_ratio(&stretched, rate)?;
    shifted.resize(samples.len(), 0.0);
    Ok(shifted)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::PI;

    fn tone(freq: f64, sample_rate: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| 0.5 * (2.0 * PI * freq * i as f64 / sample_rate).sin())
            .collect()
    }

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
    fn test_semitone_ratio() {
        assert!((semitones_to_ratio(12.0) - 2.0).abs() < 1e-12);
        assert!((semitones_to_ratio(-12.0) - 0.5).abs() < 1e-12);
        assert_eq!(semitones_to_ratio(0.0), 1.0);
    }

    #[test]
    fn test_length_preserved() {
        let input = tone(300.0, 22050.0, 9000);
        for semitones in [-5.0, 3.0, 8.0, 12.0] {
            assert_eq!(pitch_shift(&input, semitones).unwrap().len(), 9000);
        }
    }

    #[test]
    fn test_octave_up_doubles_frequency() {
        let input = tone(300.0, 16000.0, 16000);
        let out = pitch_shift(&input, 12.0).unwrap();
        let freq = estimate_frequency(&out, 16000.0);
        assert!((freq - 600.0).abs() < 20.0, "got {} Hz", freq);
    }

    #[test]
    fn test_shift_down() {
        let input = tone(800.0, 16000.0, 16000);
        let out = pitch_shift(&input, -12.0).unwrap();
        let freq = estimate_frequency(&out, 16000.0);
        assert!((freq - 400.0).abs() < 20.0, "got {} Hz", freq);
    }

    #[test]
    fn test_zero_shift_is_identity() {
        let input = vec![0.1, -0.2, 0.3];
        assert_eq!(pitch_shift(&input, 0.0).unwrap(), input);
    }

    #[test]
    fn test_short_input_fails() {
        let input = tone(300.0, 16000.0, 64);
        assert!(matches!(
            pitch_shift(&input, 4.0),
            Err(AudioError::Transform { .. })
        ));
    }

    #[test]
    fn test_non_finite_shift_fails() {
        let input = tone(300.0, 16000.0, 1000);
        assert!(pitch_shift(&input, f64::NAN).is_err());
    }

    #[test]
    fn test_huge_upward_shift_fails() {
        let input = tone(300.0, 16000.0, 4096);
        assert!(matches!(
            pitch_shift(&input, 200.0),
            Err(AudioError::Transform { .. })
        ));
    }
}
