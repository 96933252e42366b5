//! Band-limited sample rate conversion.
//!
//! Wraps rubato's windowed-sinc resampler for whole, in-memory signals. When
//! the output rate is lower than the input rate rubato lowers the filter
//! cutoff to the output Nyquist frequency, so content that would alias is
//! removed before decimation.

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use crate::error::{AudioError, AudioResult};
use crate::waveform::Waveform;

/// Sinc kernel length in input samples at full bandwidth.
const SINC_LEN: usize = 128;

/// Passband edge as a fraction of the lower Nyquist frequency.
const ROLLOFF: f32 = 0.945;

/// Input frames fed to the resampler per call.
const CHUNK_SIZE: usize = 1024;

/// Converts a waveform to `target_rate`.
///
/// Output length is `ceil(len * target_rate / sample_rate)`. A waveform
/// already at the target rate is returned unchanged.
pub fn resample(waveform: &Waveform, target_rate: u32) -> AudioResult<Waveform> {
    if target_rate == 0 {
        return Err(AudioError::InvalidSampleRate { rate: target_rate });
    }
    if waveform.sample_rate() == 0 {
        return Err(AudioError::InvalidSampleRate {
            rate: waveform.sample_rate(),
        });
    }
    if waveform.is_empty() {
        return Err(AudioError::transform("cannot resample an empty waveform"));
    }
    if waveform.sample_rate() == target_rate {
        return Ok(waveform.clone());
    }

    let ratio = target_rate as f64 / waveform.sample_rate() as f64;
    Ok(Waveform::new(
        resample_ratio(waveform.samples(), ratio)?,
        target_rate,
    ))
}

/// Resamples by an arbitrary output/input rate ratio.
///
/// The whole signal is streamed through one resampler, the tail is flushed
/// with silence, and the filter delay is trimmed so output sample `n` lines
/// up with input time `n / ratio`.
pub(crate) fn resample_ratio(samples: &[f64], ratio: f64) -> AudioResult<Vec<f64>> {
    if samples.is_empty() {
        return Ok(Vec::new());
    }
    if !(ratio.is_finite() && ratio > 0.0) {
        return Err(AudioError::transform(format!(
            "resample ratio must be positive, got {}",
            ratio
        )));
    }

    let params = SincInterpolationParameters {
        sinc_len: SINC_LEN,
        f_cutoff: ROLLOFF,
        interpolation: SincInterpolationType::Cubic,
        oversampling_factor: 256,
        window: WindowFunction::Blackman,
    };
    let mut resampler = SincFixedIn::<f64>::new(ratio, 1.0, params, CHUNK_SIZE, 1)
        .map_err(|e| AudioError::transform(format!("resampler setup failed: {}", e)))?;

    let out_len = (samples.len() as f64 * ratio).ceil() as usize;
    let delay = resampler.output_delay();
    let mut output = Vec::with_capacity(out_len + delay + CHUNK_SIZE);

    let mut pos = 0;
    while samples.len() - pos >= resampler.input_frames_next() {
        let next = pos + resampler.input_frames_next();
        let chunk: [&[f64]; 1] = [&samples[pos..next]];
        let block = resampler
            .process(&chunk[..], None)
            .map_err(resample_failed)?;
        output.extend_from_slice(&block[0]);
        pos = next;
    }
    if pos < samples.len() {
        let rest: [&[f64]; 1] = [&samples[pos..]];
        let block = resampler
            .process_partial(Some(&rest[..]), None)
            .map_err(resample_failed)?;
        output.extend_from_slice(&block[0]);
    }
    while output.len() < delay + out_len {
        let block = resampler
            .process_partial(None::<&[&[f64]]>, None)
            .map_err(resample_failed)?;
        if block[0].is_empty() {
            break;
        }
        output.extend_from_slice(&block[0]);
    }

    output.drain(..delay.min(output.len()));
    output.resize(out_len, 0.0);
    Ok(output)
}

fn resample_failed(err: rubato::ResampleError) -> AudioError {
    AudioError::transform(format!("resampling failed: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::PI;

    fn tone(freq: f64, sample_rate: u32, len: usize) -> Waveform {
        let samples = (0..len)
            .map(|i| (2.0 * PI * freq * i as f64 / sample_rate as f64).sin())
            .collect();
        Waveform::new(samples, sample_rate)
    }

    fn rms(samples: &[f64]) -> f64 {
        (samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64).sqrt()
    }

    #[test]
    fn test_output_length() {
        let wave = Waveform::silence(22050, 22050);
        let out = resample(&wave, 16000).unwrap();
        assert_eq!(out.len(), 16000);
        assert_eq!(out.sample_rate(), 16000);

        let odd = Waveform::silence(1001, 22050);
        // ceil(1001 * 16000 / 22050) = ceil(726.35)
        assert_eq!(resample(&odd, 16000).unwrap().len(), 727);
    }

    #[test]
    fn test_same_rate_is_identity() {
        let wave = tone(440.0, 16000, 500);
        assert_eq!(resample(&wave, 16000).unwrap(), wave);
    }

    #[test]
    fn test_single_sample() {
        let wave = Waveform::new(vec![0.5], 22050);
        let out = resample(&wave, 16000).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out.samples()[0].is_finite());
    }

    #[test]
    fn test_passband_tone_preserved() {
        let input = tone(440.0, 22050, 22050);
        let out = resample(&input, 16000).unwrap();
        // Skip kernel edge effects
        let middle = &out.samples()[1000..15000];
        let expected = 1.0 / 2.0_f64.sqrt();
        assert!(
            (rms(middle) - expected).abs() < 0.02,
            "rms {} vs {}",
            rms(middle),
            expected
        );
    }

    #[test]
    fn test_content_above_target_nyquist_is_removed() {
        // 10 kHz is above the 8 kHz Nyquist limit of 16 kHz output
        let input = tone(10000.0, 44100, 44100);
        let out = resample(&input, 16000).unwrap();
        let middle = &out.samples()[1000..15000];
        assert!(rms(middle) < 0.01, "aliased energy rms {}", rms(middle));
    }

    #[test]
    fn test_upsample_preserves_tone() {
        let input = tone(300.0, 8000, 8000);
        let out = resample(&input, 16000).unwrap();
        assert_eq!(out.len(), 16000);
        let middle = &out.samples()[1000..15000];
        assert!((rms(middle) - 1.0 / 2.0_f64.sqrt()).abs() < 0.02);
    }

    #[test]
    fn test_fractional_ratio_length() {
        // Ratio used by a +4 semitone shift
        let ratio = 2.0_f64.powf(-4.0 / 12.0);
        let input = vec![0.25; 5000];
        let out = resample_ratio(&input, ratio).unwrap();
        assert_eq!(out.len(), (5000.0 * ratio).ceil() as usize);
        // DC level survives away from the edges
        let middle = &out[500..out.len() - 500];
        assert!(middle.iter().all(|s| (s - 0.25).abs() < 0.01));
    }

    #[test]
    fn test_bad_ratio_rejected() {
        assert!(resample_ratio(&[0.1; 16], 0.0).is_err());
        assert!(resample_ratio(&[0.1; 16], f64::NAN).is_err());
        assert!(resample_ratio(&[], 2.0).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_rates() {
        let wave = Waveform::silence(10, 16000);
        assert!(matches!(
            resample(&wave, 0),
            Err(AudioError::InvalidSampleRate { rate: 0 })
        ));
        let empty = Waveform::new(Vec::new(), 16000);
        assert!(resample(&empty, 8000).is_err());
    }
}
