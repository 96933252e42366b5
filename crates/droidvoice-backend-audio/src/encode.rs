//! Quantization to unsigned 8-bit PCM.
//!
//! Sample `s` in [-1, 1] maps to `round((s + 1) * 127.5)`, which puts -1.0 at
//! 0, 1.0 at 255 and silence at 128. The mapping is lossy; decoding an
//! [`EncodedClip`] only approximates the original waveform.

use std::io::Write;
use std::path::Path;

use crate::error::{AudioError, AudioResult};
use crate::wav::{wav_bytes, write_wav, WAV_HEADER_LEN};
use crate::waveform::Waveform;

/// Byte value representing zero amplitude.
pub const SILENCE: u8 = 128;

/// A quantized mono clip ready for embedded playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedClip {
    samples: Vec<u8>,
    sample_rate: u32,
}

impl EncodedClip {
    /// Wraps already-quantized samples.
    pub fn new(samples: Vec<u8>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Returns the quantized samples.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Returns the sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Returns the number of samples (equal to the number of PCM bytes).
    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Returns the size of the WAV container in bytes.
    pub fn wav_size(&self) -> usize {
        WAV_HEADER_LEN + self.samples.len()
    }

    /// Returns the mean byte value (128 for a centred clip).
    pub fn mean_value(&self) -> f64 {
        if self.samples.is_empty() {
            return SILENCE as f64;
        }
        self.samples.iter().map(|&b| b as f64).sum::<f64>() / self.samples.len() as f64
    }

    /// Returns the BLAKE3 hash of the PCM payload.
    pub fn pcm_hash(&self) -> String {
        blake3::hash(&self.samples).to_hex().to_string()
    }

    /// Returns the complete WAV file.
    pub fn to_wav_bytes(&self) -> Vec<u8> {
        wav_bytes(self.sample_rate, &self.samples)
    }

    /// Writes the complete WAV file to `writer`.
    pub fn write_wav<W: Write>(&self, writer: &mut W) -> AudioResult<()> {
        write_wav(writer, self.sample_rate, &self.samples)?;
        Ok(())
    }

    /// Writes the clip to a WAV file at `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> AudioResult<()> {
        std::fs::write(path, self.to_wav_bytes())?;
        Ok(())
    }

    /// Expands the clip back to floating point samples.
    pub fn to_waveform(&self) -> Waveform {
        let samples = self
            .samples
            .iter()
            .map(|&b| b as f64 / 127.5 - 1.0)
            .collect();
        Waveform::new(samples, self.sample_rate)
    }
}

/// Quantizes one sample, clamping out-of-range input first.
#[inline]
pub fn quantize_sample(sample: f64) -> u8 {
    let clamped = sample.clamp(-1.0, 1.0);
    ((clamped + 1.0) * 127.5).round().clamp(0.0, 255.0) as u8
}

/// Quantizes a normalized waveform into an [`EncodedClip`].
///
/// # Errors
/// Returns [`AudioError::Encoding`] for an empty waveform, a zero sample
/// rate, or non-finite samples.
pub fn encode(waveform: &Waveform) -> AudioResult<EncodedClip> {
    if waveform.is_empty() {
        return Err(AudioError::encoding("waveform has no samples"));
    }
    if waveform.sample_rate() == 0 {
        return Err(AudioError::encoding("waveform has a zero sample rate"));
    }
    if let Some(index) = waveform.samples().iter().position(|s| !s.is_finite()) {
        return Err(AudioError::encoding(format!(
            "sample {} is not finite",
            index
        )));
    }

    let samples = waveform
        .samples()
        .iter()
        .map(|&s| quantize_sample(s))
        .collect();
    Ok(EncodedClip::new(samples, waveform.sample_rate()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_quantize_anchors() {
        assert_eq!(quantize_sample(-1.0), 0);
        assert_eq!(quantize_sample(0.0), SILENCE);
        assert_eq!(quantize_sample(1.0), 255);
    }

    #[test]
    fn test_quantize_clamps() {
        assert_eq!(quantize_sample(1.0000001), 255);
        assert_eq!(quantize_sample(42.0), 255);
        assert_eq!(quantize_sample(-3.0), 0);
        assert_eq!(quantize_sample(f64::MAX), 255);
        assert_eq!(quantize_sample(f64::MIN), 0);
    }

    #[test]
    fn test_quantize_rounding() {
        // (0.5 + 1) * 127.5 = 191.25
        assert_eq!(quantize_sample(0.5), 191);
        // (-0.5 + 1) * 127.5 = 63.75
        assert_eq!(quantize_sample(-0.5), 64);
    }

    #[test]
    fn test_quantize_is_monotonic() {
        let mut previous = 0;
        for i in -1000..=1000 {
            let value = quantize_sample(i as f64 / 1000.0);
            assert!(value >= previous);
            previous = value;
        }
        assert_eq!(previous, 255);
    }

    #[test]
    fn test_encode_byte_count_matches_samples() {
        let wave = Waveform::new(vec![0.0, 0.25, -0.75, 1.0, -1.0], 16000);
        let clip = encode(&wave).unwrap();
        assert_eq!(clip.num_samples(), wave.len());
        assert_eq!(clip.samples(), &[128, 159, 32, 255, 0]);
        assert_eq!(clip.sample_rate(), 16000);
    }

    #[test]
    fn test_encode_rejects_empty() {
        let err = encode(&Waveform::new(Vec::new(), 16000)).unwrap_err();
        assert!(matches!(err, AudioError::Encoding { .. }));
    }

    #[test]
    fn test_encode_rejects_nan() {
        let err = encode(&Waveform::new(vec![0.0, f64::NAN], 16000)).unwrap_err();
        assert!(err.to_string().contains("sample 1"));
    }

    #[test]
    fn test_silence_encodes_to_center() {
        let clip = encode(&Waveform::silence(100, 16000)).unwrap();
        assert!(clip.samples().iter().all(|&b| b == SILENCE));
        assert_eq!(clip.mean_value(), 128.0);
    }

    #[test]
    fn test_to_waveform_is_approximate_inverse() {
        let wave = Waveform::new(vec![0.3, -0.6, 0.9], 16000);
        let back = encode(&wave).unwrap().to_waveform();
        for (a, b) in wave.samples().iter().zip(back.samples()) {
            assert!((a - b).abs() <= 1.0 / 127.5);
        }
    }

    #[test]
    fn test_wav_bytes() {
        let clip = EncodedClip::new(vec![128; 10], 16000);
        let wav = clip.to_wav_bytes();
        assert_eq!(wav.len(), clip.wav_size());
        assert_eq!(&wav[44..], clip.samples());
    }

    #[test]
    fn test_duration() {
        let clip = EncodedClip::new(vec![128; 8000], 16000);
        assert!((clip.duration_seconds() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_pcm_hash_is_stable() {
        let a = EncodedClip::new(vec![1, 2, 3], 16000);
        let b = EncodedClip::new(vec![1, 2, 3], 8000);
        assert_eq!(a.pcm_hash(), b.pcm_hash());
        assert_ne!(a.pcm_hash(), EncodedClip::new(vec![1, 2, 4], 16000).pcm_hash());
    }
}
