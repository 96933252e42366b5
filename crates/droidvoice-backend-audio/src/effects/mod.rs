//! Robot voice effects.
//!
//! The chain is fixed: time-stretch, then global pitch shift, then the tail
//! inflection. Each stage consumes the previous stage's output. Stages that
//! would be identities for the given configuration are skipped.

pub mod inflection;
pub mod pitch_shift;
pub mod time_stretch;

use droidvoice_spec::EffectsConfig;

use crate::error::{AudioError, AudioResult};
use crate::waveform::Waveform;

pub use inflection::{apply_inflection, plan_chunks, ChunkShift, INFLECTION_CHUNKS, MIN_TAIL_SAMPLES};
pub use pitch_shift::{pitch_shift, semitones_to_ratio};
pub use time_stretch::time_stretch;

/// One stage of the effects chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectStage {
    /// Change duration by `1 / rate`, keeping pitch.
    TimeStretch {
        /// Speed multiplier.
        rate: f64,
    },
    /// Shift pitch, keeping duration.
    PitchShift {
        /// Shift in semitones.
        semitones: f64,
    },
    /// Rising bend over the clip tail.
    Inflection {
        /// Bend reached at the end of the clip.
        semitones: f64,
        /// Fraction of the clip treated as tail.
        fraction: f64,
    },
}

/// Lists the stages `config` requires, in processing order.
pub fn plan_stages(config: &EffectsConfig) -> Vec<EffectStage> {
    let mut stages = Vec::with_capacity(3);

    if config.speed_rate != 1.0 {
        stages.push(EffectStage::TimeStretch {
            rate: config.speed_rate,
        });
    }
    if config.pitch_shift_semitones != 0.0 {
        stages.push(EffectStage::PitchShift {
            semitones: config.pitch_shift_semitones,
        });
    }
    if config.inflection_enabled && config.inflection_semitones != 0.0 {
        stages.push(EffectStage::Inflection {
            semitones: config.inflection_semitones,
            fraction: config.inflection_fraction,
        });
    }

    stages
}

/// Applies the effects chain to a waveform.
///
/// The output keeps the input's sample rate; conversion to the target rate
/// happens later in the pipeline.
///
/// # Errors
/// Returns [`AudioError::InvalidConfig`] for an invalid configuration and
/// [`AudioError::Transform`] when a stage cannot process the waveform (for
/// example, fewer samples than the minimum FFT window).
pub fn apply_effects(waveform: &Waveform, config: &EffectsConfig) -> AudioResult<Waveform> {
    let validation = config.validate();
    if !validation.is_ok() {
        let messages: Vec<String> = validation.errors.iter().map(|e| e.to_string()).collect();
        return Err(AudioError::invalid_config(messages.join("; ")));
    }
    if waveform.is_empty() {
        return Err(AudioError::transform("waveform has no samples"));
    }
    if !waveform.is_finite() {
        return Err(AudioError::transform("waveform contains non-finite samples"));
    }

    let mut samples = waveform.samples().to_vec();
    for stage in plan_stages(config) {
        samples = match stage {
            EffectStage::TimeStretch { rate } => time_stretch(&samples, rate)?,
            EffectStage::PitchShift { semitones } => pitch_shift(&samples, semitones)?,
            EffectStage::Inflection {
                semitones,
                fraction,
            } => apply_inflection(&samples, semitones, fraction)?,
        };
    }

    Ok(Waveform::new(samples, waveform.sample_rate()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use std::f64::consts::PI;

    fn voiced(len: usize, sample_rate: u32) -> Waveform {
        let sr = sample_rate as f64;
        let samples = (0..len)
            .map(|i| {
                let t = i as f64 / sr;
                0.4 * (2.0 * PI * 150.0 * t).sin()
                    + 0.2 * (2.0 * PI * 300.0 * t).sin()
                    + 0.1 * (2.0 * PI * 450.0 * t).sin()
            })
            .collect();
        Waveform::new(samples, sample_rate)
    }

    #[test]
    fn test_plan_default_config() {
        let stages = plan_stages(&EffectsConfig::default());
        assert_eq!(
            stages,
            vec![
                EffectStage::TimeStretch { rate: 1.1 },
                EffectStage::PitchShift { semitones: 4.0 },
                EffectStage::Inflection {
                    semitones: 3.0,
                    fraction: 0.25
                },
            ]
        );
    }

    #[test]
    fn test_plan_passthrough_is_empty() {
        assert!(plan_stages(&EffectsConfig::passthrough(16000)).is_empty());
    }

    #[test]
    fn test_passthrough_returns_input() {
        let wave = voiced(100, 22050);
        let out = apply_effects(&wave, &EffectsConfig::passthrough(16000)).unwrap();
        assert_eq!(out, wave);
    }

    #[test]
    fn test_duration_scaling() {
        let wave = voiced(22050, 22050);
        let config = EffectsConfig::passthrough(16000);

        let normal = apply_effects(&wave, &config.clone().with_speed_rate(1.0)).unwrap();
        let fast = apply_effects(&wave, &config.with_speed_rate(2.0)).unwrap();

        let ratio = fast.len() as f64 / normal.len() as f64;
        assert!((ratio - 0.5).abs() < 0.01, "ratio {}", ratio);
        assert_eq!(fast.sample_rate(), 22050);
    }

    #[test]
    fn test_full_chain_length() {
        let wave = voiced(22050, 22050);
        let out = apply_effects(&wave, &EffectsConfig::default()).unwrap();
        // Pitch and inflection keep length; only the stretch changes it
        assert_eq!(out.len(), (22050.0_f64 / 1.1).round() as usize);
        assert!(out.is_finite());
    }

    #[test]
    fn test_inflection_guard_matches_stretch_and_shift_only() {
        // 0.1 s at 22.05 kHz: tail of 551 samples is below the guard
        let wave = voiced(2205, 22050);
        let with_bend = EffectsConfig::default().with_inflection(3.0, 0.25);
        let without_bend = with_bend.clone().without_inflection();

        let bent = apply_effects(&wave, &with_bend).unwrap();
        let plain = apply_effects(&wave, &without_bend).unwrap();
        assert_eq!(bent, plain);
    }

    #[test]
    fn test_inflection_changes_only_tail() {
        let wave = voiced(22050, 22050);
        let base = EffectsConfig::default().with_pitch_shift(0.0).with_speed_rate(1.0);
        let bent = apply_effects(&wave, &base.clone().with_inflection(4.0, 0.3)).unwrap();
        let plain = apply_effects(&wave, &base.without_inflection()).unwrap();

        let head = 22050 - (22050.0_f64 * 0.3).round() as usize;
        assert_eq!(bent.len(), plain.len());
        assert_eq!(&bent.samples()[..head], &plain.samples()[..head]);
        assert_ne!(&bent.samples()[head..], &plain.samples()[head..]);
    }

    #[test]
    fn test_short_waveform_is_transform_failure() {
        let wave = voiced(100, 22050);
        let err = apply_effects(&wave, &EffectsConfig::default()).unwrap_err();
        assert!(matches!(err, AudioError::Transform { .. }), "{}", err);
    }

    #[test]
    fn test_empty_waveform_fails() {
        let wave = Waveform::new(Vec::new(), 22050);
        assert!(apply_effects(&wave, &EffectsConfig::default()).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let wave = voiced(4096, 22050);
        let config = EffectsConfig::default().with_speed_rate(0.0);
        assert!(matches!(
            apply_effects(&wave, &config),
            Err(AudioError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_extreme_rates_rejected_before_processing() {
        let wave = voiced(4096, 16000);
        for config in [
            EffectsConfig::passthrough(16000).with_speed_rate(1e-6),
            EffectsConfig::passthrough(16000).with_pitch_shift(400.0),
        ] {
            assert!(matches!(
                apply_effects(&wave, &config),
                Err(AudioError::InvalidConfig { .. })
            ));
        }
    }

    #[test]
    fn test_silence_stays_silent() {
        let wave = Waveform::silence(8000, 16000);
        let out = apply_effects(&wave, &EffectsConfig::default()).unwrap();
        assert!(out.samples().iter().all(|s| s.abs() < 1e-12));
    }
}
