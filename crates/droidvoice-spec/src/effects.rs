//! Robot voice effect configuration.
//!
//! An [`EffectsConfig`] is fixed for a pipeline run and passed explicitly into
//! every render call. Field defaults reproduce the stock droid voice: a four
//! semitone lift, ten percent faster delivery, a rising chirp over the last
//! quarter of the clip, and 16 kHz output.

use serde::{Deserialize, Serialize};

use crate::error::{
    ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};

/// Sample rate above which clips waste flash without audible benefit on
/// the target speaker.
const EMBEDDED_SAMPLE_RATE_CEILING: u32 = 22050;

/// Slowest accepted speed rate (four times the input duration).
pub const MIN_SPEED_RATE: f64 = 0.25;

/// Fastest accepted speed rate.
pub const MAX_SPEED_RATE: f64 = 4.0;

/// Largest accepted pitch shift or inflection bend, in either direction.
pub const MAX_SHIFT_SEMITONES: f64 = 24.0;

/// Configuration for the effects chain, resampler, and encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EffectsConfig {
    /// Global pitch shift in semitones (0 = no shift).
    #[serde(default = "default_pitch_shift_semitones")]
    pub pitch_shift_semitones: f64,
    /// Playback speed multiplier (> 1 speeds up).
    #[serde(default = "default_speed_rate")]
    pub speed_rate: f64,
    /// Whether to bend the clip tail upward.
    #[serde(default = "default_inflection_enabled")]
    pub inflection_enabled: bool,
    /// Additional pitch reached at the very end of the tail, in semitones.
    #[serde(default = "default_inflection_semitones")]
    pub inflection_semitones: f64,
    /// Fraction of the clip treated as the tail, in (0, 1).
    #[serde(default = "default_inflection_fraction")]
    pub inflection_fraction: f64,
    /// Output sample rate in Hz.
    #[serde(default = "default_target_sample_rate")]
    pub target_sample_rate: u32,
}

fn default_pitch_shift_semitones() -> f64 {
    4.0
}

fn default_speed_rate() -> f64 {
    1.1
}

fn default_inflection_enabled() -> bool {
    true
}

fn default_inflection_semitones() -> f64 {
    3.0
}

fn default_inflection_fraction() -> f64 {
    0.25
}

fn default_target_sample_rate() -> u32 {
    16000
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            pitch_shift_semitones: default_pitch_shift_semitones(),
            speed_rate: default_speed_rate(),
            inflection_enabled: default_inflection_enabled(),
            inflection_semitones: default_inflection_semitones(),
            inflection_fraction: default_inflection_fraction(),
            target_sample_rate: default_target_sample_rate(),
        }
    }
}

impl EffectsConfig {
    /// Returns a configuration that leaves pitch and speed untouched.
    pub fn passthrough(target_sample_rate: u32) -> Self {
        Self {
            pitch_shift_semitones: 0.0,
            speed_rate: 1.0,
            inflection_enabled: false,
            target_sample_rate,
            ..Self::default()
        }
    }

    /// Sets the global pitch shift.
    pub fn with_pitch_shift(mut self, semitones: f64) -> Self {
        self.pitch_shift_semitones = semitones;
        self
    }

    /// Sets the speed rate.
    pub fn with_speed_rate(mut self, rate: f64) -> Self {
        self.speed_rate = rate;
        self
    }

    /// Enables the tail inflection with the given bend and tail fraction.
    pub fn with_inflection(mut self, semitones: f64, fraction: f64) -> Self {
        self.inflection_enabled = true;
        self.inflection_semitones = semitones;
        self.inflection_fraction = fraction;
        self
    }

    /// Disables the tail inflection.
    pub fn without_inflection(mut self) -> Self {
        self.inflection_enabled = false;
        self
    }

    /// Sets the output sample rate.
    pub fn with_target_sample_rate(mut self, rate: u32) -> Self {
        self.target_sample_rate = rate;
        self
    }

    /// Parses a configuration from JSON, then validates it.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate().into_result()?;
        Ok(config)
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validates every field and collects all problems.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if !(self.pitch_shift_semitones.is_finite()
            && self.pitch_shift_semitones.abs() <= MAX_SHIFT_SEMITONES)
        {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidPitchShift,
                format!(
                    "pitch shift must be within +/-{} semitones, got {}",
                    MAX_SHIFT_SEMITONES, self.pitch_shift_semitones
                ),
                "pitch_shift_semitones",
            ));
        }

        if !(MIN_SPEED_RATE..=MAX_SPEED_RATE).contains(&self.speed_rate) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidSpeedRate,
                format!(
                    "speed rate must be in [{}, {}], got {}",
                    MIN_SPEED_RATE, MAX_SPEED_RATE, self.speed_rate
                ),
                "speed_rate",
            ));
        }

        // Tail settings only matter when the bend is applied.
        if self.inflection_enabled {
            if !(self.inflection_semitones.is_finite()
                && self.inflection_semitones.abs() <= MAX_SHIFT_SEMITONES)
            {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidInflectionSemitones,
                    format!(
                        "inflection must be within +/-{} semitones, got {}",
                        MAX_SHIFT_SEMITONES, self.inflection_semitones
                    ),
                    "inflection_semitones",
                ));
            } else if self.inflection_semitones.abs() > 12.0 {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::LargeInflection,
                    format!(
                        "inflection of {} semitones exceeds an octave",
                        self.inflection_semitones
                    ),
                    "inflection_semitones",
                ));
            }

            if !(self.inflection_fraction > 0.0 && self.inflection_fraction < 1.0) {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidInflectionFraction,
                    format!(
                        "inflection fraction must be in (0, 1), got {}",
                        self.inflection_fraction
                    ),
                    "inflection_fraction",
                ));
            }
        }

        if self.target_sample_rate == 0 {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidSampleRate,
                "target sample rate must be positive",
                "target_sample_rate",
            ));
        } else if self.target_sample_rate > EMBEDDED_SAMPLE_RATE_CEILING {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::HighSampleRate,
                format!(
                    "{} Hz output uses {} bytes per second of flash",
                    self.target_sample_rate, self.target_sample_rate
                ),
                "target_sample_rate",
            ));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = EffectsConfig::default();
        assert_eq!(config.pitch_shift_semitones, 4.0);
        assert_eq!(config.speed_rate, 1.1);
        assert!(config.inflection_enabled);
        assert_eq!(config.target_sample_rate, 16000);
        assert!(config.validate().is_ok());
        assert!(config.validate().warnings.is_empty());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = EffectsConfig::from_json("{}").unwrap();
        assert_eq!(config, EffectsConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config =
            EffectsConfig::from_json(r#"{"pitch_shift_semitones": 8, "speed_rate": 1.12}"#)
                .unwrap();
        assert_eq!(config.pitch_shift_semitones, 8.0);
        assert_eq!(config.speed_rate, 1.12);
        assert_eq!(config.inflection_fraction, 0.25);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = EffectsConfig::from_json(r#"{"bit_depth": 8}"#).unwrap_err();
        assert!(matches!(err, SpecError::JsonParse(_)));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = EffectsConfig::default()
            .with_pitch_shift(-2.5)
            .with_inflection(5.0, 0.4);
        let json = config.to_json_pretty().unwrap();
        let parsed = EffectsConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_speed_rate() {
        for rate in [0.0, -1.0, 1e-6, 0.2, 4.5, f64::NAN, f64::INFINITY] {
            let result = EffectsConfig::default().with_speed_rate(rate).validate();
            assert!(!result.is_ok(), "rate {} should be rejected", rate);
            assert_eq!(result.errors[0].code, ErrorCode::InvalidSpeedRate);
        }
    }

    #[test]
    fn test_speed_rate_bounds_are_inclusive() {
        for rate in [MIN_SPEED_RATE, MAX_SPEED_RATE] {
            assert!(EffectsConfig::default().with_speed_rate(rate).validate().is_ok());
        }
    }

    #[test]
    fn test_extreme_shifts_rejected() {
        let result = EffectsConfig::default().with_pitch_shift(200.0).validate();
        assert_eq!(result.errors[0].code, ErrorCode::InvalidPitchShift);
        assert!(EffectsConfig::default()
            .with_pitch_shift(-MAX_SHIFT_SEMITONES)
            .validate()
            .is_ok());

        let result = EffectsConfig::default().with_inflection(30.0, 0.25).validate();
        assert_eq!(result.errors[0].code, ErrorCode::InvalidInflectionSemitones);
    }

    #[test]
    fn test_invalid_fraction_only_checked_when_enabled() {
        let mut config = EffectsConfig::default().with_inflection(3.0, 1.0);
        let result = config.validate();
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ErrorCode::InvalidInflectionFraction);

        config = config.without_inflection();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let config = EffectsConfig {
            pitch_shift_semitones: f64::NAN,
            speed_rate: 0.0,
            inflection_enabled: true,
            inflection_semitones: f64::INFINITY,
            inflection_fraction: 0.0,
            target_sample_rate: 0,
        };
        let codes: Vec<_> = config.validate().errors.iter().map(|e| e.code).collect();
        assert_eq!(
            codes,
            vec![
                ErrorCode::InvalidPitchShift,
                ErrorCode::InvalidSpeedRate,
                ErrorCode::InvalidInflectionSemitones,
                ErrorCode::InvalidInflectionFraction,
                ErrorCode::InvalidSampleRate,
            ]
        );
    }

    #[test]
    fn test_warnings() {
        let result = EffectsConfig::default()
            .with_target_sample_rate(44100)
            .with_inflection(18.0, 0.3)
            .validate();
        assert!(result.is_ok());
        let codes: Vec<_> = result.warnings.iter().map(|w| w.code).collect();
        assert_eq!(
            codes,
            vec![WarningCode::LargeInflection, WarningCode::HighSampleRate]
        );
    }

    #[test]
    fn test_passthrough() {
        let config = EffectsConfig::passthrough(22050);
        assert_eq!(config.pitch_shift_semitones, 0.0);
        assert_eq!(config.speed_rate, 1.0);
        assert!(!config.inflection_enabled);
        assert_eq!(config.target_sample_rate, 22050);
    }
}
