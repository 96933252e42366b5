//! Speech source voice settings.
//!
//! The core pipeline never reads these; they are handed to whichever speech
//! source produces the raw waveform.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, ValidationError, ValidationResult};

/// Voice selection and delivery settings for a speech source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoiceConfig {
    /// Preferred voice names, tried in order. A source picks the first voice
    /// whose name contains every word of one of these (case-insensitive,
    /// whole words only).
    #[serde(default = "default_voice_hints")]
    pub voice_hints: Vec<String>,
    /// Speaking rate in words per minute.
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
    /// Maximum time a single synthesis may take, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_voice_hints() -> Vec<String> {
    vec!["david".to_string(), "male".to_string()]
}

fn default_words_per_minute() -> u32 {
    150
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            voice_hints: default_voice_hints(),
            words_per_minute: default_words_per_minute(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl VoiceConfig {
    /// Returns the first available voice matching a hint, trying hints in
    /// order. Matching is by whole word, so `male` never selects `female`.
    pub fn pick_voice<'a>(&self, available: &'a [String]) -> Option<&'a str> {
        self.voice_hints.iter().find_map(|hint| {
            let wanted = words(hint);
            if wanted.is_empty() {
                return None;
            }
            available
                .iter()
                .find(|name| {
                    let have = words(name);
                    wanted.iter().all(|word| have.contains(word))
                })
                .map(String::as_str)
        })
    }

    /// Validates the voice settings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();
        if self.words_per_minute == 0 {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidSpeechRate,
                "speech rate must be positive",
                "words_per_minute",
            ));
        }
        if self.timeout_secs == 0 {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidTimeout,
                "synthesis timeout must be positive",
                "timeout_secs",
            ));
        }
        result
    }
}

/// Splits a voice name into lowercase alphanumeric words.
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}
