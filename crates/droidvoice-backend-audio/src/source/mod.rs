//! Speech sources.
//!
//! A speech source turns text into a raw mono waveform at whatever sample rate
//! it natively produces. The rest of the pipeline treats it as opaque.

mod command;
mod file;

pub use command::{parse_voice_list, CommandSource, CommandSourceConfig, DEFAULT_TTS_TIMEOUT_SECS};
pub use file::WavFileSource;

use droidvoice_spec::VoiceConfig;

use crate::error::AudioResult;
use crate::waveform::Waveform;

/// Number of characters of the phrase kept in file names.
pub const SAFE_NAME_CHARS: usize = 30;

/// Produces speech audio for a phrase.
pub trait SpeechSource {
    /// Synthesizes `text` with the given voice settings.
    fn synthesize(&self, text: &str, voice: &VoiceConfig) -> AudioResult<Waveform>;
}

impl<F> SpeechSource for F
where
    F: Fn(&str, &VoiceConfig) -> AudioResult<Waveform>,
{
    fn synthesize(&self, text: &str, voice: &VoiceConfig) -> AudioResult<Waveform> {
        self(text, voice)
    }
}

/// Builds a file-name-safe stem from a phrase.
///
/// Keeps the first [`SAFE_NAME_CHARS`] characters and replaces every
/// character that is not alphanumeric with `_`.
pub fn safe_name(text: &str) -> String {
    text.chars()
        .take(SAFE_NAME_CHARS)
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_safe_name() {
        assert_eq!(safe_name("Hi!"), "Hi_");
        assert_eq!(safe_name("Wake up, friend"), "Wake_up__friend");
        assert_eq!(safe_name(""), "");
    }

    #[test]
    fn test_safe_name_truncates() {
        let name = safe_name("This sentence is definitely longer than thirty characters");
        assert_eq!(name.chars().count(), SAFE_NAME_CHARS);
        assert_eq!(name, "This_sentence_is_definitely_lo");
    }

    #[test]
    fn test_safe_name_counts_characters_not_bytes() {
        assert_eq!(safe_name("héllo wörld"), "héllo_wörld");
    }

    #[test]
    fn test_closure_is_a_source() {
        let source = |text: &str, _voice: &VoiceConfig| -> AudioResult<Waveform> {
            Ok(Waveform::silence(text.len(), 8000))
        };
        let wave = source.synthesize("abcd", &VoiceConfig::default()).unwrap();
        assert_eq!(wave.len(), 4);
    }
}
