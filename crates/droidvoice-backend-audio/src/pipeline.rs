//! End-to-end phrase rendering.

use droidvoice_spec::{EffectsConfig, VoiceConfig};

use crate::effects::apply_effects;
use crate::encode::{encode, EncodedClip};
use crate::error::{AudioError, AudioResult};
use crate::normalize::normalize;
use crate::resample::resample;
use crate::source::SpeechSource;
use crate::waveform::Waveform;

/// Runs an already-synthesized waveform through the rest of the pipeline.
///
/// Order: effects at the source rate, resample to
/// `config.target_sample_rate`, peak normalize, quantize.
pub fn render_waveform(waveform: &Waveform, config: &EffectsConfig) -> AudioResult<EncodedClip> {
    let processed = apply_effects(waveform, config)?;
    let resampled = resample(&processed, config.target_sample_rate)?;
    let normalized = normalize(&resampled);
    encode(&normalized)
}

/// Synthesizes `text` with `source` and renders it to an 8-bit clip.
///
/// Each call is independent; nothing is cached between phrases.
///
/// # Errors
/// Returns a synthesis error if the source fails or produces no samples,
/// and propagates transform and encoding failures from later stages.
pub fn render_phrase<S: SpeechSource + ?Sized>(
    source: &S,
    text: &str,
    voice: &VoiceConfig,
    config: &EffectsConfig,
) -> AudioResult<EncodedClip> {
    let speech = source.synthesize(text, voice)?;
    if speech.is_empty() {
        return Err(AudioError::synthesis(format!(
            "speech source returned no audio for {:?}",
            text
        )));
    }
    if speech.sample_rate() == 0 {
        return Err(AudioError::InvalidSampleRate { rate: 0 });
    }
    render_waveform(&speech, config)
}
