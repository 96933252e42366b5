//! Rendering one phrase to a file and recording the outcome.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

use droidvoice_backend_audio::{render_phrase, AudioError, SpeechSource};
use droidvoice_spec::{BackendError, EffectsConfig, VoiceConfig};

/// Outcome of rendering a single phrase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipReport {
    /// Phrase text.
    pub phrase: String,
    /// Catalog category, if rendered from the catalog.
    pub category: Option<String>,
    /// 1-based position within the category.
    pub number: Option<usize>,
    /// Output file path.
    pub path: String,
    /// Whether the clip was written.
    pub success: bool,
    /// Error message if failed.
    pub error: Option<String>,
    /// Stable error code if failed.
    pub error_code: Option<String>,
    /// WAV file size in bytes (header included).
    pub size_bytes: u64,
    /// Number of 8-bit samples.
    pub num_samples: usize,
    /// Clip duration in seconds.
    pub duration_seconds: f64,
    /// BLAKE3 hash of the PCM payload.
    pub pcm_hash: Option<String>,
    /// Render time in milliseconds.
    pub render_ms: u64,
}

impl ClipReport {
    /// Returns the output file name.
    pub fn file_name(&self) -> String {
        Path::new(&self.path)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.clone())
    }
}

/// Renders `text` and writes the clip to `path`.
///
/// Failures are recorded in the report, never propagated, so a batch can
/// carry on with the next phrase.
pub(crate) fn render_to_file(
    source: &dyn SpeechSource,
    text: &str,
    voice: &VoiceConfig,
    effects: &EffectsConfig,
    path: &Path,
) -> ClipReport {
    let start = Instant::now();
    let mut report = ClipReport {
        phrase: text.to_string(),
        category: None,
        number: None,
        path: path.to_string_lossy().to_string(),
        success: false,
        error: None,
        error_code: None,
        size_bytes: 0,
        num_samples: 0,
        duration_seconds: 0.0,
        pcm_hash: None,
        render_ms: 0,
    };

    let outcome = render_phrase(source, text, voice, effects).and_then(|clip| {
        clip.save(path)?;
        Ok(clip)
    });

    match outcome {
        Ok(clip) => {
            report.success = true;
            report.size_bytes = clip.wav_size() as u64;
            report.num_samples = clip.num_samples();
            report.duration_seconds = clip.duration_seconds();
            report.pcm_hash = Some(clip.pcm_hash());
        }
        Err(e) => record_error(&mut report, &e),
    }

    report.render_ms = start.elapsed().as_millis() as u64;
    report
}

fn record_error(report: &mut ClipReport, error: &AudioError) {
    report.error = Some(error.to_string());
    report.error_code = Some(error.code().to_string());
}
