//! Loading configuration, catalogs and speech sources.
//!
//! Every file is optional: a missing path falls back to the built-in
//! default. Files are validated after parsing and warnings are handed back
//! to the caller for display.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

use droidvoice_backend_audio::{CommandSource, CommandSourceConfig, SpeechSource, WavFileSource};
use droidvoice_spec::{
    EffectsConfig, PhraseCatalog, ValidationResult, ValidationWarning, VoiceConfig,
};

/// Default output directory.
pub const DEFAULT_OUT_DIR: &str = "./droid_sounds";

/// A value loaded from disk (or defaulted) plus its validation warnings.
#[derive(Debug)]
pub struct Loaded<T> {
    /// The validated value.
    pub value: T,
    /// Non-fatal problems found during validation.
    pub warnings: Vec<ValidationWarning>,
}

/// How speech is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// External text-to-speech program.
    Tts,
    /// Pre-recorded WAV files.
    Recordings,
}

impl SourceKind {
    /// Returns the string representation for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Tts => "tts",
            SourceKind::Recordings => "recordings",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Speech source flags shared by the rendering commands.
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    /// Explicit text-to-speech executable.
    pub tts: Option<String>,
    /// Directory of pre-recorded clips.
    pub recordings: Option<String>,
}

impl SourceOptions {
    /// Returns which kind of source these options select.
    pub fn kind(&self) -> SourceKind {
        if self.recordings.is_some() {
            SourceKind::Recordings
        } else {
            SourceKind::Tts
        }
    }

    /// Builds the selected speech source.
    ///
    /// The text-to-speech executable is located lazily on first use, so a
    /// missing program surfaces as a per-phrase synthesis failure.
    pub fn build(&self) -> Result<Box<dyn SpeechSource>> {
        if let Some(ref dir) = self.recordings {
            let dir = Path::new(dir);
            if !dir.is_dir() {
                anyhow::bail!("Recordings directory does not exist: {}", dir.display());
            }
            return Ok(Box::new(WavFileSource::new(dir)));
        }

        let mut config = CommandSourceConfig::default();
        if let Some(ref path) = self.tts {
            config = config.executable(path);
        }
        Ok(Box::new(CommandSource::with_config(config)))
    }
}

fn load_json<T: DeserializeOwned>(path: &str, what: &str) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}: {}", what, path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}: {}", what, path))
}

fn check(validation: ValidationResult, what: &str) -> Result<Vec<ValidationWarning>> {
    validation
        .into_result()
        .with_context(|| format!("Invalid {}", what))
}

/// Loads the effects configuration, or the defaults when `path` is `None`.
pub fn load_effects_config(path: Option<&str>) -> Result<Loaded<EffectsConfig>> {
    let value: EffectsConfig = match path {
        Some(path) => load_json(path, "effects config")?,
        None => EffectsConfig::default(),
    };
    let warnings = check(value.validate(), "effects config")?;
    Ok(Loaded { value, warnings })
}

/// Loads the voice configuration, or the defaults when `path` is `None`.
pub fn load_voice_config(path: Option<&str>) -> Result<Loaded<VoiceConfig>> {
    let value: VoiceConfig = match path {
        Some(path) => load_json(path, "voice config")?,
        None => VoiceConfig::default(),
    };
    let warnings = check(value.validate(), "voice config")?;
    Ok(Loaded { value, warnings })
}

/// Loads a phrase catalog, or the built-in one when `path` is `None`.
pub fn load_catalog(path: Option<&str>) -> Result<Loaded<PhraseCatalog>> {
    let value: PhraseCatalog = match path {
        Some(path) => load_json(path, "phrase catalog")?,
        None => PhraseCatalog::builtin(),
    };
    let warnings = check(value.validate(), "phrase catalog")?;
    Ok(Loaded { value, warnings })
}
