//! Pre-recorded speech.

use std::path::{Path, PathBuf};

use droidvoice_spec::VoiceConfig;

use crate::error::{AudioError, AudioResult};
use crate::wav::read_wav;
use crate::waveform::Waveform;

use super::{safe_name, SpeechSource};

/// Serves recordings from a directory, one `<safe_name>.wav` per phrase.
///
/// Voice settings are ignored; the recording is used as-is.
#[derive(Debug, Clone)]
pub struct WavFileSource {
    dir: PathBuf,
}

impl WavFileSource {
    /// Creates a source reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the recording path for `text`.
    pub fn path_for(&self, text: &str) -> PathBuf {
        self.dir.join(format!("{}.wav", safe_name(text)))
    }

    /// Returns the directory recordings are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SpeechSource for WavFileSource {
    fn synthesize(&self, text: &str, _voice: &VoiceConfig) -> AudioResult<Waveform> {
        let path = self.path_for(text);
        if !path.is_file() {
            return Err(AudioError::synthesis(format!(
                "no recording for {:?} at {}",
                text,
                path.display()
            )));
        }
        read_wav(&path)
    }
}
