//! Error types for the audio backend.

use droidvoice_spec::BackendError;
use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Broad failure classes a caller can act on.
///
/// Every failure is terminal for the phrase being rendered; there is no
/// degraded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The speech source could not produce audio for the text.
    Synthesis,
    /// An effects stage could not process the waveform.
    Transform,
    /// The waveform could not be quantized.
    Encoding,
    /// The render configuration is invalid.
    Config,
    /// Reading or writing a file failed.
    Io,
}

/// Errors that can occur while rendering a clip.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Speech source failure.
    #[error("synthesis failed: {message}")]
    Synthesis {
        /// Error message.
        message: String,
    },

    /// No text-to-speech executable could be located.
    #[error("text-to-speech executable not found. Install espeak-ng or set DROIDVOICE_TTS_PATH")]
    TtsNotFound,

    /// Failed to spawn the text-to-speech process.
    #[error("failed to spawn text-to-speech process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// Text-to-speech process timed out.
    #[error("text-to-speech process timed out after {timeout_secs} seconds")]
    Timeout {
        /// Timeout that elapsed.
        timeout_secs: u64,
    },

    /// Text-to-speech process exited with non-zero status.
    #[error("text-to-speech process exited with status {exit_code}: {stderr}")]
    ProcessFailed {
        /// Process exit code (-1 when killed by a signal).
        exit_code: i32,
        /// Captured standard error.
        stderr: String,
    },

    /// An effects stage could not process the waveform.
    #[error("transform failed: {message}")]
    Transform {
        /// Error message.
        message: String,
    },

    /// The waveform could not be quantized.
    #[error("encoding failed: {message}")]
    Encoding {
        /// Error message.
        message: String,
    },

    /// Invalid effects configuration.
    #[error("invalid effects configuration: {message}")]
    InvalidConfig {
        /// Error message.
        message: String,
    },

    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// WAV decoding error.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Creates a synthesis error.
    pub fn synthesis(message: impl Into<String>) -> Self {
        Self::Synthesis {
            message: message.into(),
        }
    }

    /// Creates a transform error.
    pub fn transform(message: impl Into<String>) -> Self {
        Self::Transform {
            message: message.into(),
        }
    }

    /// Creates an encoding error.
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates a process failure error.
    pub fn process_failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::ProcessFailed {
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Returns the failure class of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            AudioError::Synthesis { .. }
            | AudioError::TtsNotFound
            | AudioError::SpawnFailed(_)
            | AudioError::Timeout { .. }
            | AudioError::ProcessFailed { .. } => FailureKind::Synthesis,
            AudioError::Transform { .. } => FailureKind::Transform,
            AudioError::Encoding { .. } => FailureKind::Encoding,
            AudioError::InvalidConfig { .. } | AudioError::InvalidSampleRate { .. } => {
                FailureKind::Config
            }
            AudioError::Wav(_) | AudioError::Io(_) => FailureKind::Io,
        }
    }
}

impl BackendError for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::Synthesis { .. } => "AUDIO_001",
            AudioError::TtsNotFound => "AUDIO_002",
            AudioError::SpawnFailed(_) => "AUDIO_003",
            AudioError::Timeout { .. } => "AUDIO_004",
            AudioError::ProcessFailed { .. } => "AUDIO_005",
            AudioError::Transform { .. } => "AUDIO_006",
            AudioError::Encoding { .. } => "AUDIO_007",
            AudioError::InvalidConfig { .. } => "AUDIO_008",
            AudioError::InvalidSampleRate { .. } => "AUDIO_009",
            AudioError::Wav(_) => "AUDIO_010",
            AudioError::Io(_) => "AUDIO_011",
        }
    }

    fn category(&self) -> &'static str {
        "audio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_helper() {
        let err = AudioError::transform("need at least 256 samples");
        assert!(err.to_string().contains("256 samples"));
        assert_eq!(err.kind(), FailureKind::Transform);
        assert_eq!(err.code(), "AUDIO_006");
    }

    #[test]
    fn test_subprocess_errors_are_synthesis_failures() {
        let errors = [
            AudioError::TtsNotFound,
            AudioError::Timeout { timeout_secs: 5 },
            AudioError::process_failed(1, "no voice"),
            AudioError::synthesis("empty output"),
        ];
        for err in errors {
            assert_eq!(err.kind(), FailureKind::Synthesis, "{}", err);
        }
    }

    #[test]
    fn test_category() {
        assert_eq!(AudioError::encoding("empty").category(), "audio");
    }
}
