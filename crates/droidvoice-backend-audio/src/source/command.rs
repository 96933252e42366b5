//! External text-to-speech executable.
//!
//! Runs an espeak-compatible program that understands `-s <wpm>`,
//! `-v <voice>`, `-w <file>` and `--voices`, writing into a temporary
//! directory that is removed when the render finishes.

use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::OnceLock;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use droidvoice_spec::VoiceConfig;

use crate::error::{AudioError, AudioResult};
use crate::wav::read_wav;
use crate::waveform::Waveform;

use super::SpeechSource;

/// Default timeout for a single synthesis.
pub const DEFAULT_TTS_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the executable.
pub const TTS_PATH_ENV: &str = "DROIDVOICE_TTS_PATH";

const TTS_NAMES: &[&str] = &["espeak-ng", "espeak"];

/// Configuration for [`CommandSource`].
#[derive(Debug, Clone, Default)]
pub struct CommandSourceConfig {
    /// Path to the executable. Looked up when unset.
    pub executable: Option<PathBuf>,
    /// Arguments passed before the synthesis flags.
    pub leading_args: Vec<OsString>,
    /// Overrides the timeout from [`VoiceConfig`].
    pub timeout: Option<Duration>,
}

impl CommandSourceConfig {
    /// Sets the executable path.
    pub fn executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    /// Appends a leading argument.
    pub fn leading_arg(mut self, arg: impl Into<OsString>) -> Self {
        self.leading_args.push(arg.into());
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }
}

/// Speech source backed by an external program.
#[derive(Debug, Default)]
pub struct CommandSource {
    config: CommandSourceConfig,
    voices: OnceLock<Vec<String>>,
}

impl CommandSource {
    /// Creates a source with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source with the given configuration.
    pub fn with_config(config: CommandSourceConfig) -> Self {
        Self {
            config,
            voices: OnceLock::new(),
        }
    }

    /// Finds the executable: config, then `DROIDVOICE_TTS_PATH`, then `PATH`.
    pub fn find_executable(&self) -> AudioResult<PathBuf> {
        if let Some(ref path) = self.config.executable {
            if path.exists() {
                return Ok(path.clone());
            }
        }

        if let Ok(path) = std::env::var(TTS_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
        }

        for name in TTS_NAMES {
            if let Ok(path) = which::which(name) {
                return Ok(path);
            }
        }

        Err(AudioError::TtsNotFound)
    }

    fn command(&self, executable: &Path) -> Command {
        let mut cmd = Command::new(executable);
        cmd.args(&self.config.leading_args);
        cmd
    }

    fn timeout_for(&self, voice: &VoiceConfig) -> Duration {
        self.config
            .timeout
            .unwrap_or_else(|| Duration::from_secs(voice.timeout_secs))
    }

    /// Lists installed voices, once per source. A failed listing counts as
    /// no voices so synthesis falls back to the program's default.
    fn voices(&self, executable: &Path, timeout: Duration) -> &[String] {
        self.voices.get_or_init(|| {
            let mut cmd = self.command(executable);
            cmd.arg("--voices")
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::null());

            let Ok(child) = cmd.spawn() else {
                return Vec::new();
            };
            match wait_with_timeout(child, timeout) {
                Ok(output) if output.status.success() => parse_voice_list(&output.stdout),
                _ => Vec::new(),
            }
        })
    }
}

impl SpeechSource for CommandSource {
    fn synthesize(&self, text: &str, voice: &VoiceConfig) -> AudioResult<Waveform> {
        let executable = self.find_executable()?;
        let timeout = self.timeout_for(voice);

        let voice_id = if voice.voice_hints.is_empty() {
            None
        } else {
            voice
                .pick_voice(self.voices(&executable, timeout))
                .and_then(|entry| entry.split_whitespace().next())
                .map(str::to_string)
        };

        let temp_dir = tempfile::tempdir()?;
        let wav_path = temp_dir.path().join("speech.wav");

        let mut cmd = self.command(&executable);
        cmd.arg("-s").arg(voice.words_per_minute.to_string());
        if let Some(ref id) = voice_id {
            cmd.arg("-v").arg(id);
        }
        cmd.arg("-w")
            .arg(&wav_path)
            .arg("--")
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let child = cmd.spawn().map_err(AudioError::SpawnFailed)?;
        let output = wait_with_timeout(child, timeout)?;

        if !output.status.success() {
            let exit_code = output.status.code().unwrap_or(-1);
            return Err(AudioError::process_failed(exit_code, output.stderr));
        }
        if !wav_path.is_file() {
            return Err(AudioError::synthesis(format!(
                "text-to-speech produced no audio for {:?}",
                text
            )));
        }

        read_wav(&wav_path)
    }
}

/// Parses `--voices` output into `"<id> <name> <gender>"` entries.
///
/// The first column block is a header; each following row reads
/// `pty language age/gender name file [other languages]`. The language code
/// comes first in the entry since that is what `-v` accepts.
pub fn parse_voice_list(output: &str) -> Vec<String> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let columns: Vec<&str> = line.split_whitespace().collect();
            if columns.len() < 4 {
                return None;
            }
            let gender = match columns[2].rsplit('/').next() {
                Some("M") => "male",
                Some("F") => "female",
                _ => "unknown",
            };
            Some(format!("{} {} {}", columns[1], columns[3], gender))
        })
        .collect()
}

struct ProcessOutput {
    status: ExitStatus,
    stdout: String,
    stderr: String,
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = String::new();
            let _ = pipe.read_to_string(&mut buf);
            buf
        })
    })
}

fn join(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

fn wait_with_timeout(mut child: Child, timeout: Duration) -> AudioResult<ProcessOutput> {
    let start = Instant::now();
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(AudioError::Timeout {
                        timeout_secs: timeout.as_secs(),
                    });
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(e) => return Err(AudioError::SpawnFailed(e)),
        }
    };

    Ok(ProcessOutput {
        status,
        stdout: join(stdout),
        stderr: join(stderr),
    })
}
