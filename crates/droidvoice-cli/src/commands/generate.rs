//! Generate command implementation
//!
//! Renders one phrase to `custom_<name>.wav` in the output directory.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use droidvoice_backend_audio::safe_name;

use super::render::{render_to_file, ClipReport};
use super::reporting::{clip_line, print_warnings};
use crate::input::{load_effects_config, load_voice_config, SourceOptions, DEFAULT_OUT_DIR};

/// Returns the output path for a single custom phrase.
pub fn custom_clip_path(out_dir: &Path, text: &str) -> PathBuf {
    out_dir.join(format!("custom_{}.wav", safe_name(text)))
}

/// Run the generate command
///
/// # Arguments
/// * `text` - Phrase to render
/// * `out_dir` - Output directory (default: ./droid_sounds)
/// * `config` - Effects configuration file
/// * `voice_config` - Voice configuration file
/// * `source` - Speech source selection
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 if the phrase failed
pub fn run(
    text: &str,
    out_dir: Option<&str>,
    config: Option<&str>,
    voice_config: Option<&str>,
    source: &SourceOptions,
    json_output: bool,
) -> Result<ExitCode> {
    let out_dir = Path::new(out_dir.unwrap_or(DEFAULT_OUT_DIR));

    let effects = load_effects_config(config)?;
    let voice = load_voice_config(voice_config)?;
    let speech = source.build()?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let path = custom_clip_path(out_dir, text);

    if !json_output {
        print_warnings(&effects.warnings);
        print_warnings(&voice.warnings);
        println!("Generating: \"{}\"", text);
    }

    let report = render_to_file(speech.as_ref(), text, &voice.value, &effects.value, &path);

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else {
        print_report(&report);
    }

    if report.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn print_report(report: &ClipReport) {
    if report.success {
        println!(
            "    {}",
            clip_line(&report.file_name(), report.size_bytes, report.duration_seconds)
        );
    } else {
        println!(
            "    {} {}",
            "FAILED".red(),
            report.error.as_deref().unwrap_or("unknown error")
        );
    }
}
