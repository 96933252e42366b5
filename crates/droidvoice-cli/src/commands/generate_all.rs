//! Generate-all command implementation
//!
//! Renders every phrase of the catalog into `<out>/<category>/<category>_<NN>.wav`
//! and writes a summary report next to the clips.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use droidvoice_spec::Phrase;

use super::render::{render_to_file, ClipReport};
use super::reporting::{
    clip_line, format_kb, format_mb, print_banner, print_warnings, utc_timestamp,
};
use crate::input::{
    load_catalog, load_effects_config, load_voice_config, SourceKind, SourceOptions,
    DEFAULT_OUT_DIR,
};

/// File name of the summary report written into the output directory.
pub const SUMMARY_FILE: &str = "generation_summary.json";

/// Summary report for a catalog render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Timestamp of generation
    pub timestamp: String,
    /// Speech source used
    pub source: SourceKind,
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Total phrases processed
    pub total_phrases: usize,
    /// Clips written
    pub successful: usize,
    /// Phrases that failed
    pub failed: usize,
    /// Combined size of all written clips in bytes
    pub total_bytes: u64,
    /// Total runtime in seconds
    pub runtime_seconds: f64,
    /// Results for each phrase
    pub clips: Vec<ClipReport>,
    /// Summary by category
    pub by_category: BTreeMap<String, CategorySummary>,
}

/// Summary for a single category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Phrases in this category
    pub total: usize,
    /// Clips written
    pub successful: usize,
    /// Phrases that failed
    pub failed: usize,
    /// Combined size in bytes
    pub total_bytes: u64,
}

/// Returns the output path for a catalog phrase.
pub fn phrase_clip_path(out_dir: &Path, phrase: &Phrase) -> PathBuf {
    out_dir
        .join(&phrase.category)
        .join(format!("{}_{:02}.wav", phrase.category, phrase.number))
}

/// Run the generate-all command
///
/// # Arguments
/// * `catalog` - Phrase catalog file (default: built-in catalog)
/// * `out_dir` - Output directory (default: ./droid_sounds)
/// * `config` - Effects configuration file
/// * `voice_config` - Voice configuration file
/// * `source` - Speech source selection
/// * `verbose` - Whether to show verbose output
/// * `json_output` - Whether to print the summary as JSON instead of text
///
/// # Returns
/// Exit code: 0 success, 1 if any phrase failed
pub fn run(
    catalog: Option<&str>,
    out_dir: Option<&str>,
    config: Option<&str>,
    voice_config: Option<&str>,
    source: &SourceOptions,
    verbose: bool,
    json_output: bool,
) -> Result<ExitCode> {
    let start = Instant::now();
    let out_root = out_dir.unwrap_or(DEFAULT_OUT_DIR);
    let out_path = Path::new(out_root);

    let catalog = load_catalog(catalog)?;
    let effects = load_effects_config(config)?;
    let voice = load_voice_config(voice_config)?;
    let speech = source.build()?;
    let human = !json_output;

    let sample_rate = effects.value.target_sample_rate;

    if human {
        print_banner("DroidVoice Clip Generator");
        println!();
        println!(
            "{} {}Hz, 8-bit mono",
            "Output format:".blue().bold(),
            sample_rate
        );
        println!(
            "{} ~{}KB per second of audio",
            "Data rate:".blue().bold(),
            sample_rate / 1024
        );
        println!("{} {}", "Speech source:".blue().bold(), source.kind());
        println!("{} {}", "Output directory:".blue().bold(), out_root);
        println!();
        print_warnings(&catalog.warnings);
        print_warnings(&effects.warnings);
        print_warnings(&voice.warnings);
        println!(
            "{} Found {} phrases in {} categories",
            "INFO".blue().bold(),
            catalog.value.len(),
            catalog.value.categories.len()
        );
    }

    fs::create_dir_all(out_path)
        .with_context(|| format!("Failed to create output directory: {}", out_root))?;

    let mut clips: Vec<ClipReport> = Vec::with_capacity(catalog.value.len());
    let mut current_category: Option<String> = None;

    for phrase in catalog.value.phrases() {
        if current_category.as_deref() != Some(phrase.category.as_str()) {
            let category_dir = out_path.join(&phrase.category);
            fs::create_dir_all(&category_dir).with_context(|| {
                format!(
                    "Failed to create category directory: {}",
                    category_dir.display()
                )
            })?;
            if human {
                println!();
                println!("=== {} ===", phrase.category.to_uppercase());
            }
            current_category = Some(phrase.category.clone());
        }

        if human {
            println!("  [{:02}] \"{}\"", phrase.number, phrase.text);
        }

        let path = phrase_clip_path(out_path, &phrase);
        let mut report = render_to_file(
            speech.as_ref(),
            &phrase.text,
            &voice.value,
            &effects.value,
            &path,
        );
        report.category = Some(phrase.category.clone());
        report.number = Some(phrase.number);

        if human {
            print_clip(&report, verbose);
        }
        clips.push(report);
    }

    let summary = summarize(clips, source.kind(), sample_rate, start.elapsed().as_secs_f64());

    let summary_path = out_path.join(SUMMARY_FILE);
    let summary_json =
        serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
    fs::write(&summary_path, &summary_json)
        .with_context(|| format!("Failed to write summary: {}", summary_path.display()))?;

    if json_output {
        println!("{}", summary_json);
    } else {
        print_summary(&summary, out_path, &summary_path);
    }

    if summary.failed > 0 {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Aggregates per-clip reports into a summary.
fn summarize(
    clips: Vec<ClipReport>,
    source: SourceKind,
    sample_rate: u32,
    runtime_seconds: f64,
) -> GenerationSummary {
    let mut by_category: BTreeMap<String, CategorySummary> = BTreeMap::new();
    for clip in &clips {
        let entry = by_category
            .entry(clip.category.clone().unwrap_or_default())
            .or_default();
        entry.total += 1;
        if clip.success {
            entry.successful += 1;
            entry.total_bytes += clip.size_bytes;
        } else {
            entry.failed += 1;
        }
    }

    let successful = clips.iter().filter(|c| c.success).count();
    GenerationSummary {
        timestamp: utc_timestamp(),
        source,
        sample_rate,
        total_phrases: clips.len(),
        successful,
        failed: clips.len() - successful,
        total_bytes: by_category.values().map(|c| c.total_bytes).sum(),
        runtime_seconds,
        clips,
        by_category,
    }
}

fn print_clip(report: &ClipReport, verbose: bool) {
    if report.success {
        println!(
            "    {}",
            clip_line(&report.file_name(), report.size_bytes, report.duration_seconds)
        );
        if verbose {
            println!(
                "       {} {} ({}ms)",
                "blake3".dimmed(),
                report.pcm_hash.as_deref().unwrap_or("unknown").dimmed(),
                report.render_ms
            );
        }
    } else {
        println!(
            "    {} {}",
            "FAILED".red(),
            report.error.as_deref().unwrap_or("unknown error")
        );
    }
}

fn print_summary(summary: &GenerationSummary, out_path: &Path, summary_path: &Path) {
    let display_dir = fs::canonicalize(out_path).unwrap_or_else(|_| out_path.to_path_buf());
    let folder = out_path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| out_path.display().to_string());

    println!();
    println!("{}", "=".repeat(40));
    println!("Generated {} clips", summary.successful);
    println!(
        "Total size: {} ({})",
        format_kb(summary.total_bytes),
        format_mb(summary.total_bytes)
    );
    println!("Output directory: {}", display_dir.display());

    let failed: Vec<_> = summary.clips.iter().filter(|c| !c.success).collect();
    if !failed.is_empty() {
        println!();
        println!("{}", "Failed phrases:".red().bold());
        for clip in failed {
            println!(
                "  - {}/{:02} \"{}\": {}",
                clip.category.as_deref().unwrap_or("?"),
                clip.number.unwrap_or(0),
                clip.phrase,
                clip.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    println!();
    println!(
        "{} {}",
        "Summary report:".blue().bold(),
        summary_path.display()
    );
    println!();
    println!(
        "Upload the '{}' folder contents to the device filesystem",
        folder
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn report(category: &str, success: bool, size_bytes: u64) -> ClipReport {
        ClipReport {
            phrase: "Beep".to_string(),
            category: Some(category.to_string()),
            number: Some(1),
            path: format!("{}/{}_01.wav", category, category),
            success,
            error: (!success).then(|| "synthesis failed".to_string()),
            error_code: None,
            size_bytes,
            num_samples: 0,
            duration_seconds: 0.0,
            pcm_hash: None,
            render_ms: 0,
        }
    }

    fn write_recording(dir: &Path, name: &str) {
        let samples: Vec<f64> = (0..22050)
            .map(|i| {
                let t = i as f64 / 22050.0;
                0.4 * (2.0 * std::f64::consts::PI * 150.0 * t).sin()
            })
            .collect();
        let clip = droidvoice_backend_audio::encode(
            &droidvoice_backend_audio::Waveform::new(samples, 22050),
        )
        .unwrap();
        clip.save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_run_renders_catalog_from_recordings() {
        let dir = tempfile::tempdir().unwrap();
        let recordings = dir.path().join("recordings");
        let out = dir.path().join("droid_sounds");
        fs::create_dir_all(&recordings).unwrap();
        write_recording(&recordings, "Yay_.wav");
        write_recording(&recordings, "Woohoo.wav");

        let catalog_path = dir.path().join("catalog.json");
        fs::write(
            &catalog_path,
            r#"{"categories": [{"name": "happy", "phrases": ["Yay!", "Woohoo"]}]}"#,
        )
        .unwrap();

        let source = SourceOptions {
            tts: None,
            recordings: Some(recordings.to_string_lossy().to_string()),
        };
        let code = run(
            catalog_path.to_str(),
            out.to_str(),
            None,
            None,
            &source,
            false,
            true,
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        assert!(out.join("happy/happy_01.wav").is_file());
        assert!(out.join("happy/happy_02.wav").is_file());

        let summary: GenerationSummary =
            serde_json::from_str(&fs::read_to_string(out.join(SUMMARY_FILE)).unwrap()).unwrap();
        assert_eq!(summary.successful, 2);
        assert_eq!(summary.sample_rate, 16000);
        assert_eq!(summary.source, SourceKind::Recordings);
    }

    #[test]
    fn test_run_continues_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let recordings = dir.path().join("recordings");
        let out = dir.path().join("out");
        fs::create_dir_all(&recordings).unwrap();
        write_recording(&recordings, "Zzz.wav");

        let catalog_path = dir.path().join("catalog.json");
        fs::write(
            &catalog_path,
            r#"{"categories": [
                {"name": "wake", "phrases": ["Missing"]},
                {"name": "sleepy", "phrases": ["Zzz"]}
            ]}"#,
        )
        .unwrap();

        let source = SourceOptions {
            tts: None,
            recordings: Some(recordings.to_string_lossy().to_string()),
        };
        let code = run(
            catalog_path.to_str(),
            out.to_str(),
            None,
            None,
            &source,
            false,
            true,
        )
        .unwrap();
        assert_eq!(code, ExitCode::from(1));

        assert!(!out.join("wake/wake_01.wav").exists());
        assert!(out.join("sleepy/sleepy_01.wav").is_file());

        let summary: GenerationSummary =
            serde_json::from_str(&fs::read_to_string(out.join(SUMMARY_FILE)).unwrap()).unwrap();
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.clips[0].error_code.as_deref(), Some("AUDIO_001"));
    }

    #[test]
    fn test_run_rejects_invalid_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("catalog.json");
        fs::write(&catalog_path, r#"{"categories": []}"#).unwrap();

        let out = dir.path().join("out");
        let result = run(
            catalog_path.to_str(),
            out.to_str(),
            None,
            None,
            &SourceOptions::default(),
            false,
            true,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_phrase_clip_path() {
        let phrase = Phrase {
            text: "Yay!".to_string(),
            category: "happy".to_string(),
            number: 3,
        };
        assert_eq!(
            phrase_clip_path(Path::new("droid_sounds"), &phrase),
            PathBuf::from("droid_sounds/happy/happy_03.wav")
        );
    }

    #[test]
    fn test_phrase_clip_path_three_digits() {
        let phrase = Phrase {
            text: "...".to_string(),
            category: "idle".to_string(),
            number: 120,
        };
        assert_eq!(
            phrase_clip_path(Path::new("out"), &phrase),
            PathBuf::from("out/idle/idle_120.wav")
        );
    }

    #[test]
    fn test_summarize_counts() {
        let clips = vec![
            report("happy", true, 1000),
            report("happy", false, 0),
            report("sleepy", true, 500),
        ];
        let summary = summarize(clips, SourceKind::Recordings, 16000, 1.5);

        assert_eq!(summary.total_phrases, 3);
        assert_eq!(summary.successful, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total_bytes, 1500);
        assert_eq!(summary.by_category["happy"].total, 2);
        assert_eq!(summary.by_category["happy"].failed, 1);
        assert_eq!(summary.by_category["sleepy"].total_bytes, 500);
    }

    #[test]
    fn test_summary_serializes() {
        let summary = summarize(vec![report("wake", true, 44)], SourceKind::Tts, 16000, 0.1);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["source"], "tts");
        assert_eq!(json["by_category"]["wake"]["successful"], 1);
    }
}
