//! Inspect command implementation
//!
//! Reads rendered 8-bit clips back and reports their format and levels.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

use droidvoice_backend_audio::read_clip;
use droidvoice_backend_audio::encode::SILENCE;

use super::reporting::format_kb;

/// Facts about one rendered clip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipInfo {
    /// File path.
    pub path: String,
    /// Whether the file could be read as an 8-bit mono clip.
    pub ok: bool,
    /// Error message if unreadable.
    pub error: Option<String>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
    /// Duration in seconds.
    pub duration_seconds: f64,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Largest distance of any byte from the 128 midpoint.
    pub peak_deviation: u8,
    /// Mean byte value.
    pub mean_value: f64,
    /// BLAKE3 hash of the PCM payload.
    pub pcm_hash: Option<String>,
}

/// Reads one clip. Never fails; problems are recorded in the result.
pub fn inspect_file(path: &Path) -> ClipInfo {
    let mut info = ClipInfo {
        path: path.to_string_lossy().to_string(),
        ok: false,
        error: None,
        sample_rate: 0,
        num_samples: 0,
        duration_seconds: 0.0,
        size_bytes: std::fs::metadata(path).map(|m| m.len()).unwrap_or(0),
        peak_deviation: 0,
        mean_value: 0.0,
        pcm_hash: None,
    };

    match read_clip(path) {
        Ok(clip) => {
            info.ok = true;
            info.sample_rate = clip.sample_rate();
            info.num_samples = clip.num_samples();
            info.duration_seconds = clip.duration_seconds();
            info.peak_deviation = clip
                .samples()
                .iter()
                .map(|&b| b.abs_diff(SILENCE))
                .max()
                .unwrap_or(0);
            info.mean_value = clip.mean_value();
            info.pcm_hash = Some(clip.pcm_hash());
        }
        Err(e) => info.error = Some(e.to_string()),
    }

    info
}

/// Collects `.wav` files under `dir` in sorted order.
pub fn collect_wav_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
        })
        .collect();
    files.sort();
    files
}

/// Run the inspect command
///
/// # Arguments
/// * `path` - WAV file, or directory scanned recursively for WAV files
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 if any file could not be read
pub fn run(path: &str, json_output: bool) -> Result<ExitCode> {
    let target = Path::new(path);
    if !target.exists() {
        anyhow::bail!("Path does not exist: {}", path);
    }

    let files = if target.is_dir() {
        collect_wav_files(target)
    } else {
        vec![target.to_path_buf()]
    };

    let infos: Vec<ClipInfo> = files.iter().map(|f| inspect_file(f)).collect();

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&infos).context("Failed to serialize clip info")?
        );
    } else {
        if infos.is_empty() {
            println!("{} No WAV files found in {}", "INFO".yellow().bold(), path);
        }
        for info in &infos {
            print_info(info);
        }
        if infos.len() > 1 {
            let total: u64 = infos.iter().filter(|i| i.ok).map(|i| i.size_bytes).sum();
            println!(
                "{} {} clips, {}",
                "Total:".blue().bold(),
                infos.iter().filter(|i| i.ok).count(),
                format_kb(total)
            );
        }
    }

    if infos.iter().any(|i| !i.ok) {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn print_info(info: &ClipInfo) {
    println!("{}", info.path.bold());
    if !info.ok {
        println!(
            "  {} {}",
            "FAILED".red(),
            info.error.as_deref().unwrap_or("unknown error")
        );
        return;
    }
    println!("  Format:   {}Hz, 8-bit mono", info.sample_rate);
    println!(
        "  Duration: {:.2}s ({} samples)",
        info.duration_seconds, info.num_samples
    );
    println!("  Size:     {}", format_kb(info.size_bytes));
    println!("  Peak:     {}/127 from center", info.peak_deviation);
    println!("  Mean:     {:.1}", info.mean_value);
}
