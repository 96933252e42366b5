//! DroidVoice CLI - render robot voice clips for embedded playback
//!
//! This binary renders single phrases or a whole phrase catalog into
//! 8-bit mono WAV clips, and inspects rendered clips.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use droidvoice_cli::commands;
use droidvoice_cli::input::SourceOptions;

/// DroidVoice - Robot voice clip generator
#[derive(Parser)]
#[command(name = "droidvoice")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a single phrase to custom_<name>.wav
    Generate {
        /// Phrase to speak (multiple words are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,

        /// Output directory (default: ./droid_sounds)
        #[arg(short, long)]
        out_dir: Option<String>,

        /// Effects configuration file (JSON)
        #[arg(short, long)]
        config: Option<String>,

        /// Voice configuration file (JSON)
        #[arg(long)]
        voice_config: Option<String>,

        /// Path to the text-to-speech executable
        #[arg(long, conflicts_with = "recordings")]
        tts: Option<String>,

        /// Directory of pre-recorded <name>.wav files to use instead of text-to-speech
        #[arg(long)]
        recordings: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render every phrase in the catalog
    GenerateAll {
        /// Phrase catalog file (JSON, default: built-in catalog)
        #[arg(long)]
        catalog: Option<String>,

        /// Output directory (default: ./droid_sounds)
        #[arg(short, long)]
        out_dir: Option<String>,

        /// Effects configuration file (JSON)
        #[arg(short, long)]
        config: Option<String>,

        /// Voice configuration file (JSON)
        #[arg(long)]
        voice_config: Option<String>,

        /// Path to the text-to-speech executable
        #[arg(long, conflicts_with = "recordings")]
        tts: Option<String>,

        /// Directory of pre-recorded <name>.wav files to use instead of text-to-speech
        #[arg(long)]
        recordings: Option<String>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Output machine-readable JSON summary (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Inspect a rendered clip, or every clip under a directory
    Inspect {
        /// Path to a WAV file or directory
        path: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List the phrase catalog
    Catalog {
        /// Phrase catalog file (JSON, default: built-in catalog)
        #[arg(long)]
        catalog: Option<String>,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            text,
            out_dir,
            config,
            voice_config,
            tts,
            recordings,
            json,
        } => commands::generate::run(
            &text.join(" "),
            out_dir.as_deref(),
            config.as_deref(),
            voice_config.as_deref(),
            &SourceOptions { tts, recordings },
            json,
        ),
        Commands::GenerateAll {
            catalog,
            out_dir,
            config,
            voice_config,
            tts,
            recordings,
            verbose,
            json,
        } => commands::generate_all::run(
            catalog.as_deref(),
            out_dir.as_deref(),
            config.as_deref(),
            voice_config.as_deref(),
            &SourceOptions { tts, recordings },
            verbose,
            json,
        ),
        Commands::Inspect { path, json } => commands::inspect::run(&path, json),
        Commands::Catalog { catalog, json } => commands::catalog::run(catalog.as_deref(), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
