//! Catalog command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;

use super::reporting::print_warnings;
use crate::input::load_catalog;

/// Run the catalog command
///
/// Prints each category and its numbered phrases, or the whole catalog as
/// JSON (suitable as a starting point for `--catalog`).
pub fn run(catalog: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let loaded = load_catalog(catalog)?;

    if json_output {
        let json = loaded
            .value
            .to_json_pretty()
            .context("Failed to serialize catalog")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    print_warnings(&loaded.warnings);
    for category in &loaded.value.categories {
        println!();
        println!("=== {} ===", category.name.to_uppercase());
        for (i, phrase) in category.phrases.iter().enumerate() {
            println!("  [{:02}] \"{}\"", i + 1, phrase);
        }
    }
    println!();
    println!(
        "{} {} phrases in {} categories",
        "Total:".blue().bold(),
        loaded.value.len(),
        loaded.value.categories.len()
    );

    Ok(ExitCode::SUCCESS)
}
