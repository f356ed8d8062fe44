//! # Validate Subcommand
//!
//! Dictionary validation: load, run every check, print the report.

use std::path::PathBuf;

use clap::Args;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the dictionary document (.json, .yaml, or .yml).
    pub dictionary: PathBuf,

    /// Emit the full report as JSON instead of issue lines.
    #[arg(long)]
    pub json: bool,
}

/// Run dictionary validation. Returns true when errors were found.
pub fn run(args: &ValidateArgs) -> anyhow::Result<bool> {
    let document = formqa_dict::load_dictionary(&args.dictionary)?;
    let report = formqa_dict::validate(&document);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if !report.issues.is_empty() {
            println!("{}", report.issues);
        }
        println!(
            "{}: {} categories, {} fields, {} unique keys — {} error(s), {} warning(s)",
            args.dictionary.display(),
            report.categories,
            report.total_fields,
            report.unique_keys,
            report.issues.error_count(),
            report.issues.warning_count(),
        );
    }
    Ok(report.has_errors())
}
