//! # formqa CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;

/// FormQA — intake-form conversion quality assurance.
///
/// Validates the field dictionary, normalizes field keys, and checks
/// converted documents for parity with their source text.
#[derive(Parser, Debug)]
#[command(name = "formqa", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate the field dictionary.
    Validate(formqa_cli::validate::ValidateArgs),
    /// Normalize field keys, preserving references.
    Normalize(formqa_cli::normalize::NormalizeArgs),
    /// Validate converted documents against their source text.
    Parity(formqa_cli::parity::ParityArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let had_errors = match cli.command {
        Commands::Validate(args) => formqa_cli::validate::run(&args)?,
        Commands::Normalize(args) => formqa_cli::normalize::run(&args)?,
        Commands::Parity(args) => formqa_cli::parity::run(&args)?,
    };

    Ok(if had_errors {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
