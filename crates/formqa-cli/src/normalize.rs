//! # Normalize Subcommand
//!
//! Key normalization with an audit mapping. The input file is never
//! touched: the fixed document goes to `--write <path>` or stdout, and
//! the old→new mapping is always printed. A collision aborts with both
//! offending keys named.

use std::path::PathBuf;

use clap::Args;

/// Arguments for the normalize subcommand.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Path to the dictionary document (.json, .yaml, or .yml).
    pub dictionary: PathBuf,

    /// Write the normalized document to this path instead of stdout.
    #[arg(long)]
    pub write: Option<PathBuf>,
}

/// Run key normalization. Returns true when errors were found
/// (normalization itself either succeeds or aborts, so this is always
/// false on return).
pub fn run(args: &NormalizeArgs) -> anyhow::Result<bool> {
    let document = formqa_dict::load_dictionary(&args.dictionary)?;
    let result = formqa_dict::normalize(&document)?;

    if result.is_noop() {
        eprintln!("{}: all keys already canonical", args.dictionary.display());
    } else {
        for (old, new) in &result.renames {
            eprintln!("renamed {old:?} -> {new:?}");
        }
        eprintln!("{} key(s) renamed", result.renames.len());
    }

    let rendered = serde_json::to_string_pretty(&result.document)?;
    match &args.write {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!(path = %path.display(), "wrote normalized dictionary");
        }
        None => println!("{rendered}"),
    }
    Ok(false)
}
