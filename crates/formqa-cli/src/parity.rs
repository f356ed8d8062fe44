//! # Parity Subcommand
//!
//! Batch parity validation over a corpus directory. Documents are paired
//! by base name: `<id>.fields.json` (required), `<id>.txt` (source text),
//! and `<id>.stats.json` (optional conversion statistics). Each document
//! validates in isolation — one unreadable file becomes a failed report
//! for that document, and the batch continues.

use std::path::{Path, PathBuf};

use clap::Args;

use formqa_core::{ConversionStats, FieldRecord};
use formqa_parity::{AcceptancePolicy, FormReport, ParityValidator};

/// Suffix of the field-instance list files that anchor a document.
const FIELDS_SUFFIX: &str = ".fields.json";

/// Arguments for the parity subcommand.
#[derive(Args, Debug)]
pub struct ParityArgs {
    /// Directory holding <id>.fields.json / <id>.txt / <id>.stats.json
    /// triples.
    pub forms_dir: PathBuf,

    /// Minimum average dictionary reuse, in percent.
    #[arg(long, default_value_t = 60.0)]
    pub min_reuse: f64,

    /// Minimum average coverage ratio.
    #[arg(long, default_value_t = 0.8)]
    pub min_coverage: f64,

    /// Emit per-document reports and the summary as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Run parity validation over the corpus. Returns true when errors were
/// found in any document or the corpus fails the acceptance policy.
pub fn run(args: &ParityArgs) -> anyhow::Result<bool> {
    let validator = ParityValidator::with_policy(AcceptancePolicy {
        max_error_documents: 0,
        min_avg_reuse_pct: args.min_reuse,
        min_avg_coverage: args.min_coverage,
    });

    let mut reports = Vec::new();
    for (id, fields_path) in discover_documents(&args.forms_dir)? {
        reports.push(validate_document(&validator, &args.forms_dir, &id, &fields_path));
    }
    let summary = validator.summarize(&reports);
    let acceptable = summary.is_acceptable(validator.policy());

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "reports": reports,
                "summary": summary,
                "acceptable": acceptable,
            }))?
        );
    } else {
        for report in &reports {
            if !report.issues.is_empty() {
                println!("--- {}", report.document);
                println!("{}", report.issues);
            }
        }
        println!(
            "{} document(s): {} ok, {} with warnings, {} with errors",
            summary.documents, summary.successful, summary.with_warnings, summary.with_errors
        );
        println!(
            "avg fields {:.1}, avg coverage {:.2}, avg reuse {} — corpus {}",
            summary.avg_fields_per_document,
            summary.avg_coverage_ratio,
            summary
                .avg_dictionary_reuse_pct
                .map(|r| format!("{r:.1}%"))
                .unwrap_or_else(|| "n/a".into()),
            if acceptable { "ACCEPTABLE" } else { "NOT ACCEPTABLE" },
        );
    }

    let any_errors = summary.with_errors > 0;
    Ok(any_errors || !acceptable)
}

/// Find every `<id>.fields.json` in the corpus directory, sorted by id.
fn discover_documents(dir: &Path) -> anyhow::Result<Vec<(String, PathBuf)>> {
    let mut documents = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(id) = name.strip_suffix(FIELDS_SUFFIX) {
            documents.push((id.to_string(), path.clone()));
        }
    }
    documents.sort();
    Ok(documents)
}

/// Validate one document, converting any load failure into a failed
/// report so the batch keeps going.
fn validate_document(
    validator: &ParityValidator,
    dir: &Path,
    id: &str,
    fields_path: &Path,
) -> FormReport {
    let records: Vec<FieldRecord> = match read_json(fields_path) {
        Ok(records) => records,
        Err(e) => return FormReport::failed(id, format!("cannot load field list: {e}")),
    };

    let source_path = dir.join(format!("{id}.txt"));
    let source_text = match std::fs::read_to_string(&source_path) {
        Ok(text) => text,
        Err(e) => {
            return FormReport::failed(
                id,
                format!("cannot read source text {}: {e}", source_path.display()),
            )
        }
    };

    let stats_path = dir.join(format!("{id}.stats.json"));
    let stats: Option<ConversionStats> = if stats_path.exists() {
        match read_json(&stats_path) {
            Ok(stats) => Some(stats),
            Err(e) => return FormReport::failed(id, format!("cannot load stats: {e}")),
        }
    } else {
        None
    };

    validator.validate_form(id, &source_text, &records, stats.as_ref())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
