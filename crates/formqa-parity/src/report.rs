//! # Parity Reports
//!
//! Per-document and corpus-level report types, plus the acceptance policy
//! that gates a corpus. The aggregation is order-independent — plain sums
//! and counts over the per-document reports — so documents can be
//! validated in parallel and folded in any order.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use formqa_core::IssueList;

/// Overall status of one document's parity report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// No issues at all.
    Ok,
    /// Warnings only.
    Warnings,
    /// At least one error.
    Errors,
}

/// Parity report for one converted document.
#[derive(Debug, Clone, Serialize)]
pub struct FormReport {
    /// Document identifier (by convention, the paired files' base name).
    pub document: String,
    /// Converted field instances in the document.
    pub field_count: usize,
    /// Candidate fields estimated from the source text.
    pub potential_fields: usize,
    /// `field_count / potential_fields`, `1.0` when no candidates.
    pub coverage_ratio: f64,
    /// Dictionary reuse percentage, read through from conversion stats.
    pub dictionary_reuse_pct: Option<f64>,
    /// Instance counts keyed by field type.
    pub counts_by_type: BTreeMap<String, usize>,
    /// Instance counts keyed by section.
    pub counts_by_section: BTreeMap<String, usize>,
    /// Everything found for this document.
    pub issues: IssueList,
}

impl FormReport {
    /// Status derived from the issue list.
    pub fn status(&self) -> ReportStatus {
        if self.issues.has_errors() {
            ReportStatus::Errors
        } else if self.issues.is_empty() {
            ReportStatus::Ok
        } else {
            ReportStatus::Warnings
        }
    }

    /// A report for a document that could not be validated at all
    /// (unreadable or unparseable input). Carries a single error so the
    /// document counts against the corpus, and the batch moves on.
    pub fn failed(document: impl Into<String>, message: impl Into<String>) -> Self {
        let mut issues = IssueList::new();
        issues.error("", message);
        Self {
            document: document.into(),
            field_count: 0,
            potential_fields: 0,
            coverage_ratio: 0.0,
            dictionary_reuse_pct: None,
            counts_by_type: BTreeMap::new(),
            counts_by_section: BTreeMap::new(),
            issues,
        }
    }
}

/// Corpus acceptance thresholds.
///
/// The defaults mirror current release policy; they are inputs, not laws
/// of the domain, and the CLI exposes them as flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AcceptancePolicy {
    /// Maximum number of documents with errors.
    pub max_error_documents: usize,
    /// Minimum average dictionary reuse, in percent.
    pub min_avg_reuse_pct: f64,
    /// Minimum average coverage ratio.
    pub min_avg_coverage: f64,
}

impl Default for AcceptancePolicy {
    fn default() -> Self {
        Self {
            max_error_documents: 0,
            min_avg_reuse_pct: 60.0,
            min_avg_coverage: 0.8,
        }
    }
}

/// Aggregated parity results over a corpus of documents.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusSummary {
    /// Documents validated.
    pub documents: usize,
    /// Documents with no issues.
    pub successful: usize,
    /// Documents with warnings only.
    pub with_warnings: usize,
    /// Documents with at least one error.
    pub with_errors: usize,
    /// Fields across all documents.
    pub total_fields: usize,
    /// Mean fields per document.
    pub avg_fields_per_document: f64,
    /// Mean coverage ratio.
    pub avg_coverage_ratio: f64,
    /// Mean dictionary reuse over the documents that reported it; `None`
    /// when no document carried conversion stats.
    pub avg_dictionary_reuse_pct: Option<f64>,
    /// When this summary was built (UTC).
    pub generated_at: DateTime<Utc>,
}

impl CorpusSummary {
    /// Fold per-document reports into a summary. Order-independent.
    pub fn from_reports(reports: &[FormReport]) -> Self {
        let documents = reports.len();
        let mut successful = 0usize;
        let mut with_warnings = 0usize;
        let mut with_errors = 0usize;
        let mut total_fields = 0usize;
        let mut coverage_sum = 0.0f64;
        let mut reuse_sum = 0.0f64;
        let mut reuse_count = 0usize;

        for report in reports {
            match report.status() {
                ReportStatus::Ok => successful += 1,
                ReportStatus::Warnings => with_warnings += 1,
                ReportStatus::Errors => with_errors += 1,
            }
            total_fields += report.field_count;
            coverage_sum += report.coverage_ratio;
            if let Some(reuse) = report.dictionary_reuse_pct {
                reuse_sum += reuse;
                reuse_count += 1;
            }
        }

        let denom = documents.max(1) as f64;
        Self {
            documents,
            successful,
            with_warnings,
            with_errors,
            total_fields,
            avg_fields_per_document: total_fields as f64 / denom,
            avg_coverage_ratio: if documents == 0 {
                1.0
            } else {
                coverage_sum / denom
            },
            avg_dictionary_reuse_pct: (reuse_count > 0).then(|| reuse_sum / reuse_count as f64),
            generated_at: Utc::now(),
        }
    }

    /// Judge the corpus against a policy.
    ///
    /// A corpus with no reuse evidence at all fails the reuse gate — the
    /// bias is toward flagging, not excusing, missing statistics.
    pub fn is_acceptable(&self, policy: &AcceptancePolicy) -> bool {
        if self.with_errors > policy.max_error_documents {
            return false;
        }
        if self.avg_coverage_ratio < policy.min_avg_coverage {
            return false;
        }
        match self.avg_dictionary_reuse_pct {
            Some(reuse) => reuse >= policy.min_avg_reuse_pct,
            None => false,
        }
    }
}
