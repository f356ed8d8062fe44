//! # Form Parity Validation
//!
//! Validates one converted document: the field-instance list against
//! itself (keys, required attributes), against the heuristic rule table,
//! and against its source text (coverage). Conversion statistics, when
//! present, are folded through unchanged.
//!
//! Each call is a pure function of its inputs; the validator holds only
//! the acceptance policy used for the advisory coverage/reuse warnings
//! and the corpus gate.

use std::collections::BTreeSet;

use formqa_core::key::is_valid;
use formqa_core::vocab::FieldType;
use formqa_core::{ConversionStats, FieldRecord, IssueList};

use crate::coverage::{coverage_ratio, scan_source_text};
use crate::heuristics::builtin_rules;
use crate::report::{AcceptancePolicy, CorpusSummary, FormReport};

/// Label used in type/section tallies for records missing the attribute.
const UNSPECIFIED: &str = "(unspecified)";

/// Parity validator with a fixed acceptance policy.
#[derive(Debug, Clone, Default)]
pub struct ParityValidator {
    policy: AcceptancePolicy,
}

impl ParityValidator {
    /// Validator with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator with an explicit policy.
    pub fn with_policy(policy: AcceptancePolicy) -> Self {
        Self { policy }
    }

    /// The policy in force.
    pub fn policy(&self) -> &AcceptancePolicy {
        &self.policy
    }

    /// Validate one converted document.
    ///
    /// `document` names the report; `source_text` is the extracted text the
    /// conversion ran on; `records` is the converted field-instance list;
    /// `stats` is the conversion pipeline's optional statistics document.
    pub fn validate_form(
        &self,
        document: impl Into<String>,
        source_text: &str,
        records: &[FieldRecord],
        stats: Option<&ConversionStats>,
    ) -> FormReport {
        let mut report = FormReport {
            document: document.into(),
            field_count: records.len(),
            potential_fields: 0,
            coverage_ratio: 1.0,
            dictionary_reuse_pct: stats.and_then(|s| s.reused_pct),
            counts_by_type: Default::default(),
            counts_by_section: Default::default(),
            issues: IssueList::new(),
        };

        let mut seen_keys: BTreeSet<&str> = BTreeSet::new();
        for (index, record) in records.iter().enumerate() {
            self.check_record(index, record, &mut seen_keys, &mut report);
        }

        let scan = scan_source_text(source_text);
        report.potential_fields = scan.potential_fields();
        report.coverage_ratio = coverage_ratio(records.len(), report.potential_fields);
        if report.coverage_ratio < self.policy.min_avg_coverage {
            report.issues.warning(
                "",
                format!(
                    "coverage {:.2} below {:.2}: {} fields converted, {} candidates in source",
                    report.coverage_ratio,
                    self.policy.min_avg_coverage,
                    records.len(),
                    report.potential_fields
                ),
            );
        }

        if let Some(reuse) = report.dictionary_reuse_pct {
            if reuse < self.policy.min_avg_reuse_pct {
                report.issues.warning(
                    "",
                    format!(
                        "dictionary reuse {reuse:.1}% below {:.1}%",
                        self.policy.min_avg_reuse_pct
                    ),
                );
            }
        }

        tracing::debug!(
            document = %report.document,
            fields = report.field_count,
            potential = report.potential_fields,
            errors = report.issues.error_count(),
            warnings = report.issues.warning_count(),
            "form validated"
        );
        report
    }

    /// Fold per-document reports into the corpus summary.
    pub fn summarize(&self, reports: &[FormReport]) -> CorpusSummary {
        CorpusSummary::from_reports(reports)
    }

    fn check_record<'a>(
        &self,
        index: usize,
        record: &'a FieldRecord,
        seen_keys: &mut BTreeSet<&'a str>,
        report: &mut FormReport,
    ) {
        let at = |suffix: &str| format!("fields[{index}]{suffix}");

        let type_str = record.field_type.as_deref();
        *report
            .counts_by_type
            .entry(type_str.unwrap_or(UNSPECIFIED).to_string())
            .or_default() += 1;
        *report
            .counts_by_section
            .entry(
                record
                    .section
                    .as_deref()
                    .unwrap_or(UNSPECIFIED)
                    .to_string(),
            )
            .or_default() += 1;

        let parsed_type = match type_str {
            None => {
                report
                    .issues
                    .error(at(".type"), "field record has no type");
                None
            }
            Some(t) => match t.parse::<FieldType>() {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    report
                        .issues
                        .warning(at(".type"), format!("unknown type {t:?}"));
                    None
                }
            },
        };

        let Some(key) = record.key.as_deref().filter(|k| !k.is_empty()) else {
            report
                .issues
                .error(at(".key"), "field record is missing its key");
            return;
        };

        if !is_valid(key) {
            report.issues.error(
                at(".key"),
                format!("key {key:?} is not canonical (expected ^[a-z][a-z0-9_]*$)"),
            );
        }
        if !seen_keys.insert(key) {
            // Two fields with one key: downstream consumers key on these.
            report
                .issues
                .error(at(".key"), format!("duplicate key {key:?}"));
        }

        self.apply_heuristics(&at(""), key, parsed_type, record, &mut report.issues);
    }

    /// Run the rule table against one record.
    fn apply_heuristics(
        &self,
        path: &str,
        key: &str,
        parsed_type: Option<FieldType>,
        record: &FieldRecord,
        issues: &mut IssueList,
    ) {
        let haystack = record.search_text();
        for rule in builtin_rules() {
            if !rule.matches(&haystack) {
                continue;
            }

            if !rule.type_satisfied(parsed_type) {
                let expected = rule
                    .expected_type
                    .map(|t| t.as_str())
                    .unwrap_or("(any)");
                let found = parsed_type.map(|t| t.as_str()).unwrap_or("(none)");
                issues.warning(
                    format!("{path}.type"),
                    format!(
                        "field {key:?} looks {}-like; expected type {expected}, found {found}",
                        rule.name
                    ),
                );
            }

            if let Some(expected) = rule.expected_input_type {
                if parsed_type == Some(FieldType::Input) {
                    let actual = record.control.input_type.as_deref();
                    if actual != Some(expected.as_str()) {
                        issues.warning(
                            format!("{path}.control.input_type"),
                            format!(
                                "field {key:?} looks {}-like; control.input_type should be {expected}, found {}",
                                rule.name,
                                actual.map(|a| format!("{a:?}")).unwrap_or_else(|| "none".into())
                            ),
                        );
                    }
                }
            }

            if let Some(expected) = rule.expected_section {
                if record.section.as_deref() != Some(expected) {
                    issues.warning(
                        format!("{path}.section"),
                        format!(
                            "field {key:?} looks {}-like; expected section {expected:?}, found {}",
                            rule.name,
                            record
                                .section
                                .as_deref()
                                .map(|s| format!("{s:?}"))
                                .unwrap_or_else(|| "none".into())
                        ),
                    );
                }
            }
        }
    }
}
