//! Integration test: validate a small corpus of converted documents the
//! way the batch driver does — independent per-document reports folded
//! into one corpus summary, judged against the acceptance policy.

use serde_json::json;

use formqa_core::{ConversionStats, FieldRecord};
use formqa_parity::{AcceptancePolicy, ParityValidator, ReportStatus};

fn fields(value: serde_json::Value) -> Vec<FieldRecord> {
    serde_json::from_value(value).unwrap()
}

fn stats(reused_pct: f64) -> ConversionStats {
    serde_json::from_value(json!({
        "total_items": 4,
        "reused_from_dictionary": 3,
        "reused_pct": reused_pct
    }))
    .unwrap()
}

#[test]
fn test_acceptable_corpus() {
    let v = ParityValidator::new();
    let source = "Name: ____\nPhone: ____\n";
    let records = fields(json!([
        {"key": "full_name", "title": "Name", "type": "input",
         "section": "Patient Information", "control": {"input_type": "name"},
         "reused_from_dictionary": true},
        {"key": "patient_phone", "title": "Phone", "type": "input",
         "section": "Patient Information", "control": {"input_type": "phone"},
         "reused_from_dictionary": true},
        {"key": "visit_reason", "title": "Reason for Visit", "type": "text",
         "section": "Visit"},
        {"key": "patient_signature", "title": "Signature",
         "type": "block_signature", "section": "Consent"}
    ]));

    let reports = vec![
        v.validate_form("intake-001", source, &records, Some(&stats(75.0))),
        v.validate_form("intake-002", source, &records, Some(&stats(90.0))),
    ];
    for report in &reports {
        assert_eq!(
            report.status(),
            ReportStatus::Ok,
            "unexpected issues for {}: {}",
            report.document,
            report.issues
        );
    }

    let summary = v.summarize(&reports);
    assert_eq!(summary.documents, 2);
    assert_eq!(summary.successful, 2);
    assert_eq!(summary.avg_dictionary_reuse_pct, Some(82.5));
    assert!(summary.is_acceptable(v.policy()));
}

#[test]
fn test_one_bad_document_fails_the_corpus() {
    let v = ParityValidator::new();
    let good = fields(json!([
        {"key": "full_name", "title": "Name", "type": "input",
         "section": "Patient Information", "control": {"input_type": "name"}}
    ]));
    let duplicated = fields(json!([
        {"key": "dob", "type": "date", "title": "Date of Birth"},
        {"key": "dob", "type": "date", "title": "Date of Birth"}
    ]));

    let reports = vec![
        v.validate_form("good", "Name: x\n", &good, Some(&stats(80.0))),
        v.validate_form("bad", "DOB: x\n", &duplicated, Some(&stats(80.0))),
    ];
    assert_eq!(reports[0].status(), ReportStatus::Ok);
    assert_eq!(reports[1].status(), ReportStatus::Errors);

    let summary = v.summarize(&reports);
    assert_eq!(summary.with_errors, 1);
    assert!(!summary.is_acceptable(v.policy()));
}

#[test]
fn test_policy_overrides_change_the_verdict() {
    let strict = ParityValidator::new();
    let lenient = ParityValidator::with_policy(AcceptancePolicy {
        max_error_documents: 0,
        min_avg_reuse_pct: 20.0,
        min_avg_coverage: 0.1,
    });

    let records = fields(json!([
        {"key": "full_name", "title": "Name", "type": "input",
         "section": "Patient Information", "control": {"input_type": "name"}}
    ]));
    // Plenty of blanks in the source the conversion missed.
    let source = "Name: ____\nPhone: ____\nDOB: ____\nEmail: ____\n";

    let strict_report = strict.validate_form("doc", source, &records, Some(&stats(30.0)));
    assert_eq!(strict_report.status(), ReportStatus::Warnings);
    let strict_summary = strict.summarize(std::slice::from_ref(&strict_report));
    assert!(!strict_summary.is_acceptable(strict.policy()));

    let lenient_report = lenient.validate_form("doc", source, &records, Some(&stats(30.0)));
    assert_eq!(lenient_report.status(), ReportStatus::Ok);
    let lenient_summary = lenient.summarize(std::slice::from_ref(&lenient_report));
    assert!(lenient_summary.is_acceptable(lenient.policy()));
}
