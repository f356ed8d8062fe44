//! # Dictionary Validation
//!
//! Structural and semantic validation of a field-definition dictionary.
//! Read-only and total: `validate` never fails, runs every check even when
//! earlier ones find problems, and reports everything it found in one
//! [`DictionaryReport`]. It is safe to run on any candidate document,
//! including one that has not been key-normalized yet — non-canonical keys
//! are reported, never fixed.
//!
//! ## Checks
//!
//! - `_meta` block: `name` and `version` present (errors); version in
//!   `MAJOR.MINOR.PATCH` form (warning).
//! - Structure: at least one non-reserved category (error); every
//!   non-reserved category is a list (error).
//! - Per field: `key` present (error, field skipped for further
//!   field-level checks), canonical key format (error), `type` present
//!   (error), `type` in the fixed vocabulary (warning — new control kinds
//!   appear before the vocabulary catches up), choice fields carry a
//!   well-shaped `control.options` list (errors for missing list or
//!   nameless options, warnings for missing or duplicate option values).
//! - Cross-category: duplicate field keys (error — `if` clauses and
//!   aliases address fields by bare key, so shared keys are unaddressable).
//! - `if`-clause integrity: every referenced key must exist in the full
//!   cross-category key set (warning — dictionaries are edited
//!   incrementally).
//! - `aliases`: map of string to canonical key; non-canonical targets are
//!   errors, targets that do not resolve to a known field are warnings.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};

use formqa_core::key::is_valid;
use formqa_core::vocab::{FieldType, InputType};
use formqa_core::{Issue, IssueList};

use crate::document::{is_reserved_category, value_kind, ALIASES_KEY, META_KEY};

/// Aggregate result of one dictionary validation call.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct DictionaryReport {
    /// Number of non-reserved categories.
    pub categories: usize,
    /// Number of field entries across all list categories.
    pub total_fields: usize,
    /// Number of distinct field keys.
    pub unique_keys: usize,
    /// Field count per category, for reporting.
    pub fields_per_category: BTreeMap<String, usize>,
    /// Everything found, errors and warnings interleaved in check order.
    pub issues: IssueList,
}

impl DictionaryReport {
    /// True when at least one error-severity issue was found.
    pub fn has_errors(&self) -> bool {
        self.issues.has_errors()
    }
}

/// Validate a dictionary document.
///
/// Never fails; a document of the wrong root shape produces a single
/// error-severity issue and an otherwise empty report.
pub fn validate(document: &Value) -> DictionaryReport {
    let mut report = DictionaryReport::default();

    let Some(root) = document.as_object() else {
        report.issues.push(Issue::error(
            "",
            format!(
                "dictionary root must be a map, found {}",
                value_kind(document)
            ),
        ));
        return report;
    };

    check_meta(root, &mut report.issues);

    // Full cross-category key set first: `if` clauses may reference a
    // field defined in a later category than the one using it.
    let known_keys = collect_keys(root, &mut report.issues);

    let mut categories = 0usize;
    let mut total_fields = 0usize;
    for (category, value) in root {
        if is_reserved_category(category) {
            continue;
        }
        categories += 1;
        let Some(fields) = value.as_array() else {
            report.issues.push(Issue::error(
                category.clone(),
                format!("category must be a list, found {}", value_kind(value)),
            ));
            continue;
        };
        report
            .fields_per_category
            .insert(category.clone(), fields.len());
        total_fields += fields.len();
        for (index, field) in fields.iter().enumerate() {
            check_field(category, index, field, &known_keys, &mut report.issues);
        }
    }

    if categories == 0 {
        report.issues.push(Issue::error(
            "",
            "dictionary has no field categories besides the reserved entries",
        ));
    }

    check_aliases(root, &known_keys, &mut report.issues);

    report.categories = categories;
    report.total_fields = total_fields;
    report.unique_keys = known_keys.len();

    tracing::debug!(
        categories = report.categories,
        fields = report.total_fields,
        errors = report.issues.error_count(),
        warnings = report.issues.warning_count(),
        "dictionary validated"
    );
    report
}

/// `_meta` block: name and version required, version shape advisory.
fn check_meta(root: &Map<String, Value>, issues: &mut IssueList) {
    let Some(meta) = root.get(META_KEY) else {
        issues.push(Issue::error(META_KEY, "missing _meta block"));
        return;
    };
    let Some(meta) = meta.as_object() else {
        issues.push(Issue::error(
            META_KEY,
            format!("_meta must be a map, found {}", value_kind(meta)),
        ));
        return;
    };

    if !meta.get("name").is_some_and(|v| v.is_string()) {
        issues.push(Issue::error("_meta.name", "missing dictionary name"));
    }
    match meta.get("version").and_then(Value::as_str) {
        None => issues.push(Issue::error("_meta.version", "missing dictionary version")),
        Some(version) if !is_version_like(version) => issues.push(Issue::warning(
            "_meta.version",
            format!("version {version:?} is not MAJOR.MINOR.PATCH"),
        )),
        Some(_) => {}
    }
}

/// First pass over all categories: the full field-key set, with duplicate
/// keys reported as errors at their second and later occurrences.
fn collect_keys(root: &Map<String, Value>, issues: &mut IssueList) -> BTreeSet<String> {
    let mut known = BTreeSet::new();
    for (category, value) in root {
        if is_reserved_category(category) {
            continue;
        }
        let Some(fields) = value.as_array() else {
            continue;
        };
        for (index, field) in fields.iter().enumerate() {
            let Some(key) = field.get("key").and_then(Value::as_str) else {
                continue;
            };
            if !known.insert(key.to_string()) {
                issues.push(Issue::error(
                    format!("{category}[{index}].key"),
                    format!("duplicate key {key:?}"),
                ));
            }
        }
    }
    known
}

/// All checks on one field entry.
fn check_field(
    category: &str,
    index: usize,
    field: &Value,
    known_keys: &BTreeSet<String>,
    issues: &mut IssueList,
) {
    let at = |suffix: &str| format!("{category}[{index}]{suffix}");

    let Some(entry) = field.as_object() else {
        issues.push(Issue::error(
            at(""),
            format!("field must be a map, found {}", value_kind(field)),
        ));
        return;
    };

    // A field without a key cannot be referenced or deduplicated; report
    // and skip the remaining field-level checks.
    let Some(key) = entry.get("key").and_then(Value::as_str) else {
        issues.push(Issue::error(at(".key"), "field is missing its key"));
        return;
    };

    if !is_valid(key) {
        issues.push(Issue::error(
            at(".key"),
            format!("key {key:?} is not canonical (expected ^[a-z][a-z0-9_]*$)"),
        ));
    }

    match entry.get("type").and_then(Value::as_str) {
        None => issues.push(Issue::error(at(".type"), format!("field {key:?} has no type"))),
        Some(type_str) => match type_str.parse::<FieldType>() {
            Ok(field_type) if field_type.is_choice() => {
                check_options(&at(".control.options"), key, entry, issues);
            }
            Ok(FieldType::Input) => {
                check_input_type(&at(".control.input_type"), key, entry, issues);
            }
            Ok(_) => {}
            Err(_) => issues.push(Issue::warning(
                at(".type"),
                format!("field {key:?} has unknown type {type_str:?}"),
            )),
        },
    }

    check_conditions(&at(".if"), key, entry, known_keys, issues);
}

/// Option-list shape for choice fields.
fn check_options(path: &str, key: &str, entry: &Map<String, Value>, issues: &mut IssueList) {
    let options = entry
        .get("control")
        .and_then(Value::as_object)
        .and_then(|control| control.get("options"));
    let Some(options) = options else {
        issues.push(Issue::error(
            path.to_string(),
            format!("choice field {key:?} has no options list"),
        ));
        return;
    };
    let Some(options) = options.as_array() else {
        issues.push(Issue::error(
            path.to_string(),
            format!("options of {key:?} must be a list, found {}", value_kind(options)),
        ));
        return;
    };
    if options.is_empty() {
        issues.push(Issue::error(
            path.to_string(),
            format!("choice field {key:?} has an empty options list"),
        ));
    }

    let mut seen_values = BTreeSet::new();
    for (j, option) in options.iter().enumerate() {
        let at = format!("{path}[{j}]");
        let Some(option) = option.as_object() else {
            issues.push(Issue::error(
                at,
                format!("option must be a map, found {}", value_kind(option)),
            ));
            continue;
        };
        if !option.contains_key("name") {
            issues.push(Issue::error(at.clone(), "option has no name"));
        }
        match option.get("value") {
            None => issues.push(Issue::warning(at, "option has no value")),
            Some(value) => {
                // Values key the stored answer; repeats within one field
                // make answers ambiguous.
                if !seen_values.insert(value.to_string()) {
                    issues.push(Issue::warning(
                        at,
                        format!("duplicate option value {value} in field {key:?}"),
                    ));
                }
            }
        }
    }
}

/// Input-type refinement, advisory only.
fn check_input_type(path: &str, key: &str, entry: &Map<String, Value>, issues: &mut IssueList) {
    let input_type = entry
        .get("control")
        .and_then(Value::as_object)
        .and_then(|control| control.get("input_type"))
        .and_then(Value::as_str);
    if let Some(input_type) = input_type {
        if input_type.parse::<InputType>().is_err() {
            issues.push(Issue::warning(
                path.to_string(),
                format!("field {key:?} has unknown input_type {input_type:?}"),
            ));
        }
    }
}

/// Conditional-visibility clauses: shape errors, unresolved references
/// are warnings.
fn check_conditions(
    path: &str,
    key: &str,
    entry: &Map<String, Value>,
    known_keys: &BTreeSet<String>,
    issues: &mut IssueList,
) {
    let Some(conditions) = entry.get("if") else {
        return;
    };
    let Some(conditions) = conditions.as_array() else {
        issues.push(Issue::error(
            path.to_string(),
            format!("if-clause of {key:?} must be a list, found {}", value_kind(conditions)),
        ));
        return;
    };
    for (j, condition) in conditions.iter().enumerate() {
        let at = format!("{path}[{j}]");
        let Some(condition) = condition.as_object() else {
            issues.push(Issue::error(
                at,
                format!("condition must be a map, found {}", value_kind(condition)),
            ));
            continue;
        };
        match condition.get("key").and_then(Value::as_str) {
            None => issues.push(Issue::error(at, "condition has no key")),
            Some(reference) if !known_keys.contains(reference) => {
                issues.push(Issue::warning(
                    at,
                    format!("condition references unknown key {reference:?}"),
                ));
            }
            Some(_) => {}
        }
    }
}

/// Alias table: targets must be canonical, and should resolve.
fn check_aliases(root: &Map<String, Value>, known_keys: &BTreeSet<String>, issues: &mut IssueList) {
    let Some(aliases) = root.get(ALIASES_KEY) else {
        return;
    };
    let Some(aliases) = aliases.as_object() else {
        issues.push(Issue::error(
            ALIASES_KEY,
            format!("aliases must be a map, found {}", value_kind(aliases)),
        ));
        return;
    };
    for (surface, target) in aliases {
        let at = format!("{ALIASES_KEY}.{surface}");
        let Some(target) = target.as_str() else {
            issues.push(Issue::error(
                at,
                format!("alias target must be a string, found {}", value_kind(target)),
            ));
            continue;
        };
        if !is_valid(target) {
            issues.push(Issue::error(
                at,
                format!("alias target {target:?} is not a canonical key"),
            ));
        } else if !known_keys.contains(target) {
            issues.push(Issue::warning(
                at,
                format!("alias target {target:?} does not resolve to a field"),
            ));
        }
    }
}

/// True for `MAJOR.MINOR.PATCH` with all-numeric components.
fn is_version_like(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn clean_dictionary() -> Value {
        json!({
            "_meta": {"name": "intake", "version": "2.1.0"},
            "general": [
                {"key": "first_name", "type": "input",
                 "title": "First Name", "section": "Patient Information",
                 "control": {"input_type": "name"}},
                {"key": "has_insurance", "type": "radio",
                 "control": {"options": [
                     {"name": "Yes", "value": "yes"},
                     {"name": "No", "value": "no"}
                 ]}}
            ],
            "insurance": [
                {"key": "insurance_id", "type": "input",
                 "if": [{"key": "has_insurance", "value": "yes"}]}
            ],
            "aliases": {"Insurance ID": "insurance_id"}
        })
    }

    #[test]
    fn test_clean_dictionary_is_clean() {
        let report = validate(&clean_dictionary());
        assert!(
            report.issues.is_empty(),
            "unexpected issues: {}",
            report.issues
        );
        assert_eq!(report.categories, 2);
        assert_eq!(report.total_fields, 3);
        assert_eq!(report.unique_keys, 3);
        assert_eq!(report.fields_per_category["general"], 2);
    }

    #[test]
    fn test_non_map_root() {
        let report = validate(&json!(["not", "a", "map"]));
        assert_eq!(report.issues.error_count(), 1);
        assert_eq!(report.categories, 0);
    }

    #[test]
    fn test_missing_meta_block() {
        let report = validate(&json!({
            "general": [{"key": "a", "type": "input"}]
        }));
        assert!(report.issues.errors().any(|i| i.path == META_KEY));
    }

    #[test]
    fn test_missing_name_and_bad_version() {
        let report = validate(&json!({
            "_meta": {"version": "2.1"},
            "general": [{"key": "a", "type": "input"}]
        }));
        assert!(report.issues.errors().any(|i| i.path == "_meta.name"));
        assert!(report
            .issues
            .warnings()
            .any(|i| i.path == "_meta.version" && i.message.contains("MAJOR.MINOR.PATCH")));
    }

    #[test]
    fn test_no_categories_is_error() {
        let report = validate(&json!({
            "_meta": {"name": "x", "version": "1.0.0"}
        }));
        assert!(report
            .issues
            .errors()
            .any(|i| i.message.contains("no field categories")));
    }

    #[test]
    fn test_non_list_category_is_error() {
        let report = validate(&json!({
            "_meta": {"name": "x", "version": "1.0.0"},
            "general": {"key": "a"}
        }));
        assert!(report
            .issues
            .errors()
            .any(|i| i.path == "general" && i.message.contains("must be a list")));
    }

    #[test]
    fn test_missing_key_skips_field_checks() {
        let report = validate(&json!({
            "_meta": {"name": "x", "version": "1.0.0"},
            "general": [{"type": "mystery_type"}]
        }));
        // One error for the missing key; no warning about the unknown
        // type, because the field is skipped.
        assert!(report.issues.errors().any(|i| i.path == "general[0].key"));
        assert_eq!(report.issues.warning_count(), 0);
    }

    #[test]
    fn test_missing_type_is_error() {
        let report = validate(&json!({
            "_meta": {"name": "x", "version": "1.0.0"},
            "general": [{"key": "a"}]
        }));
        assert!(report.issues.errors().any(|i| i.path == "general[0].type"));
    }

    #[test]
    fn test_unknown_type_is_warning() {
        let report = validate(&json!({
            "_meta": {"name": "x", "version": "1.0.0"},
            "general": [{"key": "a", "type": "slider"}]
        }));
        assert_eq!(report.issues.error_count(), 0);
        assert!(report
            .issues
            .warnings()
            .any(|i| i.message.contains("unknown type \"slider\"")));
    }

    #[test]
    fn test_non_canonical_key_is_error() {
        let report = validate(&json!({
            "_meta": {"name": "x", "version": "1.0.0"},
            "general": [{"key": "Phone#1", "type": "input"}]
        }));
        assert!(report
            .issues
            .errors()
            .any(|i| i.message.contains("not canonical")));
    }

    #[test]
    fn test_duplicate_key_across_categories_is_one_error() {
        let report = validate(&json!({
            "_meta": {"name": "x", "version": "1.0.0"},
            "general": [{"key": "dob", "type": "date"}],
            "history": [{"key": "dob", "type": "date"}]
        }));
        let duplicates: Vec<_> = report
            .issues
            .errors()
            .filter(|i| i.message.contains("duplicate key"))
            .collect();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].path, "history[0].key");
    }

    #[test]
    fn test_choice_field_without_options_is_error() {
        let report = validate(&json!({
            "_meta": {"name": "x", "version": "1.0.0"},
            "general": [{"key": "consent", "type": "radio"}]
        }));
        assert!(report
            .issues
            .errors()
            .any(|i| i.message.contains("no options list")));
    }

    #[test]
    fn test_option_shape_checks() {
        let report = validate(&json!({
            "_meta": {"name": "x", "version": "1.0.0"},
            "general": [{"key": "consent", "type": "dropdown",
                "control": {"options": [
                    {"value": "a"},
                    {"name": "B"},
                    {"name": "C", "value": "a"},
                    {"name": "D", "value": "a"}
                ]}}]
        }));
        // Missing name: error. Missing value: warning. The two repeats of
        // "a": one warning each.
        assert!(report
            .issues
            .errors()
            .any(|i| i.message.contains("no name")));
        assert!(report
            .issues
            .warnings()
            .any(|i| i.message.contains("no value")));
        let dup_count = report
            .issues
            .warnings()
            .filter(|i| i.message.contains("duplicate option value"))
            .count();
        assert_eq!(dup_count, 2);
    }

    #[test]
    fn test_unresolved_if_reference_is_one_warning() {
        let report = validate(&json!({
            "_meta": {"name": "x", "version": "1.0.0"},
            "general": [
                {"key": "insurance_id", "type": "input",
                 "if": [{"key": "has_insurance", "value": "yes"}]}
            ]
        }));
        assert_eq!(report.issues.error_count(), 0);
        let unresolved: Vec<_> = report
            .issues
            .warnings()
            .filter(|i| i.message.contains("unknown key \"has_insurance\""))
            .collect();
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].path, "general[0].if[0]");
    }

    #[test]
    fn test_if_reference_resolves_across_categories() {
        let report = validate(&json!({
            "_meta": {"name": "x", "version": "1.0.0"},
            "a": [{"key": "dependent", "type": "input",
                   "if": [{"key": "trigger", "value": true}]}],
            "b": [{"key": "trigger", "type": "checkbox",
                   "control": {"options": [{"name": "On", "value": true}]}}]
        }));
        assert!(
            report.issues.is_empty(),
            "unexpected issues: {}",
            report.issues
        );
    }

    #[test]
    fn test_alias_checks() {
        let report = validate(&json!({
            "_meta": {"name": "x", "version": "1.0.0"},
            "general": [{"key": "dob", "type": "date"}],
            "aliases": {
                "Date of Birth": "dob",
                "Bad Target": "Not Canonical",
                "Dangling": "missing_field"
            }
        }));
        assert!(report
            .issues
            .errors()
            .any(|i| i.path == "aliases.Bad Target"));
        assert!(report
            .issues
            .warnings()
            .any(|i| i.path == "aliases.Dangling" && i.message.contains("does not resolve")));
        assert!(!report.issues.issues().iter().any(|i| i.path == "aliases.Date of Birth"));
    }

    #[test]
    fn test_unknown_input_type_is_warning() {
        let report = validate(&json!({
            "_meta": {"name": "x", "version": "1.0.0"},
            "general": [{"key": "a", "type": "input",
                         "control": {"input_type": "credit_card"}}]
        }));
        assert_eq!(report.issues.error_count(), 0);
        assert!(report
            .issues
            .warnings()
            .any(|i| i.message.contains("credit_card")));
    }

    #[test]
    fn test_version_like() {
        assert!(is_version_like("1.0.0"));
        assert!(is_version_like("12.34.56"));
        assert!(!is_version_like("1.0"));
        assert!(!is_version_like("1.0.0.0"));
        assert!(!is_version_like("v1.0.0"));
        assert!(!is_version_like("1..0"));
        assert!(!is_version_like(""));
    }

    #[test]
    fn test_all_checks_run_despite_failures() {
        // Broken meta, a duplicate, a bad key, and a dangling alias all in
        // one document; every class must be present in the report.
        let report = validate(&json!({
            "_meta": {},
            "a": [
                {"key": "dob", "type": "date"},
                {"key": "dob", "type": "date"},
                {"key": "Bad Key", "type": "input"}
            ],
            "aliases": {"X": "nowhere"}
        }));
        assert!(report.issues.errors().any(|i| i.path == "_meta.name"));
        assert!(report.issues.errors().any(|i| i.message.contains("duplicate key")));
        assert!(report.issues.errors().any(|i| i.message.contains("not canonical")));
        assert!(report.issues.warnings().any(|i| i.path == "aliases.X"));
        assert_eq!(report.total_fields, 3);
    }
}
