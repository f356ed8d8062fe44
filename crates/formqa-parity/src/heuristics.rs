//! # Heuristic Rule Table
//!
//! Substring rules relating a field's key and title to the type, section,
//! and input refinement it is expected to carry. The rules are data, not
//! branching code: each [`HeuristicRule`] names its trigger substrings,
//! optional exclusions, and expectations, and the validator applies them
//! uniformly. New heuristics are new table rows.
//!
//! All rule violations are warnings — a field named `phone_notes` that is
//! a text block is suspicious, not provably wrong.

use formqa_core::vocab::{FieldType, InputType};

/// One row of the heuristic table.
///
/// A rule fires when any needle is a substring of the field's lowercased
/// `key` + `title` haystack and no exclusion is. Fired rules compare the
/// field against whichever expectations are set.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicRule {
    /// Short rule name, used in warning messages.
    pub name: &'static str,
    /// Substrings that trigger the rule.
    pub needles: &'static [&'static str],
    /// Substrings that suppress the rule even when a needle matches.
    pub excludes: &'static [&'static str],
    /// Expected field type.
    pub expected_type: Option<FieldType>,
    /// Alternate acceptable field type (e.g. date-like fields captured as
    /// plain inputs).
    pub fallback_type: Option<FieldType>,
    /// Expected `control.input_type` refinement.
    pub expected_input_type: Option<InputType>,
    /// Expected section name.
    pub expected_section: Option<&'static str>,
}

impl HeuristicRule {
    /// True when this rule fires for the given lowercased haystack.
    pub fn matches(&self, haystack: &str) -> bool {
        self.needles.iter().any(|n| haystack.contains(n))
            && !self.excludes.iter().any(|x| haystack.contains(x))
    }

    /// True when `field_type` satisfies the rule's type expectation.
    pub fn type_satisfied(&self, field_type: Option<FieldType>) -> bool {
        match self.expected_type {
            None => true,
            Some(expected) => {
                field_type == Some(expected)
                    || (self.fallback_type.is_some() && field_type == self.fallback_type)
            }
        }
    }
}

/// The built-in rule table.
pub fn builtin_rules() -> &'static [HeuristicRule] {
    const RULES: &[HeuristicRule] = &[
        HeuristicRule {
            name: "phone",
            needles: &["phone"],
            excludes: &[],
            expected_type: Some(FieldType::Input),
            fallback_type: None,
            expected_input_type: Some(InputType::Phone),
            expected_section: None,
        },
        HeuristicRule {
            name: "email",
            needles: &["email", "e-mail"],
            excludes: &[],
            expected_type: Some(FieldType::Input),
            fallback_type: None,
            expected_input_type: Some(InputType::Email),
            expected_section: None,
        },
        HeuristicRule {
            name: "ssn",
            needles: &["ssn", "social security"],
            excludes: &[],
            expected_type: Some(FieldType::Input),
            fallback_type: None,
            expected_input_type: Some(InputType::Ssn),
            expected_section: None,
        },
        HeuristicRule {
            name: "zip",
            needles: &["zip", "postal"],
            excludes: &[],
            expected_type: Some(FieldType::Input),
            fallback_type: None,
            expected_input_type: Some(InputType::Zip),
            expected_section: None,
        },
        HeuristicRule {
            name: "signature",
            needles: &["signature"],
            excludes: &[],
            expected_type: Some(FieldType::BlockSignature),
            fallback_type: None,
            expected_input_type: None,
            expected_section: Some("Consent"),
        },
        HeuristicRule {
            name: "emergency",
            needles: &["emergency"],
            excludes: &[],
            expected_type: None,
            fallback_type: None,
            expected_input_type: None,
            expected_section: Some("Emergency Contact"),
        },
        HeuristicRule {
            name: "date",
            needles: &["date", "birth", "dob"],
            // "last updated" style fields are bookkeeping, not entry dates.
            excludes: &["update"],
            expected_type: Some(FieldType::Date),
            fallback_type: Some(FieldType::Input),
            expected_input_type: None,
            expected_section: None,
        },
    ];
    RULES
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> &'static HeuristicRule {
        builtin_rules()
            .iter()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("no rule named {name}"))
    }

    #[test]
    fn test_needle_matching() {
        assert!(rule("phone").matches("patient_phone phone number"));
        assert!(!rule("phone").matches("first_name first name"));
    }

    #[test]
    fn test_exclusion_suppresses() {
        let date = rule("date");
        assert!(date.matches("dob date of birth"));
        assert!(!date.matches("last_update date updated"));
    }

    #[test]
    fn test_type_satisfied_with_fallback() {
        let date = rule("date");
        assert!(date.type_satisfied(Some(FieldType::Date)));
        assert!(date.type_satisfied(Some(FieldType::Input)));
        assert!(!date.type_satisfied(Some(FieldType::Checkbox)));
        assert!(!date.type_satisfied(None));
    }

    #[test]
    fn test_type_satisfied_without_fallback() {
        let phone = rule("phone");
        assert!(phone.type_satisfied(Some(FieldType::Input)));
        assert!(!phone.type_satisfied(Some(FieldType::Text)));
    }

    #[test]
    fn test_section_rules() {
        assert_eq!(rule("signature").expected_section, Some("Consent"));
        assert_eq!(rule("emergency").expected_section, Some("Emergency Contact"));
        assert_eq!(rule("emergency").expected_type, None);
    }

    #[test]
    fn test_rule_names_unique() {
        let mut seen = std::collections::HashSet::new();
        for r in builtin_rules() {
            assert!(seen.insert(r.name), "duplicate rule name {}", r.name);
        }
    }
}
