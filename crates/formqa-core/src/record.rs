//! # Field Records — Lenient Ingestion Types
//!
//! Serde types for the artifacts the conversion pipeline emits: field
//! records (one shape serving both dictionary entries and per-document
//! instances) and the optional per-document conversion statistics.
//!
//! ## Leniency Invariant
//!
//! Every attribute that the validators *check* is optional or defaulted
//! here. A field record missing its `key` must deserialize cleanly so the
//! validator can report the missing key as an error-severity issue; a
//! strict type would turn a reportable defect into a parse failure and
//! abort the rest of the document's checks.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One `{name, value}` entry of a choice field's option list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Display label for the option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Stored value, unique within one field's options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Control metadata attached to a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldControl {
    /// Input refinement for `input` fields (`phone`, `ssn`, `zip`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    /// Ordered option list for choice fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ChoiceOption>>,
}

/// One conditional-visibility clause: show the field when the referenced
/// field currently holds the expected value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Key of the field the condition reads. Must exist in the
    /// dictionary's full key set.
    pub key: String,
    /// Value that satisfies the condition.
    #[serde(default)]
    pub value: Value,
}

/// A detected form field.
///
/// The same shape serves two roles: a reusable *definition* inside the
/// dictionary, and a per-document *instance* in a converted output list.
/// Instances may additionally carry provenance
/// (`reused_from_dictionary`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Unique identifier. Canonical form is `^[a-z][a-z0-9_]*$`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Control kind, drawn from the field-type vocabulary.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Grouping name ("Patient Information", "Emergency Contact", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Whether the field may be left blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    /// Control metadata.
    #[serde(default)]
    pub control: FieldControl,
    /// Conditional-visibility clauses.
    #[serde(rename = "if", default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    /// Instance provenance: true when the conversion pipeline matched
    /// this field to an existing dictionary definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reused_from_dictionary: Option<bool>,
}

impl FieldRecord {
    /// Lowercased `key` + `title` haystack for substring heuristics.
    pub fn search_text(&self) -> String {
        let mut text = String::new();
        if let Some(key) = &self.key {
            text.push_str(&key.to_lowercase());
        }
        if let Some(title) = &self.title {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&title.to_lowercase());
        }
        text
    }
}

/// A field the conversion pipeline could not match to the dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnmatchedField {
    /// Key, when the pipeline invented one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Source title of the unmatched field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Per-document statistics emitted by the conversion pipeline.
///
/// Consumed read-only; the parity validator folds `reused_pct` into its
/// report unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Total converted items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<u64>,
    /// Items matched to an existing dictionary definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reused_from_dictionary: Option<u64>,
    /// Dictionary reuse percentage (0–100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reused_pct: Option<f64>,
    /// Fields the pipeline could not match.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unmatched_fields: Vec<UnmatchedField>,
    /// Field counts keyed by section name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub counts_by_section: BTreeMap<String, u64>,
    /// Field counts keyed by field type.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub counts_by_type: BTreeMap<String, u64>,
    /// Parsing metadata (line/char counts). Opaque here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsing: Option<Value>,
    /// Extraction metadata (sizes, service timings). Opaque here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction: Option<Value>,
}
