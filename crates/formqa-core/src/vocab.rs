//! # Field Vocabularies — Single Source of Truth
//!
//! Defines the `FieldType` and `InputType` enums — the fixed vocabularies a
//! field definition draws from. These are the ONE definition used across the
//! whole toolchain. Every `match` must be exhaustive, so adding a variant
//! forces every consumer to handle it at compile time.
//!
//! ## Vocabulary Drift
//!
//! New form controls appear in hand-authored dictionaries before the
//! vocabulary catches up. The validators therefore treat an unknown type
//! string as a *warning*, never a hard error; [`FieldType::from_str`] is the
//! strict parser they probe with.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::FormqaError;

/// The kind of form control a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Free-text entry, refined by `control.input_type`.
    Input,
    /// Single choice from visible options.
    Radio,
    /// Multiple choice from visible options.
    Checkbox,
    /// Single choice from a collapsed option list.
    Dropdown,
    /// Calendar date entry.
    Date,
    /// US state selector.
    States,
    /// Signature capture block.
    BlockSignature,
    /// Read-only text block.
    BlockText,
    /// Photo upload.
    Photo,
    /// Multi-line free text.
    Text,
    /// Grid of radio groups sharing one option row.
    Multiradio,
    /// Terms-of-service acknowledgement.
    Terms,
}

/// Total number of field types. Used for compile-time assertions.
pub const FIELD_TYPE_COUNT: usize = 12;

impl FieldType {
    /// Returns all field types in canonical order.
    pub fn all() -> &'static [FieldType] {
        &[
            Self::Input,
            Self::Radio,
            Self::Checkbox,
            Self::Dropdown,
            Self::Date,
            Self::States,
            Self::BlockSignature,
            Self::BlockText,
            Self::Photo,
            Self::Text,
            Self::Multiradio,
            Self::Terms,
        ]
    }

    /// Returns the snake_case string identifier for this type.
    ///
    /// This must match the serde serialization format and the strings used
    /// in dictionary documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Dropdown => "dropdown",
            Self::Date => "date",
            Self::States => "states",
            Self::BlockSignature => "block_signature",
            Self::BlockText => "block_text",
            Self::Photo => "photo",
            Self::Text => "text",
            Self::Multiradio => "multiradio",
            Self::Terms => "terms",
        }
    }

    /// Whether this type carries a `control.options` list that the
    /// dictionary validator must check for shape.
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Radio | Self::Checkbox | Self::Dropdown)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = FormqaError;

    /// Parse a field type from its snake_case string identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input" => Ok(Self::Input),
            "radio" => Ok(Self::Radio),
            "checkbox" => Ok(Self::Checkbox),
            "dropdown" => Ok(Self::Dropdown),
            "date" => Ok(Self::Date),
            "states" => Ok(Self::States),
            "block_signature" => Ok(Self::BlockSignature),
            "block_text" => Ok(Self::BlockText),
            "photo" => Ok(Self::Photo),
            "text" => Ok(Self::Text),
            "multiradio" => Ok(Self::Multiradio),
            "terms" => Ok(Self::Terms),
            other => Err(FormqaError::Vocabulary(other.to_string())),
        }
    }
}

/// The refinement of an `input` field's accepted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    /// Unconstrained single-line text.
    Text,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
    /// Social security number.
    Ssn,
    /// Person name.
    Name,
    /// Date, any.
    Date,
    /// Date constrained to the past (birth dates, prior visits).
    Past,
    /// Date constrained to the future (appointments, expirations).
    Future,
    /// ZIP / postal code.
    Zip,
}

/// Total number of input types. Used for compile-time assertions.
pub const INPUT_TYPE_COUNT: usize = 9;

impl InputType {
    /// Returns all input types in canonical order.
    pub fn all() -> &'static [InputType] {
        &[
            Self::Text,
            Self::Email,
            Self::Phone,
            Self::Ssn,
            Self::Name,
            Self::Date,
            Self::Past,
            Self::Future,
            Self::Zip,
        ]
    }

    /// Returns the snake_case string identifier for this input type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Ssn => "ssn",
            Self::Name => "name",
            Self::Date => "date",
            Self::Past => "past",
            Self::Future => "future",
            Self::Zip => "zip",
        }
    }
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputType {
    type Err = FormqaError;

    /// Parse an input type from its snake_case string identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "ssn" => Ok(Self::Ssn),
            "name" => Ok(Self::Name),
            "date" => Ok(Self::Date),
            "past" => Ok(Self::Past),
            "future" => Ok(Self::Future),
            "zip" => Ok(Self::Zip),
            other => Err(FormqaError::Vocabulary(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_counts() {
        assert_eq!(FieldType::all().len(), FIELD_TYPE_COUNT);
        assert_eq!(InputType::all().len(), INPUT_TYPE_COUNT);
    }

    #[test]
    fn test_all_unique() {
        let mut seen = std::collections::HashSet::new();
        for t in FieldType::all() {
            assert!(seen.insert(t.as_str()), "duplicate field type: {t}");
        }
        let mut seen = std::collections::HashSet::new();
        for t in InputType::all() {
            assert!(seen.insert(t.as_str()), "duplicate input type: {t}");
        }
    }

    #[test]
    fn test_as_str_roundtrip() {
        for t in FieldType::all() {
            let parsed: FieldType = t.as_str().parse().unwrap();
            assert_eq!(*t, parsed);
        }
        for t in InputType::all() {
            let parsed: InputType = t.as_str().parse().unwrap();
            assert_eq!(*t, parsed);
        }
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("nonexistent".parse::<FieldType>().is_err());
        assert!("Input".parse::<FieldType>().is_err()); // case-sensitive
        assert!("".parse::<InputType>().is_err());
    }

    #[test]
    fn test_serde_format_matches_as_str() {
        for t in FieldType::all() {
            let json = serde_json::to_string(t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
        for t in InputType::all() {
            let json = serde_json::to_string(t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn test_choice_types() {
        assert!(FieldType::Radio.is_choice());
        assert!(FieldType::Checkbox.is_choice());
        assert!(FieldType::Dropdown.is_choice());
        assert!(!FieldType::Input.is_choice());
        assert!(!FieldType::Multiradio.is_choice());
        assert!(!FieldType::Terms.is_choice());
    }
}
