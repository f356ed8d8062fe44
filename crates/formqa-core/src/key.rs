//! # Field Keys — Canonical Identifier Codec
//!
//! A field key is the identifier by which a field definition is referenced
//! from everywhere else in a dictionary: conditional-visibility clauses,
//! alias tables, and converted field instances. The canonical form is
//! `^[a-z][a-z0-9_]*$`.
//!
//! ## Referential Invariant
//!
//! Keys are immutable once published — renaming one breaks every downstream
//! reference. The codec therefore lives at the bottom of the dependency
//! graph so that the normalizer and both validators agree, character for
//! character, on what "canonical" means.
//!
//! ## Construction
//!
//! - [`canonicalize()`] — total, idempotent mapping from any string to a
//!   canonical key.
//! - [`is_valid()`] — membership test for the canonical form.
//! - [`FieldKey::parse()`] — validated newtype constructor; rejects
//!   non-canonical input instead of silently fixing it.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::FormqaError;

/// Substituted when canonicalization of an input leaves nothing behind
/// (empty input, or input made entirely of separator characters).
pub const FALLBACK_KEY: &str = "field";

/// Prefix applied when a canonicalized key would start with a digit.
pub const DIGIT_PREFIX: &str = "q_";

/// Returns true iff `key` is already in canonical form:
/// a lowercase ASCII letter followed by lowercase letters, digits,
/// and underscores.
pub fn is_valid(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Map an arbitrary string to a canonical field key.
///
/// Total (never fails) and idempotent: `canonicalize(canonicalize(x))`
/// equals `canonicalize(x)` for every input.
///
/// The mapping, in order:
/// 1. lowercase ASCII letters are kept, uppercase are lowered;
/// 2. every other character becomes `_`, with runs collapsed and
///    leading/trailing `_` stripped;
/// 3. a result starting with a digit gains the [`DIGIT_PREFIX`];
/// 4. an empty result becomes [`FALLBACK_KEY`].
pub fn canonicalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('_') {
            // Separator: collapse runs, and never emit one at the front.
            out.push('_');
        }
    }
    let trimmed = out.trim_end_matches('_');
    if trimmed.is_empty() {
        return FALLBACK_KEY.to_string();
    }
    let starts_with_digit = trimmed
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit());
    if starts_with_digit {
        format!("{DIGIT_PREFIX}{trimmed}")
    } else {
        trimmed.to_string()
    }
}

/// A field key that is known to be in canonical form.
///
/// The inner string always satisfies [`is_valid`]. Use [`FieldKey::parse`]
/// to validate external input, or [`FieldKey::canonicalize`] to coerce it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldKey(String);

impl FieldKey {
    /// Validate a string as a canonical key.
    ///
    /// # Errors
    ///
    /// Returns [`FormqaError::InvalidKey`] if the string is not canonical.
    /// There is no silent fixing here — callers that want coercion should
    /// use [`FieldKey::canonicalize`] and keep the audit trail themselves.
    pub fn parse(s: &str) -> Result<Self, FormqaError> {
        if is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(FormqaError::InvalidKey(s.to_string()))
        }
    }

    /// Coerce an arbitrary string into a canonical key.
    pub fn canonicalize(raw: &str) -> Self {
        Self(canonicalize(raw))
    }

    /// Access the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FieldKey {
    type Err = FormqaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for FieldKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
