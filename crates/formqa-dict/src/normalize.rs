//! # Key Normalization
//!
//! Rewrites every non-canonical field key in a dictionary document and
//! keeps the document referentially consistent while doing it: any scalar
//! string anywhere in the tree that exactly equals a rewritten key — an
//! `if`-clause reference, an alias target — is rewritten to the new key in
//! the same operation.
//!
//! ## Two Passes
//!
//! A reference can appear *before* the field it names (an alias table at
//! the top of the document pointing at a field defined in the last
//! category). A single in-order rewrite would miss it, so normalization
//! runs as two passes: collect every rename across the whole tree, then
//! rebuild the tree applying the complete mapping.
//!
//! ## Collisions Are Fatal
//!
//! Two distinct keys must never be silently merged. If canonicalization
//! would map two originals to the same key, or map an original onto a key
//! that already exists untouched, the whole run fails with both offending
//! keys named, and the caller resolves by hand.
//!
//! ## Purity
//!
//! The input document is never mutated; the result carries a new tree plus
//! the applied mapping for audit. Running `normalize` on its own output
//! yields an empty mapping.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use thiserror::Error;

use formqa_core::key::{canonicalize, is_valid};

/// Result of a normalization run: the rewritten document and the
/// `old key → new key` mapping that was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalization {
    /// The rewritten document. Equal to the input when `renames` is empty.
    pub document: Value,
    /// Every rename applied, keyed by original key.
    pub renames: BTreeMap<String, String>,
}

impl Normalization {
    /// True when the input was already fully canonical.
    pub fn is_noop(&self) -> bool {
        self.renames.is_empty()
    }
}

/// Collision during key normalization. Never silently merged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// Two distinct original keys canonicalize to the same new key.
    #[error(
        "key collision: {first:?} and {second:?} both normalize to {target:?}; rename one manually and retry"
    )]
    RenameOverlap {
        /// First original key (in document key order).
        first: String,
        /// Second original key.
        second: String,
        /// The shared canonical target.
        target: String,
    },

    /// A rename would land on a key that already exists untouched.
    #[error(
        "key collision: {original:?} normalizes to {target:?}, which is already a field key; rename one manually and retry"
    )]
    ExistingKey {
        /// The original non-canonical key.
        original: String,
        /// The canonical target that is already taken.
        target: String,
    },
}

/// Normalize every field key in `document`, preserving all references.
///
/// Walks the whole tree; every map carrying a string `key` attribute is
/// treated as a field record. Non-canonical keys are canonicalized, and
/// every scalar string in the document equal to a rewritten original is
/// replaced with its new key.
///
/// # Errors
///
/// Returns a [`NormalizeError`] on any collision; the input is returned
/// untouched in that case (the function never partially applies).
pub fn normalize(document: &Value) -> Result<Normalization, NormalizeError> {
    let mut untouched = BTreeSet::new();
    let mut renames = BTreeMap::new();
    collect_renames(document, &mut untouched, &mut renames);

    // Refuse to merge: a target may be claimed by exactly one original,
    // and never by a key that already exists in canonical form.
    let mut claimed: BTreeMap<&str, &str> = BTreeMap::new();
    for (old, new) in &renames {
        if untouched.contains(new) {
            return Err(NormalizeError::ExistingKey {
                original: old.clone(),
                target: new.clone(),
            });
        }
        if let Some(first) = claimed.insert(new, old) {
            return Err(NormalizeError::RenameOverlap {
                first: first.to_string(),
                second: old.clone(),
                target: new.clone(),
            });
        }
    }

    tracing::debug!(renames = renames.len(), "collected key renames");

    let document = if renames.is_empty() {
        document.clone()
    } else {
        rewrite(document, &renames)
    };

    Ok(Normalization { document, renames })
}

/// Pass 1: record every field key in the tree — canonical keys into
/// `untouched`, the rest into `renames`.
fn collect_renames(
    value: &Value,
    untouched: &mut BTreeSet<String>,
    renames: &mut BTreeMap<String, String>,
) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(key)) = map.get("key") {
                if is_valid(key) {
                    untouched.insert(key.clone());
                } else {
                    renames.insert(key.clone(), canonicalize(key));
                }
            }
            for child in map.values() {
                collect_renames(child, untouched, renames);
            }
        }
        Value::Array(items) => {
            for child in items {
                collect_renames(child, untouched, renames);
            }
        }
        _ => {}
    }
}

/// Pass 2: rebuild the tree, replacing every string equal to a renamed
/// original. Map keys are left alone — alias surface forms and category
/// names are not key references.
fn rewrite(value: &Value, renames: &BTreeMap<String, String>) -> Value {
    match value {
        Value::String(s) => match renames.get(s) {
            Some(new) => Value::String(new.clone()),
            None => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(|v| rewrite(v, renames)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), rewrite(v, renames)))
                .collect(),
        ),
        _ => value.clone(),
    }
}
