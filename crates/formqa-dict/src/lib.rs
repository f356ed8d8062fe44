//! # formqa-dict — Dictionary Operations
//!
//! Operations over the canonical field-definition dictionary: loading it
//! from disk, rewriting non-canonical keys while keeping every reference
//! consistent, and validating the invariants a field dictionary must hold.
//!
//! ## The Dictionary Document
//!
//! A dictionary is a root map from category name to a list of field
//! definitions, with two reserved entries: `_meta` (name, version, notes)
//! and `aliases` (surface form → canonical key, used by the conversion
//! pipeline for fuzzy matching). Field keys are unique across the entire
//! document, and every `if`-clause reference must resolve against the full
//! cross-category key set.
//!
//! Both operations here work on the untyped [`serde_json::Value`] tree —
//! a dictionary under repair is exactly the input that a typed model would
//! refuse to load.
//!
//! ## Purity
//!
//! [`normalize::normalize`] returns a new document plus an explicit rename
//! mapping; [`validate::validate`] is read-only and never fails. Writing a
//! fixed dictionary back to disk (and any backup scheme) belongs to the
//! caller, after validation reports zero errors.

pub mod document;
pub mod normalize;
pub mod validate;

pub use document::{load_dictionary, DocumentError, ALIASES_KEY, META_KEY};
pub use normalize::{normalize, Normalization, NormalizeError};
pub use validate::{validate, DictionaryReport};
