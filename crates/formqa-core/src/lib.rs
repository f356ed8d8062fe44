//! # formqa-core — Foundational Types for FormQA
//!
//! This crate is the bedrock of the FormQA toolchain. It defines the shared
//! vocabulary of the intake-form QA pipeline: canonical field keys, the fixed
//! field-type taxonomies, the record shapes produced by the conversion
//! pipeline, and the issue primitives every validator reports with. Every
//! other crate in the workspace depends on `formqa-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Canonical keys are a codec, not a convention.** [`key::canonicalize`]
//!    is total and idempotent; [`FieldKey`] wraps a string that is *known* to
//!    be canonical. No bare strings for identifiers once validated.
//!
//! 2. **One vocabulary definition per taxonomy.** [`FieldType`] and
//!    [`InputType`] are single exhaustive enums. Adding a variant forces
//!    every consumer to handle it at compile time.
//!
//! 3. **Ingestion types are lenient on purpose.** [`FieldRecord`] and
//!    [`ConversionStats`] use `Option` and defaults throughout — they are
//!    validation *inputs*, and a missing attribute must surface as a report
//!    issue, never as a deserialization failure.
//!
//! 4. **Issues, not exceptions.** Validators accumulate [`Issue`] values
//!    into an [`IssueList`] and always run to completion. `Result` errors are
//!    reserved for I/O and unparseable input.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `formqa-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`, and the report types
//!   implement `Serialize`.

pub mod error;
pub mod issue;
pub mod key;
pub mod record;
pub mod vocab;

// Re-export primary types for ergonomic imports.
pub use error::FormqaError;
pub use issue::{Issue, IssueList, Severity};
pub use key::FieldKey;
pub use record::{ChoiceOption, Condition, ConversionStats, FieldControl, FieldRecord, UnmatchedField};
pub use vocab::{FieldType, InputType, FIELD_TYPE_COUNT, INPUT_TYPE_COUNT};
