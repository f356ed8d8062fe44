//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types shared across FormQA. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! Validators do not speak this language: a malformed-but-parseable document
//! becomes error-severity entries in an [`crate::IssueList`], and the
//! validator still runs every remaining check. `FormqaError` covers the
//! conditions that genuinely stop an operation — unreadable files,
//! unparseable input, an unknown vocabulary token handed to a strict parser.

use thiserror::Error;

/// Top-level error type for FormQA.
#[derive(Error, Debug)]
pub enum FormqaError {
    /// A string was used as a field key without being canonical.
    #[error("invalid field key: {0:?}")]
    InvalidKey(String),

    /// A string is not a member of a fixed vocabulary.
    #[error("unknown vocabulary token: {0:?}")]
    Vocabulary(String),

    /// A document had the wrong root shape for the operation.
    #[error("document error: {0}")]
    Document(String),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
