//! # formqa-parity — Field Parity Validation
//!
//! Cross-checks a converted document (its field-instance list, plus the
//! conversion pipeline's optional statistics) against the document's source
//! text. Parity is the degree to which the converted fields faithfully
//! represent the fields present in the source.
//!
//! ## Three Kinds of Evidence
//!
//! 1. **Hard structure** — duplicate or malformed instance keys, missing
//!    required attributes. Errors; downstream consumers key on these.
//! 2. **Heuristics** — a declarative rule table relating key/title
//!    substrings to the type, section, and input refinement a field is
//!    expected to carry. Warnings; the rules are advisory, not
//!    authoritative.
//! 3. **Coverage** — a coarse scan of the source text for candidate-field
//!    indicators (underscore runs, checkbox glyphs, label-colon lines),
//!    deliberately biased to over-count so that under-capture gets flagged
//!    rather than missed.
//!
//! Per-document [`FormReport`]s fold into a [`CorpusSummary`] whose
//! acceptance gate is a configurable [`AcceptancePolicy`], not a constant.
//! Every validation call is a pure function of its inputs; documents are
//! independent and may be validated in parallel, with the summary built
//! from order-independent sums.

pub mod coverage;
pub mod heuristics;
pub mod report;
pub mod validate;

pub use coverage::{coverage_ratio, scan_source_text, CoverageScan};
pub use heuristics::{builtin_rules, HeuristicRule};
pub use report::{AcceptancePolicy, CorpusSummary, FormReport, ReportStatus};
pub use validate::ParityValidator;
