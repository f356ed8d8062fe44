//! # Coverage Estimation
//!
//! Scans source text for candidate-field indicators and estimates how many
//! fields a faithful conversion should have produced. This is a coarse
//! proxy, not field-level matching: each detector counts a line at most
//! once, but a line can satisfy several detectors and then counts once per
//! detector. The over-count is deliberate — it biases the coverage ratio
//! low, so an under-capturing conversion gets flagged rather than excused.

use serde::Serialize;

/// Minimum run of underscores that reads as a write-in blank.
const MIN_UNDERSCORE_RUN: usize = 3;

/// Per-detector line counts for one source document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoverageScan {
    /// Lines containing an underscore run of three or more.
    pub underscore_lines: usize,
    /// Lines containing a bracket-pair checkbox glyph.
    pub checkbox_lines: usize,
    /// Lines starting with a capitalized label followed by a colon.
    pub label_lines: usize,
}

impl CoverageScan {
    /// Estimated candidate-field population: the sum over detectors of
    /// lines that tripped each detector.
    pub fn potential_fields(&self) -> usize {
        self.underscore_lines + self.checkbox_lines + self.label_lines
    }
}

/// Scan newline-delimited source text for candidate-field indicators.
pub fn scan_source_text(text: &str) -> CoverageScan {
    let mut scan = CoverageScan::default();
    for line in text.lines() {
        if has_underscore_run(line) {
            scan.underscore_lines += 1;
        }
        if has_checkbox_glyph(line) {
            scan.checkbox_lines += 1;
        }
        if has_label_colon(line) {
            scan.label_lines += 1;
        }
    }
    scan
}

/// Ratio of converted fields to estimated candidates.
///
/// `1.0` when there are no candidates; otherwise `actual / potential`,
/// with no ceiling — a conversion may legitimately find more fields than
/// the detectors estimate.
pub fn coverage_ratio(actual: usize, potential: usize) -> f64 {
    if potential == 0 {
        1.0
    } else {
        actual as f64 / potential as f64
    }
}

/// A run of [`MIN_UNDERSCORE_RUN`] or more underscores: a write-in blank.
fn has_underscore_run(line: &str) -> bool {
    let mut run = 0usize;
    for c in line.chars() {
        if c == '_' {
            run += 1;
            if run >= MIN_UNDERSCORE_RUN {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

/// A bracket pair rendering a checkbox: `[]`, or `[` + one marker
/// character + `]` (space, underscore, `x`, `X`).
fn has_checkbox_glyph(line: &str) -> bool {
    let bytes = line.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'[' {
            continue;
        }
        match bytes.get(i + 1) {
            Some(b']') => return true,
            Some(&mark) if matches!(mark, b' ' | b'_' | b'x' | b'X') => {
                if bytes.get(i + 2) == Some(&b']') {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

/// A capitalized label at line start, terminated by a colon: `Name:`,
/// `Emergency Contact: ...`. The label may contain letters, digits,
/// spaces, and common punctuation for compound labels.
fn has_label_colon(line: &str) -> bool {
    let mut chars = line.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {}
        _ => return false,
    }
    for c in chars {
        match c {
            ':' => return true,
            c if c.is_ascii_alphanumeric() => {}
            ' ' | '\'' | '/' | '-' | '(' | ')' | '.' | ',' | '#' => {}
            _ => return false,
        }
    }
    false
}
