//! Field-level parsers for the parts list format.

use crate::error::{CutError, Result};

/// Strip a trailing `#` comment and surrounding whitespace.
pub fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => line[..pos].trim(),
        None => line.trim(),
    }
}

/// Split a line into trimmed comma-separated fields.
pub fn split_fields(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

/// Parse a finite number.
pub fn parse_number(field: &str, line: usize) -> Result<f64> {
    field
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CutError::InvalidNumber {
            line,
            value: field.to_string(),
        })
}

/// Parse a `0`/`1` flag. An empty field reads as `0`.
pub fn parse_flag(field: &str, line: usize) -> Result<bool> {
    match field {
        "" | "0" => Ok(false),
        "1" => Ok(true),
        other => Err(CutError::InvalidFlag {
            line,
            value: other.to_string(),
        }),
    }
}
