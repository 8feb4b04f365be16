//! Parts list parser.
//!
//! One part per line: `length, arc_start, arc_end, hole, hole, ...`.
//! Flags are `0` or `1` and default to `0` when omitted. Hole offsets are
//! measured from the part start. Blank lines and `#` comments are ignored.
//!
//! ```text
//! # length, arc start, arc end, holes...
//! 50, 1, 0, 10, 30
//! 70, 0, 1, 20
//! 30, 1, 1
//! 90, 0, 0, 45
//! ```

use crate::error::{CutError, Result};
use crate::model::Part;
use std::path::Path;

use super::fields::{parse_flag, parse_number, split_fields, strip_comment};

/// Parse a parts list from text.
pub fn parse_parts(content: &str) -> Result<Vec<Part>> {
    let mut parts = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = strip_comment(raw);
        if line.is_empty() {
            continue;
        }
        parts.push(parse_part_line(line, line_no)?);
    }

    tracing::debug!("Parsed {} part(s)", parts.len());
    Ok(parts)
}

/// Parse a single non-empty part line.
pub fn parse_part_line(line: &str, line_no: usize) -> Result<Part> {
    let fields = split_fields(line);

    let length_field = fields.first().copied().unwrap_or_default();
    if length_field.is_empty() {
        return Err(CutError::ParseError {
            line: line_no,
            message: "missing part length".to_string(),
        });
    }
    let length = parse_number(length_field, line_no)?;

    let arc_start = parse_flag(fields.get(1).copied().unwrap_or_default(), line_no)?;
    let arc_end = parse_flag(fields.get(2).copied().unwrap_or_default(), line_no)?;

    let hole_offsets = fields
        .iter()
        .skip(3)
        .filter(|f| !f.is_empty())
        .map(|f| parse_number(f, line_no))
        .collect::<Result<Vec<f64>>>()?;

    Ok(Part {
        length,
        arc_start,
        arc_end,
        hole_offsets,
    })
}

/// Parse a comma-separated list of plain lengths, e.g. `50, 70, 30, 90`.
///
/// Line breaks are accepted as separators as well.
pub fn parse_lengths(content: &str) -> Result<Vec<f64>> {
    let mut lengths = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = strip_comment(raw);
        for field in split_fields(line).into_iter().filter(|f| !f.is_empty()) {
            lengths.push(parse_number(field, idx + 1)?);
        }
    }

    Ok(lengths)
}

/// Read and parse a parts file.
pub fn parse_parts_file(path: &Path) -> Result<Vec<Part>> {
    use std::fs;

    if !path.exists() {
        return Err(CutError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let parts = parse_parts(&content)?;

    if parts.is_empty() {
        return Err(CutError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    Ok(parts)
}
