//! Parts list parser module.

mod fields;
mod parts;

pub use fields::*;
pub use parts::{parse_lengths, parse_part_line, parse_parts, parse_parts_file};
