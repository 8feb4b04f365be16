//! Validation module.

mod validate;

pub use validate::*;
