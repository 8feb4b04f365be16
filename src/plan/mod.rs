//! Cut plan derivation from a packing.

mod builder;
mod matcher;

pub use builder::{build_plan, build_plan_from_packing, build_plan_with};
pub use matcher::PartMatcher;
