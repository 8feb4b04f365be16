//! Data model for parts, packings and cut plans.

mod packing;
mod part;
mod plan;

pub use packing::{Bin, Packing};
pub use part::{part_lengths, Part};
pub use plan::{Arc, ArcOrientation, BinLayout, CutLine, CutPlan, Hole, Placement};
