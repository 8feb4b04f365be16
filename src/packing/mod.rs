//! One-dimensional bin packing of piece lengths into stock bars.

mod greedy;
mod local_search;

pub use greedy::{
    check_demand, lower_bound_bins, pack_best_fit_decreasing, pack_first_fit_decreasing,
};
pub use local_search::{
    local_optimize, optimize, optimize_with, LocalSearch, LocalSearchConfig, LocalSearchOutcome,
    SearchProgress, SwapPolicy,
};

use crate::error::Result;
use crate::model::Packing;
use serde::{Deserialize, Serialize};

/// Packing algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PackingStrategy {
    FirstFitDecreasing,
    BestFitDecreasing,
    /// First-Fit-Decreasing followed by local search.
    #[default]
    Optimized,
}

impl std::fmt::Display for PackingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackingStrategy::FirstFitDecreasing => write!(f, "ffd"),
            PackingStrategy::BestFitDecreasing => write!(f, "bfd"),
            PackingStrategy::Optimized => write!(f, "optimized"),
        }
    }
}

/// Pack `pieces` into bins of `capacity` with the chosen strategy.
pub fn pack(
    strategy: PackingStrategy,
    capacity: f64,
    pieces: &[f64],
    search: LocalSearchConfig,
) -> Result<Packing> {
    match strategy {
        PackingStrategy::FirstFitDecreasing => pack_first_fit_decreasing(capacity, pieces),
        PackingStrategy::BestFitDecreasing => pack_best_fit_decreasing(capacity, pieces),
        PackingStrategy::Optimized => optimize_with(capacity, pieces, search),
    }
}
