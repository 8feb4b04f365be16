//! barcut - pack bar pieces into stock lengths and derive laser cut geometry.
//!
//! Pieces requested for cutting are packed into the fewest practical stock
//! bars (First-Fit-Decreasing, Best-Fit-Decreasing, or First-Fit-Decreasing
//! followed by pairwise swap local search). The finished packing is turned
//! into a [`CutPlan`]: straight cut lines at every piece boundary, hole
//! centers and 180° end arcs, with the bars laid side by side.
//!
//! # Example
//!
//! ```
//! use barcut_rs::{build_plan, Part, PlanConfig};
//!
//! let parts = vec![
//!     Part::new(50.0).with_arcs(true, false).with_holes([10.0, 30.0]),
//!     Part::new(70.0).with_arcs(false, true).with_holes([20.0]),
//!     Part::new(30.0).with_arcs(true, true),
//!     Part::new(90.0).with_holes([45.0]),
//! ];
//! let plan = build_plan(&PlanConfig::default(), &parts).unwrap();
//! assert_eq!(plan.bin_count(), 3);
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod packing;
pub mod parser;
pub mod plan;
pub mod validation;

// Re-exports for convenience
pub use config::PlanConfig;
pub use error::{CutError, ErrorCode, Result};
pub use model::{Arc, ArcOrientation, Bin, BinLayout, CutLine, CutPlan, Hole, Packing, Part};
pub use packing::{
    local_optimize, lower_bound_bins, optimize, pack, pack_best_fit_decreasing,
    pack_first_fit_decreasing, LocalSearch, LocalSearchConfig, PackingStrategy, SwapPolicy,
};
pub use parser::{parse_lengths, parse_parts, parse_parts_file};
pub use plan::{build_plan, build_plan_from_packing};
pub use validation::{validate_parts, validate_plan, ValidationResult};

/// Packing and plan produced for one parts list.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CutJob {
    pub strategy: PackingStrategy,
    pub packing: Packing,
    pub plan: CutPlan,
    /// `ceil(total length / stock length)`.
    pub lower_bound: usize,
}

/// Run the full pipeline for a parts file.
///
/// 1. Parse the parts list
/// 2. Validate the parts against the geometry
/// 3. Pack the lengths with the chosen strategy
/// 4. Derive the cut plan
pub fn plan_parts_file(
    input_path: &std::path::Path,
    config: &PlanConfig,
    strategy: PackingStrategy,
    search: LocalSearchConfig,
) -> Result<CutJob> {
    let parts = parse_parts_file(input_path)?;

    let validation = validate_parts(&parts, config)?;
    for warning in &validation.warnings {
        tracing::warn!("{}", warning);
    }

    plan_parts(&parts, config, strategy, search)
}

/// Pack `parts` with the chosen strategy and derive the cut plan.
pub fn plan_parts(
    parts: &[Part],
    config: &PlanConfig,
    strategy: PackingStrategy,
    search: LocalSearchConfig,
) -> Result<CutJob> {
    config.validate()?;

    let lengths = model::part_lengths(parts);
    let packing = pack(strategy, config.stock_length, &lengths, search)?;
    let plan = build_plan_from_packing(config, parts, &packing)?;

    Ok(CutJob {
        strategy,
        lower_bound: lower_bound_bins(config.stock_length, &lengths),
        packing,
        plan,
    })
}
