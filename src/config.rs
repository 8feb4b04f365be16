//! Configuration constants and settings for packing and planning.

use crate::error::{CutError, Result};
use serde::{Deserialize, Serialize};

/// Tolerance when checking whether a piece still fits into a bin.
pub const FIT_EPS: f64 = 1e-9;

/// Tolerance for re-associating a packed length with its part.
pub const MATCH_TOL: f64 = 1e-6;

/// Fallback tolerance when no part matches within `MATCH_TOL`.
pub const MATCH_TOL_FALLBACK: f64 = 1e-3;

/// Overshoot on each side of a cut line so the laser fully separates the bar.
pub const CUT_EXTRA_MARGIN: f64 = 1.0;

/// Default ceiling on local search passes.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Emit a progress event every this many local search passes.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 1_000;

/// Default stock (bar) length in mm.
pub const DEFAULT_STOCK_LENGTH: f64 = 100.0;

/// Default bar width in mm.
pub const DEFAULT_WIDTH: f64 = 10.0;

/// Default gap between bars laid side by side, in mm.
pub const DEFAULT_GAP: f64 = 5.0;

/// Default hole radius in mm.
pub const DEFAULT_HOLE_RADIUS: f64 = 1.5;

/// Geometry settings for a cut plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Length of one raw bar (bin capacity).
    pub stock_length: f64,
    /// Bar width.
    pub width: f64,
    /// Gap between neighbouring bars.
    pub gap: f64,
    /// Radius shared by all holes.
    pub hole_radius: f64,
    /// Cut both bar ends (y = 0 and the last boundary) in addition to interior boundaries.
    pub include_end_cut: bool,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            stock_length: DEFAULT_STOCK_LENGTH,
            width: DEFAULT_WIDTH,
            gap: DEFAULT_GAP,
            hole_radius: DEFAULT_HOLE_RADIUS,
            include_end_cut: true,
        }
    }
}

impl PlanConfig {
    /// Create a plan configuration.
    pub fn new(stock_length: f64, width: f64, gap: f64, hole_radius: f64) -> Self {
        Self {
            stock_length,
            width,
            gap,
            hole_radius,
            include_end_cut: true,
        }
    }

    /// Set whether end cuts are emitted.
    pub fn with_end_cut(mut self, include_end_cut: bool) -> Self {
        self.include_end_cut = include_end_cut;
        self
    }

    /// Reject non-positive stock length, width or gap and negative hole radius.
    pub fn validate(&self) -> Result<()> {
        require_positive("stock_length", self.stock_length)?;
        require_positive("width", self.width)?;
        require_positive("gap", self.gap)?;
        if !self.hole_radius.is_finite() || self.hole_radius < 0.0 {
            return Err(CutError::InvalidConfig {
                field: "hole_radius",
                value: self.hole_radius,
            });
        }
        Ok(())
    }

    /// Horizontal pitch between neighbouring bars.
    pub fn pitch(&self) -> f64 {
        self.width + self.gap
    }
}

/// Fail with `InvalidConfig` unless `value` is finite and strictly positive.
pub fn require_positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CutError::InvalidConfig { field, value })
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::FIT_EPS;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < FIT_EPS
    }

    /// Check if `a` does not exceed `limit` beyond the fit tolerance.
    #[inline]
    pub fn fits(a: f64, limit: f64) -> bool {
        a <= limit + FIT_EPS
    }

    /// Check if a is in range [min, max] with tolerance.
    #[inline]
    pub fn in_range(a: f64, min: f64, max: f64) -> bool {
        a >= min - FIT_EPS && a <= max + FIT_EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PlanConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.include_end_cut);
        assert_eq!(config.pitch(), 15.0);
    }

    #[test]
    fn test_rejects_non_positive_geometry() {
        for (config, field) in [
            (PlanConfig::new(0.0, 10.0, 5.0, 1.5), "stock_length"),
            (PlanConfig::new(100.0, -1.0, 5.0, 1.5), "width"),
            (PlanConfig::new(100.0, 10.0, 0.0, 1.5), "gap"),
            (PlanConfig::new(100.0, 10.0, 5.0, -0.5), "hole_radius"),
            (PlanConfig::new(f64::NAN, 10.0, 5.0, 1.5), "stock_length"),
        ] {
            match config.validate() {
                Err(CutError::InvalidConfig { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected InvalidConfig for {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_zero_hole_radius_allowed() {
        assert!(PlanConfig::new(100.0, 10.0, 5.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_fits_tolerance() {
        assert!(float_cmp::fits(100.0, 100.0));
        assert!(float_cmp::fits(33.3 + 33.3 + 33.4, 100.0));
        assert!(!float_cmp::fits(100.001, 100.0));
        assert!(float_cmp::in_range(5.0, 5.0, 10.0));
        assert!(float_cmp::approx_eq(0.1 + 0.2, 0.3));
    }
}
