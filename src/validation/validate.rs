//! Validation of parts lists and cut plans.

use crate::config::{float_cmp, PlanConfig};
use crate::error::Result;
use crate::model::{CutPlan, Part};

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Create a failing result with an error.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            errors: vec![message.into()],
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Validate a parts list against the plan geometry.
///
/// Fails outright on invalid geometry settings; per-part problems are
/// collected as errors or warnings.
pub fn validate_parts(parts: &[Part], config: &PlanConfig) -> Result<ValidationResult> {
    config.validate()?;

    let mut result = ValidationResult::ok();

    if parts.is_empty() {
        result.add_warning("No parts to cut");
    }

    for (idx, part) in parts.iter().enumerate() {
        result.merge(validate_part(part, idx + 1, config));
    }

    Ok(result)
}

/// Validate a single part. `part_num` is 1-based.
pub fn validate_part(part: &Part, part_num: usize, config: &PlanConfig) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if !part.length.is_finite() || part.length <= 0.0 {
        result.add_error(format!(
            "Part {}: Invalid length {}",
            part_num, part.length
        ));
        return result;
    }

    if !float_cmp::fits(part.length, config.stock_length) {
        result.add_error(format!(
            "Part {}: Length {} exceeds stock length {}",
            part_num, part.length, config.stock_length
        ));
    }

    for (hole_idx, &offset) in part.hole_offsets.iter().enumerate() {
        if !float_cmp::in_range(offset, 0.0, part.length) {
            result.add_warning(format!(
                "Part {}, Hole {}: Offset {} is outside the part (0..{})",
                part_num,
                hole_idx + 1,
                offset,
                part.length
            ));
        } else if offset < config.hole_radius || offset > part.length - config.hole_radius {
            result.add_warning(format!(
                "Part {}, Hole {}: Hole of radius {} at {} crosses the part end",
                part_num,
                hole_idx + 1,
                config.hole_radius,
                offset
            ));
        }
    }

    if 2.0 * config.hole_radius > config.width && part.has_holes() {
        result.add_warning(format!(
            "Part {}: Hole diameter {} is wider than the bar ({})",
            part_num,
            2.0 * config.hole_radius,
            config.width
        ));
    }

    let half_width = config.width / 2.0;
    if part.has_arcs() && part.length < half_width {
        result.add_warning(format!(
            "Part {}: Length {} is shorter than the arc radius {}",
            part_num, part.length, half_width
        ));
    } else if part.arc_start && part.arc_end && part.length < config.width {
        result.add_warning(format!(
            "Part {}: Start and end arcs overlap (length {} < bar width {})",
            part_num, part.length, config.width
        ));
    }

    result
}

/// Validate a derived plan: every bar within stock length, all geometry inside its bar.
pub fn validate_plan(plan: &CutPlan, config: &PlanConfig) -> Result<ValidationResult> {
    config.validate()?;

    let mut result = ValidationResult::ok();

    if plan.bins.is_empty() {
        result.add_warning("Plan has no bars");
    }

    for layout in &plan.bins {
        let used = layout.used_length();
        if !float_cmp::fits(used, plan.stock_length) {
            result.add_error(format!(
                "Bar {}: Used length {} exceeds stock length {}",
                layout.index + 1,
                used,
                plan.stock_length
            ));
        }

        let bar_left = layout.start_x;
        let bar_right = layout.start_x + plan.stick_width;

        for hole in plan.holes_in_bin(layout.index) {
            if !float_cmp::in_range(hole.x, bar_left, bar_right)
                || !float_cmp::in_range(hole.y, 0.0, plan.stock_length)
            {
                result.add_error(format!(
                    "Bar {}: Hole at ({}, {}) lies outside the bar",
                    layout.index + 1,
                    hole.x,
                    hole.y
                ));
            }
        }

        for arc in plan.arcs_in_bin(layout.index) {
            if !float_cmp::in_range(arc.x, bar_left, bar_right) {
                result.add_error(format!(
                    "Bar {}: Arc at ({}, {}) lies outside the bar",
                    layout.index + 1,
                    arc.x,
                    arc.y
                ));
            }
        }

        let expected_cuts = layout.placements.len() + usize::from(config.include_end_cut);
        let cuts = plan.cuts_in_bin(layout.index).count();
        if cuts != expected_cuts {
            result.add_error(format!(
                "Bar {}: Expected {} cut(s), found {}",
                layout.index + 1,
                expected_cuts,
                cuts
            ));
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Packing;
    use crate::plan::build_plan_from_packing;

    #[test]
    fn test_valid_parts() {
        let parts = vec![
            Part::new(50.0).with_arcs(true, false).with_holes([10.0, 30.0]),
            Part::new(90.0).with_holes([45.0]),
        ];
        let result = validate_parts(&parts, &PlanConfig::default()).unwrap();
        assert!(result.passed);
        assert!(result.warnings.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_oversized_part_is_error() {
        let parts = vec![Part::new(120.0)];
        let result = validate_parts(&parts, &PlanConfig::default()).unwrap();
        assert!(!result.passed);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("exceeds stock length"));
    }

    #[test]
    fn test_invalid_length_is_error() {
        let result = validate_parts(&[Part::new(0.0)], &PlanConfig::default()).unwrap();
        assert!(!result.passed);
    }

    #[test]
    fn test_hole_warnings() {
        let parts = vec![Part::new(50.0).with_holes([60.0, 1.0])];
        let result = validate_parts(&parts, &PlanConfig::default()).unwrap();
        assert!(result.passed);
        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings[0].contains("outside the part"));
        assert!(result.warnings[1].contains("crosses the part end"));
    }

    #[test]
    fn test_arc_warnings() {
        let parts = vec![
            Part::new(8.0).with_arcs(true, true),
            Part::new(4.0).with_arcs(true, false),
        ];
        let result = validate_parts(&parts, &PlanConfig::default()).unwrap();
        assert!(result.passed);
        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings[0].contains("overlap"));
        assert!(result.warnings[1].contains("shorter than the arc radius"));
    }

    #[test]
    fn test_empty_parts_warns() {
        let result = validate_parts(&[], &PlanConfig::default()).unwrap();
        assert!(result.passed);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_invalid_config_is_err() {
        let config = PlanConfig::new(100.0, 0.0, 5.0, 1.5);
        assert!(validate_parts(&[Part::new(10.0)], &config).is_err());
    }

    #[test]
    fn test_validate_plan() {
        let config = PlanConfig::default();
        let parts = vec![
            Part::new(50.0).with_holes([25.0]),
            Part::new(70.0).with_arcs(false, true),
            Part::new(30.0),
        ];
        let packing = Packing::from(vec![vec![70.0, 30.0], vec![50.0]]);
        let plan = build_plan_from_packing(&config, &parts, &packing).unwrap();
        let result = validate_plan(&plan, &config).unwrap();
        assert!(result.passed, "{:?}", result.errors);

        let mut broken = plan.clone();
        broken.cuts.pop();
        broken.holes[0].x += 50.0;
        let result = validate_plan(&broken, &config).unwrap();
        assert!(!result.passed);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_merge() {
        let mut result = ValidationResult::ok();
        result.merge(ValidationResult::error("bad"));
        assert!(!result.passed);
        assert_eq!(result.errors, vec!["bad".to_string()]);
    }
}
