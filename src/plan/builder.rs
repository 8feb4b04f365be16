//! Cut plan derivation.
//!
//! Bars are laid side by side along X with a fixed gap; each bar runs along Y
//! from 0 to the stock length. For bar `i`:
//!
//! - cut lines start at `i * (width + gap) - CUT_EXTRA_MARGIN` and are
//!   `width + 2 * CUT_EXTRA_MARGIN` long,
//! - holes and arcs are centered across the bar at `i * (width + gap) + width / 2`.

use crate::config::{float_cmp, PlanConfig, CUT_EXTRA_MARGIN};
use crate::error::{CutError, Result};
use crate::model::{
    part_lengths, Arc, ArcOrientation, BinLayout, CutLine, CutPlan, Hole, Packing, Part,
    Placement,
};
use crate::packing::{check_demand, optimize_with, LocalSearchConfig};

use super::matcher::PartMatcher;

/// Pack the parts with First-Fit-Decreasing plus local search, then derive the plan.
pub fn build_plan(config: &PlanConfig, parts: &[Part]) -> Result<CutPlan> {
    build_plan_with(config, parts, LocalSearchConfig::default())
}

/// Like [`build_plan`] with explicit local search settings.
pub fn build_plan_with(
    config: &PlanConfig,
    parts: &[Part],
    search: LocalSearchConfig,
) -> Result<CutPlan> {
    config.validate()?;
    let packing = optimize_with(config.stock_length, &part_lengths(parts), search)?;
    build_plan_from_packing(config, parts, &packing)
}

/// Derive the plan for an existing packing of `parts`.
///
/// Every packed length must match exactly one part. An unmatched length fails
/// with `PartMatch`; a part missing from the packing fails with `UnpackedPart`.
///
/// `include_end_cut` only controls the cut at `y = 0` of each bar. The trailing
/// boundary of every piece is always cut, so a bar filled exactly to the stock
/// length gets a cut at `y = stock_length` even without end cuts. Each bar then
/// carries one cut per piece plus one when `include_end_cut` is set.
pub fn build_plan_from_packing(
    config: &PlanConfig,
    parts: &[Part],
    packing: &Packing,
) -> Result<CutPlan> {
    config.validate()?;
    check_demand(config.stock_length, &packing.flatten())?;
    if let Some(bin) = packing
        .iter()
        .find(|b| !float_cmp::fits(b.load(), config.stock_length))
    {
        return Err(CutError::InvalidInput {
            length: bin.load(),
            capacity: config.stock_length,
        });
    }

    let width = config.width;
    let cut_length = width + 2.0 * CUT_EXTRA_MARGIN;
    let mut matcher = PartMatcher::new(parts);

    let mut cuts = Vec::new();
    let mut holes = Vec::new();
    let mut arcs = Vec::new();
    let mut layouts = Vec::with_capacity(packing.len());

    for (bin_index, bin) in packing.iter().enumerate() {
        let bar_x = bin_index as f64 * config.pitch();
        let start_x = bar_x - CUT_EXTRA_MARGIN;
        let center_x = bar_x + width / 2.0;

        if config.include_end_cut {
            cuts.push(CutLine {
                bin: bin_index,
                start_x,
                y: 0.0,
                length: cut_length,
            });
        }

        let mut placements = Vec::with_capacity(bin.len());
        let mut cursor = 0.0;

        for &length in bin.pieces() {
            let part_index = matcher.claim(length)?;
            let part = &parts[part_index];
            let piece_start = cursor;
            cursor += length;

            cuts.push(CutLine {
                bin: bin_index,
                start_x,
                y: cursor,
                length: cut_length,
            });

            holes.extend(part.hole_offsets.iter().map(|offset| Hole {
                bin: bin_index,
                x: center_x,
                y: piece_start + offset,
            }));

            if part.arc_start {
                arcs.push(Arc {
                    bin: bin_index,
                    x: center_x,
                    y: piece_start + width / 2.0,
                    orientation: ArcOrientation::Up,
                });
            }
            if part.arc_end {
                arcs.push(Arc {
                    bin: bin_index,
                    x: center_x,
                    y: cursor - width / 2.0,
                    orientation: ArcOrientation::Down,
                });
            }

            placements.push(Placement {
                part_index,
                offset: piece_start,
                length,
            });
        }

        layouts.push(BinLayout {
            index: bin_index,
            start_x,
            placements,
        });
    }

    if let Some(part_index) = matcher.first_unclaimed() {
        return Err(CutError::UnpackedPart {
            index: part_index,
            length: parts[part_index].length,
        });
    }

    tracing::info!(
        "Cut plan: {} bar(s), {} cut(s), {} hole(s), {} arc(s)",
        layouts.len(),
        cuts.len(),
        holes.len(),
        arcs.len()
    );

    Ok(CutPlan {
        stock_length: config.stock_length,
        stick_width: width,
        cuts,
        holes,
        radius: config.hole_radius,
        arcs,
        bins: layouts,
    })
}
