//! Decreasing-order greedy packers (First-Fit and Best-Fit).

use crate::config::{float_cmp, require_positive, FIT_EPS};
use crate::error::{CutError, Result};
use crate::model::{Bin, Packing};

/// Check that every piece is a positive length no longer than `capacity`.
pub fn check_demand(capacity: f64, pieces: &[f64]) -> Result<()> {
    require_positive("capacity", capacity)?;
    for (index, &length) in pieces.iter().enumerate() {
        if !length.is_finite() || length <= 0.0 {
            return Err(CutError::InvalidPiece { index, length });
        }
        if !float_cmp::fits(length, capacity) {
            return Err(CutError::InvalidInput { length, capacity });
        }
    }
    Ok(())
}

/// Pieces sorted longest first. The sort is stable, so equal lengths keep input order.
fn sorted_decreasing(pieces: &[f64]) -> Vec<f64> {
    let mut sorted = pieces.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    sorted
}

/// First-Fit-Decreasing: each piece goes into the first bin with room for it.
pub fn pack_first_fit_decreasing(capacity: f64, pieces: &[f64]) -> Result<Packing> {
    check_demand(capacity, pieces)?;

    let mut bins: Vec<Bin> = Vec::new();
    let mut loads: Vec<f64> = Vec::new();

    for item in sorted_decreasing(pieces) {
        let slot = loads
            .iter()
            .position(|&load| float_cmp::fits(load + item, capacity));

        match slot {
            Some(idx) => {
                bins[idx].push(item);
                loads[idx] += item;
            }
            None => {
                bins.push(Bin::with_piece(item));
                loads.push(item);
            }
        }
    }

    tracing::debug!(
        "FFD packed {} piece(s) into {} bin(s) of {}",
        pieces.len(),
        bins.len(),
        capacity
    );

    Ok(Packing::new(bins))
}

/// Best-Fit-Decreasing: each piece goes into the bin it leaves with the least slack.
///
/// Ties go to the lowest bin index. A new bin is opened only when nothing fits.
pub fn pack_best_fit_decreasing(capacity: f64, pieces: &[f64]) -> Result<Packing> {
    check_demand(capacity, pieces)?;

    let mut bins: Vec<Bin> = Vec::new();
    let mut loads: Vec<f64> = Vec::new();

    for item in sorted_decreasing(pieces) {
        let mut best: Option<(usize, f64)> = None;

        for (idx, &load) in loads.iter().enumerate() {
            let filled = load + item;
            if !float_cmp::fits(filled, capacity) {
                continue;
            }
            let remain = capacity - filled;
            if best.map_or(true, |(_, best_remain)| remain < best_remain) {
                best = Some((idx, remain));
            }
        }

        match best {
            Some((idx, _)) => {
                bins[idx].push(item);
                loads[idx] += item;
            }
            None => {
                bins.push(Bin::with_piece(item));
                loads.push(item);
            }
        }
    }

    tracing::debug!(
        "BFD packed {} piece(s) into {} bin(s) of {}",
        pieces.len(),
        bins.len(),
        capacity
    );

    Ok(Packing::new(bins))
}

/// Theoretical minimum number of bins: `ceil(sum / capacity)`.
pub fn lower_bound_bins(capacity: f64, pieces: &[f64]) -> usize {
    if capacity <= 0.0 || pieces.is_empty() {
        return 0;
    }
    let total: f64 = pieces.iter().sum();
    // Rounding noise must not push an exact multiple up a bin.
    ((total / capacity) - FIT_EPS).ceil().max(0.0) as usize
}
