//! Pairwise swap local search over a finished packing.
//!
//! Each pass scans every pair of bins and swaps single pieces between them
//! whenever both bins stay within capacity. A pass works on its own copy of
//! the bins and hands back a new bin list, so the caller's packing is never
//! touched. The search stops after a pass with no swaps or when the pass
//! ceiling is reached. Empty bins are dropped before the first pass; a
//! one-for-one swap never empties a bin, so the bin count is fixed from then on.
//!
//! # Swap policies
//!
//! - [`SwapPolicy::Unconditional`] accepts any feasible swap of two pieces
//!   with different lengths. It does not optimize an objective and usually
//!   only stops at the ceiling.
//! - [`SwapPolicy::Improving`] accepts a swap only if it strictly increases
//!   the sum of squared bin loads, which moves material toward fuller bins
//!   and always converges.

use crate::config::{
    float_cmp, require_positive, DEFAULT_MAX_ITERATIONS, DEFAULT_PROGRESS_INTERVAL, FIT_EPS,
};
use crate::error::{CutError, Result};
use crate::model::{Bin, Packing};
use serde::{Deserialize, Serialize};

use super::greedy::pack_first_fit_decreasing;

/// Rule deciding whether a capacity-feasible swap is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SwapPolicy {
    /// Take every swap that keeps both bins within capacity.
    #[default]
    Unconditional,
    /// Take a swap only when it strictly increases the sum of squared loads.
    Improving,
}

impl SwapPolicy {
    /// Decide on swapping `a` (from the bin loaded `load_a`) with `b` (from `load_b`).
    #[inline]
    fn accepts(&self, load_a: f64, load_b: f64, a: f64, b: f64) -> bool {
        match self {
            SwapPolicy::Unconditional => true,
            SwapPolicy::Improving => {
                // Change in sum of squares is 2 * delta * (load_a - load_b + delta).
                let delta = b - a;
                delta * (load_a - load_b + delta) > FIT_EPS
            }
        }
    }
}

/// Local search settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSearchConfig {
    /// Ceiling on full passes over all bin pairs.
    pub max_iterations: usize,
    pub policy: SwapPolicy,
    /// Report progress every this many passes (0 disables reporting).
    pub progress_interval: usize,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            policy: SwapPolicy::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl LocalSearchConfig {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_policy(mut self, policy: SwapPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_progress_interval(mut self, progress_interval: usize) -> Self {
        self.progress_interval = progress_interval;
        self
    }
}

/// Snapshot handed to progress observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchProgress {
    /// Passes completed so far.
    pub iteration: usize,
    /// Swaps performed so far.
    pub swaps: usize,
    /// Current number of bins.
    pub bins: usize,
}

/// Result of a local search run.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalSearchOutcome {
    pub packing: Packing,
    /// Passes performed.
    pub iterations: usize,
    /// Total swaps performed.
    pub swaps: usize,
    /// True if the last pass made no swap; false if the ceiling stopped the search.
    pub converged: bool,
}

/// Local search runner with an optional progress observer.
pub struct LocalSearch<'a> {
    capacity: f64,
    config: LocalSearchConfig,
    observer: Option<Box<dyn FnMut(&SearchProgress) + 'a>>,
}

impl<'a> LocalSearch<'a> {
    /// Create a runner with the default configuration.
    pub fn new(capacity: f64) -> Self {
        Self {
            capacity,
            config: LocalSearchConfig::default(),
            observer: None,
        }
    }

    pub fn with_config(mut self, config: LocalSearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a callback invoked every `progress_interval` passes.
    pub fn on_progress<F>(mut self, observer: F) -> Self
    where
        F: FnMut(&SearchProgress) + 'a,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn config(&self) -> &LocalSearchConfig {
        &self.config
    }

    /// Run the search. The input packing is left untouched.
    pub fn run(&mut self, packing: &Packing) -> Result<LocalSearchOutcome> {
        require_positive("capacity", self.capacity)?;
        for bin in packing {
            let load = bin.load();
            if !float_cmp::fits(load, self.capacity) {
                return Err(CutError::InvalidInput {
                    length: load,
                    capacity: self.capacity,
                });
            }
        }

        let mut bins: Vec<Bin> = packing.iter().filter(|b| !b.is_empty()).cloned().collect();
        let mut iterations = 0;
        let mut swaps = 0;
        let mut converged = false;

        while iterations < self.config.max_iterations {
            let (next, pass_swaps) = swap_pass(&bins, self.capacity, self.config.policy);
            bins = next;
            iterations += 1;
            swaps += pass_swaps;

            if pass_swaps == 0 {
                converged = true;
                break;
            }

            let interval = self.config.progress_interval;
            if interval > 0 && iterations % interval == 0 {
                let progress = SearchProgress {
                    iteration: iterations,
                    swaps,
                    bins: bins.len(),
                };
                tracing::debug!(
                    "Local search pass {}: {} swap(s), {} bin(s)",
                    progress.iteration,
                    progress.swaps,
                    progress.bins
                );
                if let Some(observer) = self.observer.as_mut() {
                    observer(&progress);
                }
            }
        }

        if !converged {
            match self.config.policy {
                SwapPolicy::Unconditional => tracing::debug!(
                    "Local search stopped at the {}-pass ceiling",
                    self.config.max_iterations
                ),
                SwapPolicy::Improving => tracing::warn!(
                    "Improving local search did not converge within {} passes",
                    self.config.max_iterations
                ),
            }
        }

        bins.sort_by(|a, b| b.load().total_cmp(&a.load()));

        Ok(LocalSearchOutcome {
            packing: Packing::new(bins),
            iterations,
            swaps,
            converged,
        })
    }
}

/// One full scan over all bin pairs. Returns the new bins and the number of swaps made.
fn swap_pass(bins: &[Bin], capacity: f64, policy: SwapPolicy) -> (Vec<Bin>, usize) {
    let mut bins = bins.to_vec();
    let mut loads: Vec<f64> = bins.iter().map(Bin::load).collect();
    let mut swaps = 0;

    for i in 0..bins.len() {
        for j in i + 1..bins.len() {
            let (head, tail) = bins.split_at_mut(j);
            let bin_a = &mut head[i];
            let bin_b = &mut tail[0];

            for ai in 0..bin_a.len() {
                for bi in 0..bin_b.len() {
                    let a = bin_a.pieces()[ai];
                    let b = bin_b.pieces()[bi];
                    if float_cmp::approx_eq(a, b) {
                        continue;
                    }

                    let new_a = loads[i] - a + b;
                    let new_b = loads[j] - b + a;
                    if !float_cmp::fits(new_a, capacity) || !float_cmp::fits(new_b, capacity) {
                        continue;
                    }
                    if !policy.accepts(loads[i], loads[j], a, b) {
                        continue;
                    }

                    bin_a.pieces_mut()[ai] = b;
                    bin_b.pieces_mut()[bi] = a;
                    loads[i] = bin_a.load();
                    loads[j] = bin_b.load();
                    swaps += 1;
                }
            }
        }
    }

    (bins, swaps)
}

/// Improve a packing with the default local search configuration.
pub fn local_optimize(packing: &Packing, capacity: f64) -> Result<Packing> {
    LocalSearch::new(capacity).run(packing).map(|outcome| outcome.packing)
}

/// First-Fit-Decreasing followed by local search.
pub fn optimize(capacity: f64, pieces: &[f64]) -> Result<Packing> {
    optimize_with(capacity, pieces, LocalSearchConfig::default())
}

/// First-Fit-Decreasing followed by local search with explicit settings.
pub fn optimize_with(capacity: f64, pieces: &[f64], config: LocalSearchConfig) -> Result<Packing> {
    let packing = pack_first_fit_decreasing(capacity, pieces)?;
    let outcome = LocalSearch::new(capacity).with_config(config).run(&packing)?;
    tracing::debug!(
        "Optimized {} piece(s) into {} bin(s) after {} pass(es)",
        pieces.len(),
        outcome.packing.len(),
        outcome.iterations
    );
    Ok(outcome.packing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bins_of(packing: &Packing) -> Vec<Vec<f64>> {
        packing.iter().map(|b| b.pieces().to_vec()).collect()
    }

    fn sorted(mut v: Vec<f64>) -> Vec<f64> {
        v.sort_by(f64::total_cmp);
        v
    }

    #[test]
    fn test_converges_without_feasible_swaps() {
        let packing = Packing::from(vec![vec![60.0, 40.0], vec![70.0, 30.0]]);
        let outcome = LocalSearch::new(100.0).run(&packing).unwrap();
        assert!(outcome.converged);
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.swaps, 0);
        assert_eq!(bins_of(&outcome.packing), bins_of(&packing));
    }

    #[test]
    fn test_equal_lengths_are_not_swapped() {
        let packing = Packing::from(vec![vec![60.0, 40.0], vec![60.0, 40.0]]);
        let outcome = LocalSearch::new(100.0).run(&packing).unwrap();
        assert!(outcome.converged);
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.swaps, 0);
        assert_eq!(bins_of(&outcome.packing), bins_of(&packing));
    }

    #[test]
    fn test_unconditional_hits_ceiling() {
        let packing = Packing::from(vec![vec![50.0], vec![30.0]]);
        let config = LocalSearchConfig::default().with_max_iterations(5);
        let outcome = LocalSearch::new(100.0)
            .with_config(config)
            .run(&packing)
            .unwrap();
        assert!(!outcome.converged);
        assert_eq!(outcome.iterations, 5);
        assert_eq!(outcome.swaps, 5);
        assert_eq!(bins_of(&outcome.packing), vec![vec![50.0], vec![30.0]]);
    }

    #[test]
    fn test_improving_moves_load_to_fuller_bin() {
        let packing = Packing::from(vec![vec![60.0, 10.0], vec![50.0, 30.0]]);
        let config = LocalSearchConfig::default().with_policy(SwapPolicy::Improving);
        let outcome = LocalSearch::new(100.0)
            .with_config(config)
            .run(&packing)
            .unwrap();
        assert!(outcome.converged);
        assert_eq!(outcome.iterations, 2);
        assert_eq!(outcome.swaps, 1);
        assert_eq!(
            bins_of(&outcome.packing),
            vec![vec![60.0, 30.0], vec![50.0, 10.0]]
        );
    }

    #[test]
    fn test_improving_rejects_neutral_swap() {
        let packing = Packing::from(vec![vec![50.0], vec![30.0]]);
        let config = LocalSearchConfig::default().with_policy(SwapPolicy::Improving);
        let outcome = LocalSearch::new(100.0)
            .with_config(config)
            .run(&packing)
            .unwrap();
        assert!(outcome.converged);
        assert_eq!(outcome.swaps, 0);
    }

    #[test]
    fn test_sorts_by_descending_load() {
        // Every swap here overflows one side, so only the final sort applies.
        let packing = Packing::from(vec![vec![80.0], vec![60.0, 40.0], vec![70.0, 30.0]]);
        let optimized = local_optimize(&packing, 100.0).unwrap();
        assert_eq!(
            bins_of(&optimized),
            vec![vec![60.0, 40.0], vec![70.0, 30.0], vec![80.0]]
        );
    }

    #[test]
    fn test_preserves_pieces_and_capacity() {
        let pieces = [50.0, 70.0, 30.0, 90.0, 20.0, 45.0];
        let packing = pack_first_fit_decreasing(100.0, &pieces).unwrap();
        let optimized = local_optimize(&packing, 100.0).unwrap();
        assert_eq!(sorted(optimized.flatten()), sorted(packing.flatten()));
        assert!(optimized.respects_capacity(100.0));
        assert_eq!(optimized.len(), packing.len());
    }

    #[test]
    fn test_input_left_untouched() {
        let packing = Packing::from(vec![vec![50.0], vec![30.0]]);
        let before = packing.clone();
        let _ = local_optimize(&packing, 100.0).unwrap();
        assert_eq!(packing, before);
    }

    #[test]
    fn test_drops_empty_bins() {
        let packing = Packing::from(vec![vec![], vec![60.0, 40.0], vec![]]);
        let optimized = local_optimize(&packing, 100.0).unwrap();
        assert_eq!(bins_of(&optimized), vec![vec![60.0, 40.0]]);
    }

    #[test]
    fn test_rejects_overfull_input() {
        let packing = Packing::from(vec![vec![60.0, 50.0]]);
        assert!(matches!(
            local_optimize(&packing, 100.0),
            Err(CutError::InvalidInput { .. })
        ));
        assert!(matches!(
            local_optimize(&packing, -1.0),
            Err(CutError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_zero_ceiling_only_sorts() {
        let packing = Packing::from(vec![vec![30.0], vec![50.0]]);
        let config = LocalSearchConfig::default().with_max_iterations(0);
        let outcome = LocalSearch::new(100.0)
            .with_config(config)
            .run(&packing)
            .unwrap();
        assert_eq!(outcome.iterations, 0);
        assert!(!outcome.converged);
        assert_eq!(bins_of(&outcome.packing), vec![vec![50.0], vec![30.0]]);
    }

    #[test]
    fn test_progress_observer() {
        let packing = Packing::from(vec![vec![50.0], vec![30.0]]);
        let config = LocalSearchConfig::default()
            .with_max_iterations(5)
            .with_progress_interval(2);
        let mut seen = Vec::new();
        LocalSearch::new(100.0)
            .with_config(config)
            .on_progress(|p| seen.push(p.iteration))
            .run(&packing)
            .unwrap();
        assert_eq!(seen, vec![2, 4]);
    }

    #[test]
    fn test_optimize_example() {
        let optimized = optimize(100.0, &[50.0, 70.0, 30.0, 90.0]).unwrap();
        assert_eq!(optimized.len(), 3);
        assert_eq!(optimized.piece_count(), 4);
        assert!(optimized.respects_capacity(100.0));
        assert_eq!(optimized.loads()[0], 100.0);
    }

    #[test]
    fn test_rerun_on_own_output_terminates() {
        let pieces = [20.0, 20.0, 25.0, 25.0, 30.0, 30.0, 45.0];
        let first = optimize(103.0, &pieces).unwrap();
        let second = local_optimize(&first, 103.0).unwrap();
        assert_eq!(sorted(second.flatten()), sorted(pieces.to_vec()));
        assert!(second.respects_capacity(103.0));
    }
}
