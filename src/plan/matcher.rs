//! Re-association of packed lengths with the parts they came from.

use crate::config::{MATCH_TOL, MATCH_TOL_FALLBACK};
use crate::error::{CutError, Result};
use crate::model::Part;

/// Sorted index over part lengths. Each part can be claimed once.
///
/// Among parts within tolerance the one earliest in the input wins, so
/// duplicate lengths are handed out in input order.
pub struct PartMatcher {
    /// (length, part index), sorted by length then index.
    index: Vec<(f64, usize)>,
    taken: Vec<bool>,
}

impl PartMatcher {
    pub fn new(parts: &[Part]) -> Self {
        let mut index: Vec<(f64, usize)> = parts
            .iter()
            .enumerate()
            .map(|(i, p)| (p.length, i))
            .collect();
        index.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        let taken = vec![false; index.len()];
        Self { index, taken }
    }

    /// Number of parts not yet claimed.
    pub fn remaining(&self) -> usize {
        self.taken.iter().filter(|t| !**t).count()
    }

    /// Lowest part index that has not been claimed.
    pub fn first_unclaimed(&self) -> Option<usize> {
        self.index
            .iter()
            .zip(&self.taken)
            .filter(|(_, taken)| !**taken)
            .map(|((_, part), _)| *part)
            .min()
    }

    /// Claim the part matching `length`, trying the exact tolerance first.
    pub fn claim(&mut self, length: f64) -> Result<usize> {
        self.claim_within(length, MATCH_TOL)
            .or_else(|| self.claim_within(length, MATCH_TOL_FALLBACK))
            .ok_or(CutError::PartMatch { length })
    }

    fn claim_within(&mut self, length: f64, tol: f64) -> Option<usize> {
        let start = self.index.partition_point(|(l, _)| *l < length - tol);
        let mut best: Option<usize> = None;

        for slot in start..self.index.len() {
            let (l, part) = self.index[slot];
            if l > length + tol {
                break;
            }
            if self.taken[slot] {
                continue;
            }
            if best.map_or(true, |b| part < self.index[b].1) {
                best = Some(slot);
            }
        }

        best.map(|slot| {
            self.taken[slot] = true;
            self.index[slot].1
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(lengths: &[f64]) -> Vec<Part> {
        lengths.iter().map(|&l| Part::new(l)).collect()
    }

    #[test]
    fn test_claims_in_input_order() {
        let parts = parts(&[30.0, 50.0, 30.0]);
        let mut matcher = PartMatcher::new(&parts);
        assert_eq!(matcher.claim(30.0).unwrap(), 0);
        assert_eq!(matcher.claim(30.0).unwrap(), 2);
        assert_eq!(matcher.claim(50.0).unwrap(), 1);
        assert_eq!(matcher.remaining(), 0);
        assert_eq!(matcher.first_unclaimed(), None);
    }

    #[test]
    fn test_first_unclaimed() {
        let parts = parts(&[30.0, 50.0, 30.0]);
        let mut matcher = PartMatcher::new(&parts);
        assert_eq!(matcher.first_unclaimed(), Some(0));
        matcher.claim(30.0).unwrap();
        assert_eq!(matcher.first_unclaimed(), Some(1));
    }

    #[test]
    fn test_fallback_tolerance() {
        let parts = parts(&[33.3335]);
        let mut matcher = PartMatcher::new(&parts);
        assert_eq!(matcher.claim(33.3333).unwrap(), 0);
    }

    #[test]
    fn test_exact_match_preferred_over_fallback() {
        // 10.0005 is within the fallback tolerance of 10.0 but the exact part wins.
        let parts = parts(&[10.0005, 10.0]);
        let mut matcher = PartMatcher::new(&parts);
        assert_eq!(matcher.claim(10.0).unwrap(), 1);
        assert_eq!(matcher.claim(10.0).unwrap(), 0);
    }

    #[test]
    fn test_no_match() {
        let parts = parts(&[30.0]);
        let mut matcher = PartMatcher::new(&parts);
        assert_eq!(matcher.claim(30.0).unwrap(), 0);
        match matcher.claim(30.0) {
            Err(CutError::PartMatch { length }) => assert_eq!(length, 30.0),
            other => panic!("expected PartMatch, got {:?}", other),
        }
        assert!(matches!(
            matcher.claim(31.0),
            Err(CutError::PartMatch { .. })
        ));
    }
}
