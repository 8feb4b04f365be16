//! Bins and packings produced by the packer.

use serde::{Deserialize, Serialize};

/// Pieces assigned to one stock bar, in placement order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pieces: Vec<f64>,
}

impl Bin {
    /// Create an empty bin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bin holding a single piece.
    pub fn with_piece(length: f64) -> Self {
        Self {
            pieces: vec![length],
        }
    }

    pub fn pieces(&self) -> &[f64] {
        &self.pieces
    }

    pub(crate) fn pieces_mut(&mut self) -> &mut [f64] {
        &mut self.pieces
    }

    pub(crate) fn push(&mut self, length: f64) {
        self.pieces.push(length);
    }

    /// Sum of the piece lengths.
    pub fn load(&self) -> f64 {
        self.pieces.iter().sum()
    }

    /// Unused stock left in this bin.
    pub fn waste(&self, capacity: f64) -> f64 {
        (capacity - self.load()).max(0.0)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

impl From<Vec<f64>> for Bin {
    fn from(pieces: Vec<f64>) -> Self {
        Self { pieces }
    }
}

/// The bins produced for one demand list. Bin order is kept for deterministic output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Packing {
    bins: Vec<Bin>,
}

impl Packing {
    pub fn new(bins: Vec<Bin>) -> Self {
        Self { bins }
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn into_bins(self) -> Vec<Bin> {
        self.bins
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bin> {
        self.bins.iter()
    }

    /// Number of bins (stock bars) used.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Total number of pieces across all bins.
    pub fn piece_count(&self) -> usize {
        self.bins.iter().map(Bin::len).sum()
    }

    /// Total requested length across all bins.
    pub fn total_length(&self) -> f64 {
        self.bins.iter().map(Bin::load).sum()
    }

    /// Load of every bin, in bin order.
    pub fn loads(&self) -> Vec<f64> {
        self.bins.iter().map(Bin::load).collect()
    }

    /// Total unused stock across all bins.
    pub fn total_waste(&self, capacity: f64) -> f64 {
        self.bins.iter().map(|b| b.waste(capacity)).sum()
    }

    /// Fraction of the used stock that ends up in pieces.
    pub fn utilization(&self, capacity: f64) -> f64 {
        if self.bins.is_empty() || capacity <= 0.0 {
            return 0.0;
        }
        self.total_length() / (capacity * self.bins.len() as f64)
    }

    /// All pieces, bin by bin.
    pub fn flatten(&self) -> Vec<f64> {
        self.bins
            .iter()
            .flat_map(|b| b.pieces().iter().copied())
            .collect()
    }

    /// Check that no bin exceeds `capacity`.
    pub fn respects_capacity(&self, capacity: f64) -> bool {
        self.bins
            .iter()
            .all(|b| crate::config::float_cmp::fits(b.load(), capacity))
    }
}

impl<'a> IntoIterator for &'a Packing {
    type Item = &'a Bin;
    type IntoIter = std::slice::Iter<'a, Bin>;

    fn into_iter(self) -> Self::IntoIter {
        self.bins.iter()
    }
}

impl From<Vec<Vec<f64>>> for Packing {
    fn from(bins: Vec<Vec<f64>>) -> Self {
        Self {
            bins: bins.into_iter().map(Bin::from).collect(),
        }
    }
}
