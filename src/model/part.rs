//! Part definition: one piece requested for cutting.

use serde::{Deserialize, Serialize};

/// A piece to be cut from stock, with its optional end arcs and holes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Piece length along the bar.
    pub length: f64,
    /// Rounded (180°) end at the start of the piece.
    pub arc_start: bool,
    /// Rounded (180°) end at the end of the piece.
    pub arc_end: bool,
    /// Hole centers measured from the piece start.
    pub hole_offsets: Vec<f64>,
}

impl Part {
    /// Create a plain part with square ends and no holes.
    pub fn new(length: f64) -> Self {
        Self {
            length,
            ..Default::default()
        }
    }

    /// Set the arc flags.
    pub fn with_arcs(mut self, arc_start: bool, arc_end: bool) -> Self {
        self.arc_start = arc_start;
        self.arc_end = arc_end;
        self
    }

    /// Set the hole offsets.
    pub fn with_holes(mut self, hole_offsets: impl Into<Vec<f64>>) -> Self {
        self.hole_offsets = hole_offsets.into();
        self
    }

    pub fn has_arcs(&self) -> bool {
        self.arc_start || self.arc_end
    }

    pub fn has_holes(&self) -> bool {
        !self.hole_offsets.is_empty()
    }
}

/// Extract the flat list of requested lengths, in part order.
pub fn part_lengths(parts: &[Part]) -> Vec<f64> {
    parts.iter().map(|p| p.length).collect()
}
