//! Cut plan geometry derived from a packing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which way a boundary arc opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArcOrientation {
    /// Arc at a piece start; the curve bulges toward the previous boundary.
    Up,
    /// Arc at a piece end; the curve bulges toward the next boundary.
    Down,
}

impl ArcOrientation {
    pub fn is_up(&self) -> bool {
        matches!(self, ArcOrientation::Up)
    }
}

impl fmt::Display for ArcOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArcOrientation::Up => write!(f, "Up"),
            ArcOrientation::Down => write!(f, "Down"),
        }
    }
}

/// Straight cut across a bar, perpendicular to its length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutLine {
    /// Bin (bar) index.
    pub bin: usize,
    /// X coordinate where the cut starts (bar start minus margin).
    pub start_x: f64,
    /// Position along the bar.
    pub y: f64,
    /// Cut length (bar width plus margin on both sides).
    pub length: f64,
}

impl CutLine {
    /// X coordinate where the cut ends.
    pub fn end_x(&self) -> f64 {
        self.start_x + self.length
    }
}

/// Hole center. All holes share the plan's radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub bin: usize,
    pub x: f64,
    pub y: f64,
}

/// 180° arc centered across the bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub bin: usize,
    pub x: f64,
    pub y: f64,
    pub orientation: ArcOrientation,
}

/// A part placed at an offset inside a bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Index into the caller's part list.
    pub part_index: usize,
    /// Offset of the piece start along the bar.
    pub offset: f64,
    pub length: f64,
}

/// Layout of one bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinLayout {
    pub index: usize,
    /// Left edge of the cut lines for this bar.
    pub start_x: f64,
    pub placements: Vec<Placement>,
}

impl BinLayout {
    /// Length consumed by the placed pieces.
    pub fn used_length(&self) -> f64 {
        self.placements.iter().map(|p| p.length).sum()
    }
}

/// Absolute geometry for all bars laid side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutPlan {
    pub stock_length: f64,
    /// Bar width.
    pub stick_width: f64,
    pub cuts: Vec<CutLine>,
    pub holes: Vec<Hole>,
    /// Radius shared by all holes.
    pub radius: f64,
    pub arcs: Vec<Arc>,
    pub bins: Vec<BinLayout>,
}

impl CutPlan {
    /// Number of bars used.
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    pub fn cuts_in_bin(&self, bin: usize) -> impl Iterator<Item = &CutLine> {
        self.cuts.iter().filter(move |c| c.bin == bin)
    }

    pub fn holes_in_bin(&self, bin: usize) -> impl Iterator<Item = &Hole> {
        self.holes.iter().filter(move |h| h.bin == bin)
    }

    pub fn arcs_in_bin(&self, bin: usize) -> impl Iterator<Item = &Arc> {
        self.arcs.iter().filter(move |a| a.bin == bin)
    }

    /// Total cut length of all straight cuts.
    pub fn total_cut_length(&self) -> f64 {
        self.cuts.iter().map(|c| c.length).sum()
    }
}

impl fmt::Display for CutPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CutPlan:")?;
        writeln!(f, "Stick Width: {:.3}", self.stick_width)?;
        writeln!(f, "Cuts:")?;
        for cut in &self.cuts {
            writeln!(
                f,
                "  StartX: {:.3}, Y: {:.3}, Length: {:.3}",
                cut.start_x, cut.y, cut.length
            )?;
        }
        writeln!(f, "Holes:")?;
        for hole in &self.holes {
            writeln!(f, "  CenterX: {:.3}, CenterY: {:.3}", hole.x, hole.y)?;
        }
        writeln!(f, "Radius: {:.3}", self.radius)?;
        writeln!(f, "Arches:")?;
        for arc in &self.arcs {
            writeln!(
                f,
                "  CenterX: {:.3}, CenterY: {:.3}, Direction: {}",
                arc.x, arc.y, arc.orientation
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cut_line_end() {
        let cut = CutLine {
            bin: 0,
            start_x: -1.0,
            y: 0.0,
            length: 12.0,
        };
        assert_eq!(cut.end_x(), 11.0);
    }

    #[test]
    fn test_orientation_display() {
        assert_eq!(ArcOrientation::Up.to_string(), "Up");
        assert_eq!(ArcOrientation::Down.to_string(), "Down");
        assert!(ArcOrientation::Up.is_up());
        assert!(!ArcOrientation::Down.is_up());
    }

    #[test]
    fn test_bin_filters() {
        let plan = CutPlan {
            stock_length: 100.0,
            stick_width: 10.0,
            cuts: vec![
                CutLine {
                    bin: 0,
                    start_x: -1.0,
                    y: 0.0,
                    length: 12.0,
                },
                CutLine {
                    bin: 1,
                    start_x: 14.0,
                    y: 0.0,
                    length: 12.0,
                },
            ],
            holes: vec![Hole {
                bin: 1,
                x: 20.0,
                y: 45.0,
            }],
            radius: 1.5,
            arcs: Vec::new(),
            bins: Vec::new(),
        };
        assert_eq!(plan.cuts_in_bin(0).count(), 1);
        assert_eq!(plan.holes_in_bin(1).count(), 1);
        assert_eq!(plan.arcs_in_bin(0).count(), 0);
        assert_eq!(plan.total_cut_length(), 24.0);
    }
}
