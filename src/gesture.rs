//! Gesture input
//!
//! A gesture is an ordered sequence of strokes, each an ordered sequence of
//! points. Single-stroke recognizers consume the flattened form; the
//! stroke-aware families rely on the stroke ids tagged during flattening.

use serde::{Deserialize, Serialize};

use crate::geometry::point::Point;
use crate::{Error, Result};

/// A freehand gesture: one or more strokes in drawing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gesture {
    strokes: Vec<Vec<Point>>,
}

impl Gesture {
    /// Single-stroke gesture from a point sequence.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { strokes: vec![points] }
    }

    /// Multi-stroke gesture from strokes in drawing order.
    pub fn from_strokes(strokes: Vec<Vec<Point>>) -> Self {
        Self { strokes }
    }

    pub fn strokes(&self) -> &[Vec<Point>] {
        &self.strokes
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(Vec::len).sum()
    }

    /// Concatenate strokes into one point sequence in drawing order.
    ///
    /// Points that already carry a stroke id keep it; untagged points are
    /// tagged with the index of the stroke they belong to.
    pub fn combined(&self) -> Vec<Point> {
        self.strokes
            .iter()
            .enumerate()
            .flat_map(|(i, stroke)| {
                stroke.iter().map(move |p| Point {
                    stroke_id: p.stroke_id.or(Some(i as u32)),
                    ..*p
                })
            })
            .collect()
    }

    /// Reject gestures too small to resample.
    pub(crate) fn require_points(&self, min: usize) -> Result<()> {
        let got = self.point_count();
        if got < min {
            return Err(Error::DegeneratePath { got, min });
        }
        Ok(())
    }
}
