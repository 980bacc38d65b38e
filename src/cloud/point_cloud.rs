//! Normalized point clouds
//!
//! Cloud canonicalization: stroke-aware resampling, scaling into the unit
//! box, and centroid translation to the origin. No rotation step; the
//! correspondence search absorbs orientation differences.

use crate::geometry::normalize::{scale_to_unit_box, translate_to};
use crate::geometry::point::Point;
use crate::geometry::resample::resample_strokes;

/// A point-cloud template.
#[derive(Debug, Clone)]
pub struct PointCloud {
    pub name: String,
    /// Exactly `n` normalized points after construction.
    pub points: Vec<Point>,
}

impl PointCloud {
    pub fn new(name: &str, raw: &[Point], n: usize) -> Self {
        let points = resample_strokes(raw, n);
        let points = scale_to_unit_box(&points);
        let points = translate_to(&points, Point::new(0.0, 0.0));
        Self {
            name: name.to_string(),
            points,
        }
    }
}
