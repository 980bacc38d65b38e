//! 2D points and bounding boxes
//!
//! The point type carries an optional stroke id (used by the stroke-aware
//! cloud matchers) and an optional timestamp (used by the statistical
//! classifier's speed and duration features). Derived points produced by
//! resampling or normalization are always new values; caller-owned input is
//! never mutated.

use serde::{Deserialize, Serialize};

/// A 2D point, optionally tagged with a stroke id and a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Stroke this point belongs to (0, 1, 2, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_id: Option<u32>,
    /// Capture timestamp, monotonically increasing within a gesture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<f64>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, stroke_id: None, t: None }
    }

    pub fn with_stroke(x: f64, y: f64, stroke_id: u32) -> Self {
        Self { x, y, stroke_id: Some(stroke_id), t: None }
    }

    pub fn with_time(x: f64, y: f64, t: f64) -> Self {
        Self { x, y, stroke_id: None, t: Some(t) }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        self.squared_distance_to(other).sqrt()
    }

    /// Squared Euclidean distance to another point
    pub fn squared_distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}

/// Axis-aligned bounding box of a point sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Compute the bounding box of a non-empty point sequence
    pub fn of(points: &[Point]) -> Self {
        let mut bbox = Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for p in points {
            bbox.min_x = bbox.min_x.min(p.x);
            bbox.min_y = bbox.min_y.min(p.y);
            bbox.max_x = bbox.max_x.max(p.x);
            bbox.max_y = bbox.max_y.max(p.y);
        }
        bbox
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Length of the box diagonal
    pub fn diagonal(&self) -> f64 {
        let w = self.width();
        let h = self.height();
        (w * w + h * h).sqrt()
    }

    /// Longest box side
    pub fn max_side(&self) -> f64 {
        self.width().max(self.height())
    }
}

/// Centroid (mean position) of a non-empty point sequence
pub fn centroid(points: &[Point]) -> Point {
    let mut x = 0.0;
    let mut y = 0.0;
    for p in points {
        x += p.x;
        y += p.y;
    }
    Point::new(x / points.len() as f64, y / points.len() as f64)
}

/// Length traversed by a point path (sum of consecutive distances)
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

/// Path length that restarts across stroke boundaries: the segment between
/// the last point of one stroke and the first point of the next contributes
/// nothing.
pub fn stroke_path_length(points: &[Point]) -> f64 {
    points
        .windows(2)
        .filter(|w| w[0].stroke_id == w[1].stroke_id)
        .map(|w| w[0].distance_to(&w[1]))
        .sum()
}
