//! Canonical normalization steps
//!
//! Rotation to a reference angle, bounding-box scaling, centroid
//! translation, and the unit vectorizations the geometric matcher family
//! compares against. Where a magnitude or box side is zero the unnormalized
//! value passes through unchanged; degenerate input degrades, it does not
//! crash.

use super::point::{centroid, BoundingBox, Point};

/// Angle from the first point toward the centroid.
///
/// Rotating by its negation puts every gesture in a shared reference
/// orientation regardless of how the gesture was rotated when drawn.
pub fn indicative_angle(points: &[Point]) -> f64 {
    let c = centroid(points);
    (c.y - points[0].y).atan2(c.x - points[0].x)
}

/// Rotate all points about their centroid by `radians`.
pub fn rotate_by(points: &[Point], radians: f64) -> Vec<Point> {
    let c = centroid(points);
    let (sin, cos) = radians.sin_cos();
    points
        .iter()
        .map(|p| Point {
            x: (p.x - c.x) * cos - (p.y - c.y) * sin + c.x,
            y: (p.x - c.x) * sin + (p.y - c.y) * cos + c.y,
            ..*p
        })
        .collect()
}

/// Scale each axis independently so the bounding box becomes a
/// `size` x `size` square. Assumes a 2D gesture; a zero-width or
/// zero-height box leaves that axis unscaled.
pub fn scale_to_square(points: &[Point], size: f64) -> Vec<Point> {
    let bbox = BoundingBox::of(points);
    points
        .iter()
        .map(|p| Point {
            x: if bbox.width() > 0.0 { p.x * (size / bbox.width()) } else { p.x },
            y: if bbox.height() > 0.0 { p.y * (size / bbox.height()) } else { p.y },
            ..*p
        })
        .collect()
}

/// Dimension-sensitive scaling: 1D gestures (box aspect ratio at or below
/// `one_d_ratio`) scale uniformly by the longest side, 2D gestures scale
/// each axis independently.
pub fn scale_dim_to(points: &[Point], size: f64, one_d_ratio: f64) -> Vec<Point> {
    let bbox = BoundingBox::of(points);
    let w = bbox.width();
    let h = bbox.height();
    let uniformly = (w / h).min(h / w) <= one_d_ratio;
    points
        .iter()
        .map(|p| {
            let (sx, sy) = if uniformly {
                (bbox.max_side(), bbox.max_side())
            } else {
                (w, h)
            };
            Point {
                x: if sx > 0.0 { p.x * (size / sx) } else { p.x },
                y: if sy > 0.0 { p.y * (size / sy) } else { p.y },
                ..*p
            }
        })
        .collect()
}

/// Scale into the unit box: longest bounding-box side becomes 1, anchored at
/// the box minimum. A degenerate box passes coordinates through unscaled.
pub fn scale_to_unit_box(points: &[Point]) -> Vec<Point> {
    let bbox = BoundingBox::of(points);
    let size = bbox.max_side();
    points
        .iter()
        .map(|p| Point {
            x: if size > 0.0 { (p.x - bbox.min_x) / size } else { p.x - bbox.min_x },
            y: if size > 0.0 { (p.y - bbox.min_y) / size } else { p.y - bbox.min_y },
            ..*p
        })
        .collect()
}

/// Translate so the centroid lands on `target`.
pub fn translate_to(points: &[Point], target: Point) -> Vec<Point> {
    let c = centroid(points);
    points
        .iter()
        .map(|p| Point {
            x: p.x + target.x - c.x,
            y: p.y + target.y - c.y,
            ..*p
        })
        .collect()
}

/// Flatten canonical points into a `2n`-length unit vector for the
/// closed-form cosine distance.
///
/// With `bounded_orientation`, coordinates are first rotated so the start
/// point snaps to the nearest of the eight 45-degree base orientations,
/// keeping the comparison sensitive to gross orientation while tolerating
/// small tilts. A zero-magnitude vector is returned unnormalized.
pub fn vectorize(points: &[Point], bounded_orientation: bool) -> Vec<f64> {
    let (mut cos, mut sin) = (1.0, 0.0);
    if bounded_orientation {
        let angle = points[0].y.atan2(points[0].x);
        let base = (std::f64::consts::FRAC_PI_4)
            * ((angle + std::f64::consts::FRAC_PI_8) / std::f64::consts::FRAC_PI_4).floor();
        cos = (base - angle).cos();
        sin = (base - angle).sin();
    }
    let mut sum = 0.0;
    let mut vector = Vec::with_capacity(points.len() * 2);
    for p in points {
        let x = p.x * cos - p.y * sin;
        let y = p.y * cos + p.x * sin;
        vector.push(x);
        vector.push(y);
        sum += x * x + y * y;
    }
    let magnitude = sum.sqrt();
    if magnitude > 0.0 {
        for v in &mut vector {
            *v /= magnitude;
        }
    }
    vector
}

/// Unit vector from the first point toward the point at `index`.
///
/// Returns the raw difference when the two points coincide.
pub fn start_unit_vector(points: &[Point], index: usize) -> Point {
    let v = Point::new(points[index].x - points[0].x, points[index].y - points[0].y);
    let len = (v.x * v.x + v.y * v.y).sqrt();
    if len > 0.0 {
        Point::new(v.x / len, v.y / len)
    } else {
        v
    }
}

/// Acute angle between two unit vectors.
pub fn angle_between_unit_vectors(a: &Point, b: &Point) -> f64 {
    (a.x * b.x + a.y * b.y).clamp(-1.0, 1.0).acos()
}
