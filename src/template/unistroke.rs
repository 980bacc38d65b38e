//! Canonical unistroke templates and their distance measures
//!
//! A unistroke is the normalized form every gesture is reduced to before
//! geometric matching: resampled, rotated to a reference orientation,
//! scaled, and centered. The pipeline order is load-bearing; scaling
//! happens in the centroid-rotated frame, translation comes last.

use crate::geometry::normalize::{
    indicative_angle, rotate_by, scale_dim_to, scale_to_square, start_unit_vector, translate_to,
    vectorize,
};
use crate::geometry::point::Point;
use crate::geometry::resample::resample;

/// Side of the square all gestures are scaled into.
pub const SQUARE_SIZE: f64 = 250.0;

/// Aspect ratio at or below which a gesture counts as one-dimensional and
/// is scaled uniformly instead of per axis.
pub const ONE_D_THRESHOLD: f64 = 0.25;

/// Half-width of the rotation search window (radians, 45 degrees each way).
pub const ANGLE_RANGE: f64 = 45.0 * std::f64::consts::PI / 180.0;

/// Convergence precision of the rotation search (2 degrees).
pub const ANGLE_PRECISION: f64 = 2.0 * std::f64::consts::PI / 180.0;

/// Golden ratio step constant of the section search: 0.5 * (sqrt(5) - 1).
pub const PHI: f64 = 0.618_033_988_749_895;

/// A canonical unistroke template.
#[derive(Debug, Clone)]
pub struct Unistroke {
    pub name: String,
    /// Exactly the configured resampling count after construction.
    pub points: Vec<Point>,
    /// Unit vector from the start point toward the point one eighth of the
    /// way along, compared by the multistroke start-direction filter.
    pub start_vector: Point,
    /// Flattened unit vector for the closed-form cosine distance.
    pub vector: Option<Vec<f64>>,
}

impl Unistroke {
    /// Build a single-stroke template: resample, rotate the indicative
    /// angle away, scale each axis into the square, and center.
    pub fn single(name: &str, raw: &[Point], n: usize, use_protractor: bool) -> Self {
        let points = resample(raw, n);
        let radians = indicative_angle(&points);
        let points = rotate_by(&points, -radians);
        let points = scale_to_square(&points, SQUARE_SIZE);
        let points = translate_to(&points, Point::new(0.0, 0.0));
        Self::finish(name, points, n, false, use_protractor)
    }

    /// Build a multistroke-family template. Scaling is dimension-sensitive,
    /// and with `bounded_rotation` the original orientation is restored
    /// after scaling so recognition stays orientation-aware within the
    /// search window.
    pub fn multi(
        name: &str,
        raw: &[Point],
        n: usize,
        bounded_rotation: bool,
        use_protractor: bool,
    ) -> Self {
        let points = resample(raw, n);
        let radians = indicative_angle(&points);
        let mut points = rotate_by(&points, -radians);
        points = scale_dim_to(&points, SQUARE_SIZE, ONE_D_THRESHOLD);
        if bounded_rotation {
            points = rotate_by(&points, radians);
        }
        let points = translate_to(&points, Point::new(0.0, 0.0));
        Self::finish(name, points, n, bounded_rotation, use_protractor)
    }

    fn finish(
        name: &str,
        points: Vec<Point>,
        n: usize,
        bounded_rotation: bool,
        use_protractor: bool,
    ) -> Self {
        let start_vector = start_unit_vector(&points, n / 8);
        let vector = use_protractor.then(|| vectorize(&points, bounded_rotation));
        Self {
            name: name.to_string(),
            points,
            start_vector,
            vector,
        }
    }
}

/// Mean distance between corresponding points of two same-length paths.
pub(crate) fn path_distance(a: &[Point], b: &[Point]) -> f64 {
    let sum: f64 = a.iter().zip(b).map(|(p, q)| p.distance_to(q)).sum();
    sum / a.len() as f64
}

fn distance_at_angle(points: &[Point], template: &[Point], radians: f64) -> f64 {
    path_distance(&rotate_by(points, radians), template)
}

/// Golden-section search for the rotation minimizing the mean per-point
/// distance, over `[from, to]` with the given convergence precision.
///
/// Exploits the unimodality of the distance-vs-angle curve near the
/// optimum; not globally optimal, but the curve is well-behaved for
/// canonical gestures.
pub(crate) fn distance_at_best_angle(
    points: &[Point],
    template: &[Point],
    mut from: f64,
    mut to: f64,
    precision: f64,
) -> f64 {
    let mut x1 = PHI * from + (1.0 - PHI) * to;
    let mut f1 = distance_at_angle(points, template, x1);
    let mut x2 = (1.0 - PHI) * from + PHI * to;
    let mut f2 = distance_at_angle(points, template, x2);
    while (to - from).abs() > precision {
        if f1 < f2 {
            to = x2;
            x2 = x1;
            f2 = f1;
            x1 = PHI * from + (1.0 - PHI) * to;
            f1 = distance_at_angle(points, template, x1);
        } else {
            from = x1;
            x1 = x2;
            f1 = f2;
            x2 = (1.0 - PHI) * from + PHI * to;
            f2 = distance_at_angle(points, template, x2);
        }
    }
    f1.min(f2)
}

/// Closed-form cosine distance at the optimal rotation angle between two
/// flattened unit vectors. O(n), no iterative search.
pub(crate) fn optimal_cosine_distance(v1: &[f64], v2: &[f64]) -> f64 {
    let mut a = 0.0;
    let mut b = 0.0;
    for i in (0..v1.len().min(v2.len())).step_by(2) {
        a += v1[i] * v2[i] + v1[i + 1] * v2[i + 1];
        b += v1[i] * v2[i + 1] - v1[i + 1] * v2[i];
    }
    let angle = (b / a).atan();
    // rounding can push the cosine a hair outside [-1, 1]
    (a * angle.cos() + b * angle.sin()).clamp(-1.0, 1.0).acos()
}
