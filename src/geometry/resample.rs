//! Arc-length resampling
//!
//! Converts an arbitrary-density path into exactly `n` points spaced
//! equidistantly along its arc length. The walk is a single forward pass
//! that emits interpolated points into a fresh output sequence, carrying the
//! remainder distance explicitly.

use super::point::{path_length, stroke_path_length, Point};

/// Resample `points` into exactly `n` equidistant points.
///
/// The caller must supply at least 2 points and `n >= 2`. Consecutive output
/// points are one arc-length interval apart, except possibly the final pair
/// when floating-point rounding leaves the walk short.
pub fn resample(points: &[Point], n: usize) -> Vec<Point> {
    resample_walk(points, n, false)
}

/// Stroke-aware resampling: the interval between the last point of one
/// stroke and the first point of the next is neither measured nor crossed,
/// so no point is ever interpolated across a pen-up gap.
pub fn resample_strokes(points: &[Point], n: usize) -> Vec<Point> {
    resample_walk(points, n, true)
}

fn resample_walk(points: &[Point], n: usize, stroke_aware: bool) -> Vec<Point> {
    debug_assert!(points.len() >= 2 && n >= 2);
    let total = if stroke_aware {
        stroke_path_length(points)
    } else {
        path_length(points)
    };
    let interval = total / (n - 1) as f64;

    let mut out = Vec::with_capacity(n);
    out.push(points[0]);
    let mut accumulated = 0.0;
    let mut prev = points[0];
    for i in 1..points.len() {
        let cur = points[i];
        if stroke_aware && cur.stroke_id != points[i - 1].stroke_id {
            prev = cur;
            continue;
        }
        let mut segment = prev.distance_to(&cur);
        while segment > 0.0 && accumulated + segment >= interval {
            let frac = (interval - accumulated) / segment;
            let q = Point {
                x: prev.x + frac * (cur.x - prev.x),
                y: prev.y + frac * (cur.y - prev.y),
                stroke_id: cur.stroke_id,
                t: None,
            };
            out.push(q);
            // subsequent distance is measured from the emitted point
            prev = q;
            segment = prev.distance_to(&cur);
            accumulated = 0.0;
        }
        accumulated += segment;
        prev = cur;
    }
    // rounding can leave the walk a point short; pad with the final point
    while out.len() < n {
        out.push(Point {
            t: None,
            ..points[points.len() - 1]
        });
    }
    out.truncate(n);
    out
}

/// Isoparametric interpolation: pick `n` samples at uniformly spaced
/// parameter values over the input's index range, blending the two nearest
/// input points by the output parameter.
///
/// Used by the shape-distance matcher, whose correspondence is defined over
/// sample index rather than arc length.
pub fn interpolate(points: &[Point], n: usize) -> Vec<Point> {
    debug_assert!(!points.is_empty() && n >= 2);
    let last = (n - 1) as f64;
    let span = (points.len() - 1) as f64;
    let mut out = Vec::with_capacity(n);
    for j in 0..n {
        let head = (n - 1 - j) as f64 / last;
        let tail = j as f64 / last;
        let pos = span * j as f64 / last;
        let lo = &points[pos.floor() as usize];
        let hi = &points[pos.ceil() as usize];
        out.push(Point {
            x: head * lo.x + tail * hi.x,
            y: head * lo.y + tail * hi.y,
            stroke_id: lo.stroke_id,
            t: None,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64, 0.0)).collect()
    }

    #[test]
    fn test_resample_exact_count() {
        for n in [2, 3, 8, 32, 64, 96] {
            let resampled = resample(&line(10), n);
            assert_eq!(resampled.len(), n);
        }
    }

    #[test]
    fn test_resample_uniform_spacing() {
        // unevenly sampled straight path, where straight-line spacing and
        // arc-length spacing coincide
        let points: Vec<Point> = [0.0, 1.0, 3.0, 20.0, 21.0, 25.0, 40.0]
            .iter()
            .map(|&x| Point::new(x, 0.0))
            .collect();
        let n = 16;
        let resampled = resample(&points, n);
        assert_eq!(resampled.len(), n);
        let interval = 40.0 / (n - 1) as f64;
        // uniform within tolerance, except possibly the final pair
        for w in resampled.windows(2).take(n - 2) {
            assert!(
                (w[0].distance_to(&w[1]) - interval).abs() < 1e-6,
                "spacing {} != {}",
                w[0].distance_to(&w[1]),
                interval
            );
        }
    }

    #[test]
    fn test_resample_spacing_never_exceeds_interval() {
        // across corners the straight-line distance between consecutive
        // samples falls below the arc-length interval, never above it
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let n = 16;
        let resampled = resample(&points, n);
        assert_eq!(resampled.len(), n);
        let interval = 30.0 / (n - 1) as f64;
        for w in resampled.windows(2) {
            assert!(w[0].distance_to(&w[1]) <= interval + 1e-6);
        }
    }

    #[test]
    fn test_resample_preserves_endpoints() {
        let points = line(20);
        let resampled = resample(&points, 8);
        assert!((resampled[0].x - 0.0).abs() < 1e-9);
        assert!((resampled[7].x - 19.0).abs() < 1e-6);
    }

    #[test]
    fn test_resample_sparse_input() {
        // two points expand to many
        let resampled = resample(&[Point::new(0.0, 0.0), Point::new(9.0, 0.0)], 10);
        assert_eq!(resampled.len(), 10);
        for (i, p) in resampled.iter().enumerate() {
            assert!((p.x - i as f64).abs() < 1e-6);
        }
    }

    #[test]
    fn test_resample_coincident_points() {
        // zero-length path still satisfies the exact-count postcondition
        let resampled = resample(&[Point::new(5.0, 5.0), Point::new(5.0, 5.0)], 4);
        assert_eq!(resampled.len(), 4);
        for p in &resampled {
            assert!((p.x - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_resample_strokes_no_gap_points() {
        let mut points: Vec<Point> = (0..10).map(|i| Point::with_stroke(i as f64, 0.0, 0)).collect();
        points.extend((0..10).map(|i| Point::with_stroke(i as f64, 100.0, 1)));
        let resampled = resample_strokes(&points, 16);
        assert_eq!(resampled.len(), 16);
        // every output point lies on one of the two strokes, never in the gap
        for p in &resampled {
            assert!(p.y < 1e-9 || (p.y - 100.0).abs() < 1e-9, "gap point at y={}", p.y);
        }
    }

    #[test]
    fn test_interpolate_count_and_endpoints() {
        let points = line(7);
        let out = interpolate(&points, 32);
        assert_eq!(out.len(), 32);
        assert!((out[0].x - 0.0).abs() < 1e-9);
        assert!((out[31].x - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_interpolate_identity_when_counts_match() {
        let points = line(16);
        let out = interpolate(&points, 16);
        for (a, b) in points.iter().zip(&out) {
            assert!((a.x - b.x).abs() < 1e-9);
            assert!((a.y - b.y).abs() < 1e-9);
        }
    }
}
