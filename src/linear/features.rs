//! Path feature extraction
//!
//! The classifier's view of a gesture is a fixed 13-feature vector: initial
//! direction cosine and sine, bounding-box diagonal length and angle,
//! start-to-end displacement distance/cosine/sine, total path length,
//! signed/absolute/squared total turning, maximum squared speed, and total
//! duration. Input is scaled into the unit box and stripped of
//! near-duplicate jitter before anything is measured.

use crate::geometry::point::Point;

/// Number of features per example.
pub const FEATURE_COUNT: usize = 13;

/// Minimum coordinate-sum distance between retained points, on the
/// unit-scaled gesture.
const JITTER_THRESHOLD: f64 = 0.0003;

/// A 13-feature description of one gesture.
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Scale into the unit box, anchored at the bounding-box minimum, keeping
/// timestamps. A degenerate box divides by one instead.
fn scale_to_unit(points: &[Point]) -> Vec<Point> {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let mut size = (max_x - min_x).max(max_y - min_y);
    if size == 0.0 {
        size = 1.0;
    }
    points
        .iter()
        .map(|p| Point {
            x: (p.x - min_x) / size,
            y: (p.y - min_y) / size,
            ..*p
        })
        .collect()
}

/// Discard points too close to the previously retained point. The first
/// input point seeds the walk but is not itself emitted.
fn filter_jitter(points: &[Point]) -> Vec<Point> {
    let mut retained = Vec::with_capacity(points.len());
    if points.is_empty() {
        return retained;
    }
    let mut reference = points[0];
    for p in &points[1..] {
        if ((p.x - reference.x) + (p.y - reference.y)).abs() > JITTER_THRESHOLD {
            retained.push(*p);
            reference = *p;
        }
    }
    retained
}

fn time_of(p: &Point) -> f64 {
    p.t.unwrap_or(0.0)
}

/// Compute the feature vector of a raw gesture path.
///
/// Fewer than three points surviving the jitter filter degenerate to an
/// all-zero vector; direction cosines whose magnitude is zero pass the
/// unnormalized displacement through instead.
pub fn feature_vector(points: &[Point]) -> FeatureVector {
    let mut features = [0.0; FEATURE_COUNT];
    let processed = filter_jitter(&scale_to_unit(points));
    // initial direction needs the third point
    if processed.len() < 3 {
        return features;
    }
    let start = processed[0];
    let third = processed[2];
    let end = processed[processed.len() - 1];

    // features 0, 1: initial direction cosine and sine
    let dx = third.x - start.x;
    let dy = third.y - start.y;
    let magnitude = (dx * dx + dy * dy).sqrt();
    features[0] = if magnitude == 0.0 { dx } else { dx / magnitude };
    features[1] = if magnitude == 0.0 { dy } else { dy / magnitude };

    // features 2, 3: bounding-box diagonal length and angle
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in &processed {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    let bx = max.x - min.x;
    let by = max.y - min.y;
    features[2] = (bx * bx + by * by).sqrt();
    features[3] = by.atan2(bx);

    // features 4, 5, 6: start-to-end distance and direction
    let ex = end.x - start.x;
    let ey = end.y - start.y;
    let span = (ex * ex + ey * ey).sqrt();
    features[4] = span;
    features[5] = if span == 0.0 { ex } else { ex / span };
    features[6] = if span == 0.0 { ey } else { ey / span };

    // features 7..12: path length, turning sums, peak squared speed,
    // duration
    let mut total_length = 0.0;
    let mut total_angle = 0.0;
    let mut total_abs_angle = 0.0;
    let mut total_sqr_angle = 0.0;
    let mut max_speed = f64::NEG_INFINITY;
    for i in 1..processed.len() {
        let dx = processed[i].x - processed[i - 1].x;
        let dy = processed[i].y - processed[i - 1].y;
        let dt = time_of(&processed[i]) - time_of(&processed[i - 1]);
        if i >= 3 {
            let px = processed[i - 1].x - processed[i - 2].x;
            let py = processed[i - 1].y - processed[i - 2].y;
            let angle = (dx * py - px * dy).atan2(dx * px - dy * py);
            total_angle += angle;
            total_abs_angle += angle.abs();
            total_sqr_angle += angle * angle;
        }
        let squared_step = dx * dx + dy * dy;
        total_length += squared_step.sqrt();
        let squared_dt = dt * dt;
        max_speed = max_speed.max(if squared_dt == 0.0 {
            squared_step
        } else {
            squared_step / squared_dt
        });
    }
    features[7] = total_length;
    features[8] = total_angle;
    features[9] = total_abs_angle;
    features[10] = total_sqr_angle;
    features[11] = max_speed;
    features[12] = time_of(&end) - time_of(&start);
    features
}
