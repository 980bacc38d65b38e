//! Tangent-vector recognizer
//!
//! Resamples a gesture directly into unit tangent vectors (the direction
//! between consecutive resampled points, never the points themselves) and
//! scores templates by the sum of pairwise dot products. No rotation
//! search and no scaling step; a higher sum means more similar, so
//! recognition maximizes where the other families minimize.

use tracing::debug;

use crate::geometry::point::{path_length, Point};
use crate::gesture::Gesture;
use crate::recognizer::{Recognition, RecognizeOptions, Recognizer};
use crate::Result;

/// Resample `points` into `n - 1` unit tangent vectors.
///
/// Walks the path at equidistant intervals like point resampling, but emits
/// the normalized direction from the previously emitted sample instead of
/// the sample itself. A zero-length direction passes through unnormalized.
pub(crate) fn resample_tangents(points: &[Point], n: usize) -> Vec<Point> {
    let interval = path_length(points) / (n - 1) as f64;
    let mut vectors: Vec<Point> = Vec::with_capacity(n - 1);
    let mut accumulated = 0.0;
    let mut prev = points[0];
    let mut walk = points[0];
    for i in 1..points.len() {
        let cur = points[i];
        let mut segment = walk.distance_to(&cur);
        while segment > 0.0 && accumulated + segment >= interval {
            let frac = (interval - accumulated) / segment;
            let q = Point::new(walk.x + frac * (cur.x - walk.x), walk.y + frac * (cur.y - walk.y));
            let mut r = Point::new(q.x - prev.x, q.y - prev.y);
            let magnitude = (r.x * r.x + r.y * r.y).sqrt();
            if magnitude > 0.0 {
                r = Point::new(r.x / magnitude, r.y / magnitude);
            }
            vectors.push(r);
            walk = q;
            prev = q;
            segment = walk.distance_to(&cur);
            accumulated = 0.0;
        }
        accumulated += segment;
        walk = cur;
    }
    // rounding can leave the walk one vector short; repeat the last one
    while vectors.len() < n - 1 {
        let last = vectors.last().copied().unwrap_or(Point::new(0.0, 0.0));
        vectors.push(last);
    }
    vectors.truncate(n - 1);
    vectors
}

/// Dot-product similarity between two tangent sequences.
pub(crate) fn dissimilarity(v1: &[Point], v2: &[Point]) -> f64 {
    let pairs = v1.len().min(v2.len()).saturating_sub(1);
    v1.iter()
        .zip(v2)
        .take(pairs)
        .map(|(a, b)| a.x * b.x + a.y * b.y)
        .sum()
}

/// A registered tangent template.
#[derive(Debug, Clone)]
pub struct TangentTemplate {
    pub name: String,
    pub vectors: Vec<Point>,
}

/// Tangent-vector matcher.
pub struct TangentVector {
    resample_count: usize,
    templates: Vec<TangentTemplate>,
}

impl TangentVector {
    pub fn new(resample_count: usize) -> Self {
        Self {
            resample_count,
            templates: Vec::new(),
        }
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }
}

impl Recognizer for TangentVector {
    fn add_template(&mut self, name: &str, gesture: &Gesture) -> Result<u32> {
        gesture.require_points(2)?;
        self.templates.push(TangentTemplate {
            name: name.to_string(),
            vectors: resample_tangents(&gesture.combined(), self.resample_count),
        });
        let count = self.templates.iter().filter(|t| t.name == name).count() as u32;
        debug!(class = name, count, "registered tangent template");
        Ok(count)
    }

    fn recognize(&self, gesture: &Gesture, _options: &RecognizeOptions) -> Result<Recognition> {
        gesture.require_points(2)?;
        let candidate = resample_tangents(&gesture.combined(), self.resample_count);
        // most similar template wins: this family maximizes
        let mut best: Option<(&TangentTemplate, f64)> = None;
        for template in &self.templates {
            let similarity = dissimilarity(&candidate, &template.vectors);
            if best.map_or(true, |(_, b)| similarity > b) {
                best = Some((template, similarity));
            }
        }
        Ok(match best {
            Some((template, similarity)) => {
                debug!(class = %template.name, similarity, "tangent match");
                Recognition::matched(&template.name, similarity)
            }
            None => Recognition::no_match(),
        })
    }

    fn clear_templates(&mut self) {
        self.templates.clear();
    }
}
