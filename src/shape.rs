//! Shape-distance recognizer
//!
//! Compares the local shape of consecutive segment pairs at every interior
//! point, under an isoparametric correspondence between candidate and
//! reference. The accumulated distance doubles as the pruning bound: a
//! comparison stops as soon as it exceeds the best distance seen so far.
//! References may optionally be traversed in reverse, absorbing
//! articulation differences, and a normalized local-shape formula trades
//! orientation sensitivity for comparability.

use tracing::debug;

use crate::geometry::point::Point;
use crate::geometry::resample::interpolate;
use crate::gesture::Gesture;
use crate::recognizer::{Recognition, RecognizeOptions, Recognizer};
use crate::Result;

/// Fixed rescale applied to the normalized variant's reported score.
const NORMALIZED_RESCALE: f64 = 100.0;

fn dot(a: &Point, b: &Point) -> f64 {
    a.x * b.x + a.y * b.y
}

/// Local shape distance between segment pairs (a, b) of the candidate and
/// (u, v) of the reference. Zero when the second segments of either pair
/// vanish.
pub(crate) fn local_shape_distance(a: &Point, b: &Point, u: &Point, v: &Point) -> f64 {
    let alpha = dot(a, a);
    let beta = dot(b, b);
    let gamma = dot(u, u);
    let delta = dot(v, v);
    if beta * delta == 0.0 {
        return 0.0;
    }
    let numerator = alpha * delta + beta * gamma
        - 2.0 * (dot(a, b) * dot(u, v) - dot(a, v) * dot(b, u) + dot(a, u) * dot(b, v));
    (numerator / (beta * delta)).sqrt()
}

/// Orientation-insensitive local shape distance; all four segment
/// magnitudes must be non-zero, otherwise the contribution is zero.
pub(crate) fn normalized_local_shape_distance(a: &Point, b: &Point, u: &Point, v: &Point) -> f64 {
    let alpha = dot(a, a);
    let beta = dot(b, b);
    let gamma = dot(u, u);
    let delta = dot(v, v);
    if alpha * beta * gamma * delta == 0.0 {
        return 0.0;
    }
    let cosine = (dot(a, b) * dot(u, v) + dot(a, u) * dot(b, v) - dot(a, v) * dot(b, u))
        / (alpha.sqrt() * beta.sqrt() * gamma.sqrt() * delta.sqrt());
    (1.0 - cosine).max(0.0).sqrt()
}

/// A stored reference gesture.
#[derive(Debug, Clone)]
pub struct ShapeTemplate {
    pub name: String,
    pub points: Vec<Point>,
}

/// Shape-distance matcher.
pub struct ShapeDistance {
    resample_count: usize,
    /// Use the normalized (orientation-insensitive) local shape formula.
    normalized: bool,
    /// Skip the reverse traversal of each reference.
    orientation_sensitive: bool,
    /// Initial acceptance bound; candidates must beat it to match at all.
    acceptance_threshold: f64,
    templates: Vec<ShapeTemplate>,
}

impl ShapeDistance {
    pub fn new(
        resample_count: usize,
        normalized: bool,
        orientation_sensitive: bool,
        acceptance_threshold: f64,
    ) -> Self {
        Self {
            resample_count,
            normalized,
            orientation_sensitive,
            acceptance_threshold,
            templates: Vec::new(),
        }
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    fn local_distance(&self, a: &Point, b: &Point, u: &Point, v: &Point) -> f64 {
        if self.normalized {
            normalized_local_shape_distance(a, b, u, v)
        } else {
            local_shape_distance(a, b, u, v)
        }
    }

    /// Accumulated shape distance walking the reference forward, stopping
    /// early beyond `bound`.
    fn forward_distance(&self, sp: &[Point], rp: &[Point], bound: f64) -> f64 {
        let len = sp.len();
        let mut d = 0.0;
        for i in 1..=len - 2 {
            d += self.local_distance(
                &Point::new(sp[i].x - sp[i - 1].x, sp[i].y - sp[i - 1].y),
                &Point::new(sp[i + 1].x - sp[i].x, sp[i + 1].y - sp[i].y),
                &Point::new(rp[i].x - rp[i - 1].x, rp[i].y - rp[i - 1].y),
                &Point::new(rp[i + 1].x - rp[i].x, rp[i + 1].y - rp[i].y),
            );
            if d > bound {
                break;
            }
        }
        d
    }

    /// Accumulated shape distance walking the reference end-to-start.
    fn reverse_distance(&self, sp: &[Point], rp: &[Point], bound: f64) -> f64 {
        let len = sp.len();
        let mut d = 0.0;
        for i in 1..=len - 2 {
            d += self.local_distance(
                &Point::new(sp[i].x - sp[i - 1].x, sp[i].y - sp[i - 1].y),
                &Point::new(sp[i + 1].x - sp[i].x, sp[i + 1].y - sp[i].y),
                &Point::new(rp[len - (i + 1)].x - rp[len - i].x, rp[len - (i + 1)].y - rp[len - i].y),
                &Point::new(
                    rp[len - (i + 2)].x - rp[len - (i + 1)].x,
                    rp[len - (i + 2)].y - rp[len - (i + 1)].y,
                ),
            );
            if d > bound {
                break;
            }
        }
        d
    }
}

impl Recognizer for ShapeDistance {
    fn add_template(&mut self, name: &str, gesture: &Gesture) -> Result<u32> {
        gesture.require_points(2)?;
        self.templates.push(ShapeTemplate {
            name: name.to_string(),
            points: interpolate(&gesture.combined(), self.resample_count),
        });
        let count = self.templates.iter().filter(|t| t.name == name).count() as u32;
        debug!(class = name, count, "registered shape reference");
        Ok(count)
    }

    fn recognize(&self, gesture: &Gesture, _options: &RecognizeOptions) -> Result<Recognition> {
        gesture.require_points(2)?;
        let combined = gesture.combined();
        let candidate = if combined.len() == self.resample_count {
            combined
        } else {
            interpolate(&combined, self.resample_count)
        };

        let mut threshold = self.acceptance_threshold;
        let mut best: Option<&ShapeTemplate> = None;
        for template in &self.templates {
            let reference;
            let rp: &[Point] = if template.points.len() == self.resample_count {
                &template.points
            } else {
                reference = interpolate(&template.points, self.resample_count);
                &reference
            };
            let forward = self.forward_distance(&candidate, rp, threshold);
            let d = if self.orientation_sensitive {
                forward
            } else {
                forward.min(self.reverse_distance(&candidate, rp, threshold))
            };
            if d <= threshold {
                threshold = d;
                best = Some(template);
            }
        }
        Ok(match best {
            Some(template) => {
                let score = if self.normalized {
                    threshold / NORMALIZED_RESCALE
                } else {
                    threshold
                };
                debug!(class = %template.name, score, "shape match");
                Recognition::matched(&template.name, score)
            }
            None => Recognition::no_match(),
        })
    }

    fn clear_templates(&mut self) {
        self.templates.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hill() -> Vec<Point> {
        (0..24)
            .map(|i| {
                let x = i as f64 * 5.0;
                Point::new(x, 60.0 - (x - 57.5).abs())
            })
            .collect()
    }

    fn snake() -> Vec<Point> {
        (0..24)
            .map(|i| Point::new(i as f64 * 5.0, 25.0 * (i as f64 * 0.5).sin()))
            .collect()
    }

    #[test]
    fn test_local_shape_distance_identical_segments() {
        let a = Point::new(1.0, 0.0);
        let b = Point::new(0.0, 1.0);
        assert!(local_shape_distance(&a, &b, &a, &b).abs() < 1e-9);
        assert!(normalized_local_shape_distance(&a, &b, &a, &b).abs() < 1e-9);
    }

    #[test]
    fn test_local_shape_distance_zero_segment_passes_through() {
        let a = Point::new(1.0, 0.0);
        let zero = Point::new(0.0, 0.0);
        assert_eq!(local_shape_distance(&a, &zero, &a, &a), 0.0);
        assert_eq!(normalized_local_shape_distance(&zero, &a, &a, &a), 0.0);
    }

    #[test]
    fn test_self_match() {
        let mut recognizer = ShapeDistance::new(32, false, false, f64::INFINITY);
        recognizer.add_template("hill", &Gesture::from_points(hill())).unwrap();
        recognizer.add_template("snake", &Gesture::from_points(snake())).unwrap();
        let result = recognizer
            .recognize(&Gesture::from_points(hill()), &RecognizeOptions::default())
            .unwrap();
        assert_eq!(result.label.as_deref(), Some("hill"));
        assert!(result.score < 1e-6);
    }

    #[test]
    fn test_reversed_candidate_matches_without_orientation() {
        let mut recognizer = ShapeDistance::new(32, false, false, f64::INFINITY);
        recognizer.add_template("snake", &Gesture::from_points(snake())).unwrap();
        recognizer.add_template("hill", &Gesture::from_points(hill())).unwrap();
        let mut backwards = snake();
        backwards.reverse();
        let result = recognizer
            .recognize(&Gesture::from_points(backwards), &RecognizeOptions::default())
            .unwrap();
        assert_eq!(result.label.as_deref(), Some("snake"));
    }

    #[test]
    fn test_acceptance_threshold_rejects() {
        // a bound of zero means only an exact shape match qualifies
        let mut recognizer = ShapeDistance::new(32, false, true, 1e-9);
        recognizer.add_template("hill", &Gesture::from_points(hill())).unwrap();
        let result = recognizer
            .recognize(&Gesture::from_points(snake()), &RecognizeOptions::default())
            .unwrap();
        assert!(result.label.is_none());
        let again = recognizer
            .recognize(&Gesture::from_points(hill()), &RecognizeOptions::default())
            .unwrap();
        assert_eq!(again.label.as_deref(), Some("hill"));
    }

    #[test]
    fn test_normalized_variant_rescales_score() {
        let mut plain = ShapeDistance::new(32, false, true, f64::INFINITY);
        let mut normalized = ShapeDistance::new(32, true, true, f64::INFINITY);
        for recognizer in [&mut plain, &mut normalized] {
            recognizer.add_template("hill", &Gesture::from_points(hill())).unwrap();
            recognizer.add_template("snake", &Gesture::from_points(snake())).unwrap();
        }
        let result = normalized
            .recognize(&Gesture::from_points(snake()), &RecognizeOptions::default())
            .unwrap();
        assert_eq!(result.label.as_deref(), Some("snake"));
        assert!(result.score < 1.0, "rescaled score should be small, got {}", result.score);
    }

    #[test]
    fn test_rotated_copy_still_matches_plain_formula() {
        // the local shape formula is built from scalar products of
        // segment vectors, which a rigid rotation leaves unchanged
        let mut recognizer = ShapeDistance::new(32, false, true, f64::INFINITY);
        recognizer.add_template("snake", &Gesture::from_points(snake())).unwrap();
        recognizer.add_template("hill", &Gesture::from_points(hill())).unwrap();
        let (sin, cos) = 0.6f64.sin_cos();
        let rotated: Vec<Point> = snake()
            .iter()
            .map(|p| Point::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos))
            .collect();
        let result = recognizer
            .recognize(&Gesture::from_points(rotated), &RecognizeOptions::default())
            .unwrap();
        assert_eq!(result.label.as_deref(), Some("snake"));
    }
}
