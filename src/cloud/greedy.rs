//! Greedy point-cloud recognizer
//!
//! Matches two equal-size clouds by a greedy nearest-unmatched-point
//! assignment, run from a subsampled set of starting offsets and in both
//! directions. Matches made early in a walk weigh more than matches made
//! late, so a bad start is penalized where it matters.

use tracing::debug;

use crate::geometry::point::Point;
use crate::gesture::Gesture;
use crate::recognizer::{Recognition, RecognizeOptions, Recognizer};
use crate::Result;

use super::point_cloud::PointCloud;

/// Minimum weighted assignment cost starting the walk at `start`.
pub(crate) fn cloud_distance(pts1: &[Point], pts2: &[Point], start: usize) -> f64 {
    let n = pts1.len();
    let mut matched = vec![false; n];
    let mut sum = 0.0;
    let mut i = start;
    loop {
        let mut index = usize::MAX;
        let mut min = f64::INFINITY;
        for (j, used) in matched.iter().enumerate() {
            if !used {
                let d = pts1[i].distance_to(&pts2[j]);
                if d < min {
                    min = d;
                    index = j;
                }
            }
        }
        matched[index] = true;
        let weight = 1.0 - ((i + n - start) % n) as f64 / n as f64;
        sum += weight * min;
        i = (i + 1) % n;
        if i == start {
            break;
        }
    }
    sum
}

/// Best weighted assignment over subsampled starting offsets, walking both
/// candidate-to-template and template-to-candidate.
pub(crate) fn greedy_cloud_match(points: &[Point], template: &PointCloud) -> f64 {
    let n = points.len();
    let step = (n as f64).powf(0.5).floor() as usize;
    let mut min = f64::INFINITY;
    let mut i = 0;
    while i < n {
        let d1 = cloud_distance(points, &template.points, i);
        let d2 = cloud_distance(&template.points, points, i);
        min = min.min(d1).min(d2);
        i += step;
    }
    min
}

/// Greedy point-cloud matcher.
pub struct GreedyCloud {
    resample_count: usize,
    templates: Vec<PointCloud>,
}

impl GreedyCloud {
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

impl Recognizer for GreedyCloud {
    fn add_template(&mut self, name: &str, gesture: &Gesture) -> Result<u32> {
        gesture.require_points(2)?;
        self.templates
            .push(PointCloud::new(name, &gesture.combined(), self.resample_count));
        let count = self.templates.iter().filter(|t| t.name == name).count() as u32;
        debug!(class = name, count, "registered point-cloud template");
        Ok(count)
    }

    fn recognize(&self, gesture: &Gesture, _options: &RecognizeOptions) -> Result<Recognition> {
        gesture.require_points(2)?;
        let candidate = PointCloud::new("", &gesture.combined(), self.resample_count);
        let mut best: Option<(&PointCloud, f64)> = None;
        for template in &self.templates {
            let d = greedy_cloud_match(&candidate.points, template);
            if best.map_or(true, |(_, b)| d < b) {
                best = Some((template, d));
            }
        }
        Ok(match best {
            Some((template, distance)) => {
                debug!(class = %template.name, distance, "cloud match");
                Recognition::matched(&template.name, distance)
            }
            None => Recognition::no_match(),
        })
    }

    fn clear_templates(&mut self) {
        self.templates.clear();
    }
}
