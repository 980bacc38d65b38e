//! Single-stroke geometric recognizer
//!
//! Matches one canonical unistroke against every registered template,
//! either through the golden-section rotation search or the closed-form
//! optimal-angle cosine distance.

use tracing::debug;

use crate::gesture::Gesture;
use crate::recognizer::{Recognition, RecognizeOptions, Recognizer};
use crate::Result;

use super::unistroke::{
    distance_at_best_angle, optimal_cosine_distance, Unistroke, ANGLE_PRECISION, ANGLE_RANGE,
};

/// Single-stroke geometric template matcher.
pub struct SingleStroke {
    resample_count: usize,
    use_protractor: bool,
    templates: Vec<Unistroke>,
}

impl SingleStroke {
    /// Create a matcher resampling to `resample_count` points. With
    /// `use_protractor` the closed-form cosine distance replaces the
    /// golden-section search.
    pub fn new(resample_count: usize, use_protractor: bool) -> Self {
        Self {
            resample_count,
            use_protractor,
            templates: Vec::new(),
        }
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    fn distance(&self, candidate: &Unistroke, template: &Unistroke) -> f64 {
        if self.use_protractor {
            optimal_cosine_distance(
                template.vector.as_deref().unwrap_or_default(),
                candidate.vector.as_deref().unwrap_or_default(),
            )
        } else {
            distance_at_best_angle(
                &candidate.points,
                &template.points,
                -ANGLE_RANGE,
                ANGLE_RANGE,
                ANGLE_PRECISION,
            )
        }
    }
}

impl Recognizer for SingleStroke {
    fn add_template(&mut self, name: &str, gesture: &Gesture) -> Result<u32> {
        gesture.require_points(2)?;
        self.templates.push(Unistroke::single(
            name,
            &gesture.combined(),
            self.resample_count,
            self.use_protractor,
        ));
        let count = self.templates.iter().filter(|t| t.name == name).count() as u32;
        debug!(class = name, count, "registered unistroke template");
        Ok(count)
    }

    fn recognize(&self, gesture: &Gesture, _options: &RecognizeOptions) -> Result<Recognition> {
        gesture.require_points(2)?;
        let candidate = Unistroke::single(
            "",
            &gesture.combined(),
            self.resample_count,
            self.use_protractor,
        );
        let mut best: Option<(&Unistroke, f64)> = None;
        for template in &self.templates {
            let d = self.distance(&candidate, template);
            if best.map_or(true, |(_, b)| d < b) {
                best = Some((template, d));
            }
        }
        Ok(match best {
            Some((template, distance)) => {
                debug!(class = %template.name, distance, "unistroke match");
                Recognition::matched(&template.name, distance)
            }
            None => Recognition::no_match(),
        })
    }

    fn clear_templates(&mut self) {
        self.templates.clear();
    }
}
