//! Trained linear discriminant classifier
//!
//! Examples accumulate per class until `train` derives one weight vector
//! and bias per class from the pooled covariance of their feature vectors.
//! Adding an example invalidates the model; recognition against an
//! untrained (or invalidated) model reports no match rather than failing.

use tracing::debug;

use crate::geometry::point::Point;
use crate::gesture::Gesture;
use crate::recognizer::{Recognition, RecognizeOptions, Recognizer};
use crate::{Error, Result};

use super::features::{feature_vector, FeatureVector, FEATURE_COUNT};
use super::matrix::Matrix;

struct GestureClass {
    name: String,
    examples: Vec<Vec<Point>>,
}

struct Discriminant {
    weights: FeatureVector,
    bias: f64,
}

/// Statistical linear classifier over path features.
pub struct LinearClassifier {
    classes: Vec<GestureClass>,
    /// One discriminant per class, parallel to `classes`; present only
    /// after a successful training pass with no examples added since.
    model: Option<Vec<Discriminant>>,
}

impl LinearClassifier {
    pub fn new() -> Self {
        Self {
            classes: Vec::new(),
            model: None,
        }
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn example_count(&self) -> usize {
        self.classes.iter().map(|c| c.examples.len()).sum()
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Training needs at least one class and two examples in every class.
    fn is_trainable(&self) -> bool {
        !self.classes.is_empty() && self.classes.iter().all(|c| c.examples.len() >= 2)
    }

    fn class_means_and_scatters(&self) -> (Vec<FeatureVector>, Vec<Matrix>) {
        let mut means = Vec::with_capacity(self.classes.len());
        let mut scatters = Vec::with_capacity(self.classes.len());
        for class in &self.classes {
            let vectors: Vec<FeatureVector> =
                class.examples.iter().map(|e| feature_vector(e)).collect();

            let mut mean = [0.0; FEATURE_COUNT];
            for v in &vectors {
                for (m, x) in mean.iter_mut().zip(v) {
                    *m += x;
                }
            }
            for m in &mut mean {
                *m /= vectors.len() as f64;
            }

            let mut scatter = Matrix::zeros(FEATURE_COUNT, FEATURE_COUNT);
            for i in 0..FEATURE_COUNT {
                for j in 0..FEATURE_COUNT {
                    let sum: f64 = vectors
                        .iter()
                        .map(|v| (v[i] - mean[i]) * (v[j] - mean[j]))
                        .sum();
                    scatter.set(i, j, sum);
                }
            }
            means.push(mean);
            scatters.push(scatter);
        }
        (means, scatters)
    }

    /// Pool per-class scatter into the common covariance matrix.
    fn common_covariance(&self, scatters: &[Matrix]) -> Matrix {
        let total: usize = self.classes.iter().map(|c| c.examples.len()).sum();
        let denominator = total as f64 - self.classes.len() as f64;
        let mut common = Matrix::zeros(FEATURE_COUNT, FEATURE_COUNT);
        for i in 0..FEATURE_COUNT {
            for j in 0..FEATURE_COUNT {
                let mut numerator = 0.0;
                for (class, scatter) in self.classes.iter().zip(scatters) {
                    numerator += scatter.get(i, j) / (class.examples.len() as f64 - 1.0);
                }
                common.set(
                    i,
                    j,
                    if denominator == 0.0 { numerator } else { numerator / denominator },
                );
            }
        }
        common
    }
}

impl Default for LinearClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for LinearClassifier {
    fn add_template(&mut self, name: &str, gesture: &Gesture) -> Result<u32> {
        gesture.require_points(2)?;
        let points = gesture.combined();
        let count = match self.classes.iter_mut().find(|c| c.name == name) {
            Some(class) => {
                class.examples.push(points);
                class.examples.len()
            }
            None => {
                self.classes.push(GestureClass {
                    name: name.to_string(),
                    examples: vec![points],
                });
                1
            }
        };
        // any new example invalidates the trained model
        self.model = None;
        debug!(class = name, count, "registered classifier example");
        Ok(count as u32)
    }

    fn train(&mut self) -> Result<()> {
        if self.model.is_some() || !self.is_trainable() {
            return Ok(());
        }
        let (means, scatters) = self.class_means_and_scatters();
        let covariance = self.common_covariance(&scatters);
        let inverse = covariance.inverse().ok_or(Error::SingularCovariance)?;

        let mut model = Vec::with_capacity(self.classes.len());
        for mean in &means {
            let mut weights = [0.0; FEATURE_COUNT];
            for (j, w) in weights.iter_mut().enumerate() {
                for (i, m) in mean.iter().enumerate() {
                    *w += inverse.get(i, j) * m;
                }
            }
            let bias = -0.5
                * weights
                    .iter()
                    .zip(mean)
                    .map(|(w, m)| w * m)
                    .sum::<f64>();
            model.push(Discriminant { weights, bias });
        }
        debug!(classes = self.classes.len(), examples = self.example_count(), "classifier trained");
        self.model = Some(model);
        Ok(())
    }

    fn recognize(&self, gesture: &Gesture, _options: &RecognizeOptions) -> Result<Recognition> {
        gesture.require_points(2)?;
        let features = feature_vector(&gesture.combined());
        let Some(model) = &self.model else {
            return Ok(Recognition::no_match());
        };
        let mut best: Option<(&str, f64)> = None;
        for (class, discriminant) in self.classes.iter().zip(model) {
            let score = discriminant.bias
                + discriminant
                    .weights
                    .iter()
                    .zip(&features)
                    .map(|(w, f)| w * f)
                    .sum::<f64>();
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((&class.name, score));
            }
        }
        Ok(match best {
            Some((name, score)) => {
                debug!(class = name, score, "classifier match");
                Recognition::matched(name, score)
            }
            None => Recognition::no_match(),
        })
    }

    fn clear_templates(&mut self) {
        self.classes.clear();
        self.model = None;
    }
}
