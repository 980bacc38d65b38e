//! The shared recognizer contract
//!
//! Every family exposes the same logical operations: register templates,
//! optionally train, recognize a candidate, clear. `AnyRecognizer` closes
//! the set of algorithms into one dispatchable type so callers can select a
//! family by value instead of by type.

use serde::{Deserialize, Serialize};

use crate::cloud::{GreedyCloud, LookupCloud};
use crate::config::RecognizerConfig;
use crate::gesture::Gesture;
use crate::linear::LinearClassifier;
use crate::shape::ShapeDistance;
use crate::tangent::TangentVector;
use crate::template::{MultiStroke, SingleStroke};
use crate::Result;

/// Recognition outcome: the winning class (or none) and the family's
/// comparison score.
///
/// The score is a distance for the minimizing matchers, a dot-product
/// similarity for the tangent matcher, and a discriminant score for the
/// linear classifier; it is only comparable within one family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recognition {
    /// Winning class name, or `None` when no template qualified.
    pub label: Option<String>,
    pub score: f64,
}

impl Recognition {
    pub fn matched(label: &str, score: f64) -> Self {
        Self { label: Some(label.to_string()), score }
    }

    pub fn no_match() -> Self {
        Self { label: None, score: 0.0 }
    }

    pub fn is_match(&self) -> bool {
        self.label.is_some()
    }
}

/// Options applied at recognition time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecognizeOptions {
    /// Restrict matching to templates drawn with the same number of
    /// strokes as the candidate. Only the multistroke geometric matcher
    /// distinguishes stroke counts; other families ignore this.
    pub require_matching_stroke_count: bool,
}

/// Operations every recognizer exposes to its caller.
pub trait Recognizer {
    /// Register a template (or training example) under `name`. Returns how
    /// many examples are now registered for that class.
    ///
    /// Fails only when the gesture is degenerate (fewer than two points);
    /// adding an example may invalidate a previously trained model.
    fn add_template(&mut self, name: &str, gesture: &Gesture) -> Result<u32>;

    /// Train the recognizer. A no-op for the matcher-style families;
    /// required before the first `recognize` for the statistical
    /// classifier. Idempotent, and skipped internally when the model is
    /// already current.
    fn train(&mut self) -> Result<()> {
        Ok(())
    }

    /// Classify a candidate gesture against the registered templates.
    fn recognize(&self, gesture: &Gesture, options: &RecognizeOptions) -> Result<Recognition>;

    /// Remove every registered template and any trained model.
    fn clear_templates(&mut self);
}

/// The closed set of recognition algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    /// $1: golden-section rotation search over canonical unistrokes
    SingleStroke,
    /// Protractor: closed-form optimal-angle cosine distance
    SingleStrokeProtractor,
    /// $N: multistroke unification plus the golden-section search
    MultiStroke,
    /// $N-Protractor: multistroke unification plus the closed form
    MultiStrokeProtractor,
    /// $P: greedy point-cloud correspondence
    GreedyCloud,
    /// $Q: lookup-table accelerated point-cloud correspondence
    LookupCloud,
    /// !FTL: local shape distance
    ShapeDistance,
    /// !NFTL: orientation-insensitive local shape distance
    NormalizedShapeDistance,
    /// Penny Pincher: unit tangent-vector dot products
    TangentVector,
    /// Rubine: trained linear discriminant over 13 path features
    LinearClassifier,
}

/// A recognizer of any supported algorithm, selected at construction.
pub enum AnyRecognizer {
    SingleStroke(SingleStroke),
    MultiStroke(MultiStroke),
    GreedyCloud(GreedyCloud),
    LookupCloud(LookupCloud),
    ShapeDistance(ShapeDistance),
    TangentVector(TangentVector),
    LinearClassifier(LinearClassifier),
}

impl AnyRecognizer {
    /// Construct a recognizer for `algorithm` from the shared configuration.
    pub fn new(algorithm: Algorithm, config: &RecognizerConfig) -> Self {
        let n = config.resample.count;
        match algorithm {
            Algorithm::SingleStroke => Self::SingleStroke(SingleStroke::new(n, false)),
            Algorithm::SingleStrokeProtractor => Self::SingleStroke(SingleStroke::new(n, true)),
            Algorithm::MultiStroke => Self::MultiStroke(MultiStroke::new(
                n,
                config.template.bounded_rotation_invariance,
                false,
            )),
            Algorithm::MultiStrokeProtractor => Self::MultiStroke(MultiStroke::new(
                n,
                config.template.bounded_rotation_invariance,
                true,
            )),
            Algorithm::GreedyCloud => Self::GreedyCloud(GreedyCloud::new(n)),
            Algorithm::LookupCloud => Self::LookupCloud(LookupCloud::new(n)),
            Algorithm::ShapeDistance => Self::ShapeDistance(ShapeDistance::new(
                n,
                false,
                config.shape.orientation_sensitive,
                config.shape.acceptance_threshold,
            )),
            Algorithm::NormalizedShapeDistance => Self::ShapeDistance(ShapeDistance::new(
                n,
                true,
                config.shape.orientation_sensitive,
                config.shape.acceptance_threshold,
            )),
            Algorithm::TangentVector => Self::TangentVector(TangentVector::new(n)),
            Algorithm::LinearClassifier => Self::LinearClassifier(LinearClassifier::new()),
        }
    }
}

impl Recognizer for AnyRecognizer {
    fn add_template(&mut self, name: &str, gesture: &Gesture) -> Result<u32> {
        match self {
            Self::SingleStroke(r) => r.add_template(name, gesture),
            Self::MultiStroke(r) => r.add_template(name, gesture),
            Self::GreedyCloud(r) => r.add_template(name, gesture),
            Self::LookupCloud(r) => r.add_template(name, gesture),
            Self::ShapeDistance(r) => r.add_template(name, gesture),
            Self::TangentVector(r) => r.add_template(name, gesture),
            Self::LinearClassifier(r) => r.add_template(name, gesture),
        }
    }

    fn train(&mut self) -> Result<()> {
        match self {
            Self::SingleStroke(r) => r.train(),
            Self::MultiStroke(r) => r.train(),
            Self::GreedyCloud(r) => r.train(),
            Self::LookupCloud(r) => r.train(),
            Self::ShapeDistance(r) => r.train(),
            Self::TangentVector(r) => r.train(),
            Self::LinearClassifier(r) => r.train(),
        }
    }

    fn recognize(&self, gesture: &Gesture, options: &RecognizeOptions) -> Result<Recognition> {
        match self {
            Self::SingleStroke(r) => r.recognize(gesture, options),
            Self::MultiStroke(r) => r.recognize(gesture, options),
            Self::GreedyCloud(r) => r.recognize(gesture, options),
            Self::LookupCloud(r) => r.recognize(gesture, options),
            Self::ShapeDistance(r) => r.recognize(gesture, options),
            Self::TangentVector(r) => r.recognize(gesture, options),
            Self::LinearClassifier(r) => r.recognize(gesture, options),
        }
    }

    fn clear_templates(&mut self) {
        match self {
            Self::SingleStroke(r) => r.clear_templates(),
            Self::MultiStroke(r) => r.clear_templates(),
            Self::GreedyCloud(r) => r.clear_templates(),
            Self::LookupCloud(r) => r.clear_templates(),
            Self::ShapeDistance(r) => r.clear_templates(),
            Self::TangentVector(r) => r.clear_templates(),
            Self::LinearClassifier(r) => r.clear_templates(),
        }
    }
}

impl Algorithm {
    /// All supported algorithms, in a stable order.
    pub const ALL: [Algorithm; 10] = [
        Algorithm::SingleStroke,
        Algorithm::SingleStrokeProtractor,
        Algorithm::MultiStroke,
        Algorithm::MultiStrokeProtractor,
        Algorithm::GreedyCloud,
        Algorithm::LookupCloud,
        Algorithm::ShapeDistance,
        Algorithm::NormalizedShapeDistance,
        Algorithm::TangentVector,
        Algorithm::LinearClassifier,
    ];

    /// Whether the algorithm needs an explicit training step before
    /// recognition.
    pub fn requires_training(&self) -> bool {
        matches!(self, Algorithm::LinearClassifier)
    }
}
