//! # strokekit
//!
//! A suite of stroke-gesture recognizers: algorithms that classify a freehand
//! input path (one or more strokes of 2D points) against previously
//! registered example gestures, returning the best-matching class or no
//! match at all.
//!
//! ## Overview
//!
//! Every recognizer shares one lifecycle — register templates, optionally
//! train, recognize a candidate — but they differ in representation and
//! matching algorithm:
//!
//! - [`template`]: geometric template matching with a golden-section
//!   rotation search or a closed-form optimal-angle cosine distance, plus a
//!   multistroke unifier that enumerates stroke orders and directions
//!   ($1, $N, Protractor)
//! - [`cloud`]: unordered point-cloud matching via greedy nearest-neighbor
//!   correspondence, with an integer lookup-table accelerated variant that
//!   prunes via precomputed lower bounds ($P, $Q)
//! - [`shape`]: local-shape distance under an isoparametric correspondence
//!   with early-exit accumulation (!FTL)
//! - [`tangent`]: unit tangent-vector dot-product matching with no rotation
//!   search (Penny Pincher)
//! - [`linear`]: a statistical linear classifier trained from per-class
//!   feature covariance (Rubine)
//! - [`geometry`]: the resampling and normalization primitives all families
//!   share
//!
//! ## Quick Start
//!
//! ```
//! use strokekit::{Algorithm, AnyRecognizer, Gesture, Point, Recognizer};
//! use strokekit::config::RecognizerConfig;
//!
//! let config = RecognizerConfig::default();
//! let mut recognizer = AnyRecognizer::new(Algorithm::SingleStroke, &config);
//!
//! let circle: Vec<Point> = (0..32)
//!     .map(|i| {
//!         let a = (i as f64 / 32.0) * std::f64::consts::TAU;
//!         Point::new(50.0 + 40.0 * a.cos(), 50.0 + 40.0 * a.sin())
//!     })
//!     .collect();
//! recognizer.add_template("circle", &Gesture::from_points(circle.clone())).unwrap();
//!
//! let result = recognizer
//!     .recognize(&Gesture::from_points(circle), &Default::default())
//!     .unwrap();
//! assert_eq!(result.label.as_deref(), Some("circle"));
//! ```
//!
//! ## Ownership & concurrency
//!
//! Recognizers are synchronous and own their templates outright; raw input
//! points are read once at registration and copied into canonical form.
//! Template registration mutates recognizer state and must not overlap with
//! matching on the same instance; instances are not shared across callers.

pub mod cloud;
pub mod config;
pub mod geometry;
pub mod gesture;
pub mod linear;
pub mod recognizer;
pub mod shape;
pub mod tangent;
pub mod template;

// Re-export commonly used types
pub use geometry::point::{BoundingBox, Point};
pub use gesture::Gesture;
pub use recognizer::{Algorithm, AnyRecognizer, Recognition, RecognizeOptions, Recognizer};

/// Result type alias for strokekit
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for strokekit
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A submitted path had too few points to form a gesture.
    #[error("degenerate path: got {got} point(s), at least {min} required")]
    DegeneratePath { got: usize, min: usize },

    /// The pooled covariance matrix could not be inverted during training.
    #[error("covariance matrix is singular; training requires more varied examples")]
    SingularCovariance,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
