//! Statistical linear classifier
//!
//! Extracts a fixed 13-feature vector per training example, pools per-class
//! covariance into one common matrix, inverts it, and derives a linear
//! discriminant weight vector and bias per class. Recognition scores the
//! candidate's features against every class and takes the argmax.

pub mod classifier;
pub mod features;
pub mod matrix;

pub use classifier::LinearClassifier;
pub use features::{feature_vector, FEATURE_COUNT};
pub use matrix::Matrix;
