//! Shared geometric primitives
//!
//! Points, bounding boxes, arc-length resampling, and the normalization
//! steps (rotation, scaling, translation, vectorization) that the
//! recognizer families build their canonical representations from.

pub mod normalize;
pub mod point;
pub mod resample;

pub use point::{centroid, path_length, stroke_path_length, BoundingBox, Point};
pub use resample::{interpolate, resample, resample_strokes};
