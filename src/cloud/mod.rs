//! Point-cloud matchers
//!
//! Treats a gesture as an unordered, stroke-tagged point cloud and scores
//! candidates by a greedy nearest-neighbor correspondence with positional
//! weighting. The lookup-table variant quantizes coordinates to an integer
//! grid, precomputes nearest-point indices per coarse cell, and prunes
//! whole starting offsets through cumulative lower bounds.

pub mod greedy;
pub mod lookup;
pub mod point_cloud;

pub use point_cloud::PointCloud;
pub use greedy::GreedyCloud;
pub use lookup::{IndexedCloud, LookupCloud};
