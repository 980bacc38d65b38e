//! Geometric template matchers
//!
//! Compares canonical resampled point sequences, either by searching the
//! rotation space with a golden-section search or through the closed-form
//! optimal-angle cosine distance. The multistroke matcher additionally
//! unifies multi-stroke gestures by enumerating every stroke order and
//! direction.

pub mod multi;
pub mod single;
pub mod unistroke;

pub use multi::{MultiStroke, MultiStrokeTemplate};
pub use single::SingleStroke;
pub use unistroke::Unistroke;
