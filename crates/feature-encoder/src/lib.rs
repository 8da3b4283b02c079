//! Feature Encoder
//!
//! Converts validated raw inputs into the ordered numeric vector the price
//! model was trained on.

mod display;
mod encoder;
mod vector;

pub use display::DisplayRow;
pub use encoder::FeatureEncoder;
pub use vector::EncodedVector;
