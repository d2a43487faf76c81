//! Color reduction of images and regions

/// Mean-color signatures and signature distance
pub mod signature;

pub use signature::ColorSignature;
