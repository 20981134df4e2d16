//! # Error standards
//! 
//! This module provides a standardised error enum and result type for this crate.
//!
//! Out-of-range labels or pixel coordinates inside the solver are programming errors and panic
//! instead of producing one of these variants.

// -----------------------------------------------------------------------------------------------
// TYPES
// -----------------------------------------------------------------------------------------------

/// Standard result type used in the disparity crate.
pub type Result<T> = std::result::Result<T, Error>;

// -----------------------------------------------------------------------------------------------
// ENUMERATIONS
// -----------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Stereo images differ in size: left is {left:?}, right is {right:?}")]
    DimensionMismatch {
        left: (u32, u32),
        right: (u32, u32)
    },

    #[error("Stereo images must have a positive width and height")]
    EmptyImage,

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse parameters: {0}")]
    Config(#[from] serde_json::Error),

    #[cfg(feature = "statistics")]
    #[error("Could not draw statistics plot: {0}")]
    Plot(String)
}
