//! # Disparity Computation
//!
//! This crate provides disparity map computation for stereo computer vision, using min-sum loopy
//! belief propagation over the pixel grid.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod belief;
pub mod cost;
mod disparity;
pub mod energy;
pub mod engine;
mod error;
pub mod lbp;
pub mod messages;
pub mod prefilter;

#[cfg(feature = "statistics")]
pub mod statistics;

// -----------------------------------------------------------------------------------------------
// EXPORTS
// -----------------------------------------------------------------------------------------------

pub use crate::error::{Error, Result};

pub mod prelude {
    pub use crate::disparity::{DisparityAlgorithm, DisparityMap, StereoPair};
    pub use crate::engine::{Engine, Iteration};
    pub use crate::error::{Error, Result};
    pub use crate::lbp::{LoopyBp, Outcome, Params, Stopping};
}
