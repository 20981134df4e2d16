//! # Engine
//!
//! Owns every table of a single run: the cost model, the message store and the latest disparity
//! estimate. Nothing is shared between runs.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use crate::belief;
use crate::cost::CostModel;
use crate::disparity::{DisparityMap, StereoPair};
use crate::energy;
use crate::error::*;
use crate::lbp::Params;
use crate::messages::{self, MessageStore, Sweep};

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// State of one belief propagation run.
#[derive(Clone, Debug)]
pub struct Engine {
    costs: CostModel,
    messages: MessageStore,
    disparity: DisparityMap,
    iterations: usize
}

/// Summary of a completed iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Iteration {
    /// One based index of the iteration.
    pub index: usize,
    pub energy: u64
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl Engine {
    /// Validate the parameters and build the cost tables for the given pair.
    pub fn new(pair: &StereoPair, params: &Params) -> Result<Self> {
        params.validate()?;

        let costs = CostModel::new(pair, params.levels, params.smooth_weight, params.smooth_cap);
        let (width, height) = (costs.width(), costs.height());

        Ok(Self {
            costs,
            messages: MessageStore::new(width, height, params.levels),
            disparity: DisparityMap::new(width, height, params.levels),
            iterations: 0
        })
    }

    /// Run the four sweeps of one iteration, in order.
    pub fn iterate(&mut self) {
        for &dir in Sweep::ORDER.iter() {
            messages::sweep(&self.costs, &mut self.messages, dir);
        }
    }

    /// Label every pixel from the current messages.
    pub fn estimate(&self) -> DisparityMap {
        belief::estimate(&self.costs, &self.messages)
    }

    /// Energy of the given labelling under this run's costs.
    pub fn energy(&self, map: &DisparityMap) -> u64 {
        energy::energy(&self.costs, map)
    }

    /// Iterate, replace the current disparity map and report its energy.
    pub fn step(&mut self) -> Iteration {
        self.iterate();
        self.disparity = self.estimate();
        self.iterations += 1;

        Iteration {
            index: self.iterations,
            energy: self.energy(&self.disparity)
        }
    }

    pub fn costs(&self) -> &CostModel {
        &self.costs
    }

    pub fn messages(&self) -> &MessageStore {
        &self.messages
    }

    /// The map produced by the last `step()`, all zeros before the first one.
    pub fn disparity(&self) -> &DisparityMap {
        &self.disparity
    }

    /// Consume the engine, keeping only the latest map.
    pub fn into_disparity(self) -> DisparityMap {
        self.disparity
    }

    pub fn width(&self) -> usize {
        self.costs.width()
    }

    pub fn height(&self) -> usize {
        self.costs.height()
    }

    pub fn levels(&self) -> usize {
        self.costs.levels()
    }

    /// Number of completed steps.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;

    fn params(levels: usize) -> Params {
        Params {
            levels,
            iterations: 1,
            smooth_weight: 1,
            smooth_cap: 1,
            ..Params::default()
        }
    }

    #[test]
    fn two_pixel_row_settles_on_zero() {
        let pair = StereoPair::new(
            GrayImage::from_pixel(2, 1, image::Luma([100])),
            GrayImage::from_pixel(2, 1, image::Luma([100]))
        ).unwrap();
        let mut engine = Engine::new(&pair, &params(2)).unwrap();

        let costs = engine.costs();
        assert_eq!(costs.data(0, 0, 0), 0);
        assert_eq!(costs.data(0, 0, 1), 100);
        assert_eq!(costs.data(1, 0, 0), 0);
        assert_eq!(costs.data(1, 0, 1), 0);

        let it = engine.step();

        assert_eq!(it, Iteration { index: 1, energy: 0 });
        assert_eq!(engine.disparity().get(0, 0), 0);
        assert_eq!(engine.disparity().get(1, 0), 0);
    }

    #[test]
    fn single_pixel_uses_data_cost_alone() {
        let pair = StereoPair::new(
            GrayImage::from_pixel(1, 1, image::Luma([30])),
            GrayImage::from_pixel(1, 1, image::Luma([200]))
        ).unwrap();
        let mut engine = Engine::new(&pair, &params(3)).unwrap();

        for _ in 0..4 {
            engine.step();
            assert!(engine.messages().is_zero());
        }

        // Label 0 costs 170, labels 1 and 2 fall off the edge and cost 30
        assert_eq!(engine.disparity().get(0, 0), 1);
        assert_eq!(engine.iterations(), 4);
    }

    #[test]
    fn rejects_invalid_params() {
        let pair = StereoPair::new(GrayImage::new(2, 2), GrayImage::new(2, 2)).unwrap();
        assert!(matches!(Engine::new(&pair, &params(0)), Err(Error::InvalidParams(_))));
    }
}
