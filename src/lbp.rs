//! # Loopy belief propagation disparity computation
//!
//! Min-sum loopy belief propagation over a 4-connected pixel grid, with truncated linear
//! smoothness and absolute intensity difference data costs. Messages are updated with
//! sequential directional sweeps rather than synchronously, see `messages`.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::disparity::{DisparityAlgorithm, DisparityMap, StereoPair};
use crate::engine::{Engine, Iteration};
use crate::error::*;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

pub struct LoopyBp {
    params: Params,
    energies: Vec<u64>
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Params {
    /// Number of disparity labels, labels run over `0..levels`. At most 256, so every label
    /// fits an 8 bit output image.
    pub levels: usize,

    /// Maximum number of iterations, each made of four sweeps.
    pub iterations: usize,

    pub smooth_weight: u32,
    pub smooth_cap: u32,

    #[serde(default)]
    pub stopping: Stopping
}

/// Result of a full run.
#[derive(Clone, Debug)]
pub struct Outcome {
    pub disparity: DisparityMap,

    /// Energy after each completed iteration.
    pub energies: Vec<u64>
}

// -----------------------------------------------------------------------------------------------
// ENUMERATIONS
// -----------------------------------------------------------------------------------------------

/// When to end a run.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stopping {
    /// Always run the configured number of iterations.
    Fixed,

    /// Stop once the energy moves by no more than `min_delta` between two iterations, or after
    /// the configured number of iterations, whichever comes first.
    EnergyDelta {
        min_delta: u64
    }
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl Default for Stopping {
    fn default() -> Self {
        Stopping::Fixed
    }
}

impl Stopping {
    /// Decide whether to stop after an iteration reached `current`, given the previous energy.
    pub fn should_stop(&self, previous: Option<u64>, current: u64) -> bool {
        match (*self, previous) {
            (Stopping::Fixed, _) => false,
            (Stopping::EnergyDelta { .. }, None) => false,
            (Stopping::EnergyDelta { min_delta }, Some(prev)) => {
                let delta = if prev > current { prev - current } else { current - prev };
                delta <= min_delta
            }
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Params {
            levels: 16,
            iterations: 50,
            smooth_weight: 5,
            smooth_cap: 2,
            stopping: Stopping::Fixed
        }
    }
}

impl Params {
    /// Check the parameters describe a run the solver can carry out.
    pub fn validate(&self) -> Result<()> {
        if self.levels == 0 {
            return Err(Error::InvalidParams("levels must be at least 1".into()));
        }

        // Labels are written out as 8 bit intensities
        if self.levels > 256 {
            return Err(Error::InvalidParams(format!(
                "levels must be at most 256, got {}", self.levels
            )));
        }

        if self.iterations == 0 {
            return Err(Error::InvalidParams("iterations must be at least 1".into()));
        }

        // A belief is a data cost plus four normalised messages, each bounded by weight * cap
        let bound = self.smooth_weight
            .checked_mul(self.smooth_cap)
            .and_then(|m| m.checked_mul(4))
            .and_then(|m| m.checked_add(u8::MAX as u32));

        if bound.is_none() {
            return Err(Error::InvalidParams(format!(
                "smooth_weight {} and smooth_cap {} overflow the cost range",
                self.smooth_weight, self.smooth_cap
            )));
        }

        Ok(())
    }

    /// Read parameters from JSON.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let params: Params = serde_json::from_reader(reader)?;
        params.validate()?;
        Ok(params)
    }

    /// Read parameters from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }
}

impl LoopyBp {
    /// Create a new instance of the algorithm with the given parameters.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            energies: Vec::new()
        }
    }

    /// Energies recorded by the last call to `compute()`.
    pub fn energies(&self) -> &[u64] {
        &self.energies
    }

    /// Run the solver, calling `observer` with the iteration summary and the current disparity
    /// map after every iteration.
    pub fn run<F>(&self, pair: &StereoPair, mut observer: F) -> Result<Outcome>
    where
        F: FnMut(&Iteration, &DisparityMap)
    {
        let mut engine = Engine::new(pair, &self.params)?;

        info!(
            "Running belief propagation on {}x{} image with {} levels",
            engine.width(), engine.height(), engine.levels()
        );

        let mut energies: Vec<u64> = Vec::with_capacity(self.params.iterations);

        for _ in 0..self.params.iterations {
            let it = engine.step();
            debug!("Iteration {}: energy {}", it.index, it.energy);

            observer(&it, engine.disparity());

            let stop = self.params.stopping.should_stop(energies.last().copied(), it.energy);
            energies.push(it.energy);

            if stop {
                info!("Energy settled after {} iterations", it.index);
                break;
            }
        }

        info!(
            "Finished after {} iterations, final energy {}",
            energies.len(),
            energies.last().copied().unwrap_or(0)
        );

        Ok(Outcome {
            disparity: engine.into_disparity(),
            energies
        })
    }
}

impl DisparityAlgorithm for LoopyBp {
    /// Compute the disparity map for the given pair.
    fn compute(&mut self, pair: &StereoPair) -> Result<DisparityMap> {
        let outcome = self.run(pair, |_, _| {})?;
        self.energies = outcome.energies;
        Ok(outcome.disparity)
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
