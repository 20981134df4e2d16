//! # Beliefs
//!
//! Combine a pixel's data cost with its four incoming messages and pick the cheapest label.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use crate::cost::CostModel;
use crate::disparity::DisparityMap;
use crate::messages::MessageStore;

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Approximate min-marginal cost of giving `label` to the pixel at `(x, y)`.
pub fn belief(costs: &CostModel, messages: &MessageStore, x: usize, y: usize, label: usize) -> u32 {
    costs.data(x, y, label)
        + messages.from_above[(y, x, label)]
        + messages.from_below[(y, x, label)]
        + messages.from_left[(y, x, label)]
        + messages.from_right[(y, x, label)]
}

/// The label with the lowest belief at `(x, y)`, the lowest index winning ties.
pub fn best_label(costs: &CostModel, messages: &MessageStore, x: usize, y: usize) -> usize {
    let mut best = 0;
    let mut min = u32::MAX;

    for label in 0..costs.levels() {
        let cost = belief(costs, messages, x, y, label);
        if cost < min {
            best = label;
            min = cost;
        }
    }

    best
}

/// Build a full disparity map from the current messages.
pub fn estimate(costs: &CostModel, messages: &MessageStore) -> DisparityMap {
    let mut map = DisparityMap::new(costs.width(), costs.height(), costs.levels());

    for y in 0..costs.height() {
        for x in 0..costs.width() {
            map.put(x, y, best_label(costs, messages, x, y));
        }
    }

    map
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
