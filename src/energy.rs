//! # Energy
//!
//! Total MRF energy of a labelling. Only used to report progress, the solver never reads it back
//! except for the optional energy based stopping rule.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use crate::cost::CostModel;
use crate::disparity::DisparityMap;

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Sum of every pixel's data cost plus the smoothness cost of every horizontal and vertical edge.
///
/// # Panics
///
/// If the map and the cost model disagree on size, or the map holds a label beyond the model's
/// levels.
pub fn energy(costs: &CostModel, map: &DisparityMap) -> u64 {
    assert_eq!(
        (map.width(), map.height()),
        (costs.width(), costs.height()),
        "disparity map does not match the cost model"
    );

    let (width, height) = (map.width(), map.height());
    let mut energy = 0u64;

    for y in 0..height {
        for x in 0..width {
            let label = map.get(x, y);
            energy += costs.data(x, y, label) as u64;

            if x + 1 < width {
                energy += costs.smoothness(label, map.get(x + 1, y)) as u64;
            }
            if y + 1 < height {
                energy += costs.smoothness(label, map.get(x, y + 1)) as u64;
            }
        }
    }

    energy
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disparity::StereoPair;
    use image::GrayImage;

    fn flat_costs(width: u32, height: u32, levels: usize) -> CostModel {
        let l = GrayImage::from_pixel(width, height, image::Luma([100]));
        let r = GrayImage::from_pixel(width, height, image::Luma([100]));
        CostModel::new(&StereoPair::new(l, r).unwrap(), levels, 5, 2)
    }

    #[test]
    fn uniform_zero_labelling_has_zero_energy() {
        let costs = flat_costs(4, 3, 4);
        let map = DisparityMap::new(4, 3, 4);
        assert_eq!(energy(&costs, &map), 0);
    }

    #[test]
    fn counts_data_and_both_edge_directions() {
        let costs = flat_costs(2, 2, 4);
        let mut map = DisparityMap::new(2, 2, 4);

        // x = 1 < 3 so label 3 compares 100 against black
        map.put(1, 1, 3);

        // One horizontal and one vertical edge touch (1, 1), each capped at 5 * 2
        assert_eq!(energy(&costs, &map), 100 + 10 + 10);
    }

    #[test]
    fn single_pixel_has_only_a_data_term() {
        let costs = flat_costs(1, 1, 2);
        let mut map = DisparityMap::new(1, 1, 2);
        map.put(0, 0, 1);
        assert_eq!(energy(&costs, &map), 100);
    }

    #[test]
    #[should_panic]
    fn rejects_mismatched_maps() {
        let costs = flat_costs(2, 2, 2);
        energy(&costs, &DisparityMap::new(3, 2, 2));
    }
}
