//! # Cost model
//!
//! Unary (data) and pairwise (smoothness) costs of the stereo MRF. Both tables are built once
//! per run and are read only afterwards.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use image::GrayImage;
use ndarray::{Array2, Array3, ArrayView1};

use crate::disparity::StereoPair;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Cached data and smoothness costs.
#[derive(Clone, Debug)]
pub struct CostModel {
    /// Data cost indexed `[y, x, label]`.
    data: Array3<u32>,

    /// Smoothness cost indexed `[label, label]`.
    smoothness: Array2<u32>
}

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Absolute intensity difference between the left pixel and the right pixel `label` columns to
/// its left.
///
/// Where the shifted position falls off the left edge of the right image the right sample is
/// taken as zero.
pub fn data_cost(left: &GrayImage, right: &GrayImage, x: u32, y: u32, label: usize) -> u32 {
    let left_px = left.get_pixel(x, y)[0] as i32;
    let right_px = if x as usize >= label {
        right.get_pixel(x - label as u32, y)[0] as i32
    }
    else {
        0
    };

    (left_px - right_px).abs() as u32
}

/// Truncated linear penalty `weight * min(|l1 - l2|, cap)`.
pub fn smoothness_cost(weight: u32, cap: u32, l1: usize, l2: usize) -> u32 {
    let diff = if l1 > l2 { l1 - l2 } else { l2 - l1 };
    weight * (diff.min(cap as usize) as u32)
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl CostModel {
    /// Build both cost tables for the given pair.
    pub fn new(pair: &StereoPair, levels: usize, weight: u32, cap: u32) -> Self {
        let width = pair.width() as usize;
        let height = pair.height() as usize;

        let data = Array3::from_shape_fn((height, width, levels), |(y, x, l)| {
            data_cost(pair.left(), pair.right(), x as u32, y as u32, l)
        });

        let smoothness = Array2::from_shape_fn((levels, levels), |(i, j)| {
            smoothness_cost(weight, cap, i, j)
        });

        Self { data, smoothness }
    }

    pub fn width(&self) -> usize {
        self.data.shape()[1]
    }

    pub fn height(&self) -> usize {
        self.data.shape()[0]
    }

    pub fn levels(&self) -> usize {
        self.data.shape()[2]
    }

    /// Data cost of assigning `label` to the pixel at `(x, y)`.
    pub fn data(&self, x: usize, y: usize, label: usize) -> u32 {
        self.data[(y, x, label)]
    }

    /// All data costs of a single pixel.
    pub fn data_at(&self, x: usize, y: usize) -> ArrayView1<'_, u32> {
        self.data.slice(ndarray::s![y, x, ..])
    }

    pub fn smoothness(&self, l1: usize, l2: usize) -> u32 {
        self.smoothness[(l1, l2)]
    }

    pub fn data_table(&self) -> &Array3<u32> {
        &self.data
    }

    pub fn smoothness_table(&self) -> &Array2<u32> {
        &self.smoothness
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
