//! # General disparity objects
//!
//! This module provides generic disparity traits and structures for use by different algorithms.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::path::Path;

use image::GrayImage;
use ndarray::Array2;

use crate::error::*;
use crate::prefilter;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// A rectified pair of single channel intensity images of identical size.
#[derive(Clone, Debug)]
pub struct StereoPair {
    left: GrayImage,
    right: GrayImage
}

/// A discrete disparity map, holding one label in `0..levels` per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisparityMap {
    labels: Array2<usize>,
    levels: usize
}

// -----------------------------------------------------------------------------------------------
// TRAITS
// -----------------------------------------------------------------------------------------------

pub trait DisparityAlgorithm {
    /// Compute the disparity map of the given stereo pair.
    fn compute(&mut self, pair: &StereoPair) -> Result<DisparityMap>;
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl StereoPair {
    /// Build a pair from two decoded images.
    ///
    /// Both images must be non-empty and of the same size.
    pub fn new(left: GrayImage, right: GrayImage) -> Result<Self> {
        if left.dimensions() != right.dimensions() {
            return Err(Error::DimensionMismatch {
                left: left.dimensions(),
                right: right.dimensions()
            });
        }

        if left.width() == 0 || left.height() == 0 {
            return Err(Error::EmptyImage);
        }

        Ok(Self { left, right })
    }

    /// Load a pair from disk, converting both images to 8 bit grayscale.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(left: P, right: Q) -> Result<Self> {
        let left = image::open(left)?.to_luma8();
        let right = image::open(right)?.to_luma8();

        Self::new(left, right)
    }

    /// Return a copy of this pair with both images smoothed by a gaussian of the given sigma.
    pub fn prefiltered(&self, sigma: f32) -> Self {
        Self {
            left: prefilter::gaussian(&self.left, sigma),
            right: prefilter::gaussian(&self.right, sigma)
        }
    }

    pub fn left(&self) -> &GrayImage {
        &self.left
    }

    pub fn right(&self) -> &GrayImage {
        &self.right
    }

    pub fn width(&self) -> u32 {
        self.left.width()
    }

    pub fn height(&self) -> u32 {
        self.left.height()
    }
}

impl DisparityMap {
    /// Create a new map of the given size with every label set to zero.
    pub fn new(width: usize, height: usize, levels: usize) -> Self {
        assert!(levels >= 1, "a disparity map needs at least one level");

        DisparityMap {
            labels: Array2::zeros((height, width)),
            levels
        }
    }

    pub fn width(&self) -> usize {
        self.labels.ncols()
    }

    pub fn height(&self) -> usize {
        self.labels.nrows()
    }

    /// Number of disparity levels the labels are drawn from.
    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn get(&self, x: usize, y: usize) -> usize {
        self.labels[(y, x)]
    }

    /// Set the label at the given pixel.
    ///
    /// # Panics
    ///
    /// If the label is not below `levels` or the pixel lies outside the map.
    pub fn put(&mut self, x: usize, y: usize, label: usize) {
        assert!(
            label < self.levels,
            "label {} out of range for {} levels", label, self.levels
        );
        self.labels[(y, x)] = label;
    }

    /// The raw label array, indexed `[y, x]`.
    pub fn labels(&self) -> &Array2<usize> {
        &self.labels
    }

    /// Multiplier which spreads the labels over the 8 bit intensity range.
    pub fn scale_factor(&self) -> usize {
        256 / self.levels
    }

    /// Converts the map into a Luma8 image, with each label multiplied by `scale_factor()`.
    pub fn to_luma(&self) -> GrayImage {
        let factor = self.scale_factor();

        GrayImage::from_fn(self.width() as u32, self.height() as u32, |x, y| {
            let val = self.get(x as usize, y as usize) * factor;
            image::Luma([val.min(255) as u8])
        })
    }

    /// Save the rescaled map, see `to_luma()`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_luma().save(path)?;
        Ok(())
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
