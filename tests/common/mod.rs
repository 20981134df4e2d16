//! Helpers shared by the integration tests.

#![allow(dead_code)]

use image::GrayImage;
use lbp_disparity::prelude::*;

/// Small deterministic pseudo random generator so tests need no fixture images.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Lcg(seed)
    }

    pub fn next_u8(&mut self) -> u8 {
        self.0 = self.0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 56) as u8
    }
}

pub fn noise(width: u32, height: u32, seed: u64) -> GrayImage {
    let mut rng = Lcg::new(seed);
    let mut img = GrayImage::new(width, height);
    for p in img.pixels_mut() {
        *p = image::Luma([rng.next_u8()]);
    }
    img
}

/// A pair whose left image is the right image shifted `shift` columns to the right.
pub fn shifted_pair(width: u32, height: u32, shift: u32, seed: u64) -> StereoPair {
    let right = noise(width, height, seed);
    let left = GrayImage::from_fn(width, height, |x, y| {
        if x >= shift {
            *right.get_pixel(x - shift, y)
        }
        else {
            image::Luma([0])
        }
    });

    StereoPair::new(left, right).unwrap()
}

pub fn params(levels: usize, iterations: usize, weight: u32, cap: u32) -> Params {
    Params {
        levels,
        iterations,
        smooth_weight: weight,
        smooth_cap: cap,
        stopping: Stopping::Fixed
    }
}
