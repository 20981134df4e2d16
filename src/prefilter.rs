//! # Pre filtering
//!
//! Smoothing applied to the raw stereo images before any matching costs are computed.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use image::GrayImage;

// -----------------------------------------------------------------------------------------------
// CONSTANTS
// -----------------------------------------------------------------------------------------------

/// Default gaussian sigma used to smooth input images.
pub const DEFAULT_SIGMA: f32 = 0.68;

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Blur the image with a gaussian kernel of the given standard deviation.
///
/// A non-positive sigma leaves the image untouched.
pub fn gaussian(img: &GrayImage, sigma: f32) -> GrayImage {
    if sigma <= 0.0 {
        return img.clone();
    }

    imageproc::filter::gaussian_blur_f32(img, sigma)
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
