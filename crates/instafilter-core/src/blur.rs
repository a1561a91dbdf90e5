//! Gaussian blur for the `gaussianBlur` filter.
//!
//! Wraps [`imageproc::filter::gaussian_blur_f32`], which only accepts
//! `GrayImage`, by blurring each R/G/B/A plane independently. Gaussian
//! blur is linear and per-channel, so the result matches blurring in
//! color space.

use image::RgbaImage;

use crate::channels::{merge_rgba, split_rgba};

/// Blur an RGBA image with standard deviation `radius` pixels.
///
/// Non-positive and non-finite radii return the image unchanged, since
/// `imageproc` panics on `sigma <= 0.0`.
#[must_use = "returns the blurred image"]
#[allow(clippy::cast_possible_truncation)]
pub fn gaussian_blur_rgba(image: &RgbaImage, radius: f64) -> RgbaImage {
    let sigma = radius as f32;
    if !sigma.is_finite() || sigma <= 0.0 {
        return image.clone();
    }

    let planes = split_rgba(image).map(|plane| imageproc::filter::gaussian_blur_f32(&plane, sigma));
    merge_rgba(&planes)
}
