//! Split RGBA images into per-channel grayscale planes and back.
//!
//! Most `imageproc` filters only accept `GrayImage`, so color filters
//! run them once per channel and reassemble.

use image::{GrayImage, Luma, Rgba, RgbaImage};

/// Split an RGBA image into `[r, g, b, a]` planes.
#[must_use]
pub fn split_rgba(image: &RgbaImage) -> [GrayImage; 4] {
    let (w, h) = image.dimensions();
    std::array::from_fn(|c| GrayImage::from_fn(w, h, |x, y| Luma([image.get_pixel(x, y).0[c]])))
}

/// Reassemble `[r, g, b, a]` planes into an RGBA image.
///
/// All planes must share the dimensions of the first.
#[must_use]
pub fn merge_rgba(planes: &[GrayImage; 4]) -> RgbaImage {
    let (w, h) = planes[0].dimensions();
    RgbaImage::from_fn(w, h, |x, y| {
        Rgba(std::array::from_fn(|c| planes[c].get_pixel(x, y).0[0]))
    })
}
