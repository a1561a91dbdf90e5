//! Color edge detection for the `edges` filter.
//!
//! Computes the Sobel gradient magnitude of each color channel with
//! [`imageproc::gradients::sobel_gradients`] and saturates it to 8 bits.
//! Flat regions go black, and strong transitions light up in the color
//! of the channels that changed. Alpha is carried through untouched.
//!
//! The filter takes no parameters.

use image::{GrayImage, Luma, RgbaImage};
use imageproc::definitions::Image;

use crate::channels::{merge_rgba, split_rgba};

/// Detect edges in every color channel of `image`.
#[must_use = "returns the edge image"]
pub fn sobel_edges_rgba(image: &RgbaImage) -> RgbaImage {
    let [r, g, b, a] = split_rgba(image);
    let [r, g, b] = [r, g, b].map(|plane| saturate(&imageproc::gradients::sobel_gradients(&plane)));
    merge_rgba(&[r, g, b, a])
}

/// Clamp 16-bit gradient magnitudes into a displayable 8-bit plane.
fn saturate(gradients: &Image<Luma<u16>>) -> GrayImage {
    GrayImage::from_fn(gradients.width(), gradients.height(), |x, y| {
        Luma([u8::try_from(gradients.get_pixel(x, y).0[0]).unwrap_or(u8::MAX)])
    })
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    /// 20x20 image with a sharp vertical black/white boundary at x = 10.
    fn sharp_edge_image() -> RgbaImage {
        RgbaImage::from_fn(20, 20, |x, _y| {
            if x < 10 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        })
    }

    #[test]
    fn uniform_image_has_no_edges() {
        let img = RgbaImage::from_pixel(20, 20, Rgba([128, 64, 32, 255]));
        let edges = sobel_edges_rgba(&img);
        for p in edges.pixels() {
            assert_eq!(&p.0[..3], &[0, 0, 0], "expected flat image to produce no edges");
        }
    }

    #[test]
    fn sharp_boundary_is_bright() {
        let edges = sobel_edges_rgba(&sharp_edge_image());
        assert_eq!(edges.get_pixel(10, 10).0[..3], [255, 255, 255]);
        assert_eq!(edges.get_pixel(2, 10).0[..3], [0, 0, 0]);
        assert_eq!(edges.get_pixel(17, 10).0[..3], [0, 0, 0]);
    }

    #[test]
    fn alpha_is_preserved() {
        let img = RgbaImage::from_fn(8, 8, |x, _| {
            Rgba([u8::try_from(x * 30).unwrap_or(0), 0, 0, 77])
        });
        for p in sobel_edges_rgba(&img).pixels() {
            assert_eq!(p.0[3], 77);
        }
    }

    #[test]
    fn single_channel_edge_only_lights_that_channel() {
        let img = RgbaImage::from_fn(20, 20, |x, _| {
            if x < 10 {
                Rgba([0, 90, 90, 255])
            } else {
                Rgba([255, 90, 90, 255])
            }
        });
        let p = sobel_edges_rgba(&img).get_pixel(10, 10).0;
        assert!(p[0] > 0);
        assert_eq!(p[1], 0);
        assert_eq!(p[2], 0);
    }

    #[test]
    fn output_dimensions_match_input() {
        let edges = sobel_edges_rgba(&RgbaImage::new(17, 31));
        assert_eq!(edges.dimensions(), (17, 31));
    }
}
