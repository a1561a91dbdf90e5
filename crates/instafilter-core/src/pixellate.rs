//! Block pixellation for the `pixellate` filter.
//!
//! The image is tiled with square cells anchored at the top-left corner;
//! every pixel in a cell is replaced by the cell's mean color. Cells on
//! the right and bottom borders are clipped to the image.

use image::{Rgba, RgbaImage};

/// Cell size used when no `scale` parameter is supplied.
pub const DEFAULT_SCALE: f64 = 8.0;

/// Cell side length in pixels for a `scale` parameter.
///
/// Rounds to the nearest pixel; anything below one pixel (including NaN)
/// yields a one-pixel cell, which is the identity.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn cell_size(scale: f64) -> u32 {
    if scale.is_nan() || scale <= 1.0 {
        1
    } else {
        scale.round().min(f64::from(u32::MAX)) as u32
    }
}

/// Pixellate `image` with cells of [`cell_size(scale)`](cell_size).
#[must_use = "returns the pixellated image"]
pub fn pixellate(image: &RgbaImage, scale: f64) -> RgbaImage {
    let cell = cell_size(scale);
    let mut out = image.clone();
    if cell <= 1 {
        return out;
    }

    let (w, h) = image.dimensions();
    let mut y0 = 0;
    while y0 < h {
        let y1 = y0.saturating_add(cell).min(h);
        let mut x0 = 0;
        while x0 < w {
            let x1 = x0.saturating_add(cell).min(w);
            let mean = cell_mean(image, x0..x1, y0..y1);
            for y in y0..y1 {
                for x in x0..x1 {
                    out.put_pixel(x, y, mean);
                }
            }
            x0 = x1;
        }
        y0 = y1;
    }
    out
}

fn cell_mean(image: &RgbaImage, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) -> Rgba<u8> {
    let mut sums = [0u64; 4];
    let mut count = 0u64;
    for y in ys {
        for x in xs.clone() {
            for (sum, &v) in sums.iter_mut().zip(&image.get_pixel(x, y).0) {
                *sum += u64::from(v);
            }
            count += 1;
        }
    }
    let count = count.max(1);
    Rgba(sums.map(|sum| u8::try_from((sum + count / 2) / count).unwrap_or(u8::MAX)))
}
