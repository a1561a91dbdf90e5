//! Sepia tone for the `sepiaTone` filter.
//!
//! Applies the classic sepia color matrix and blends the result with the
//! original by `intensity`: `0.0` leaves the image untouched, `1.0` is full
//! sepia. Alpha is preserved.

use image::RgbaImage;

/// Intensity used when no `intensity` parameter is supplied.
pub const DEFAULT_INTENSITY: f64 = 1.0;

const SEPIA: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Tone `image` toward sepia by `intensity`, clamped to `[0, 1]`.
#[must_use = "returns the toned image"]
#[allow(clippy::cast_possible_truncation)]
pub fn sepia_tone(image: &RgbaImage, intensity: f64) -> RgbaImage {
    let t = crate::mapping::clamp_intensity(intensity) as f32;
    let mut out = image.clone();
    if t <= 0.0 {
        return out;
    }

    for pixel in out.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let rgb = [f32::from(r), f32::from(g), f32::from(b)];
        let toned = SEPIA.map(|row| row[0].mul_add(rgb[0], row[1].mul_add(rgb[1], row[2] * rgb[2])));
        pixel.0 = [
            blend(rgb[0], toned[0], t),
            blend(rgb[1], toned[1], t),
            blend(rgb[2], toned[2], t),
            a,
        ];
    }
    out
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn blend(original: f32, toned: f32, t: f32) -> u8 {
    original.mul_add(1.0 - t, toned * t).round().clamp(0.0, 255.0) as u8
}
