//! Image decoding.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces the RGBA8
//! image the session filters. Reading the bytes is left to the caller.

use image::RgbaImage;

/// Errors that can occur while decoding a source image.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// The bytes are not an image format we can decode.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
}

/// Decode raw image bytes into RGBA8.
///
/// # Errors
///
/// Returns [`DecodeError::EmptyInput`] if `bytes` is empty.
/// Returns [`DecodeError::ImageDecode`] if the format is unrecognized or
/// the data is corrupt.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgba8())
}
