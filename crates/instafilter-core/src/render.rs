//! The built-in [`FilterBackend`], implemented with `image` + `imageproc`.

use image::RgbaImage;

use crate::backend::{FilterBackend, ProcessingError};
use crate::filter::{FilterKind, ParameterKind};
use crate::mapping::ParameterAssignment;
use crate::{blur, edge, pixellate, sepia};

/// Renders RGBA8 images on the CPU.
///
/// Every filter preserves dimensions and alpha. Missing parameters fall
/// back to each filter's own default.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageprocBackend;

impl FilterBackend for ImageprocBackend {
    type Image = RgbaImage;

    fn render(
        &self,
        source: &RgbaImage,
        filter: FilterKind,
        params: &ParameterAssignment,
    ) -> Result<RgbaImage, ProcessingError> {
        if source.width() == 0 || source.height() == 0 {
            return Err(ProcessingError::BackendUnavailable {
                filter,
                reason: format!("source image is {}x{}", source.width(), source.height()),
            });
        }

        let output = match filter {
            FilterKind::Edges => edge::sobel_edges_rgba(source),
            FilterKind::GaussianBlur => {
                blur::gaussian_blur_rgba(source, params.get(ParameterKind::Radius).unwrap_or(0.0))
            }
            FilterKind::Pixellate => pixellate::pixellate(
                source,
                params
                    .get(ParameterKind::Scale)
                    .unwrap_or(pixellate::DEFAULT_SCALE),
            ),
            FilterKind::SepiaTone => sepia::sepia_tone(
                source,
                params
                    .get(ParameterKind::Intensity)
                    .unwrap_or(sepia::DEFAULT_INTENSITY),
            ),
        };
        Ok(output)
    }
}
