//! The seam between the session and whatever actually renders pixels.

use crate::filter::FilterKind;
use crate::mapping::ParameterAssignment;

/// Errors a filter backend can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProcessingError {
    /// The backend could not produce an output for this source and filter.
    #[error("{filter} could not be applied: {reason}")]
    BackendUnavailable {
        /// The filter that was requested.
        filter: FilterKind,
        /// Backend-specific description of the failure.
        reason: String,
    },
}

/// Renders a source image through one filter with concrete parameters.
///
/// Implementations receive only the parameters the filter declared in
/// its [`FilterCapability`](crate::FilterCapability), and must not
/// mutate `source`. Rendering is expected to be deterministic: the same
/// inputs produce the same output.
pub trait FilterBackend {
    /// The image handle this backend consumes and produces.
    type Image: Clone;

    /// Apply `filter` to `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::BackendUnavailable`] if no output can be
    /// produced for this combination (e.g. an empty source image).
    fn render(
        &self,
        source: &Self::Image,
        filter: FilterKind,
        params: &ParameterAssignment,
    ) -> Result<Self::Image, ProcessingError>;
}

impl<B: FilterBackend + ?Sized> FilterBackend for &B {
    type Image = B::Image;

    fn render(
        &self,
        source: &Self::Image,
        filter: FilterKind,
        params: &ParameterAssignment,
    ) -> Result<Self::Image, ProcessingError> {
        (**self).render(source, filter, params)
    }
}
