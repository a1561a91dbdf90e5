//! The filter engine: current filter + intensity, applied through a backend.

use crate::backend::{FilterBackend, ProcessingError};
use crate::filter::{FilterCapability, FilterKind};
use crate::mapping::{ParameterAssignment, clamp_intensity, map_intensity};

/// Holds the selected filter and intensity and renders through `B`.
///
/// The engine does not cache: every [`process`](Self::process) call
/// renders from the source it is given.
#[derive(Debug, Clone)]
pub struct FilterEngine<B> {
    backend: B,
    filter: FilterKind,
    intensity: f64,
}

impl<B: FilterBackend> FilterEngine<B> {
    /// Create an engine. `intensity` is clamped to `[0, 1]`.
    pub fn new(backend: B, filter: FilterKind, intensity: f64) -> Self {
        Self {
            backend,
            filter,
            intensity: clamp_intensity(intensity),
        }
    }

    /// The selected filter.
    pub const fn filter(&self) -> FilterKind {
        self.filter
    }

    /// The selected filter's capability record.
    pub const fn capability(&self) -> &'static FilterCapability {
        self.filter.capability()
    }

    /// The current intensity, always in `[0, 1]`.
    pub const fn intensity(&self) -> f64 {
        self.intensity
    }

    /// The backend this engine renders through.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Select a different filter. Does not process.
    pub const fn set_filter(&mut self, filter: FilterKind) {
        self.filter = filter;
    }

    /// Replace the intensity, clamped to `[0, 1]`. Returns the stored value.
    pub fn set_intensity(&mut self, intensity: f64) -> f64 {
        self.intensity = clamp_intensity(intensity);
        self.intensity
    }

    /// The parameters the next [`process`](Self::process) call will use.
    #[must_use]
    pub fn assignment(&self) -> ParameterAssignment {
        map_intensity(self.intensity, self.capability())
    }

    /// Render `source` with the current filter and intensity.
    ///
    /// # Errors
    ///
    /// Propagates [`ProcessingError::BackendUnavailable`] from the backend.
    /// Failures are not retried.
    pub fn process(&self, source: &B::Image) -> Result<B::Image, ProcessingError> {
        let params = self.assignment();
        log::debug!("applying {} with {params}", self.filter.id());
        self.backend.render(source, self.filter, &params)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::filter::ParameterKind;

    /// Records every call and echoes the source back.
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(FilterKind, ParameterAssignment)>>,
    }

    impl FilterBackend for Recorder {
        type Image = u32;

        fn render(
            &self,
            source: &u32,
            filter: FilterKind,
            params: &ParameterAssignment,
        ) -> Result<u32, ProcessingError> {
            self.calls.borrow_mut().push((filter, params.clone()));
            Ok(*source)
        }
    }

    #[test]
    fn process_passes_mapped_parameters() {
        let recorder = Recorder::default();
        let engine = FilterEngine::new(&recorder, FilterKind::GaussianBlur, 1.0);
        assert_eq!(engine.process(&7).unwrap(), 7);

        let calls = recorder.calls.borrow();
        assert_eq!(
            calls.as_slice(),
            &[(
                FilterKind::GaussianBlur,
                ParameterAssignment::new().with(ParameterKind::Radius, 200.0)
            )]
        );
    }

    #[test]
    fn set_filter_does_not_process() {
        let recorder = Recorder::default();
        let mut engine = FilterEngine::new(&recorder, FilterKind::SepiaTone, 0.5);
        engine.set_filter(FilterKind::Edges);
        assert!(recorder.calls.borrow().is_empty());
        assert_eq!(engine.filter(), FilterKind::Edges);
        assert!(engine.assignment().is_empty());
    }

    #[test]
    fn intensity_is_clamped() {
        let recorder = Recorder::default();
        let mut engine = FilterEngine::new(&recorder, FilterKind::SepiaTone, 4.0);
        assert!((engine.intensity() - 1.0).abs() < f64::EPSILON);
        assert!(engine.set_intensity(-2.0).abs() < f64::EPSILON);
        assert!((engine.set_intensity(0.25) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn every_call_reprocesses() {
        let recorder = Recorder::default();
        let engine = FilterEngine::new(&recorder, FilterKind::Pixellate, 0.3);
        engine.process(&1).unwrap();
        engine.process(&1).unwrap();
        assert_eq!(recorder.calls.borrow().len(), 2);
    }
}
