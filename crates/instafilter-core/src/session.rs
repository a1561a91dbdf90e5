//! The interactive session: one source image, one filter, one slider.
//!
//! [`Session`] owns every piece of state a display needs and exposes the
//! user-facing transitions. Each transition that changes an input to the
//! render (image, filter, intensity) reprocesses immediately when a
//! source image is present.
//!
//! Failures never end the session. A failed reprocess keeps the last
//! successful output on display and says so in the status line; save
//! outcomes update the status line when [`Session::poll_saves`] picks
//! them up.

use std::collections::VecDeque;

use crate::backend::{FilterBackend, ProcessingError};
use crate::config::SessionConfig;
use crate::engine::FilterEngine;
use crate::filter::FilterKind;
use crate::mapping::ParameterAssignment;
use crate::persist::{ImagePersister, PendingSave, SaveOutcome};

/// Title shown before any filter is chosen.
pub const DEFAULT_TITLE: &str = "Instafilter";

/// Status shown when there is nothing to report.
pub const DEFAULT_PROMPT: &str = "Tap to select a picture";

/// Status shown when saving without a source image.
pub const NO_IMAGE_MESSAGE: &str = "Please select a photo before saving";

/// The user-facing status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// Text to display.
    pub message: String,
    /// Whether to display it as an error.
    pub is_error: bool,
}

impl Status {
    fn prompt() -> Self {
        Self::info(DEFAULT_PROMPT)
    }

    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

/// Errors from [`Session::save`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    /// Save was requested before any image was selected.
    #[error("no photo selected")]
    NoImageSelected,
}

/// What [`Session::save`] did with a valid request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveRequest {
    /// The rendered image was handed to the persister.
    Submitted,
    /// A source is selected but there is no current render to save.
    NothingRendered,
}

/// Single-threaded filter session over backend `B` and persister `P`.
pub struct Session<B: FilterBackend, P> {
    engine: FilterEngine<B>,
    persister: P,
    source: Option<B::Image>,
    /// Last successful render of `source`.
    output: Option<B::Image>,
    /// Whether `output` reflects the current image, filter and intensity.
    output_current: bool,
    title: &'static str,
    status: Status,
    pending: VecDeque<PendingSave>,
}

impl<B, P> Session<B, P>
where
    B: FilterBackend,
    P: ImagePersister<B::Image>,
{
    /// Start a session with no image selected.
    pub fn new(backend: B, persister: P, config: &SessionConfig) -> Self {
        Self {
            engine: FilterEngine::new(backend, config.filter, config.intensity),
            persister,
            source: None,
            output: None,
            output_current: false,
            title: DEFAULT_TITLE,
            status: Status::prompt(),
            pending: VecDeque::new(),
        }
    }

    /// Use `image` as the new source, discard any previous output, and
    /// render it.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`ProcessingError`]; the session has already
    /// recorded it in the status line.
    pub fn select_image(&mut self, image: B::Image) -> Result<(), ProcessingError> {
        self.source = Some(image);
        self.output = None;
        self.output_current = false;
        self.reprocess()
    }

    /// Switch filters, retitle, and re-render if an image is selected.
    ///
    /// # Errors
    ///
    /// See [`select_image`](Self::select_image).
    pub fn change_filter(&mut self, filter: FilterKind) -> Result<(), ProcessingError> {
        self.engine.set_filter(filter);
        self.title = filter.display_name();
        self.reprocess()
    }

    /// Move the slider and re-render if an image is selected. The value
    /// is clamped to `[0, 1]`.
    ///
    /// # Errors
    ///
    /// See [`select_image`](Self::select_image).
    pub fn change_intensity(&mut self, intensity: f64) -> Result<(), ProcessingError> {
        self.engine.set_intensity(intensity);
        self.reprocess()
    }

    fn reprocess(&mut self) -> Result<(), ProcessingError> {
        self.output_current = false;
        let Some(source) = self.source.as_ref() else {
            return Ok(());
        };

        match self.engine.process(source) {
            Ok(rendered) => {
                self.output = Some(rendered);
                self.output_current = true;
                if self.status.is_error {
                    self.status = Status::prompt();
                }
                Ok(())
            }
            Err(err) => {
                log::warn!("reprocess failed: {err}");
                self.status = Status::error(format!(
                    "Unable to apply {}",
                    self.engine.filter().display_name()
                ));
                Err(err)
            }
        }
    }

    /// Save the current render.
    ///
    /// Without a source image this only sets the error status. Otherwise
    /// the status resets to the default prompt and, if a current render
    /// exists, a copy is handed to the persister. The outcome is applied
    /// by [`poll_saves`](Self::poll_saves) or
    /// [`wait_for_saves`](Self::wait_for_saves).
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::NoImageSelected`] if no image is selected.
    pub fn save(&mut self) -> Result<SaveRequest, SaveError> {
        if self.source.is_none() {
            self.status = Status::error(NO_IMAGE_MESSAGE);
            return Err(SaveError::NoImageSelected);
        }

        self.status = Status::prompt();
        let Some(rendered) = self.rendered_image() else {
            log::info!("save skipped: nothing rendered for the current settings");
            return Ok(SaveRequest::NothingRendered);
        };
        let pending = self.persister.persist(rendered.clone());
        self.pending.push_back(pending);
        Ok(SaveRequest::Submitted)
    }

    /// Apply every save outcome that has arrived, oldest first.
    ///
    /// Stops at the first save still in flight so outcomes are applied
    /// in the order the saves were requested.
    pub fn poll_saves(&mut self) -> Vec<SaveOutcome> {
        let mut finished = Vec::new();
        loop {
            let Some(outcome) = self.pending.front().and_then(PendingSave::try_outcome) else {
                break;
            };
            self.pending.pop_front();
            self.apply_save_outcome(&outcome);
            finished.push(outcome);
        }
        finished
    }

    /// Block until every outstanding save has reported, applying each.
    pub fn wait_for_saves(&mut self) -> Vec<SaveOutcome> {
        let mut finished = Vec::with_capacity(self.pending.len());
        while let Some(pending) = self.pending.pop_front() {
            let outcome = pending.wait();
            self.apply_save_outcome(&outcome);
            finished.push(outcome);
        }
        finished
    }

    fn apply_save_outcome(&mut self, outcome: &SaveOutcome) {
        match outcome {
            Ok(saved) => {
                log::info!("saved photo to {}", saved.location);
                self.status = Status::info(format!("Saved to {}", saved.location));
            }
            Err(err) => {
                log::warn!("failed to save photo: {err}");
                self.status = Status::error(format!("Failed to save photo: {err}"));
            }
        }
    }
}

impl<B: FilterBackend, P> Session<B, P> {
    /// The selected source image.
    pub const fn source_image(&self) -> Option<&B::Image> {
        self.source.as_ref()
    }

    /// The render for the current image, filter and intensity.
    ///
    /// `None` when no image is selected or the last reprocess failed.
    pub fn rendered_image(&self) -> Option<&B::Image> {
        self.output.as_ref().filter(|_| self.output_current)
    }

    /// What a display should show: the latest successful render, even if
    /// a later reprocess failed.
    pub const fn displayed_image(&self) -> Option<&B::Image> {
        self.output.as_ref()
    }

    /// The selected filter.
    pub const fn filter(&self) -> FilterKind {
        self.engine.filter()
    }

    /// The slider position, in `[0, 1]`.
    pub const fn intensity(&self) -> f64 {
        self.engine.intensity()
    }

    /// The parameters the backend receives for the current settings.
    pub fn assignment(&self) -> ParameterAssignment {
        self.engine.assignment()
    }

    /// Display title: [`DEFAULT_TITLE`] until a filter is chosen, then the
    /// filter's display name.
    pub const fn title(&self) -> &'static str {
        self.title
    }

    /// The status line.
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// Number of saves whose outcome has not been applied yet.
    pub fn pending_saves(&self) -> usize {
        self.pending.len()
    }
}
