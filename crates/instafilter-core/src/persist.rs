//! The persistence seam: hand a rendered image to a sink, learn the
//! outcome later.
//!
//! A sink returns a [`PendingSave`] immediately. The outcome arrives over
//! a channel from whatever thread the sink does its work on, and is
//! picked up by the thread that owns the session, so session state is
//! never touched concurrently.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Where a successful save ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    /// Human-readable location, e.g. a file path.
    pub location: String,
}

/// Errors a persistence sink can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    /// The library location could not be created.
    #[error("cannot prepare photo library at {path}: {reason}")]
    CreateDir {
        /// Directory that could not be created.
        path: String,
        /// Underlying I/O error message.
        reason: String,
    },

    /// The image could not be encoded.
    #[error("cannot encode image: {0}")]
    Encode(String),

    /// The encoded image could not be written.
    #[error("cannot write {path}: {reason}")]
    Write {
        /// Destination that failed.
        path: String,
        /// Underlying I/O error message.
        reason: String,
    },

    /// The sink went away without reporting an outcome.
    #[error("photo library stopped before reporting a result")]
    Disconnected,
}

/// Result of one save.
pub type SaveOutcome = Result<SavedImage, PersistenceError>;

/// Sending half handed to the sink's worker.
#[derive(Debug)]
pub struct SaveReporter {
    sender: Sender<SaveOutcome>,
}

impl SaveReporter {
    /// Deliver the outcome. A receiver that has already been dropped is
    /// not an error; nobody is waiting for the result.
    pub fn report(self, outcome: SaveOutcome) {
        if self.sender.send(outcome).is_err() {
            log::debug!("save outcome dropped: no receiver");
        }
    }
}

/// A save that has been handed to a sink.
#[derive(Debug)]
pub struct PendingSave {
    receiver: Receiver<SaveOutcome>,
}

impl PendingSave {
    /// Create a linked reporter and pending save.
    #[must_use]
    pub fn channel() -> (SaveReporter, Self) {
        let (sender, receiver) = mpsc::channel();
        (SaveReporter { sender }, Self { receiver })
    }

    /// A save whose outcome is already known.
    #[must_use]
    pub fn ready(outcome: SaveOutcome) -> Self {
        let (reporter, pending) = Self::channel();
        reporter.report(outcome);
        pending
    }

    /// The outcome, if the sink has reported one.
    ///
    /// Returns `None` while the save is still in flight. A sink that
    /// drops its reporter without reporting yields
    /// [`PersistenceError::Disconnected`]. Call at most once after it
    /// returns `Some`.
    #[must_use]
    pub fn try_outcome(&self) -> Option<SaveOutcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(PersistenceError::Disconnected)),
        }
    }

    /// Block until the sink reports.
    #[must_use]
    pub fn wait(self) -> SaveOutcome {
        self.receiver
            .recv()
            .unwrap_or(Err(PersistenceError::Disconnected))
    }
}

/// Accepts rendered images for saving.
pub trait ImagePersister<I> {
    /// Start saving `image`. Must return without waiting for the save.
    fn persist(&self, image: I) -> PendingSave;
}

impl<I, P: ImagePersister<I> + ?Sized> ImagePersister<I> for &P {
    fn persist(&self, image: I) -> PendingSave {
        (**self).persist(image)
    }
}
