//! instafilter-core: filter selection, intensity mapping, rendering and
//! session state (sans-IO).
//!
//! A session holds one source image, one of four filters, and a single
//! normalized intensity slider:
//!
//! - [`filter`] declares each filter and the parameters it accepts
//! - [`mapping`] turns the slider value into those parameters
//! - [`engine`] renders through a pluggable [`FilterBackend`]
//! - [`session`] sequences select / filter / intensity / save
//! - [`persist`] is the asynchronous save seam
//!
//! [`ImageprocBackend`] is the built-in backend. This crate has **no I/O
//! dependencies**: reading files and writing the photo library live in
//! `instafilter-io`.

pub mod backend;
pub mod blur;
pub mod channels;
pub mod config;
pub mod decode;
pub mod edge;
pub mod engine;
pub mod filter;
pub mod mapping;
pub mod persist;
pub mod pixellate;
pub mod render;
pub mod sepia;
pub mod session;

pub use backend::{FilterBackend, ProcessingError};
pub use config::{ConfigError, SessionConfig};
pub use decode::{DecodeError, decode_rgba};
pub use engine::FilterEngine;
pub use filter::{FilterCapability, FilterKind, ParameterKind, UnknownFilter};
pub use mapping::{ParameterAssignment, clamp_intensity, map_intensity};
pub use persist::{
    ImagePersister, PendingSave, PersistenceError, SaveOutcome, SaveReporter, SavedImage,
};
pub use render::ImageprocBackend;
pub use session::{SaveError, SaveRequest, Session, Status};

/// Re-export `RgbaImage` so downstream crates can hold source and
/// rendered images without depending on `image` directly.
pub use image::RgbaImage;
