//! instafilter-io: filesystem side of instafilter.
//!
//! - [`source`] reads and decodes photos from disk
//! - [`library`] is a directory-backed photo library that saves on a
//!   background thread

pub mod library;
pub mod source;

pub use library::PhotoLibrary;
pub use source::{SourceError, load_image};
