//! Reading photos from disk.

use std::path::{Path, PathBuf};

use instafilter_core::{DecodeError, RgbaImage, decode_rgba};

/// Errors that can occur while loading a photo.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file was read but is not a decodable image.
    #[error("cannot decode {}: {source}", path.display())]
    Decode {
        /// File that was requested.
        path: PathBuf,
        /// Underlying decode error.
        source: DecodeError,
    },
}

/// Read and decode the photo at `path`.
///
/// # Errors
///
/// Returns [`SourceError::Read`] if the file cannot be read and
/// [`SourceError::Decode`] if its contents are empty or not an image.
pub fn load_image(path: &Path) -> Result<RgbaImage, SourceError> {
    let bytes = std::fs::read(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let image = decode_rgba(&bytes).map_err(|source| SourceError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}
