//! A directory-backed photo library.
//!
//! [`PhotoLibrary`] implements [`ImagePersister`] by encoding each image
//! to PNG and writing it into a directory on a short-lived background
//! thread. The caller gets a [`PendingSave`] back immediately and learns
//! the outcome through it.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use image::ImageEncoder;
use instafilter_core::{ImagePersister, PendingSave, PersistenceError, RgbaImage, SavedImage};

/// File name prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "instafilter";

/// Saves photos as `<prefix>-<unix millis>-<sequence>.png` in a directory.
///
/// The directory is created on first save if it does not exist.
#[derive(Debug)]
pub struct PhotoLibrary {
    dir: PathBuf,
    prefix: String,
    sequence: AtomicU64,
}

impl PhotoLibrary {
    /// A library rooted at `dir` using [`DEFAULT_PREFIX`].
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_prefix(dir, DEFAULT_PREFIX)
    }

    /// A library rooted at `dir` with a custom file name prefix.
    pub fn with_prefix(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            sequence: AtomicU64::new(0),
        }
    }

    /// The directory photos are written to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn next_path(&self) -> PathBuf {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis());
        self.dir
            .join(format!("{}-{millis}-{seq:04}.png", self.prefix))
    }
}

impl ImagePersister<RgbaImage> for PhotoLibrary {
    fn persist(&self, image: RgbaImage) -> PendingSave {
        let dir = self.dir.clone();
        let path = self.next_path();
        let (reporter, pending) = PendingSave::channel();

        let spawned = std::thread::Builder::new()
            .name("photo-library-writer".into())
            .spawn(move || reporter.report(write_png(&dir, &path, &image)));

        match spawned {
            Ok(_) => pending,
            Err(e) => {
                log::warn!("cannot start photo library writer: {e}");
                PendingSave::ready(Err(PersistenceError::Write {
                    path: self.dir.display().to_string(),
                    reason: e.to_string(),
                }))
            }
        }
    }
}

/// Encode `image` as PNG and write it to `path`, creating `dir` first.
fn write_png(dir: &Path, path: &Path, image: &RgbaImage) -> Result<SavedImage, PersistenceError> {
    std::fs::create_dir_all(dir).map_err(|e| PersistenceError::CreateDir {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut png_bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut png_bytes)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| PersistenceError::Encode(e.to_string()))?;

    std::fs::write(path, &png_bytes).map_err(|e| PersistenceError::Write {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    Ok(SavedImage {
        location: path.display().to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::Rgba;

    use super::*;

    fn sample() -> RgbaImage {
        RgbaImage::from_fn(4, 3, |x, y| {
            Rgba([
                u8::try_from(x * 60).unwrap_or(0),
                u8::try_from(y * 90).unwrap_or(0),
                5,
                255,
            ])
        })
    }

    #[test]
    fn saves_png_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let library = PhotoLibrary::new(dir.path());

        let saved = library.persist(sample()).wait().unwrap();
        let path = PathBuf::from(&saved.location);
        assert_eq!(path.parent(), Some(dir.path()));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));

        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded, sample());
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("Pictures").join("Instafilter");
        let library = PhotoLibrary::new(&nested);

        library.persist(sample()).wait().unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn consecutive_saves_use_distinct_names() {
        let dir = tempfile::tempdir().unwrap();
        let library = PhotoLibrary::with_prefix(dir.path(), "shot");

        let a = library.persist(sample()).wait().unwrap();
        let b = library.persist(sample()).wait().unwrap();
        assert_ne!(a.location, b.location);

        let name = PathBuf::from(&a.location);
        let name = name.file_name().and_then(|n| n.to_str()).unwrap();
        assert!(name.starts_with("shot-"), "unexpected name {name}");
    }

    #[test]
    fn unwritable_location_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        // A regular file where the library directory should be.
        let library = PhotoLibrary::new(blocker.join("sub"));
        let err = library.persist(sample()).wait().unwrap_err();
        assert!(matches!(err, PersistenceError::CreateDir { .. }), "got {err:?}");
    }
}
