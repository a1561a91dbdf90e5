//! Settings resolution: defaults, then an optional JSON file, then flags.

use std::path::{Path, PathBuf};

use instafilter_core::{ConfigError, FilterKind, SessionConfig};
use serde::Deserialize;

/// Library directory used when neither the file nor the flags name one.
pub const DEFAULT_LIBRARY_DIR: &str = "photos";

/// Errors from loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// The file could not be read.
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid JSON for [`FileConfig`].
    #[error("cannot parse config {}: {source}", path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The merged settings break an invariant.
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// On-disk configuration. Every field is optional.
///
/// ```json
/// { "filter": "gaussianBlur", "intensity": 0.3, "library": "~/Pictures/Instafilter" }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileConfig {
    #[serde(flatten)]
    pub session: SessionConfig,
    pub library: Option<PathBuf>,
}

impl FileConfig {
    /// Load and parse `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub session: SessionConfig,
    pub library: PathBuf,
}

/// Command-line values that override the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub filter: Option<FilterKind>,
    pub intensity: Option<f64>,
    pub library: Option<PathBuf>,
}

/// Merge `file` (if any) with `overrides` and validate.
pub fn resolve(file: Option<&Path>, overrides: Overrides) -> Result<Settings, ConfigFileError> {
    let file = file.map(FileConfig::load).transpose()?.unwrap_or_default();

    let session = SessionConfig {
        filter: overrides.filter.unwrap_or(file.session.filter),
        intensity: overrides.intensity.unwrap_or(file.session.intensity),
    };
    session.validate()?;

    let library = overrides
        .library
        .or(file.library)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LIBRARY_DIR));

    log::debug!(
        "settings: filter={} intensity={} library={}",
        session.filter.id(),
        session.intensity,
        library.display()
    );
    Ok(Settings { session, library })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("instafilter.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn no_file_no_flags_gives_defaults() {
        let settings = resolve(None, Overrides::default()).unwrap();
        assert_eq!(settings.session, SessionConfig::default());
        assert_eq!(settings.library, PathBuf::from(DEFAULT_LIBRARY_DIR));
    }

    #[test]
    fn file_values_are_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"{"filter":"pixellate","intensity":0.2,"library":"/tmp/album"}"#,
        );
        let settings = resolve(Some(&path), Overrides::default()).unwrap();
        assert_eq!(settings.session.filter, FilterKind::Pixellate);
        assert!((settings.session.intensity - 0.2).abs() < f64::EPSILON);
        assert_eq!(settings.library, PathBuf::from("/tmp/album"));
    }

    #[test]
    fn flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"filter":"pixellate","intensity":0.2}"#);
        let overrides = Overrides {
            filter: Some(FilterKind::Edges),
            intensity: Some(0.9),
            library: Some(PathBuf::from("out")),
        };
        let settings = resolve(Some(&path), overrides).unwrap();
        assert_eq!(settings.session.filter, FilterKind::Edges);
        assert!((settings.session.intensity - 0.9).abs() < f64::EPSILON);
        assert_eq!(settings.library, PathBuf::from("out"));
    }

    #[test]
    fn invalid_intensity_is_rejected() {
        let overrides = Overrides {
            intensity: Some(2.0),
            ..Overrides::default()
        };
        assert!(matches!(
            resolve(None, overrides),
            Err(ConfigFileError::Invalid(ConfigError::InvalidIntensity(_)))
        ));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"filter":"vignette"}"#);
        assert!(matches!(
            resolve(Some(&path), Overrides::default()),
            Err(ConfigFileError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(
            resolve(Some(&path), Overrides::default()),
            Err(ConfigFileError::Read { .. })
        ));
    }
}
