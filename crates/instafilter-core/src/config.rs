//! Session start-up configuration.

use serde::{Deserialize, Serialize};

use crate::filter::FilterKind;

/// Errors from validating a [`SessionConfig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Intensity outside `[0, 1]` (or NaN).
    #[error("intensity must be between 0 and 1, got {0}")]
    InvalidIntensity(f64),
}

/// What a fresh session starts with.
///
/// Missing fields take their defaults when deserializing, so a config
/// file only has to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Filter selected at start-up.
    pub filter: FilterKind,

    /// Slider position at start-up, in `[0, 1]`.
    pub intensity: f64,
}

impl SessionConfig {
    /// Default start-up filter.
    pub const DEFAULT_FILTER: FilterKind = FilterKind::SepiaTone;

    /// Default start-up intensity.
    pub const DEFAULT_INTENSITY: f64 = 0.5;

    /// Check invariants that deserialization cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidIntensity`] if `intensity` is not in
    /// `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (0.0..=1.0).contains(&self.intensity) {
            Ok(())
        } else {
            Err(ConfigError::InvalidIntensity(self.intensity))
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            filter: Self::DEFAULT_FILTER,
            intensity: Self::DEFAULT_INTENSITY,
        }
    }
}
