//! Translate one normalized intensity into concrete filter parameters.
//!
//! Every filter is driven by the same `[0, 1]` slider, but each one
//! names and scales its input differently. [`map_intensity`] consults
//! the capability's declared parameters and computes only those.

use std::collections::BTreeMap;
use std::fmt;

use crate::filter::{FilterCapability, ParameterKind};

/// Multiplier applied to intensity for [`ParameterKind::Radius`].
pub const RADIUS_PER_INTENSITY: f64 = 200.0;

/// Multiplier applied to intensity for [`ParameterKind::Scale`].
pub const SCALE_PER_INTENSITY: f64 = 10.0;

/// Clamp a slider value into `[0, 1]`. NaN maps to `0.0`.
#[must_use]
pub fn clamp_intensity(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

impl ParameterKind {
    /// The value this parameter takes for the given intensity.
    #[must_use]
    pub fn from_intensity(self, intensity: f64) -> f64 {
        match self {
            Self::Intensity | Self::Width => intensity,
            Self::Radius => intensity * RADIUS_PER_INTENSITY,
            Self::Scale => intensity * SCALE_PER_INTENSITY,
        }
    }
}

/// Concrete parameter values for one processing request.
///
/// Built fresh for every call; never cached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterAssignment(BTreeMap<ParameterKind, f64>);

impl ParameterAssignment {
    /// An assignment with no parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set `kind` to `value`, replacing any previous value.
    #[must_use]
    pub fn with(mut self, kind: ParameterKind, value: f64) -> Self {
        self.0.insert(kind, value);
        self
    }

    /// The value assigned to `kind`, if any.
    #[must_use]
    pub fn get(&self, kind: ParameterKind) -> Option<f64> {
        self.0.get(&kind).copied()
    }

    /// Returns `true` if no parameter is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of assigned parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(kind, value)` pairs in [`ParameterKind`] order.
    pub fn iter(&self) -> impl Iterator<Item = (ParameterKind, f64)> + '_ {
        self.0.iter().map(|(&kind, &value)| (kind, value))
    }
}

impl fmt::Display for ParameterAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (kind, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{kind}: {value}")?;
        }
        f.write_str("}")
    }
}

/// Map a normalized intensity onto the parameters `capability` accepts.
///
/// Pure and total for `intensity` in `[0, 1]`. Keeping the input in range
/// is the caller's job; see [`clamp_intensity`].
#[must_use]
pub fn map_intensity(intensity: f64, capability: &FilterCapability) -> ParameterAssignment {
    ParameterKind::ALL
        .into_iter()
        .filter(|&kind| capability.accepts(kind))
        .fold(ParameterAssignment::new(), |assignment, kind| {
            assignment.with(kind, kind.from_intensity(intensity))
        })
}
