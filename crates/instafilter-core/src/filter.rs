//! The static filter registry.
//!
//! Each [`FilterKind`] has exactly one [`FilterCapability`] describing
//! its identifier, display name, and which [`ParameterKind`]s it accepts.
//! Parameter support is declared up front and checked by membership, so
//! the intensity mapper never has to ask a backend which inputs a filter
//! understands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A tunable filter input, from a fixed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterKind {
    /// Blend strength, `[0, 1]`.
    Intensity,
    /// Blur radius in pixels, `[0, 200]`.
    Radius,
    /// Cell size in pixels, `[0, 10]`.
    Scale,
    /// Normalized width, `[0, 1]`.
    Width,
}

impl ParameterKind {
    /// Every parameter kind, in mapping order.
    pub const ALL: [Self; 4] = [Self::Intensity, Self::Radius, Self::Scale, Self::Width];

    /// Lowercase key used when displaying an assignment.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Intensity => "intensity",
            Self::Radius => "radius",
            Self::Scale => "scale",
            Self::Width => "width",
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Describes one selectable filter.
///
/// Instances are `'static` and immutable; obtain them through
/// [`FilterKind::capability`].
#[derive(Debug, PartialEq, Eq)]
pub struct FilterCapability {
    kind: FilterKind,
    id: &'static str,
    display_name: &'static str,
    accepted: &'static [ParameterKind],
}

impl FilterCapability {
    /// The filter this capability describes.
    #[must_use]
    pub const fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Stable identifier, e.g. `gaussianBlur`.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.id
    }

    /// Human-readable name, e.g. `Gaussian Blur`.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// The parameters this filter accepts.
    #[must_use]
    pub const fn accepted_parameters(&self) -> &'static [ParameterKind] {
        self.accepted
    }

    /// Whether this filter accepts `parameter`.
    #[must_use]
    pub fn accepts(&self, parameter: ParameterKind) -> bool {
        self.accepted.contains(&parameter)
    }
}

const EDGES: FilterCapability = FilterCapability {
    kind: FilterKind::Edges,
    id: "edges",
    display_name: "Edges",
    accepted: &[],
};

const GAUSSIAN_BLUR: FilterCapability = FilterCapability {
    kind: FilterKind::GaussianBlur,
    id: "gaussianBlur",
    display_name: "Gaussian Blur",
    accepted: &[ParameterKind::Radius],
};

const PIXELLATE: FilterCapability = FilterCapability {
    kind: FilterKind::Pixellate,
    id: "pixellate",
    display_name: "Pixellate",
    accepted: &[ParameterKind::Scale],
};

const SEPIA_TONE: FilterCapability = FilterCapability {
    kind: FilterKind::SepiaTone,
    id: "sepiaTone",
    display_name: "Sepia Tone",
    accepted: &[ParameterKind::Intensity],
};

/// One of the four selectable filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    /// Edge detection. Accepts no parameters, so intensity has no effect.
    Edges,
    /// Gaussian blur driven by [`ParameterKind::Radius`].
    GaussianBlur,
    /// Block pixellation driven by [`ParameterKind::Scale`].
    Pixellate,
    /// Sepia tone driven by [`ParameterKind::Intensity`].
    #[default]
    SepiaTone,
}

impl FilterKind {
    /// All filters in menu order.
    pub const ALL: [Self; 4] = [
        Self::Edges,
        Self::GaussianBlur,
        Self::Pixellate,
        Self::SepiaTone,
    ];

    /// The static capability record for this filter.
    #[must_use]
    pub const fn capability(self) -> &'static FilterCapability {
        match self {
            Self::Edges => &EDGES,
            Self::GaussianBlur => &GAUSSIAN_BLUR,
            Self::Pixellate => &PIXELLATE,
            Self::SepiaTone => &SEPIA_TONE,
        }
    }

    /// Shorthand for `self.capability().id()`.
    #[must_use]
    pub const fn id(self) -> &'static str {
        self.capability().id
    }

    /// Shorthand for `self.capability().display_name()`.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        self.capability().display_name
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Returned when a string names no known filter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter {0:?} (expected one of: edges, gaussianBlur, pixellate, sepiaTone)")]
pub struct UnknownFilter(pub String);

impl FromStr for FilterKind {
    type Err = UnknownFilter;

    /// Accepts ids (`gaussianBlur`), display names (`Gaussian Blur`) and
    /// kebab/snake spellings (`gaussian-blur`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|kind| normalize(kind.id()) == wanted)
            .ok_or_else(|| UnknownFilter(s.to_owned()))
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
