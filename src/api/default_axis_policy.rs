use serde::{Deserialize, Serialize};

use crate::core::{ColumnKind, ColumnSet};
use crate::error::{QueryVizError, QueryVizResult};

/// Heuristic used to pre-select axes when a response arrives with nothing
/// selected.
///
/// A column is numeric when its type tag contains any numeric marker and a
/// date when it contains any date marker. Numeric markers win when a tag
/// matches both. Matching is substring based, so wrapped tags such as
/// `Nullable(Int64)` or `DateTime64(6, 'UTC')` classify like their inner type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultAxisPolicy {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_numeric_type_markers")]
    pub numeric_type_markers: Vec<String>,
    #[serde(default = "default_date_type_markers")]
    pub date_type_markers: Vec<String>,
}

impl Default for DefaultAxisPolicy {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            numeric_type_markers: default_numeric_type_markers(),
            date_type_markers: default_date_type_markers(),
        }
    }
}

/// Axes picked by [`DefaultAxisPolicy::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultAxes {
    pub x: Option<usize>,
    pub y: Option<usize>,
}

impl DefaultAxisPolicy {
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn from_json_str(input: &str) -> QueryVizResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            QueryVizError::InvalidConfig(format!("failed to parse default axis policy: {e}"))
        })
    }

    /// First date column for X, first numeric column for Y. Either may be
    /// absent; with neither present nothing is selected.
    #[must_use]
    pub fn resolve(&self, columns: &ColumnSet) -> DefaultAxes {
        if !self.enabled {
            return DefaultAxes::default();
        }
        let first_of = |kind: ColumnKind| {
            columns
                .iter()
                .position(|column| self.classify(&column.type_tag) == kind)
        };
        DefaultAxes {
            x: first_of(ColumnKind::Date),
            y: first_of(ColumnKind::Numeric),
        }
    }

    #[must_use]
    pub fn classify(&self, type_tag: &str) -> ColumnKind {
        if matches_any(type_tag, &self.numeric_type_markers) {
            ColumnKind::Numeric
        } else if matches_any(type_tag, &self.date_type_markers) {
            ColumnKind::Date
        } else {
            ColumnKind::Other
        }
    }
}

fn matches_any(type_tag: &str, markers: &[String]) -> bool {
    markers
        .iter()
        .any(|marker| !marker.is_empty() && type_tag.contains(marker.as_str()))
}

fn default_enabled() -> bool {
    true
}

fn default_numeric_type_markers() -> Vec<String> {
    vec!["Int".to_owned(), "Float".to_owned()]
}

fn default_date_type_markers() -> Vec<String> {
    vec!["Date".to_owned()]
}
