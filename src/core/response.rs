use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::core::{ColumnDescriptor, ColumnSet};
use crate::error::{QueryVizError, QueryVizResult};

/// Tabular query result supplied by the host's data-fetching layer.
///
/// Wire shape: `{"columns": [...], "types": [[name, type], ...], "results": [[...], ...]}`.
/// Rows are kept as raw JSON cells; coercion happens at projection time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TabularResponse {
    pub columns: Vec<String>,
    #[serde(default)]
    pub types: Vec<(String, String)>,
    #[serde(default)]
    pub results: Vec<Vec<Value>>,
}

impl TabularResponse {
    #[must_use]
    pub fn new(
        columns: Vec<String>,
        types: Vec<(String, String)>,
        results: Vec<Vec<Value>>,
    ) -> Self {
        Self {
            columns,
            types,
            results,
        }
    }

    /// Lenient decode: payloads that do not look like a tabular result yield
    /// `None`, which callers treat as "no columns".
    #[must_use]
    pub fn from_json_value(payload: &Value) -> Option<Self> {
        if payload.is_null() {
            return None;
        }
        match Self::deserialize(payload) {
            Ok(response) => Some(response),
            Err(err) => {
                warn!(error = %err, "ignoring malformed tabular response");
                None
            }
        }
    }

    pub fn from_json_str(input: &str) -> QueryVizResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            QueryVizError::InvalidData(format!("failed to parse tabular response: {e}"))
        })
    }

    /// Derives one descriptor per column. A column without a type pair gets an
    /// empty type tag.
    #[must_use]
    pub fn column_set(&self) -> ColumnSet {
        let columns = self
            .columns
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let type_tag = self
                    .types
                    .get(index)
                    .map(|(_, type_tag)| type_tag.clone())
                    .unwrap_or_default();
                ColumnDescriptor::new(name.clone(), type_tag)
            })
            .collect();
        ColumnSet::new(columns)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.results.len()
    }

    /// Cell at `(row, column)`; `None` for short rows.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&Value> {
        self.results.get(row).and_then(|cells| cells.get(column))
    }
}
