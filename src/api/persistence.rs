use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{QueryVizError, QueryVizResult};

use super::{DataVisualizationNode, DataVisualizationState, DefaultAxisPolicy};

pub const PERSISTED_VISUALIZATION_SCHEMA_V1: u32 = 1;

/// Saved form of a visualization: the query carrying display type and axis
/// hints, plus the default-axis policy it was edited under.
///
/// Empty Y slots are not part of the query and do not survive a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedVisualizationV1 {
    pub schema_version: u32,
    pub query: DataVisualizationNode,
    #[serde(default)]
    pub default_axis_policy: DefaultAxisPolicy,
}

impl DataVisualizationState {
    #[must_use]
    pub fn to_persisted_v1(&self) -> PersistedVisualizationV1 {
        PersistedVisualizationV1 {
            schema_version: PERSISTED_VISUALIZATION_SCHEMA_V1,
            query: self.query().clone(),
            default_axis_policy: self.policy().clone(),
        }
    }

    pub fn to_persisted_json_v1_pretty(&self) -> QueryVizResult<String> {
        serde_json::to_string_pretty(&self.to_persisted_v1()).map_err(|e| {
            QueryVizError::InvalidConfig(format!("failed to serialize visualization: {e}"))
        })
    }

    /// Rebuilds state from a saved payload.
    ///
    /// A bare query node (no `schema_version`) is accepted and restored with
    /// the default policy. Responses are not persisted; load one afterwards.
    pub fn from_persisted_json(input: &str) -> QueryVizResult<Self> {
        let payload: Value = serde_json::from_str(input).map_err(|e| {
            QueryVizError::InvalidConfig(format!("failed to parse saved visualization: {e}"))
        })?;

        let Some(version) = payload.get("schema_version") else {
            let query = DataVisualizationNode::from_json_str(input)?;
            debug!("restore visualization from bare query node");
            return Ok(Self::new(query, DefaultAxisPolicy::default()));
        };
        if version.as_u64() != Some(u64::from(PERSISTED_VISUALIZATION_SCHEMA_V1)) {
            return Err(QueryVizError::InvalidConfig(format!(
                "unsupported saved visualization version: {version}"
            )));
        }

        let saved = PersistedVisualizationV1::deserialize(&payload).map_err(|e| {
            QueryVizError::InvalidConfig(format!("invalid saved visualization: {e}"))
        })?;
        debug!(
            schema_version = saved.schema_version,
            "restore saved visualization"
        );
        Ok(Self::new(saved.query, saved.default_axis_policy))
    }
}
