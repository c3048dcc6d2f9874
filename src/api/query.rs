use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{QueryVizError, QueryVizResult};

pub const DATA_VISUALIZATION_NODE_KIND: &str = "DataVisualizationNode";

/// Chart display variants a visualization can render as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ChartDisplayType {
    ActionsLineGraph,
    ActionsLineGraphCumulative,
    ActionsAreaGraph,
    #[default]
    ActionsTable,
    ActionsPie,
    ActionsBar,
    ActionsBarValue,
    WorldMap,
    BoldNumber,
}

/// Persisted axis hints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis_index: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis_index: Option<Vec<usize>>,
}

/// Persisted visualization query.
///
/// `source` is the upstream query and is carried opaquely; this crate never
/// inspects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataVisualizationNode {
    #[serde(default = "default_node_kind")]
    pub kind: String,
    #[serde(default)]
    pub source: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<ChartDisplayType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_settings: Option<ChartSettings>,
}

impl Default for DataVisualizationNode {
    fn default() -> Self {
        Self::new(Value::Null)
    }
}

impl DataVisualizationNode {
    #[must_use]
    pub fn new(source: Value) -> Self {
        Self {
            kind: default_node_kind(),
            source,
            display: None,
            chart_settings: None,
        }
    }

    #[must_use]
    pub fn with_display(mut self, display: ChartDisplayType) -> Self {
        self.display = Some(display);
        self
    }

    #[must_use]
    pub fn with_chart_settings(mut self, chart_settings: ChartSettings) -> Self {
        self.chart_settings = Some(chart_settings);
        self
    }

    pub fn from_json_str(input: &str) -> QueryVizResult<Self> {
        let node: Self = serde_json::from_str(input).map_err(|e| {
            QueryVizError::InvalidConfig(format!("failed to parse visualization node: {e}"))
        })?;
        if node.kind != DATA_VISUALIZATION_NODE_KIND {
            return Err(QueryVizError::InvalidConfig(format!(
                "unsupported node kind: {}",
                node.kind
            )));
        }
        Ok(node)
    }

    pub fn to_json_pretty(&self) -> QueryVizResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            QueryVizError::InvalidConfig(format!("failed to serialize visualization node: {e}"))
        })
    }

    /// First persisted X hint, if any.
    #[must_use]
    pub fn x_axis_hint(&self) -> Option<usize> {
        self.chart_settings
            .as_ref()
            .and_then(|settings| settings.x_axis_index.as_deref())
            .and_then(|indexes| indexes.first().copied())
    }

    /// Persisted Y hints in series order.
    #[must_use]
    pub fn y_axis_hints(&self) -> &[usize] {
        self.chart_settings
            .as_ref()
            .and_then(|settings| settings.y_axis_index.as_deref())
            .unwrap_or(&[])
    }

    pub(crate) fn chart_settings_mut(&mut self) -> &mut ChartSettings {
        self.chart_settings
            .get_or_insert_with(ChartSettings::default)
    }
}

fn default_node_kind() -> String {
    DATA_VISUALIZATION_NODE_KIND.to_owned()
}

/// Whether the hosting insight is being viewed or edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ItemMode {
    #[default]
    View,
    Edit,
}
