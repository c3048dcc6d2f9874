use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::ColumnDescriptor;

use super::ChartDisplayType;

/// Serializable view of a visualization's derived state, used by regression
/// tests and debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationSnapshot {
    pub visualization_type: ChartDisplayType,
    pub columns: Vec<ColumnDescriptor>,
    pub selected_x: Option<usize>,
    pub selected_y: Option<Vec<Option<usize>>>,
    pub x_data: Option<Vec<Value>>,
    pub y_data: Option<Vec<Vec<f64>>>,
}
