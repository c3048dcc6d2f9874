mod axis_selection;
mod default_axis_policy;
mod persistence;
mod query;
mod series_projection;
mod snapshot;
mod visualization_state;

pub use axis_selection::{AxisSelection, YSeriesSlots};
pub use default_axis_policy::{DefaultAxes, DefaultAxisPolicy};
pub use persistence::{PERSISTED_VISUALIZATION_SCHEMA_V1, PersistedVisualizationV1};
pub use query::{
    ChartDisplayType, ChartSettings, DATA_VISUALIZATION_NODE_KIND, DataVisualizationNode, ItemMode,
};
pub use series_projection::{
    ChartSeries, XCoordinateMode, project_chart_series, project_x_data, project_y_data,
    resolve_x_coordinates, value_domain,
};
pub use snapshot::VisualizationSnapshot;
pub use visualization_state::{DataVisualizationState, QuerySetterFn};
