use std::fmt;

use serde_json::Value;
use tracing::{debug, trace};

use crate::core::{ColumnSet, TabularResponse};

use super::{
    AxisSelection, ChartDisplayType, ChartSeries, DataVisualizationNode, DefaultAxisPolicy,
    ItemMode, VisualizationSnapshot, project_chart_series, project_x_data, project_y_data,
};

/// Callback receiving the full updated query whenever persisted chart
/// configuration changes.
pub type QuerySetterFn = Box<dyn FnMut(&DataVisualizationNode) + 'static>;

/// Axis-selection state for one visualization instance.
///
/// Owns the persisted query, the current response snapshot, the derived
/// columns and the user's axis choices. All transitions are synchronous.
/// User-facing mutations that alter the persisted configuration report the
/// new query through the registered setter; response-driven resets and
/// defaults do not.
pub struct DataVisualizationState {
    query: DataVisualizationNode,
    policy: DefaultAxisPolicy,
    visualization_type: ChartDisplayType,
    response: Option<TabularResponse>,
    columns: ColumnSet,
    selection: AxisSelection,
    item_mode: ItemMode,
    showing_cached_results: bool,
    query_setter: Option<QuerySetterFn>,
}

impl fmt::Debug for DataVisualizationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataVisualizationState")
            .field("query", &self.query)
            .field("visualization_type", &self.visualization_type)
            .field("columns", &self.columns)
            .field("selection", &self.selection)
            .field("item_mode", &self.item_mode)
            .field("showing_cached_results", &self.showing_cached_results)
            .field("has_query_setter", &self.query_setter.is_some())
            .finish_non_exhaustive()
    }
}

impl DataVisualizationState {
    /// Restores display type and axis hints from a persisted query.
    ///
    /// The first `xAxisIndex` entry becomes the X selection and every
    /// `yAxisIndex` entry becomes one Y series.
    #[must_use]
    pub fn new(query: DataVisualizationNode, policy: DefaultAxisPolicy) -> Self {
        let visualization_type = query.display.unwrap_or_default();
        let mut selection = AxisSelection::new();
        if let Some(x) = query.x_axis_hint() {
            selection.select_x(x);
        }
        for &y in query.y_axis_hints() {
            selection.add_y_series(Some(y));
        }
        debug!(
            ?visualization_type,
            x = ?selection.x(),
            y_series = selection.series_count(),
            "restore visualization state"
        );
        Self {
            query,
            policy,
            visualization_type,
            response: None,
            columns: ColumnSet::default(),
            selection,
            item_mode: ItemMode::default(),
            showing_cached_results: false,
            query_setter: None,
        }
    }

    /// Seeds the state with previously cached results instead of waiting for
    /// a fresh load.
    #[must_use]
    pub fn with_cached_results(mut self, cached_results: &Value) -> Self {
        self.showing_cached_results = true;
        self.load_response(Some(cached_results));
        self
    }

    #[must_use]
    pub fn with_item_mode(mut self, item_mode: ItemMode) -> Self {
        self.item_mode = item_mode;
        self
    }

    pub fn set_query_setter<F>(&mut self, setter: F)
    where
        F: FnMut(&DataVisualizationNode) + 'static,
    {
        self.query_setter = Some(Box::new(setter));
    }

    pub fn clear_query_setter(&mut self) {
        self.query_setter = None;
    }

    pub fn set_item_mode(&mut self, item_mode: ItemMode) {
        self.item_mode = item_mode;
    }

    /// Loads a raw response payload. Malformed or missing payloads count as
    /// "no columns".
    pub fn load_response(&mut self, payload: Option<&Value>) {
        let response = payload.and_then(TabularResponse::from_json_value);
        self.load_tabular_response(response);
    }

    /// Replaces the response snapshot and re-derives columns.
    ///
    /// A change of a previously non-empty column set clears both axes. When
    /// a response is present and nothing is selected, the default policy
    /// picks the axes. The owned query follows any resulting selection
    /// change, but the setter is not called.
    pub fn load_tabular_response(&mut self, response: Option<TabularResponse>) {
        let columns = response
            .as_ref()
            .map(TabularResponse::column_set)
            .unwrap_or_default();
        let previous = std::mem::replace(&mut self.columns, columns);
        let selection_before = self.selection.clone();
        self.response = response;
        debug!(
            columns = self.columns.len(),
            rows = self.response.as_ref().map_or(0, TabularResponse::row_count),
            "load response"
        );

        if !previous.is_empty() && previous != self.columns {
            debug!("column set changed, clearing axis selection");
            self.selection.clear();
        }

        if self.response.is_some() && self.selection.is_empty() {
            self.apply_default_axes();
        }

        if self.selection != selection_before {
            self.write_chart_settings();
        }
    }

    fn apply_default_axes(&mut self) {
        let defaults = self.policy.resolve(&self.columns);
        if let Some(y) = defaults.y {
            self.selection.add_y_series(Some(y));
        }
        if let Some(x) = defaults.x {
            self.selection.select_x(x);
        }
        debug!(x = ?defaults.x, y = ?defaults.y, "apply default axes");
    }

    /// Replaces the active chart variant.
    pub fn set_visualization_type(&mut self, visualization_type: ChartDisplayType) {
        trace!(?visualization_type, "set visualization type");
        self.visualization_type = visualization_type;
        self.query.display = Some(visualization_type);
        self.notify_query_changed();
    }

    /// Sets or overwrites the X column.
    pub fn select_x(&mut self, column: usize) {
        if self.selection.select_x(column) {
            self.sync_chart_settings();
        }
    }

    /// Appends a Y series slot, optionally pre-filled.
    pub fn add_y_series(&mut self, column: Option<usize>) {
        self.selection.add_y_series(column);
        if column.is_some() {
            self.sync_chart_settings();
        }
    }

    /// Points one Y series at a column. Missing series are ignored.
    pub fn update_y_series(&mut self, series: usize, column: usize) {
        if self.selection.update_y_series(series, column) {
            self.sync_chart_settings();
        }
    }

    /// Removes one Y series; the sole series is replaced by an empty slot.
    pub fn delete_y_series(&mut self, series: usize) {
        let before = self.selection.selected_y_columns();
        if self.selection.delete_y_series(series)
            && before != self.selection.selected_y_columns()
        {
            self.sync_chart_settings();
        }
    }

    /// Resets both axes.
    pub fn clear_axes(&mut self) {
        let had_persisted_axes =
            self.selection.x().is_some() || !self.selection.selected_y_columns().is_empty();
        if self.selection.clear() && had_persisted_axes {
            self.sync_chart_settings();
        }
    }

    /// Replaces the owned query and forwards it to the setter unchanged.
    pub fn set_query(&mut self, query: DataVisualizationNode) {
        self.query = query;
        self.notify_query_changed();
    }

    fn sync_chart_settings(&mut self) {
        self.write_chart_settings();
        self.notify_query_changed();
    }

    /// Mirrors the selection into the owned query. Empty Y slots are not
    /// persisted.
    fn write_chart_settings(&mut self) {
        let x = self.selection.x();
        let y = self.selection.selected_y_columns();
        let settings = self.query.chart_settings_mut();
        settings.x_axis_index = x.map(|x| vec![x]);
        settings.y_axis_index = (!y.is_empty()).then_some(y);
    }

    fn notify_query_changed(&mut self) {
        if let Some(setter) = self.query_setter.as_mut() {
            trace!("notify query setter");
            setter(&self.query);
        }
    }

    /// Current query, including axis changes made by response loads.
    #[must_use]
    pub fn query(&self) -> &DataVisualizationNode {
        &self.query
    }

    #[must_use]
    pub fn policy(&self) -> &DefaultAxisPolicy {
        &self.policy
    }

    #[must_use]
    pub fn visualization_type(&self) -> ChartDisplayType {
        self.visualization_type
    }

    #[must_use]
    pub fn response(&self) -> Option<&TabularResponse> {
        self.response.as_ref()
    }

    #[must_use]
    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    #[must_use]
    pub fn selection(&self) -> &AxisSelection {
        &self.selection
    }

    #[must_use]
    pub fn selected_x(&self) -> Option<usize> {
        self.selection.x()
    }

    #[must_use]
    pub fn selected_y(&self) -> Option<&[Option<usize>]> {
        self.selection.y_slots()
    }

    #[must_use]
    pub fn item_mode(&self) -> ItemMode {
        self.item_mode
    }

    #[must_use]
    pub fn show_editing_ui(&self) -> bool {
        self.item_mode == ItemMode::Edit
    }

    #[must_use]
    pub fn is_showing_cached_results(&self) -> bool {
        self.showing_cached_results
    }

    /// Raw X values, one per row.
    #[must_use]
    pub fn x_data(&self) -> Option<Vec<Value>> {
        project_x_data(self.response.as_ref(), self.selection.x())
    }

    /// Numeric values, one vector per selected Y series.
    #[must_use]
    pub fn y_data(&self) -> Option<Vec<Vec<f64>>> {
        project_y_data(self.response.as_ref(), self.selection.y_slots())
    }

    /// Renderer-facing series; empty without a response.
    #[must_use]
    pub fn series(&self) -> Vec<ChartSeries> {
        match (self.response.as_ref(), self.selection.y_slots()) {
            (Some(response), Some(slots)) => {
                project_chart_series(response, &self.columns, self.selection.x(), slots)
            }
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> VisualizationSnapshot {
        VisualizationSnapshot {
            visualization_type: self.visualization_type,
            columns: self.columns.as_slice().to_vec(),
            selected_x: self.selection.x(),
            selected_y: self.selection.y_slots().map(<[Option<usize>]>::to_vec),
            x_data: self.x_data(),
            y_data: self.y_data(),
        }
    }
}
