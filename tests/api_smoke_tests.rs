use approx::assert_relative_eq;
use query_viz::DefaultAxisPolicy;
use query_viz::api::{ChartDisplayType, DataVisualizationNode, DataVisualizationState};
use query_viz::core::ColumnDescriptor;
use serde_json::json;

fn daily_counts() -> serde_json::Value {
    json!({
        "columns": ["date", "count"],
        "types": [["date", "Date"], ["count", "Int"]],
        "results": [["2024-01-01", "10"], ["2024-01-02", "20"]]
    })
}

#[test]
fn visualization_smoke_flow() {
    let mut state = DataVisualizationState::new(
        DataVisualizationNode::default(),
        DefaultAxisPolicy::default(),
    );
    assert_eq!(state.visualization_type(), ChartDisplayType::ActionsTable);
    assert_eq!(state.x_data(), None);
    assert_eq!(state.y_data(), None);

    state.load_response(Some(&daily_counts()));

    assert_eq!(
        state.columns().as_slice(),
        &[
            ColumnDescriptor::new("date", "Date"),
            ColumnDescriptor::new("count", "Int"),
        ]
    );
    assert_eq!(state.selected_x(), Some(0));
    assert_eq!(state.selected_y(), Some(&[Some(1)][..]));
    assert_eq!(state.y_data(), Some(vec![vec![10.0, 20.0]]));
    assert_eq!(
        state.x_data(),
        Some(vec![json!("2024-01-01"), json!("2024-01-02")])
    );

    let series = state.series();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].name, "count");
    assert_relative_eq!(series[0].points[1].x - series[0].points[0].x, 86_400.0);
    assert_relative_eq!(series[0].points[1].y, 20.0);
}

#[test]
fn non_numeric_y_cells_coerce_to_zero() {
    let mut state = DataVisualizationState::new(
        DataVisualizationNode::default(),
        DefaultAxisPolicy::default(),
    );
    state.load_response(Some(&json!({
        "columns": ["date", "count"],
        "types": [["date", "Date"], ["count", "Int64"]],
        "results": [["2024-01-01", "abc"], ["2024-01-02", 7], ["2024-01-03", null]]
    })));

    assert_eq!(state.y_data(), Some(vec![vec![0.0, 7.0, 0.0]]));
}

#[test]
fn rows_shorter_than_selection_project_placeholders() {
    let mut state = DataVisualizationState::new(
        DataVisualizationNode::default(),
        DefaultAxisPolicy::default(),
    );
    state.load_response(Some(&json!({
        "columns": ["date", "count"],
        "types": [["date", "Date"], ["count", "Int64"]],
        "results": [["2024-01-01"], ["2024-01-02", 3]]
    })));

    assert_eq!(state.y_data(), Some(vec![vec![0.0, 3.0]]));
    state.select_x(5);
    assert_eq!(
        state.x_data(),
        Some(vec![serde_json::Value::Null, serde_json::Value::Null])
    );
}
