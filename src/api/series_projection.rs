use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::core::{ColumnSet, DataPoint, TabularResponse, cell_to_number, cell_to_timestamp};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

/// One Y series ready for a chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub column: usize,
    pub name: String,
    pub points: Vec<DataPoint>,
}

/// How X coordinates of [`ChartSeries`] points were derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum XCoordinateMode {
    /// Unix seconds parsed from the X column.
    Timestamp,
    /// Zero-based row position.
    Ordinal,
}

/// Raw X cell per row.
///
/// `None` without a response or an X selection. Rows too short to hold the
/// column contribute `Null`.
#[must_use]
pub fn project_x_data(response: Option<&TabularResponse>, x: Option<usize>) -> Option<Vec<Value>> {
    let response = response?;
    let x = x?;
    let data = response
        .results
        .iter()
        .map(|row| row.get(x).cloned().unwrap_or(Value::Null))
        .collect::<Vec<_>>();
    trace!(column = x, rows = data.len(), "project x data");
    Some(data)
}

/// Numeric values for every non-empty Y slot, in series order.
///
/// `None` without a response or when no slot exists. Cells that do not
/// coerce to a number become `0.0`.
#[must_use]
pub fn project_y_data(
    response: Option<&TabularResponse>,
    slots: Option<&[Option<usize>]>,
) -> Option<Vec<Vec<f64>>> {
    let response = response?;
    let slots = slots.filter(|slots| !slots.is_empty())?;
    let selected = slots.iter().flatten().copied().collect::<Vec<_>>();

    #[cfg(feature = "parallel-projection")]
    let data = selected
        .par_iter()
        .map(|&column| project_numeric_column(response, column))
        .collect::<Vec<_>>();

    #[cfg(not(feature = "parallel-projection"))]
    let data = selected
        .iter()
        .map(|&column| project_numeric_column(response, column))
        .collect::<Vec<_>>();

    trace!(
        series = data.len(),
        rows = response.row_count(),
        "project y data"
    );
    Some(data)
}

fn project_numeric_column(response: &TabularResponse, column: usize) -> Vec<f64> {
    response
        .results
        .iter()
        .map(|row| row.get(column).map_or(0.0, cell_to_number))
        .collect()
}

/// Resolves X coordinates for every row.
///
/// Timestamps are used only when every X cell parses as one; otherwise rows
/// are placed by position.
#[must_use]
pub fn resolve_x_coordinates(
    response: &TabularResponse,
    x: Option<usize>,
) -> (XCoordinateMode, Vec<f64>) {
    if let Some(x) = x.filter(|_| response.row_count() > 0) {
        let timestamps = response
            .results
            .iter()
            .map(|row| row.get(x).and_then(cell_to_timestamp))
            .collect::<Option<Vec<_>>>();
        if let Some(timestamps) = timestamps {
            return (XCoordinateMode::Timestamp, timestamps);
        }
    }
    let ordinals = (0..response.row_count()).map(|row| row as f64).collect();
    (XCoordinateMode::Ordinal, ordinals)
}

/// Builds renderer-facing series from the current selection.
///
/// Empty Y slots are skipped. Series for columns missing from `columns` are
/// named after their index.
#[must_use]
pub fn project_chart_series(
    response: &TabularResponse,
    columns: &ColumnSet,
    x: Option<usize>,
    slots: &[Option<usize>],
) -> Vec<ChartSeries> {
    let (_, xs) = resolve_x_coordinates(response, x);
    slots
        .iter()
        .flatten()
        .map(|&column| {
            let name = columns
                .get(column)
                .map_or_else(|| format!("column {column}"), |c| c.name.clone());
            let points = xs
                .iter()
                .zip(project_numeric_column(response, column))
                .map(|(&x, y)| DataPoint::new(x, y))
                .collect();
            ChartSeries {
                column,
                name,
                points,
            }
        })
        .collect()
}

/// Min/max Y across all series, or `None` when there are no points.
#[must_use]
pub fn value_domain(series: &[ChartSeries]) -> Option<(f64, f64)> {
    let values = series
        .iter()
        .flat_map(|series| series.points.iter())
        .map(|point| OrderedFloat(point.y));
    let (min, max) = values.fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })?;
    Some((min.into_inner(), max.into_inner()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        XCoordinateMode, project_chart_series, project_y_data, resolve_x_coordinates, value_domain,
    };
    use crate::core::{ColumnDescriptor, ColumnSet, TabularResponse};

    fn response(rows: Vec<Vec<serde_json::Value>>) -> TabularResponse {
        TabularResponse::new(
            vec!["when".to_owned(), "count".to_owned()],
            vec![
                ("when".to_owned(), "Date".to_owned()),
                ("count".to_owned(), "Int64".to_owned()),
            ],
            rows,
        )
    }

    #[test]
    fn empty_slot_list_projects_to_none() {
        let response = response(vec![vec![json!("2024-01-01"), json!(1)]]);
        assert_eq!(project_y_data(Some(&response), Some(&[])), None);
        assert_eq!(project_y_data(Some(&response), None), None);
        assert_eq!(project_y_data(None, Some(&[Some(1)])), None);
        assert_eq!(
            project_y_data(Some(&response), Some(&[None])),
            Some(Vec::new())
        );
    }

    #[test]
    fn x_coordinates_fall_back_to_ordinals() {
        let dated = response(vec![
            vec![json!("1970-01-01"), json!(1)],
            vec![json!("1970-01-02"), json!(2)],
        ]);
        assert_eq!(
            resolve_x_coordinates(&dated, Some(0)),
            (XCoordinateMode::Timestamp, vec![0.0, 86_400.0])
        );

        let mixed = response(vec![
            vec![json!("1970-01-01"), json!(1)],
            vec![json!("soon"), json!(2)],
        ]);
        assert_eq!(
            resolve_x_coordinates(&mixed, Some(0)),
            (XCoordinateMode::Ordinal, vec![0.0, 1.0])
        );
        assert_eq!(
            resolve_x_coordinates(&dated, None),
            (XCoordinateMode::Ordinal, vec![0.0, 1.0])
        );
    }

    #[test]
    fn chart_series_and_domain() {
        let response = response(vec![
            vec![json!("1970-01-01"), json!("-4")],
            vec![json!("1970-01-02"), json!(9)],
        ]);
        let columns = ColumnSet::new(vec![
            ColumnDescriptor::new("when", "Date"),
            ColumnDescriptor::new("count", "Int64"),
        ]);
        let series = project_chart_series(&response, &columns, Some(0), &[Some(1), None, Some(7)]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "count");
        assert_eq!(series[0].points[1].x, 86_400.0);
        assert_eq!(series[1].name, "column 7");
        assert!(series[1].points.iter().all(|point| point.y == 0.0));
        assert_eq!(value_domain(&series), Some((-4.0, 9.0)));
        assert_eq!(value_domain(&[]), None);
    }
}
