//! query-viz: axis-selection state for charts over tabular query results.
//!
//! The crate is headless. It derives column metadata from a query response,
//! tracks which columns feed the X axis and the Y series, projects those
//! selections into chart-ready data, and reports configuration changes to the
//! host through an explicit callback.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{DataVisualizationNode, DataVisualizationState, DefaultAxisPolicy};
pub use error::{QueryVizError, QueryVizResult};
