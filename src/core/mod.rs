pub mod primitives;
pub mod response;
pub mod types;

pub use primitives::{cell_to_number, cell_to_timestamp};
pub use response::TabularResponse;
pub use types::{ColumnDescriptor, ColumnKind, ColumnSet, DataPoint};
