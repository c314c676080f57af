//! Row and column models, rebuilt from scratch on every input change.

mod column;
mod filter;
mod ids;
mod record;
mod row;

pub use column::{Align, Column, ColumnDef, ColumnModel, ColumnType, Formatter, Validator};
pub use filter::{
    ColumnFilter, FilterOp, FilterSet, SortDirection, SortKey, distinct_values, filter_and_sort,
};
pub use ids::{CellKey, ColId, RowId};
pub use record::{DataSet, Record, record};
pub use row::{Row, RowModel, build_row_model};
