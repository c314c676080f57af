//! ledger-grid-core - UI-agnostic data grid model.
//!
//! Rows and columns come from the host, visual order comes from the
//! filter/sort pipeline, and edits either go back to the host (cells whose
//! row and column are both real) or stay in draft staging.

pub mod callbacks;
pub mod clipboard;
pub mod config;
pub mod draft;
pub mod error;
pub mod grid;
pub mod input;
pub mod menu;
pub mod model;
pub mod selection;
pub mod validation;

pub use callbacks::{GridCallbacks, NoopCallbacks};
pub use clipboard::{ClipboardProvider, ClipboardSnapshot, InMemoryClipboard};
pub use config::GridConfig;
pub use error::{GridError, Result};
pub use grid::Grid;
pub use input::InputCapture;
pub use menu::{MenuCommand, MenuExtension, MenuItem};
pub use model::{
    Align, CellKey, ColId, ColumnDef, ColumnFilter, ColumnType, DataSet, FilterOp, Record, RowId,
    SortDirection, record,
};
pub use selection::{Direction, GridBounds, Modifiers, SelectionStats};

pub use ledger_grid_engine::engine::{CellRange, CellRef, CellValue, NumericLocale, Scalar, SourceRef};
