//! ledger_grid - headless data grid for accounting screens.
//!
//! The model lives in `ledger-grid-core` (rows, columns, selection, drafts,
//! clipboard) on top of `ledger-grid-engine` (A1 addressing, locale-aware
//! numbers, formulas, fill patterns). This crate is what a host links
//! against: the re-exported API plus config loading, the OS clipboard and
//! tracing setup.

pub mod config;
pub mod error;
pub mod logging;

#[cfg(feature = "system-clipboard")]
pub mod clipboard;

#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
pub use config::{load_config, parse_config, read_config};
pub use error::ConfigError;

pub use ledger_grid_core::{
    Align, CellKey, CellRange, CellRef, CellValue, ClipboardProvider, ClipboardSnapshot, ColId,
    ColumnDef, ColumnFilter, ColumnType, DataSet, Direction, FilterOp, Grid, GridBounds,
    GridCallbacks, GridConfig, GridError, InMemoryClipboard, InputCapture, MenuCommand,
    MenuExtension, MenuItem, Modifiers, NoopCallbacks, NumericLocale, Record, RowId, Scalar,
    SelectionStats, SortDirection, SourceRef, record,
};
pub use ledger_grid_core::{callbacks, menu, model, selection, validation};
pub use ledger_grid_engine::engine;
