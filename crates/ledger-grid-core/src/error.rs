//! Error types for the grid model.

use ledger_grid_engine::engine::CellRef;
use thiserror::Error;

/// Errors returned by grid operations. None of these are fatal: the grid
/// state is unchanged when an operation fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Cell {0} is outside the grid")]
    OutOfBounds(CellRef),

    #[error("Column {} is outside the grid", .0 + 1)]
    ColumnOutOfBounds(usize),

    #[error("Cell {0} is read-only")]
    ReadOnly(CellRef),

    #[error("Row {} is not a draft row", .0 + 1)]
    NotDraftRow(usize),

    #[error("Draft row {} has no values to commit", .0 + 1)]
    NotCommitEligible(usize),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("No context menu entry at index {0}")]
    UnknownMenuEntry(usize),

    #[error("Context menu entry '{0}' is disabled")]
    MenuEntryDisabled(String),
}

pub type Result<T> = std::result::Result<T, GridError>;
