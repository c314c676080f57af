//! Host collaborators.
//!
//! The grid never persists anything itself. Edits to persisted cells, draft
//! row commits and selection changes are reported through [`GridCallbacks`].
//! Implementations must return quickly: anything slow (a REST call, a
//! database write) is spawned by the host, and its result comes back as a
//! fresh [`DataSet`](crate::DataSet) through `Grid::set_data`.

use crate::model::Record;

pub trait GridCallbacks {
    /// An edit to a cell whose row and column are both real.
    fn cell_changed(&mut self, _row_key: &str, _field: &str, _new_value: &str) {}

    /// A commit-eligible draft row, flattened to its real-column values.
    /// Rejections are the host's to handle; the grid does not observe them.
    fn commit_row(&mut self, _record: Record) {}

    /// The active cell moved to another row (None for draft rows or no row).
    fn row_selected(&mut self, _record: Option<&Record>) {}

    /// The active row was activated (double click / Enter).
    fn row_activated(&mut self, _record: Option<&Record>) {}
}

/// Callbacks that ignore everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopCallbacks;

impl GridCallbacks for NoopCallbacks {}
