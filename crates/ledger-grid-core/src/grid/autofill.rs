use ledger_grid_engine::engine::fill::fill_target_range;
use ledger_grid_engine::engine::{CellRef, fill_direction, fill_series};

use super::Grid;
use crate::error::{GridError, Result};

impl Grid {
    /// Fill from the selection's bounding box towards `target`.
    ///
    /// Each source column (vertical fill) or row (horizontal fill) is
    /// continued on its own. Values go through the normal edit path, so
    /// read-only cells are skipped. Afterwards the selection covers source
    /// and filled cells. Returns the number of cells written.
    pub fn fill(&mut self, target: CellRef) -> Result<usize> {
        if !self.bounds().contains(&target) {
            return Err(GridError::OutOfBounds(target));
        }
        let Some(source) = self.selection.bounding_range() else {
            return Ok(0);
        };
        let Some(direction) = fill_direction(&source, &target) else {
            return Ok(0);
        };
        let filled = fill_target_range(&source, direction, &target);

        let mut written = 0;
        if direction.is_vertical() {
            let count = filled.row_count();
            for col in source.left()..=source.right() {
                let values: Vec<String> = (source.top()..=source.bottom())
                    .map(|row| self.raw_input(&CellRef::new(row, col)))
                    .collect();
                for (k, value) in fill_series(&values, count, direction, &self.parser)
                    .iter()
                    .enumerate()
                {
                    let row = if direction.is_forward() {
                        source.bottom() + 1 + k
                    } else {
                        source.top() - 1 - k
                    };
                    written += usize::from(self.write_cell(CellRef::new(row, col), value));
                }
            }
        } else {
            let count = filled.col_count();
            for row in source.top()..=source.bottom() {
                let values: Vec<String> = (source.left()..=source.right())
                    .map(|col| self.raw_input(&CellRef::new(row, col)))
                    .collect();
                for (k, value) in fill_series(&values, count, direction, &self.parser)
                    .iter()
                    .enumerate()
                {
                    let col = if direction.is_forward() {
                        source.right() + 1 + k
                    } else {
                        source.left() - 1 - k
                    };
                    written += usize::from(self.write_cell(CellRef::new(row, col), value));
                }
            }
        }

        let union = source.union(&filled);
        self.selection.set_range(union);
        tracing::debug!(?direction, written, range = %union, "filled");
        Ok(written)
    }
}
