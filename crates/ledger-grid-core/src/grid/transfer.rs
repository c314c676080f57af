//! Copy, cut and paste.

use ledger_grid_engine::engine::{CellRange, CellRef};

use super::Grid;
use crate::clipboard::{ClipboardSnapshot, parse_block, serialize_block};

impl Grid {
    /// Copy the latest selection range to the clipboard and keep it as the
    /// in-memory snapshot. Returns false when nothing is selected.
    pub fn copy(&mut self) -> bool {
        let Some(range) = self.selection.latest_range().copied() else {
            return false;
        };
        let values: Vec<Vec<String>> = (range.top()..=range.bottom())
            .map(|row| {
                (range.left()..=range.right())
                    .map(|col| self.raw_input(&CellRef::new(row, col)))
                    .collect()
            })
            .collect();

        if !self.clipboard.set_text(serialize_block(&values)) {
            tracing::debug!("system clipboard unavailable, keeping in-memory snapshot only");
        }
        self.snapshot = Some(ClipboardSnapshot {
            values,
            origin: range.top_left(),
        });
        true
    }

    /// Copy, then clear the copied cells. Returns the number of cells cleared.
    pub fn cut(&mut self) -> usize {
        let Some(range) = self.selection.latest_range().copied() else {
            return 0;
        };
        if !self.copy() {
            return 0;
        }
        let mut cleared = 0;
        for at in range.cells() {
            if !self.raw_input(&at).is_empty() && self.write_cell(at, "") {
                cleared += 1;
            }
        }
        cleared
    }

    /// Paste at the active cell, preferring the clipboard text over the
    /// in-memory snapshot. Values past the grid edge are dropped, read-only
    /// cells are skipped. Returns the number of cells written.
    pub fn paste(&mut self) -> usize {
        let Some(active) = self.selection.active() else {
            return 0;
        };

        let block = match self.clipboard.get_text().map(|text| parse_block(&text)) {
            Some(block) if !block.is_empty() => block,
            _ => {
                tracing::debug!("clipboard empty or unavailable, pasting from snapshot");
                match &self.snapshot {
                    Some(snapshot) => snapshot.values.clone(),
                    None => return 0,
                }
            }
        };

        let bounds = self.bounds();
        let mut written = 0;
        let mut last = active;
        for (r, values) in block.iter().enumerate() {
            let row = active.row + r;
            if row >= bounds.rows {
                break;
            }
            for (c, value) in values.iter().enumerate() {
                let col = active.col + c;
                if col >= bounds.cols {
                    break;
                }
                let at = CellRef::new(row, col);
                last = CellRef::new(last.row.max(row), last.col.max(col));
                if self.write_cell(at, value) {
                    written += 1;
                }
            }
        }

        self.selection.set_range(CellRange::new(active, last));
        tracing::debug!(written, at = %active, "pasted block");
        written
    }
}
