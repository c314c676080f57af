//! Pointer and keyboard input, context menu, row activation.
//!
//! Every pointer event goes through [`InputCapture`]: the gesture that
//! started on `pointer_down`, `begin_fill` or `begin_column_resize` owns
//! the following moves until `pointer_up` or `cancel_capture`.

use ledger_grid_engine::engine::CellRef;

use super::Grid;
use crate::error::{GridError, Result};
use crate::input::InputCapture;
use crate::menu::{MenuCommand, MenuItem, build_menu};
use crate::selection::{Direction, Modifiers, SelectionStats};

impl Grid {
    /// Press on a cell: start (or extend, or add) a selection drag.
    pub fn pointer_down(&mut self, at: CellRef, modifiers: Modifiers) {
        if !self.bounds().contains(&at) {
            return;
        }
        self.selection.pointer_down(at, modifiers);
        self.capture = InputCapture::Selecting;
        self.notify_row_selection();
    }

    /// The pointer entered a cell. Returns true when the selection or the
    /// fill target changed.
    pub fn pointer_enter(&mut self, at: CellRef) -> bool {
        if !self.bounds().contains(&at) {
            return false;
        }
        match &mut self.capture {
            InputCapture::Selecting => self.selection.pointer_enter(at),
            InputCapture::Filling { target, .. } => {
                let changed = *target != Some(at);
                *target = Some(at);
                changed
            }
            InputCapture::Idle | InputCapture::ResizingColumn { .. } => false,
        }
    }

    /// Horizontal pointer movement; only meaningful while resizing a column.
    pub fn pointer_move(&mut self, x: f32) {
        if let InputCapture::ResizingColumn {
            col,
            start_x,
            start_width,
        } = &self.capture
        {
            let width =
                InputCapture::resized_width(*start_x, *start_width, x, self.config.min_column_width);
            self.column_widths.insert(col.clone(), width);
        }
    }

    /// Release: finishes the current gesture and returns to idle. A fill
    /// gesture performs the fill here; the return value is the number of
    /// cells it wrote.
    pub fn pointer_up(&mut self) -> usize {
        let capture = std::mem::take(&mut self.capture);
        self.selection.pointer_up();
        match capture {
            InputCapture::Filling {
                target: Some(target),
                ..
            } => match self.fill(target) {
                Ok(written) => written,
                Err(e) => {
                    tracing::debug!(%e, "fill gesture ignored");
                    0
                }
            },
            _ => 0,
        }
    }

    /// Abandon the current gesture without applying it.
    pub fn cancel_capture(&mut self) {
        self.selection.pointer_up();
        self.capture = InputCapture::Idle;
    }

    /// Grab the fill handle of the current selection.
    pub fn begin_fill(&mut self) -> bool {
        let Some(source) = self.selection.bounding_range() else {
            return false;
        };
        self.selection.pointer_up();
        self.capture = InputCapture::Filling {
            source,
            target: None,
        };
        true
    }

    /// Grab the right edge of column `col` at pointer position `x`.
    pub fn begin_column_resize(&mut self, col: usize, x: f32) -> Result<()> {
        let id = self
            .columns
            .get(col)
            .map(|c| c.id.clone())
            .ok_or(GridError::ColumnOutOfBounds(col))?;
        self.capture = InputCapture::ResizingColumn {
            col: id,
            start_x: x,
            start_width: self.column_width(col),
        };
        Ok(())
    }

    pub fn key_press(&mut self, direction: Direction, shift: bool) {
        let bounds = self.bounds();
        self.selection.key_press(direction, shift, bounds);
        self.notify_row_selection();
    }

    pub fn header_click(&mut self, col: usize, modifiers: Modifiers) {
        if col >= self.columns.len() {
            return;
        }
        self.selection.header_click(col, modifiers, self.rows.len());
        self.notify_row_selection();
    }

    pub fn select_all(&mut self) {
        let bounds = self.bounds();
        self.selection.select_all(bounds);
        self.notify_row_selection();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.notify_row_selection();
    }

    /// Double click / Enter on the active row.
    pub fn activate(&mut self) {
        let record = self
            .selection
            .active()
            .and_then(|a| self.rows.get(a.row))
            .and_then(|r| r.record_index)
            .and_then(|idx| self.data.records.get(idx));
        self.callbacks.row_activated(record);
    }

    /// Sum/count/average over the selected cells.
    pub fn selection_stats(&self) -> SelectionStats {
        let mut stats = SelectionStats::default();
        for at in self.selection.covered_cells() {
            if self.raw_input(&at).trim().is_empty() {
                continue;
            }
            stats.add_cell(self.numeric_value(&at));
        }
        stats
    }

    /// Context menu entries for a right click on `row` (None for the header
    /// or empty space).
    pub fn context_menu(&self, row: Option<usize>) -> Vec<MenuItem> {
        let record = row.and_then(|r| self.record_at(r));
        build_menu(&self.menu_extensions, record)
    }

    /// Run entry `index` of `context_menu(row)`.
    pub fn invoke_menu(&mut self, index: usize, row: Option<usize>) -> Result<()> {
        let item = self
            .context_menu(row)
            .into_iter()
            .nth(index)
            .ok_or(GridError::UnknownMenuEntry(index))?;
        if !item.enabled {
            return Err(GridError::MenuEntryDisabled(item.label));
        }

        match item.command {
            MenuCommand::InsertRow => {
                self.insert_draft_row();
            }
            MenuCommand::InsertColumn => {
                self.insert_draft_column();
            }
            MenuCommand::Extension(ext) => {
                let action = self.menu_extensions[ext].action.clone();
                action(row.and_then(|r| self.record_at(r)));
            }
        }
        Ok(())
    }
}
