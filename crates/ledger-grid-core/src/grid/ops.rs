//! Mutations: data/column refresh, filters, edits, drafts, commits.

use ledger_grid_engine::engine::{CellRef, CellValue, Scalar, is_formula};
use std::collections::HashSet;

use super::Grid;
use crate::error::{GridError, Result};
use crate::model::{
    ColumnDef, ColumnFilter, ColumnType, DataSet, FilterOp, Record, RowId, SortDirection, SortKey,
};
use crate::validation::validate;

impl Grid {
    /// Replace the data set with a fresh snapshot from the data provider.
    ///
    /// Scratch values and error annotations of rows that no longer exist are
    /// dropped; everything else survives the refresh.
    pub fn set_data(&mut self, data: DataSet) {
        tracing::debug!(records = data.len(), "data refreshed");
        self.data = data;
        self.rebuild();

        let mut live: HashSet<RowId> = (0..self.data.len())
            .map(|idx| RowId::Real(self.data.key_of(idx)))
            .collect();
        live.extend(self.rows.ids().filter(|id| id.is_draft()).cloned());
        self.drafts.retain_rows(&live);
        self.errors.retain(|key, _| live.contains(&key.row));
    }

    pub fn set_columns(&mut self, defs: Vec<ColumnDef>) {
        tracing::debug!(columns = defs.len(), "columns replaced");
        self.column_defs = defs;
        self.rebuild();
    }

    fn check_field(&self, field: &str) -> Result<()> {
        if self.column_defs.iter().any(|d| d.field == field) {
            Ok(())
        } else {
            Err(GridError::UnknownField(field.to_string()))
        }
    }

    /// Set the filter of `field`, replacing whatever filter it had.
    pub fn set_filter(&mut self, field: &str, filter: ColumnFilter) -> Result<()> {
        self.check_field(field)?;
        match filter {
            ColumnFilter::Values(values) => self.filters.set_values(field, values),
            ColumnFilter::Condition { op, value } => self.filters.set_condition(field, op, &value),
        }
        self.rebuild();
        Ok(())
    }

    pub fn set_filter_values<I, S>(&mut self, field: &str, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.set_filter(field, ColumnFilter::Values(values))
    }

    pub fn set_filter_condition(&mut self, field: &str, op: FilterOp, value: &str) -> Result<()> {
        self.set_filter(
            field,
            ColumnFilter::Condition {
                op,
                value: value.to_string(),
            },
        )
    }

    pub fn filter(&self, field: &str) -> Option<&ColumnFilter> {
        self.filters.get(field)
    }

    pub fn clear_filter(&mut self, field: &str) {
        self.filters.clear(field);
        self.rebuild();
    }

    pub fn clear_all_filters(&mut self) {
        self.filters.clear_all();
        self.rebuild();
    }

    /// Sort by one field; replaces any previous sort.
    pub fn set_sort(&mut self, field: &str, direction: SortDirection) -> Result<()> {
        self.check_field(field)?;
        self.sort = Some(SortKey::new(field, direction));
        self.rebuild();
        Ok(())
    }

    pub fn sort(&self) -> Option<&SortKey> {
        self.sort.as_ref()
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.rebuild();
    }

    /// Edit one cell.
    ///
    /// Persisted cells are reported through `cell_changed` and keep showing
    /// the old value until the host refreshes the data; every other cell is
    /// written to the scratch map. Validation messages are recorded but never
    /// block the write.
    pub fn edit_cell(&mut self, at: CellRef, input: &str) -> Result<()> {
        let key = self.cell_key(&at).ok_or(GridError::OutOfBounds(at))?;
        if !self.is_editable(&at) {
            return Err(GridError::ReadOnly(at));
        }

        if let Some(def) = self.column_def(at.col) {
            match validate(def, input, &self.parser) {
                Some(message) => {
                    self.errors.insert(key.clone(), message);
                }
                None => {
                    self.errors.remove(&key);
                }
            }
        }

        if key.is_persisted()
            && let (Some(row_key), Some(field)) = (key.row.real_key(), key.col.field())
        {
            tracing::debug!(row = row_key, field, "persisted cell changed");
            self.callbacks.cell_changed(row_key, field, input);
        } else {
            tracing::trace!(cell = %at, "scratch cell changed");
            self.drafts.set(key, input);
        }
        Ok(())
    }

    /// Write through the edit path, skipping cells that cannot be written.
    /// Returns whether the cell was written.
    pub(crate) fn write_cell(&mut self, at: CellRef, input: &str) -> bool {
        match self.edit_cell(at, input) {
            Ok(()) => true,
            Err(e) => {
                tracing::trace!(%e, "skipped cell");
                false
            }
        }
    }

    /// Clear every editable cell covered by the selection.
    /// Returns the number of cells cleared.
    pub fn clear_cells(&mut self) -> usize {
        let mut cleared = 0;
        for at in self.selection.covered_cells() {
            if !self.raw_input(&at).is_empty() && self.write_cell(at, "") {
                cleared += 1;
            }
        }
        cleared
    }

    /// Add a draft row below the existing ones; returns its visual index.
    pub fn insert_draft_row(&mut self) -> usize {
        self.drafts.add_row();
        self.rebuild();
        self.rows.len() - 1
    }

    /// Add a draft column after the existing ones; returns its visual index.
    pub fn insert_draft_column(&mut self) -> usize {
        let id = self.drafts.add_column();
        self.rebuild();
        self.columns.index_of(&id).unwrap_or(self.columns.len() - 1)
    }

    pub fn is_commit_eligible(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|r| self.drafts.is_commit_eligible(&r.id, &self.columns))
    }

    /// Hand a draft row's real-column values to `commit_row`.
    ///
    /// Number columns carry numbers, formulas carry their result. The draft
    /// row stays as it is; the committed record shows up with the next
    /// data refresh.
    pub fn request_commit(&mut self, row: usize) -> Result<()> {
        let row_id = match self.rows.get(row) {
            Some(r) if r.is_draft() => r.id.clone(),
            _ => return Err(GridError::NotDraftRow(row)),
        };

        let staged = self.drafts.staged_values(&row_id, &self.columns);
        if staged.is_empty() {
            return Err(GridError::NotCommitEligible(row));
        }

        let mut record = Record::new();
        for (col, raw) in staged {
            let Some(def) = self.column_def(col) else {
                continue;
            };
            let at = CellRef::new(row, col);
            let value = if is_formula(&raw) {
                match self.numeric_value(&at) {
                    Some(n) => Scalar::Number(n),
                    None => Scalar::Text(self.display_value(&at)),
                }
            } else if def.column_type == ColumnType::Number
                && let Some(n) = self.parser.parse(&raw)
            {
                Scalar::Number(n)
            } else {
                Scalar::Text(raw)
            };
            record.insert(def.field.clone(), CellValue::Plain(value));
        }

        tracing::debug!(row, fields = record.len(), "committing draft row");
        self.callbacks.commit_row(record);
        Ok(())
    }

    /// Set a column width override, clamped to the configured minimum.
    pub fn set_column_width(&mut self, col: usize, width: u32) -> Result<()> {
        let id = self
            .columns
            .get(col)
            .map(|c| c.id.clone())
            .ok_or(GridError::ColumnOutOfBounds(col))?;
        self.column_widths
            .insert(id, width.max(self.config.min_column_width));
        Ok(())
    }

    /// Drop a width override, going back to the descriptor width.
    pub fn reset_column_width(&mut self, col: usize) {
        if let Some(column) = self.columns.get(col) {
            self.column_widths.remove(&column.id);
        }
    }
}
