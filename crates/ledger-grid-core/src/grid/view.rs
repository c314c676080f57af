//! Read-side queries: cell values, display text, editability.

use ledger_grid_engine::engine::dates::parse_date;
use ledger_grid_engine::engine::{
    CellRef, CellSource, CellValue, Scalar, evaluate, evaluate_display, is_formula,
};

use super::Grid;
use crate::model::{CellKey, ColumnDef, ColumnType, Record, distinct_values};

impl Grid {
    /// Stable identity of the cell at a visual position.
    pub fn cell_key(&self, at: &CellRef) -> Option<CellKey> {
        let row = self.rows.get(at.row)?;
        let col = self.columns.get(at.col)?;
        Some(CellKey::new(row.id.clone(), col.id.clone()))
    }

    /// Backing record of a visual row; None for draft rows.
    pub fn record_at(&self, row: usize) -> Option<&Record> {
        let idx = self.rows.get(row)?.record_index?;
        self.data.records.get(idx)
    }

    /// Record of the active cell's row.
    pub fn active_record(&self) -> Option<&Record> {
        self.record_at(self.selection.active()?.row)
    }

    pub(crate) fn column_def(&self, col: usize) -> Option<&ColumnDef> {
        self.columns.get(col)?.def.as_ref()
    }

    /// Current value: the record field for persisted cells, the scratch
    /// entry otherwise. None when out of bounds or empty.
    pub fn cell_value(&self, at: &CellRef) -> Option<CellValue> {
        let key = self.cell_key(at)?;
        if key.is_persisted() {
            let field = key.col.field()?;
            return self.record_at(at.row)?.get(field).cloned();
        }
        let raw = self.drafts.get(&key)?;
        Some(CellValue::Plain(Scalar::from_input(&raw, &self.parser)))
    }

    /// Text shown in the editor: formulas as typed, values as plain text.
    pub fn raw_input(&self, at: &CellRef) -> String {
        let Some(key) = self.cell_key(at) else {
            return String::new();
        };
        if key.is_persisted() {
            return self
                .cell_value(at)
                .map(|v| v.to_input_string())
                .unwrap_or_default();
        }
        self.drafts.get(&key).unwrap_or_default()
    }

    /// Text shown in the cell: formulas evaluated, everything else as typed.
    pub fn display_value(&self, at: &CellRef) -> String {
        let raw = self.raw_input(at);
        if is_formula(&raw) {
            evaluate_display(&raw, at, self, &self.parser)
        } else {
            raw
        }
    }

    /// Numeric value of a cell: the formula result, or the value itself when
    /// it is (or parses as) a number.
    pub fn numeric_value(&self, at: &CellRef) -> Option<f64> {
        let raw = self.raw_input(at);
        if is_formula(&raw) {
            return evaluate(&raw, at, self, &self.parser).ok();
        }
        self.cell_value(at)?.scalar().as_number(&self.parser)
    }

    /// Display text after column formatting: the column formatter when set,
    /// locale grouping for number columns, the display value otherwise.
    pub fn formatted_value(&self, at: &CellRef) -> String {
        let display = self.display_value(at);
        let Some(def) = self.column_def(at.col) else {
            return display;
        };
        if let Some(formatter) = &def.formatter {
            return formatter(&display);
        }
        if def.column_type == ColumnType::Number
            && let Some(n) = self.numeric_value(at)
        {
            return self.parser.format_auto(n);
        }
        display
    }

    pub fn cell_error(&self, at: &CellRef) -> Option<&str> {
        let key = self.cell_key(at)?;
        self.errors.get(&key).map(String::as_str)
    }

    /// Rows dated on or before the configured cutoff are locked.
    pub fn is_row_locked(&self, row: usize) -> bool {
        let (Some(cutoff), Some(field)) = (self.config.locked_before, &self.config.date_field)
        else {
            return false;
        };
        self.record_at(row)
            .and_then(|r| r.get(field))
            .and_then(|v| parse_date(&v.to_input_string()))
            .is_some_and(|date| date <= cutoff)
    }

    pub fn is_editable(&self, at: &CellRef) -> bool {
        let Some(column) = self.columns.get(at.col) else {
            return false;
        };
        if at.row >= self.rows.len() || !column.is_editable() || self.is_row_locked(at.row) {
            return false;
        }
        !self.cell_value(at).is_some_and(|v| v.is_traceable())
    }

    pub fn column_label(&self, col: usize) -> String {
        self.columns.label(col)
    }

    pub fn column_width(&self, col: usize) -> u32 {
        self.columns
            .width(col, &self.column_widths, self.config.default_column_width)
    }

    /// Distinct values of `field` across the unfiltered data.
    pub fn distinct_values(&self, field: &str) -> Vec<String> {
        distinct_values(&self.data, field)
    }
}

impl CellSource for Grid {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn col_count(&self) -> usize {
        self.columns.len()
    }

    fn is_draft_column(&self, col: usize) -> bool {
        self.columns.is_draft(col)
    }

    fn is_persisted(&self, at: &CellRef) -> bool {
        self.cell_key(at).is_some_and(|k| k.is_persisted())
    }

    fn value_at(&self, at: &CellRef) -> Option<CellValue> {
        self.cell_value(at)
    }
}
