//! Active cell and multi-range selection.
//!
//! All coordinates are visual. The engine knows nothing about rows or
//! columns beyond the bounds it is handed; the grid re-clamps it after every
//! rebuild.

use ledger_grid_engine::engine::{CellRange, CellRef, NumericLocaleParser};
use std::collections::BTreeSet;

/// Modifier keys held during a pointer action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    /// Ctrl on Windows/Linux, Cmd on macOS.
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Visible grid dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridBounds {
    pub rows: usize,
    pub cols: usize,
}

impl GridBounds {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    fn clamp(&self, cell: CellRef) -> CellRef {
        CellRef::new(
            cell.row.min(self.rows.saturating_sub(1)),
            cell.col.min(self.cols.saturating_sub(1)),
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionEngine {
    active: Option<CellRef>,
    /// In the order they were added; the last one is the one being extended.
    ranges: Vec<CellRange>,
    dragging: bool,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<CellRef> {
        self.active
    }

    pub fn ranges(&self) -> &[CellRange] {
        &self.ranges
    }

    pub fn latest_range(&self) -> Option<&CellRange> {
        self.ranges.last()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Plain click starts a new single range, ctrl appends one, shift extends
    /// the latest range to `pos`.
    pub fn pointer_down(&mut self, pos: CellRef, modifiers: Modifiers) {
        self.dragging = true;
        if modifiers.shift
            && let Some(latest) = self.ranges.last_mut()
        {
            latest.end = pos;
            return;
        }
        if !modifiers.ctrl {
            self.ranges.clear();
        }
        self.ranges.push(CellRange::single(pos));
        self.active = Some(pos);
    }

    /// Extend the latest range while a drag is in progress. Returns true
    /// when the selection changed.
    pub fn pointer_enter(&mut self, pos: CellRef) -> bool {
        if !self.dragging {
            return false;
        }
        match self.ranges.last_mut() {
            Some(latest) if latest.end != pos => {
                latest.end = pos;
                true
            }
            _ => false,
        }
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Move the active cell one step, or with `shift` move the end corner of
    /// the latest range. Both are clamped to `bounds`.
    pub fn key_press(&mut self, direction: Direction, shift: bool, bounds: GridBounds) {
        if bounds.is_empty() {
            return;
        }
        let (d_row, d_col) = direction.delta();

        let Some(active) = self.active else {
            self.set_range(CellRange::single(CellRef::new(0, 0)));
            return;
        };

        if shift && let Some(latest) = self.ranges.last_mut() {
            latest.end = latest
                .end
                .offset_clamped(d_row, d_col, bounds.rows, bounds.cols);
            return;
        }

        let moved = active.offset_clamped(d_row, d_col, bounds.rows, bounds.cols);
        self.set_range(CellRange::single(moved));
    }

    /// Select the full row extent of column `col`. Ctrl appends the column,
    /// shift stretches the latest range across to it.
    pub fn header_click(&mut self, col: usize, modifiers: Modifiers, row_count: usize) {
        if row_count == 0 {
            return;
        }
        let last_row = row_count - 1;

        if modifiers.shift
            && let Some(latest) = self.ranges.last_mut()
        {
            latest.start = CellRef::new(0, latest.start.col);
            latest.end = CellRef::new(last_row, col);
            return;
        }

        let column = CellRange::new(CellRef::new(0, col), CellRef::new(last_row, col));
        if !modifiers.ctrl {
            self.ranges.clear();
        }
        self.ranges.push(column);
        self.active = Some(column.start);
    }

    pub fn select_all(&mut self, bounds: GridBounds) {
        if bounds.is_empty() {
            self.clear();
            return;
        }
        self.set_range(CellRange::new(
            CellRef::new(0, 0),
            CellRef::new(bounds.rows - 1, bounds.cols - 1),
        ));
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.ranges.clear();
        self.dragging = false;
    }

    /// Replace the selection with one range anchored at its start corner.
    pub fn set_range(&mut self, range: CellRange) {
        self.ranges.clear();
        self.ranges.push(range);
        self.active = Some(range.start);
    }

    /// Pull everything back inside `bounds` after the grid shrank.
    pub fn clamp(&mut self, bounds: GridBounds) {
        if bounds.is_empty() {
            self.clear();
            return;
        }
        for range in &mut self.ranges {
            range.start = bounds.clamp(range.start);
            range.end = bounds.clamp(range.end);
        }
        self.active = self.active.map(|a| bounds.clamp(a));
    }

    /// Deduplicated union of every range's cells, in row-major order.
    pub fn covered_cells(&self) -> BTreeSet<CellRef> {
        self.ranges.iter().flat_map(|r| r.cells()).collect()
    }

    /// Bounding box of all ranges.
    pub fn bounding_range(&self) -> Option<CellRange> {
        let mut iter = self.ranges.iter();
        let first = *iter.next()?;
        Some(iter.fold(first, |acc, r| acc.union(r)))
    }

    pub fn is_selected(&self, cell: &CellRef) -> bool {
        self.ranges.iter().any(|r| r.contains(cell))
    }
}

/// Status-bar statistics over the covered cells.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SelectionStats {
    /// Non-empty cells.
    pub cells: usize,
    pub numeric_count: usize,
    pub sum: f64,
}

impl SelectionStats {
    /// Count one non-empty cell, numeric when `number` is finite.
    pub fn add_cell(&mut self, number: Option<f64>) {
        self.cells += 1;
        if let Some(n) = number.filter(|n| n.is_finite()) {
            self.numeric_count += 1;
            self.sum += n;
        }
    }

    /// Statistics over displayed text values; blank values are skipped.
    pub fn from_values<I, S>(values: I, parser: &NumericLocaleParser) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stats = Self::default();
        for value in values {
            let text = value.as_ref().trim();
            if !text.is_empty() {
                stats.add_cell(parser.parse(text));
            }
        }
        stats
    }

    pub fn average(&self) -> Option<f64> {
        (self.numeric_count > 0).then(|| self.sum / self.numeric_count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_grid_engine::engine::NumericLocale;
    use pretty_assertions::assert_eq;

    fn cell(label: &str) -> CellRef {
        CellRef::from_str(label).unwrap()
    }

    #[test]
    fn test_plain_click_then_drag() {
        let mut sel = SelectionEngine::new();
        sel.pointer_down(cell("B2"), Modifiers::NONE);
        assert!(sel.pointer_enter(cell("C4")));
        assert!(!sel.pointer_enter(cell("C4")));
        sel.pointer_up();
        assert!(!sel.pointer_enter(cell("D5")));

        assert_eq!(sel.active(), Some(cell("B2")));
        assert_eq!(sel.ranges().len(), 1);
        assert_eq!(sel.latest_range().unwrap().to_string(), "B2:C4");
    }

    #[test]
    fn test_ctrl_appends_and_shift_extends_latest() {
        let mut sel = SelectionEngine::new();
        sel.pointer_down(cell("A1"), Modifiers::NONE);
        sel.pointer_up();
        sel.pointer_down(cell("C3"), Modifiers::CTRL);
        sel.pointer_up();
        sel.pointer_down(cell("D5"), Modifiers::SHIFT);
        sel.pointer_up();

        assert_eq!(sel.ranges().len(), 2);
        assert_eq!(sel.ranges()[0].to_string(), "A1");
        assert_eq!(sel.ranges()[1].to_string(), "C3:D5");
        assert_eq!(sel.active(), Some(cell("C3")));
    }

    #[test]
    fn test_key_navigation_clamps_and_resets() {
        let bounds = GridBounds::new(3, 2);
        let mut sel = SelectionEngine::new();
        sel.key_press(Direction::Down, false, bounds);
        assert_eq!(sel.active(), Some(cell("A1")));

        sel.pointer_down(cell("A1"), Modifiers::NONE);
        sel.pointer_down(cell("B2"), Modifiers::CTRL);
        sel.key_press(Direction::Right, false, bounds);
        assert_eq!(sel.active(), Some(cell("B2")));
        assert_eq!(sel.ranges().len(), 1);

        sel.key_press(Direction::Down, false, bounds);
        sel.key_press(Direction::Down, false, bounds);
        assert_eq!(sel.active(), Some(cell("B3")));
    }

    #[test]
    fn test_shift_key_extends_end_corner() {
        let bounds = GridBounds::new(10, 10);
        let mut sel = SelectionEngine::new();
        sel.pointer_down(cell("B2"), Modifiers::NONE);
        sel.pointer_up();
        sel.key_press(Direction::Down, true, bounds);
        sel.key_press(Direction::Right, true, bounds);
        assert_eq!(sel.latest_range().unwrap().to_string(), "B2:C3");
        assert_eq!(sel.active(), Some(cell("B2")));
    }

    #[test]
    fn test_header_click_selects_column_extent() {
        let mut sel = SelectionEngine::new();
        sel.header_click(1, Modifiers::NONE, 4);
        assert_eq!(sel.latest_range().unwrap().to_string(), "B1:B4");
        sel.header_click(3, Modifiers::CTRL, 4);
        assert_eq!(sel.ranges().len(), 2);
        sel.header_click(4, Modifiers::SHIFT, 4);
        assert_eq!(sel.ranges()[1].to_string(), "D1:E4");
        assert_eq!(sel.active(), Some(cell("D1")));
    }

    #[test]
    fn test_covered_cells_deduplicate_overlap() {
        let mut sel = SelectionEngine::new();
        sel.pointer_down(cell("A1"), Modifiers::NONE);
        sel.pointer_enter(cell("B2"));
        sel.pointer_up();
        sel.pointer_down(cell("B2"), Modifiers::CTRL);
        sel.pointer_enter(cell("C2"));
        sel.pointer_up();
        assert_eq!(sel.covered_cells().len(), 5);
        assert_eq!(sel.bounding_range().unwrap().to_string(), "A1:C2");
        assert!(sel.is_selected(&cell("C2")));
        assert!(!sel.is_selected(&cell("C1")));
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut sel = SelectionEngine::new();
        sel.select_all(GridBounds::new(10, 4));
        sel.clamp(GridBounds::new(3, 2));
        assert_eq!(sel.latest_range().unwrap().to_string(), "A1:B3");
        sel.clamp(GridBounds::new(0, 2));
        assert!(sel.is_empty());
        assert_eq!(sel.active(), None);
    }

    #[test]
    fn test_stats_over_mixed_values() {
        let parser = NumericLocaleParser::new(NumericLocale::Vi);
        let stats = SelectionStats::from_values(["1.000", "2.000,5", "Tiền", "", "-500"], &parser);
        assert_eq!(stats.cells, 4);
        assert_eq!(stats.numeric_count, 3);
        assert_eq!(stats.sum, 2500.5);
        assert_eq!(stats.average(), Some(833.5));
        assert_eq!(SelectionStats::default().average(), None);
    }
}
