//! Cell addressing.
//!
//! Converts between zero-indexed (row, col) grid coordinates and A1 labels
//! (e.g., "A1", "B12", "AA100"), and describes rectangular ranges over them.
//!
//! # Examples
//!
//! ```
//! use ledger_grid_engine::engine::CellRef;
//!
//! let cell = CellRef::from_str("B3").unwrap();
//! assert_eq!(cell.col, 1);
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

fn a1_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$").expect("valid A1 regex")
    })
}

/// A cell position in visual space (0-indexed).
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse an A1 label (case-insensitive). Returns None if the input is invalid.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(label: &str) -> Option<CellRef> {
        let caps = a1_re().captures(label)?;
        let col = Self::letters_to_col(&caps["letters"])?;
        let row = caps["numbers"].parse::<usize>().ok()?.checked_sub(1)?;
        Some(CellRef::new(row, col))
    }

    /// Convert column index to letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }

    /// Convert column letters back to an index (A -> 0, AA -> 26).
    /// Returns None for empty input, non-letters, or overflow.
    pub fn letters_to_col(letters: &str) -> Option<usize> {
        if letters.is_empty() {
            return None;
        }
        let mut acc = 0usize;
        for c in letters.bytes() {
            if !c.is_ascii_alphabetic() {
                return None;
            }
            let digit = (c.to_ascii_uppercase() - b'A') as usize + 1;
            acc = acc.checked_mul(26)?.checked_add(digit)?;
        }
        acc.checked_sub(1)
    }

    /// Move by a signed delta, clamped to `0..rows` x `0..cols`.
    pub fn offset_clamped(&self, d_row: isize, d_col: isize, rows: usize, cols: usize) -> CellRef {
        let clamp = |v: usize, d: isize, len: usize| -> usize {
            let max = len.saturating_sub(1) as isize;
            (v as isize + d).clamp(0, max.max(0)) as usize
        };
        CellRef::new(clamp(self.row, d_row, rows), clamp(self.col, d_col, cols))
    }
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellRef::from_str(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1)
    }
}

/// A rectangular range given by two corners. The corners keep the order in
/// which they were set (`start` is where a drag began), bounds are normalised
/// on access.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl CellRange {
    pub fn new(start: CellRef, end: CellRef) -> Self {
        Self { start, end }
    }

    pub fn single(cell: CellRef) -> Self {
        Self::new(cell, cell)
    }

    pub fn top(&self) -> usize {
        self.start.row.min(self.end.row)
    }

    pub fn bottom(&self) -> usize {
        self.start.row.max(self.end.row)
    }

    pub fn left(&self) -> usize {
        self.start.col.min(self.end.col)
    }

    pub fn right(&self) -> usize {
        self.start.col.max(self.end.col)
    }

    pub fn row_count(&self) -> usize {
        self.bottom() - self.top() + 1
    }

    pub fn col_count(&self) -> usize {
        self.right() - self.left() + 1
    }

    pub fn top_left(&self) -> CellRef {
        CellRef::new(self.top(), self.left())
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        (self.top()..=self.bottom()).contains(&cell.row)
            && (self.left()..=self.right()).contains(&cell.col)
    }

    /// Bounding box of both ranges.
    pub fn union(&self, other: &CellRange) -> CellRange {
        CellRange::new(
            CellRef::new(self.top().min(other.top()), self.left().min(other.left())),
            CellRef::new(
                self.bottom().max(other.bottom()),
                self.right().max(other.right()),
            ),
        )
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        (self.top()..=self.bottom())
            .flat_map(move |row| (self.left()..=self.right()).map(move |col| CellRef::new(row, col)))
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.top_left())
        } else {
            write!(
                f,
                "{}:{}",
                self.top_left(),
                CellRef::new(self.bottom(), self.right())
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CellRange, CellRef};

    #[test]
    fn test_from_str_single_letter_columns() {
        assert_eq!(CellRef::from_str("A1"), Some(CellRef::new(0, 0)));
        assert_eq!(CellRef::from_str("B1"), Some(CellRef::new(0, 1)));
        assert_eq!(CellRef::from_str("Z1"), Some(CellRef::new(0, 25)));
    }

    #[test]
    fn test_from_str_multi_letter_columns() {
        assert_eq!(CellRef::from_str("AA1").unwrap().col, 26);
        assert_eq!(CellRef::from_str("AZ1").unwrap().col, 51);
        assert_eq!(CellRef::from_str("BA1").unwrap().col, 52);
    }

    #[test]
    fn test_from_str_rows_and_case() {
        assert_eq!(CellRef::from_str("b12"), Some(CellRef::new(11, 1)));
        assert_eq!(CellRef::from_str("aA100"), Some(CellRef::new(99, 26)));
    }

    #[test]
    fn test_from_str_invalid_inputs() {
        for bad in ["", "123", "ABC", "A0", "1A", "A 1", "A-1"] {
            assert!(CellRef::from_str(bad).is_none(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_parse_a1_overflow_returns_none() {
        let huge = format!("{}1", "Z".repeat(40));
        assert!(CellRef::from_str(&huge).is_none());
    }

    #[test]
    fn test_letters_round_trip_boundaries() {
        for col in [0, 25, 26, 51, 52, 701, 702, 16383] {
            let letters = CellRef::col_to_letters(col);
            assert_eq!(CellRef::letters_to_col(&letters), Some(col));
        }
        assert_eq!(CellRef::col_to_letters(701), "ZZ");
        assert_eq!(CellRef::col_to_letters(702), "AAA");
    }

    #[test]
    fn test_col_to_letters_handles_max_usize() {
        let letters = CellRef::col_to_letters(usize::MAX);
        assert!(!letters.is_empty());
        assert!(letters.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_offset_clamped_stays_in_bounds() {
        let origin = CellRef::new(0, 0);
        assert_eq!(origin.offset_clamped(-1, -1, 5, 5), CellRef::new(0, 0));
        assert_eq!(
            CellRef::new(4, 4).offset_clamped(1, 1, 5, 5),
            CellRef::new(4, 4)
        );
        assert_eq!(origin.offset_clamped(2, 1, 5, 5), CellRef::new(2, 1));
    }

    #[test]
    fn test_range_bounds_are_normalised() {
        let range = CellRange::new(CellRef::new(3, 2), CellRef::new(1, 0));
        assert_eq!((range.top(), range.bottom()), (1, 3));
        assert_eq!((range.left(), range.right()), (0, 2));
        assert_eq!(range.row_count(), 3);
        assert_eq!(range.col_count(), 3);
        assert!(range.contains(&CellRef::new(2, 1)));
        assert!(!range.contains(&CellRef::new(4, 1)));
        assert_eq!(range.to_string(), "A2:C4");
    }

    #[test]
    fn test_range_cells_row_major() {
        let range = CellRange::new(CellRef::new(0, 0), CellRef::new(1, 1));
        let cells: Vec<_> = range.cells().collect();
        assert_eq!(
            cells,
            vec![
                CellRef::new(0, 0),
                CellRef::new(0, 1),
                CellRef::new(1, 0),
                CellRef::new(1, 1)
            ]
        );
    }

    #[test]
    fn test_range_union_is_bounding_box() {
        let a = CellRange::single(CellRef::new(0, 0));
        let b = CellRange::new(CellRef::new(2, 3), CellRef::new(1, 1));
        let u = a.union(&b);
        assert_eq!(u.top_left(), CellRef::new(0, 0));
        assert_eq!((u.bottom(), u.right()), (2, 3));
    }
}
