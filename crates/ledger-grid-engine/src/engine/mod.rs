//! Grid engine API.
//!
//! Stateless building blocks used by the grid model:
//!
//! - [`CellRef`], [`CellRange`] - A1 addressing and rectangular ranges
//! - [`NumericLocaleParser`] - locale-ambiguous number parsing/formatting
//! - [`Scalar`], [`CellValue`] - cell values, including traceable values
//! - [`formula`] - arithmetic formulas with cell references
//! - [`fill`] - drag-to-fill pattern detection and extrapolation
//! - [`format_number`] - plain number rendering

mod cell_ref;
pub mod dates;
pub mod fill;
mod format;
pub mod formula;
mod numeric;
mod value;

pub use cell_ref::{CellRange, CellRef};
pub use fill::{FillDirection, FillPattern, detect_pattern, extrapolate, fill_direction, fill_series};
pub use format::format_number;
pub use formula::{CellSource, FormulaError, evaluate, evaluate_display, is_formula, referenced_cells};
pub use numeric::{NumericLocale, NumericLocaleParser};
pub use value::{CellValue, Scalar, SourceRef};
