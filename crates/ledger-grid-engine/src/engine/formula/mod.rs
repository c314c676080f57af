//! Cell formula evaluation.
//!
//! A formula is any input starting with `=`. The pipeline is:
//!
//! 1. uppercase the expression and substitute `A1`-style references with the
//!    referenced values ([`refs`])
//! 2. tokenize numbers, `+ - * / %` and parentheses ([`tokenize`]); number
//!    literals go through the locale parser, so `=1,5*2` is `3` under `vi`
//! 3. shunting-yard to RPN, then stack evaluation ([`rpn`])
//!
//! Failures are [`FormulaError`]s whose `Display` form is the token shown in
//! the cell (`#ERROR`, `#REF!`, `#BLOCK!`, `#DIV/0!`).

mod refs;
mod rpn;
mod tokenize;

use thiserror::Error;

use super::cell_ref::CellRef;
use super::format::format_number;
use super::numeric::NumericLocaleParser;
use super::value::CellValue;

pub use refs::{referenced_cells, substitute_references};
pub use rpn::{eval_rpn, to_rpn};
pub use tokenize::{Token, tokenize};

/// Formula failures, rendered as display tokens.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormulaError {
    /// Malformed expression or non-finite result.
    #[error("#ERROR")]
    Malformed,

    /// Reference outside the current rows/columns.
    #[error("#REF!")]
    Ref,

    /// Persisted cell referencing a draft column.
    #[error("#BLOCK!")]
    Block,

    #[error("#DIV/0!")]
    DivZero,
}

/// What the formula engine needs to know about the grid it evaluates in.
/// Coordinates are visual.
pub trait CellSource {
    fn row_count(&self) -> usize;

    fn col_count(&self) -> usize;

    fn is_draft_column(&self, col: usize) -> bool;

    /// True when both the row and the column of `at` are real, i.e. the cell
    /// is persisted through the host.
    fn is_persisted(&self, at: &CellRef) -> bool;

    /// Current raw value; formulas come back as their `=` text.
    fn value_at(&self, at: &CellRef) -> Option<CellValue>;
}

pub fn is_formula(input: &str) -> bool {
    input.trim_start().starts_with('=')
}

/// Evaluate `formula` (with or without the leading `=`) as seen from `origin`.
pub fn evaluate(
    formula: &str,
    origin: &CellRef,
    source: &dyn CellSource,
    parser: &NumericLocaleParser,
) -> Result<f64, FormulaError> {
    let trimmed = formula.trim_start();
    let body = trimmed.strip_prefix('=').unwrap_or(trimmed);
    let upper = body.to_uppercase();

    let substituted = substitute_references(&upper, origin, source, parser)?;
    let tokens = tokenize(&substituted, parser)?;
    let result = eval_rpn(&to_rpn(tokens)?);
    tracing::trace!(%origin, formula = body, ?result, "evaluated formula");
    result
}

/// Evaluate and render: a number, or the error token.
pub fn evaluate_display(
    formula: &str,
    origin: &CellRef,
    source: &dyn CellSource,
    parser: &NumericLocaleParser,
) -> String {
    match evaluate(formula, origin, source, parser) {
        Ok(n) => format_number(n),
        Err(e) => e.to_string(),
    }
}
