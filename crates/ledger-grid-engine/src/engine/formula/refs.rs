//! Cell-reference substitution.
//!
//! Every `[A-Z]+[0-9]+` token in the (uppercased) expression is replaced by
//! the referenced cell's numeric value, written as a locale literal, before
//! tokenizing. Resolution is
//! shallow: a referenced cell holding a formula reads as `0` and is never
//! evaluated, so there is no recursion and no cycle detection.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::{CellSource, FormulaError};
use crate::engine::cell_ref::CellRef;
use crate::engine::numeric::NumericLocaleParser;
use crate::engine::value::{CellValue, Scalar};

pub(crate) fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Z]+[0-9]+").expect("valid reference regex"))
}

/// Replace references in `expr` with literal numbers.
/// The first failing reference decides the error.
pub fn substitute_references(
    expr: &str,
    origin: &CellRef,
    source: &dyn CellSource,
    parser: &NumericLocaleParser,
) -> Result<String, FormulaError> {
    let mut failure: Option<FormulaError> = None;
    let substituted = reference_re().replace_all(expr, |caps: &Captures| {
        if failure.is_some() {
            return String::new();
        }
        match resolve_reference(&caps[0], origin, source, parser) {
            Ok(n) if n < 0.0 => format!("({})", parser.format_literal(n)),
            Ok(n) => parser.format_literal(n),
            Err(e) => {
                failure = Some(e);
                String::new()
            }
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(substituted.into_owned()),
    }
}

fn resolve_reference(
    label: &str,
    origin: &CellRef,
    source: &dyn CellSource,
    parser: &NumericLocaleParser,
) -> Result<f64, FormulaError> {
    let target = CellRef::from_str(label).ok_or(FormulaError::Ref)?;
    if target.row >= source.row_count() || target.col >= source.col_count() {
        return Err(FormulaError::Ref);
    }
    if source.is_persisted(origin) && source.is_draft_column(target.col) {
        return Err(FormulaError::Block);
    }

    let Some(value) = source.value_at(&target) else {
        return Ok(0.0);
    };
    match value {
        CellValue::Traceable { value, .. } => scalar_operand(&value, parser),
        CellValue::Plain(Scalar::Text(text)) if text.trim_start().starts_with('=') => Ok(0.0),
        CellValue::Plain(scalar) => scalar_operand(&scalar, parser),
    }
}

fn scalar_operand(scalar: &Scalar, parser: &NumericLocaleParser) -> Result<f64, FormulaError> {
    if scalar.is_blank() {
        return Ok(0.0);
    }
    scalar.as_number(parser).ok_or(FormulaError::Malformed)
}

/// References mentioned by a formula, in order of appearance.
pub fn referenced_cells(formula: &str) -> Vec<CellRef> {
    let upper = formula.to_ascii_uppercase();
    reference_re()
        .find_iter(&upper)
        .filter_map(|m| CellRef::from_str(m.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NumericLocale;

    #[test]
    fn test_referenced_cells_in_order() {
        assert_eq!(
            referenced_cells("=a1 + B12*aa3"),
            vec![CellRef::new(0, 0), CellRef::new(11, 1), CellRef::new(2, 26)]
        );
        assert!(referenced_cells("=1+2").is_empty());
    }

    #[test]
    fn test_scalar_operand_rules() {
        let parser = NumericLocaleParser::new(NumericLocale::Vi);
        assert_eq!(scalar_operand(&Scalar::Empty, &parser), Ok(0.0));
        assert_eq!(
            scalar_operand(&Scalar::Text("1.250,5".into()), &parser),
            Ok(1250.5)
        );
        assert_eq!(
            scalar_operand(&Scalar::Text("Công ty".into()), &parser),
            Err(FormulaError::Malformed)
        );
    }
}
