//! Advisory per-cell validation.
//!
//! Validation never blocks a write. The returned message is stored next to
//! the value and shown by the host.

use ledger_grid_engine::engine::dates::parse_date;
use ledger_grid_engine::engine::{NumericLocaleParser, is_formula};

use crate::model::{ColumnDef, ColumnType};

/// Check `raw` against a real column: the custom validator when present,
/// otherwise the builtin check for the column type.
pub fn validate(def: &ColumnDef, raw: &str, parser: &NumericLocaleParser) -> Option<String> {
    if let Some(validator) = &def.validator {
        return validator(raw);
    }

    let trimmed = raw.trim();
    if trimmed.is_empty() || is_formula(trimmed) {
        return None;
    }

    match def.column_type {
        ColumnType::Text => None,
        ColumnType::Number => (!parser.is_number(trimmed))
            .then(|| format!("{}: expected a number", def.label)),
        ColumnType::Date => parse_date(trimmed)
            .is_none()
            .then(|| format!("{}: expected a date (DD/MM/YYYY)", def.label)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_grid_engine::engine::NumericLocale;

    fn parser() -> NumericLocaleParser {
        NumericLocaleParser::new(NumericLocale::Vi)
    }

    #[test]
    fn test_builtin_number_check() {
        let def = ColumnDef::new("amount", "Số tiền").number();
        assert_eq!(validate(&def, "1.234.567,5", &parser()), None);
        assert_eq!(
            validate(&def, "12a", &parser()).as_deref(),
            Some("Số tiền: expected a number")
        );
    }

    #[test]
    fn test_builtin_date_check_accepts_both_formats() {
        let def = ColumnDef::new("ngay_ct", "Ngày CT").date();
        assert_eq!(validate(&def, "31/12/2024", &parser()), None);
        assert_eq!(validate(&def, "2024-12-31", &parser()), None);
        assert!(validate(&def, "31/02/2024", &parser()).is_some());
        assert!(validate(&def, "12/31", &parser()).is_some());
    }

    #[test]
    fn test_empty_and_formulas_skip_builtins() {
        let def = ColumnDef::new("amount", "Số tiền").number();
        assert_eq!(validate(&def, "", &parser()), None);
        assert_eq!(validate(&def, "=A1*2", &parser()), None);
        assert_eq!(validate(&ColumnDef::new("note", "Ghi chú"), "anything", &parser()), None);
    }

    #[test]
    fn test_custom_validator_replaces_builtin() {
        let def = ColumnDef::new("account", "TK")
            .number()
            .with_validator(|v| (!v.starts_with('1')).then(|| "Chỉ tài khoản loại 1".to_string()));
        assert_eq!(validate(&def, "111", &parser()), None);
        assert_eq!(validate(&def, "331", &parser()).as_deref(), Some("Chỉ tài khoản loại 1"));
    }
}
