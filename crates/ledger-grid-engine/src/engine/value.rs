//! Cell value types.
//!
//! - [`Scalar`] - empty, number or text
//! - [`CellValue`] - a plain scalar, or a traceable computed value that keeps
//!   the formula text and a pointer to the document it was derived from
//! - [`SourceRef`] - where a traceable value came from

use serde::{Deserialize, Serialize};

use super::format::format_number;
use super::numeric::NumericLocaleParser;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Interpret raw user input.
    /// - Empty string or whitespace -> Empty
    /// - Parses as a number under the locale -> Number
    /// - Otherwise -> Text (formulas stay text, `=` included)
    pub fn from_input(input: &str, parser: &NumericLocaleParser) -> Scalar {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Scalar::Empty;
        }
        if !trimmed.starts_with('=')
            && let Some(n) = parser.parse(trimmed)
        {
            return Scalar::Number(n);
        }
        Scalar::Text(input.to_string())
    }

    /// String form used for editing, filtering, clipboard and formulas.
    pub fn to_input_string(&self) -> String {
        match self {
            Scalar::Empty => String::new(),
            Scalar::Number(n) => format_number(*n),
            Scalar::Text(s) => s.clone(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Scalar::Empty => true,
            Scalar::Number(_) => false,
            Scalar::Text(s) => s.trim().is_empty(),
        }
    }

    pub fn as_number(&self, parser: &NumericLocaleParser) -> Option<f64> {
        match self {
            Scalar::Empty => None,
            Scalar::Number(n) => Some(*n),
            Scalar::Text(s) => parser.parse(s),
        }
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Scalar::Empty
        } else {
            Scalar::Text(s.to_string())
        }
    }
}

/// Pointer from a computed value back to its originating document
/// (e.g. module `"gl-voucher"`, key `"PC-0012"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRef {
    pub module: String,
    pub key: String,
}

/// The value held by a cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Plain(Scalar),
    /// Read-only derived value that the UI can trace to its origin.
    Traceable {
        value: Scalar,
        formula: String,
        source: Option<SourceRef>,
    },
}

impl CellValue {
    pub fn scalar(&self) -> &Scalar {
        match self {
            CellValue::Plain(s) => s,
            CellValue::Traceable { value, .. } => value,
        }
    }

    pub fn is_traceable(&self) -> bool {
        matches!(self, CellValue::Traceable { .. })
    }

    pub fn formula(&self) -> Option<&str> {
        match self {
            CellValue::Plain(_) => None,
            CellValue::Traceable { formula, .. } => Some(formula),
        }
    }

    pub fn source(&self) -> Option<&SourceRef> {
        match self {
            CellValue::Plain(_) => None,
            CellValue::Traceable { source, .. } => source.as_ref(),
        }
    }

    pub fn to_input_string(&self) -> String {
        self.scalar().to_input_string()
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Plain(Scalar::Empty)
    }
}

impl From<Scalar> for CellValue {
    fn from(s: Scalar) -> Self {
        CellValue::Plain(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Plain(Scalar::Number(n))
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Plain(Scalar::from(s))
    }
}
