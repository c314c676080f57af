//! Per-column filters and the single-key sort.
//!
//! Filters and sort only ever see real records; draft rows are appended
//! afterwards by [`build_row_model`](super::row::build_row_model).

use ledger_grid_engine::engine::{NumericLocaleParser, Scalar};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use super::record::{DataSet, Record};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
    Starts,
    Ends,
}

/// The two mutually exclusive filter modes of a column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnFilter {
    /// Allowed stringified values; anything else is hidden.
    Values(BTreeSet<String>),
    Condition { op: FilterOp, value: String },
}

impl ColumnFilter {
    pub fn matches(&self, cell: &str, parser: &NumericLocaleParser) -> bool {
        match self {
            ColumnFilter::Values(allowed) => allowed.contains(cell),
            ColumnFilter::Condition { op, value } => condition_matches(*op, cell, value, parser),
        }
    }
}

fn condition_matches(op: FilterOp, cell: &str, value: &str, parser: &NumericLocaleParser) -> bool {
    let ordering = || match (parser.parse(cell), parser.parse(value)) {
        (Some(a), Some(b)) => a.partial_cmp(&b),
        _ => Some(cell.cmp(value)),
    };

    match op {
        FilterOp::Eq => ordering() == Some(Ordering::Equal),
        FilterOp::Neq => ordering() != Some(Ordering::Equal),
        FilterOp::Gt => ordering() == Some(Ordering::Greater),
        FilterOp::Gte => matches!(ordering(), Some(Ordering::Greater | Ordering::Equal)),
        FilterOp::Lt => ordering() == Some(Ordering::Less),
        FilterOp::Lte => matches!(ordering(), Some(Ordering::Less | Ordering::Equal)),
        FilterOp::Contains => cell.to_lowercase().contains(&value.to_lowercase()),
        FilterOp::Starts => cell.to_lowercase().starts_with(&value.to_lowercase()),
        FilterOp::Ends => cell.to_lowercase().ends_with(&value.to_lowercase()),
    }
}

/// Active filters by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: BTreeMap<String, ColumnFilter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value-list filter; replaces any conditional filter on `field`.
    pub fn set_values<I, S>(&mut self, field: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed = values.into_iter().map(Into::into).collect();
        self.filters
            .insert(field.to_string(), ColumnFilter::Values(allowed));
    }

    /// Conditional filter; replaces any value-list filter on `field`.
    pub fn set_condition(&mut self, field: &str, op: FilterOp, value: &str) {
        self.filters.insert(
            field.to_string(),
            ColumnFilter::Condition {
                op,
                value: value.to_string(),
            },
        );
    }

    pub fn clear(&mut self, field: &str) {
        self.filters.remove(field);
    }

    pub fn clear_all(&mut self) {
        self.filters.clear();
    }

    pub fn get(&self, field: &str) -> Option<&ColumnFilter> {
        self.filters.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn matches(&self, record: &Record, parser: &NumericLocaleParser) -> bool {
        self.filters.iter().all(|(field, filter)| {
            let cell = record
                .get(field)
                .map(|v| v.to_input_string())
                .unwrap_or_default();
            filter.matches(&cell, parser)
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(field: &str, direction: SortDirection) -> Self {
        Self {
            field: field.to_string(),
            direction,
        }
    }
}

/// Numbers compare numerically, everything else compares by its string form.
fn compare_scalars(a: &Scalar, b: &Scalar) -> Ordering {
    match (a, b) {
        (Scalar::Number(x), Scalar::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        _ => a.to_input_string().cmp(&b.to_input_string()),
    }
}

/// Indices of the records that pass `filters`, in sort order.
/// Ties keep data order.
pub fn filter_and_sort(
    data: &DataSet,
    filters: &FilterSet,
    sort: Option<&SortKey>,
    parser: &NumericLocaleParser,
) -> Vec<usize> {
    let mut indices: Vec<usize> = data
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| filters.matches(record, parser))
        .map(|(idx, _)| idx)
        .collect();

    if let Some(key) = sort {
        let empty = Scalar::Empty;
        let value = |idx: usize| {
            data.records[idx]
                .get(&key.field)
                .map(|v| v.scalar())
                .unwrap_or(&empty)
        };
        indices.sort_by(|&a, &b| {
            let ord = compare_scalars(value(a), value(b));
            match key.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }

    indices
}

/// Sorted distinct stringified values of `field`, for value-list pickers.
pub fn distinct_values(data: &DataSet, field: &str) -> Vec<String> {
    let values: BTreeSet<String> = (0..data.len()).map(|idx| data.text_of(idx, field)).collect();
    values.into_iter().collect()
}
