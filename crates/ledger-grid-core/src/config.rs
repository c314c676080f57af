//! Grid configuration.
//!
//! Everything that used to be ambient (the locale setting in particular) is an
//! explicit value handed to [`Grid::new`](crate::Grid::new).

use chrono::NaiveDate;
use ledger_grid_engine::engine::NumericLocale;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_ROWS: usize = 20;
pub const DEFAULT_COLUMN_WIDTH: u32 = 120;
pub const DEFAULT_MIN_COLUMN_WIDTH: u32 = 40;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Separator convention for parsing and formatting numbers.
    pub locale: NumericLocale,
    /// Draft rows pad the visible rows up to this count.
    pub min_rows: usize,
    /// Draft columns created up front, after the real columns.
    pub draft_columns: usize,
    pub default_column_width: u32,
    pub min_column_width: u32,
    /// Rows dated on or before this day are read-only.
    pub locked_before: Option<NaiveDate>,
    /// Record field holding the row date for the lock check.
    pub date_field: Option<String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            locale: NumericLocale::default(),
            min_rows: DEFAULT_MIN_ROWS,
            draft_columns: 0,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
            locked_before: None,
            date_field: None,
        }
    }
}

impl GridConfig {
    /// Lock rows whose `field` date is on or before `cutoff`.
    pub fn with_locked_date(mut self, field: &str, cutoff: NaiveDate) -> Self {
        self.date_field = Some(field.to_string());
        self.locked_before = Some(cutoff);
        self
    }
}
