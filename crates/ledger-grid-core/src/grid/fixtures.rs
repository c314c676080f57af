//! Shared test fixtures: a small voucher ledger.
//!
//! ```text
//!      A (id, ro)  B (account)  C (amount, number)  D (date)     E (draft)
//!  1   PC01        111          1500                15/01/2024
//!  2   PC02        112          800 (traceable)     2024-02-10
//!  3   PC03        331          =E1                 01/03/2024
//!  4   draft row
//!  5   draft row
//! ```

use chrono::NaiveDate;
use ledger_grid_engine::engine::{CellRef, CellValue, Scalar, SourceRef};
use std::cell::RefCell;
use std::rc::Rc;

use super::Grid;
use crate::callbacks::GridCallbacks;
use crate::config::GridConfig;
use crate::model::{ColumnDef, DataSet, Record, record};

pub fn cell(label: &str) -> CellRef {
    CellRef::from_str(label).unwrap()
}

pub fn ledger_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("id", "Số CT").read_only().width(80),
        ColumnDef::new("account", "Tài khoản"),
        ColumnDef::new("amount", "Số tiền").number(),
        ColumnDef::new("date", "Ngày CT").date(),
    ]
}

pub fn ledger_data() -> DataSet {
    DataSet::new(
        "id",
        vec![
            record([
                ("id", CellValue::from("PC01")),
                ("account", "111".into()),
                ("amount", 1500.0.into()),
                ("date", "15/01/2024".into()),
            ]),
            record([
                ("id", CellValue::from("PC02")),
                ("account", "112".into()),
                (
                    "amount",
                    CellValue::Traceable {
                        value: Scalar::Number(800.0),
                        formula: "SUM(TK 111)".into(),
                        source: Some(SourceRef {
                            module: "gl-voucher".into(),
                            key: "PC02".into(),
                        }),
                    },
                ),
                ("date", "2024-02-10".into()),
            ]),
            record([
                ("id", CellValue::from("PC03")),
                ("account", "331".into()),
                ("amount", "=E1".into()),
                ("date", "01/03/2024".into()),
            ]),
        ],
    )
}

fn config() -> GridConfig {
    GridConfig {
        min_rows: 5,
        draft_columns: 1,
        ..GridConfig::default()
    }
}

fn populate(mut grid: Grid) -> Grid {
    grid.set_columns(ledger_columns());
    grid.set_data(ledger_data());
    grid
}

pub fn ledger_grid() -> Grid {
    populate(Grid::new(config()))
}

/// Rows dated on or before 31/01/2024 are locked.
pub fn locked_ledger_grid() -> Grid {
    let cutoff = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    populate(Grid::new(config().with_locked_date("date", cutoff)))
}

#[derive(Debug, Default)]
pub struct Events {
    pub changes: Vec<(String, String, String)>,
    pub commits: Vec<Record>,
    /// Key of each `row_selected` record.
    pub selected: Vec<Option<String>>,
    pub activated: Vec<Option<String>>,
}

pub struct Recorder(Rc<RefCell<Events>>);

fn key_of(record: Option<&Record>) -> Option<String> {
    record
        .and_then(|r| r.get("id"))
        .map(|v| v.to_input_string())
}

impl GridCallbacks for Recorder {
    fn cell_changed(&mut self, row_key: &str, field: &str, new_value: &str) {
        self.0
            .borrow_mut()
            .changes
            .push((row_key.to_string(), field.to_string(), new_value.to_string()));
    }

    fn commit_row(&mut self, record: Record) {
        self.0.borrow_mut().commits.push(record);
    }

    fn row_selected(&mut self, record: Option<&Record>) {
        self.0.borrow_mut().selected.push(key_of(record));
    }

    fn row_activated(&mut self, record: Option<&Record>) {
        self.0.borrow_mut().activated.push(key_of(record));
    }
}

/// The ledger grid with every callback recorded.
pub fn recording_grid() -> (Grid, Rc<RefCell<Events>>) {
    let events = Rc::new(RefCell::new(Events::default()));
    let grid = ledger_grid().with_callbacks(Recorder(events.clone()));
    (grid, events)
}
