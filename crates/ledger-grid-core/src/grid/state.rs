use ledger_grid_engine::engine::NumericLocaleParser;
use std::collections::HashMap;

use crate::callbacks::{GridCallbacks, NoopCallbacks};
use crate::clipboard::{ClipboardProvider, ClipboardSnapshot, InMemoryClipboard};
use crate::config::GridConfig;
use crate::draft::DraftStaging;
use crate::input::InputCapture;
use crate::menu::MenuExtension;
use crate::model::{
    CellKey, ColId, ColumnDef, ColumnModel, DataSet, FilterSet, RowId, RowModel, SortKey,
    build_row_model,
};
use crate::selection::{GridBounds, SelectionEngine};

/// UI-agnostic state of one data grid.
///
/// The host feeds data and column descriptors in, forwards user input, and
/// renders from the query methods. Row and column models are rebuilt from
/// scratch whenever one of their inputs changes.
pub struct Grid {
    pub(crate) config: GridConfig,
    pub(crate) parser: NumericLocaleParser,
    /// Latest snapshot from the data provider.
    pub(crate) data: DataSet,
    pub(crate) column_defs: Vec<ColumnDef>,
    pub(crate) filters: FilterSet,
    pub(crate) sort: Option<SortKey>,
    pub(crate) drafts: DraftStaging,
    /// Advisory validation messages.
    pub(crate) errors: HashMap<CellKey, String>,
    /// User-resized column widths.
    pub(crate) column_widths: HashMap<ColId, u32>,
    pub(crate) columns: ColumnModel,
    pub(crate) rows: RowModel,
    pub(crate) selection: SelectionEngine,
    pub(crate) capture: InputCapture,
    pub(crate) clipboard: Box<dyn ClipboardProvider>,
    pub(crate) snapshot: Option<ClipboardSnapshot>,
    pub(crate) callbacks: Box<dyn GridCallbacks>,
    pub(crate) menu_extensions: Vec<MenuExtension>,
    /// Row last reported through `row_selected`.
    pub(crate) selected_row: Option<RowId>,
}

impl Grid {
    /// Create an empty grid: no columns, no data, only the draft padding.
    pub fn new(config: GridConfig) -> Self {
        let parser = NumericLocaleParser::new(config.locale);
        let drafts = DraftStaging::new(config.draft_columns);
        let mut grid = Grid {
            config,
            parser,
            data: DataSet::default(),
            column_defs: Vec::new(),
            filters: FilterSet::new(),
            sort: None,
            drafts,
            errors: HashMap::new(),
            column_widths: HashMap::new(),
            columns: ColumnModel::default(),
            rows: RowModel::default(),
            selection: SelectionEngine::new(),
            capture: InputCapture::Idle,
            clipboard: Box::new(InMemoryClipboard::new()),
            snapshot: None,
            callbacks: Box::new(NoopCallbacks),
            menu_extensions: Vec::new(),
            selected_row: None,
        };
        grid.rebuild();
        grid
    }

    pub fn with_callbacks(mut self, callbacks: impl GridCallbacks + 'static) -> Self {
        self.callbacks = Box::new(callbacks);
        self
    }

    pub fn with_clipboard(mut self, clipboard: impl ClipboardProvider + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    /// Append a host entry to the context menu.
    pub fn with_menu_extension(mut self, extension: MenuExtension) -> Self {
        self.menu_extensions.push(extension);
        self
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn parser(&self) -> &NumericLocaleParser {
        &self.parser
    }

    pub fn data(&self) -> &DataSet {
        &self.data
    }

    pub fn columns(&self) -> &ColumnModel {
        &self.columns
    }

    pub fn rows(&self) -> &RowModel {
        &self.rows
    }

    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    pub fn capture(&self) -> &InputCapture {
        &self.capture
    }

    pub fn clipboard_snapshot(&self) -> Option<&ClipboardSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.rows.len(), self.columns.len())
    }

    /// Recompute the row and column models from their inputs.
    pub(crate) fn rebuild(&mut self) {
        self.columns = ColumnModel::build(&self.column_defs, self.drafts.column_ids());
        self.rows = build_row_model(
            &self.data,
            &self.filters,
            self.sort.as_ref(),
            self.drafts.extra_rows(),
            self.config.min_rows,
            &self.parser,
        );
        self.selection.clamp(self.bounds());
        self.notify_row_selection();
    }

    /// Report the active row through `row_selected` when it changed.
    pub(crate) fn notify_row_selection(&mut self) {
        let row = self
            .selection
            .active()
            .and_then(|active| self.rows.get(active.row));
        let id = row.map(|r| r.id.clone());
        if id == self.selected_row {
            return;
        }

        let record = row
            .and_then(|r| r.record_index)
            .and_then(|idx| self.data.records.get(idx));
        tracing::trace!(row = ?id, "active row changed");
        self.callbacks.row_selected(record);
        self.selected_row = id;
    }
}
