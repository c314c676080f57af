//! Column descriptors and the column model.

use ledger_grid_engine::engine::CellRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::ids::ColId;

/// Type hint driving builtin validation and default formatting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Date,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Custom validator: raw input -> error message.
pub type Validator = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Custom formatter: displayed value -> rendered text.
pub type Formatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Descriptor of a real column, mapping 1:1 to a record field.
#[derive(Clone)]
pub struct ColumnDef {
    pub field: String,
    pub label: String,
    pub width: Option<u32>,
    pub align: Align,
    pub column_type: ColumnType,
    pub editable: bool,
    pub formatter: Option<Formatter>,
    pub validator: Option<Validator>,
    /// Name of a host-side renderer; opaque to the grid.
    pub renderer: Option<String>,
}

impl ColumnDef {
    pub fn new(field: &str, label: &str) -> Self {
        Self {
            field: field.to_string(),
            label: label.to_string(),
            width: None,
            align: Align::Left,
            column_type: ColumnType::Text,
            editable: true,
            formatter: None,
            validator: None,
            renderer: None,
        }
    }

    /// Numeric column, right aligned.
    pub fn number(mut self) -> Self {
        self.column_type = ColumnType::Number;
        self.align = Align::Right;
        self
    }

    pub fn date(mut self) -> Self {
        self.column_type = ColumnType::Date;
        self.align = Align::Center;
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    pub fn renderer(mut self, name: &str) -> Self {
        self.renderer = Some(name.to_string());
        self
    }

    pub fn with_validator<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(f));
        self
    }

    pub fn with_formatter<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("field", &self.field)
            .field("label", &self.label)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("column_type", &self.column_type)
            .field("editable", &self.editable)
            .field("formatter", &self.formatter.is_some())
            .field("validator", &self.validator.is_some())
            .field("renderer", &self.renderer)
            .finish()
    }
}

/// A column in visual order. Real columns carry their descriptor.
#[derive(Clone, Debug)]
pub struct Column {
    pub id: ColId,
    pub def: Option<ColumnDef>,
}

impl Column {
    pub fn is_draft(&self) -> bool {
        self.id.is_draft()
    }

    pub fn is_editable(&self) -> bool {
        self.def.as_ref().is_none_or(|d| d.editable)
    }
}

/// Real columns in descriptor order, then draft columns in creation order.
#[derive(Clone, Debug, Default)]
pub struct ColumnModel {
    columns: Vec<Column>,
}

impl ColumnModel {
    pub fn build(defs: &[ColumnDef], draft_ids: &[u32]) -> Self {
        let real = defs.iter().map(|def| Column {
            id: ColId::Real(def.field.clone()),
            def: Some(def.clone()),
        });
        let draft = draft_ids.iter().map(|&n| Column {
            id: ColId::Draft(n),
            def: None,
        });
        Self {
            columns: real.chain(draft).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Column> {
        self.columns.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    pub fn index_of(&self, id: &ColId) -> Option<usize> {
        self.columns.iter().position(|c| &c.id == id)
    }

    pub fn is_draft(&self, idx: usize) -> bool {
        self.columns.get(idx).is_some_and(Column::is_draft)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.columns
            .iter()
            .any(|c| c.id.field() == Some(field))
    }

    /// Real columns with their visual index.
    pub fn real_columns(&self) -> impl Iterator<Item = (usize, &ColumnDef)> {
        self.columns
            .iter()
            .enumerate()
            .filter_map(|(idx, c)| c.def.as_ref().map(|d| (idx, d)))
    }

    /// Header text: the descriptor label, or the A1 letters for draft columns.
    pub fn label(&self, idx: usize) -> String {
        match self.columns.get(idx).and_then(|c| c.def.as_ref()) {
            Some(def) => def.label.clone(),
            None => CellRef::col_to_letters(idx),
        }
    }

    /// Width: user override, then descriptor width, then the default.
    pub fn width(&self, idx: usize, overrides: &HashMap<ColId, u32>, default: u32) -> u32 {
        let Some(column) = self.columns.get(idx) else {
            return default;
        };
        overrides
            .get(&column.id)
            .copied()
            .or_else(|| column.def.as_ref().and_then(|d| d.width))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defs() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("code", "Mã TS"),
            ColumnDef::new("cost", "Nguyên giá").number().width(160),
            ColumnDef::new("note", "Ghi chú").read_only(),
        ]
    }

    #[test]
    fn test_real_columns_precede_drafts() {
        let model = ColumnModel::build(&defs(), &[4, 2]);
        let ids: Vec<_> = model.iter().map(|c| c.id.clone()).collect();
        assert_eq!(
            ids,
            vec![
                ColId::Real("code".into()),
                ColId::Real("cost".into()),
                ColId::Real("note".into()),
                ColId::Draft(4),
                ColId::Draft(2),
            ]
        );
        assert!(model.is_draft(3));
        assert!(!model.is_draft(1));
        assert!(!model.is_draft(99));
        assert_eq!(model.index_of(&ColId::Draft(2)), Some(4));
    }

    #[test]
    fn test_labels_and_editability() {
        let model = ColumnModel::build(&defs(), &[0]);
        assert_eq!(model.label(1), "Nguyên giá");
        assert_eq!(model.label(3), "D");
        assert!(model.get(0).unwrap().is_editable());
        assert!(!model.get(2).unwrap().is_editable());
        assert!(model.get(3).unwrap().is_editable());
        assert_eq!(model.real_columns().count(), 3);
    }

    #[test]
    fn test_width_resolution_order() {
        let model = ColumnModel::build(&defs(), &[0]);
        let mut overrides = HashMap::new();
        assert_eq!(model.width(0, &overrides, 100), 100);
        assert_eq!(model.width(1, &overrides, 100), 160);
        overrides.insert(ColId::Real("cost".into()), 90);
        assert_eq!(model.width(1, &overrides, 100), 90);
    }
}
