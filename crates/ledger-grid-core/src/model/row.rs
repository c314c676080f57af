//! Visual row order.

use ledger_grid_engine::engine::NumericLocaleParser;

use super::filter::{FilterSet, SortKey, filter_and_sort};
use super::ids::RowId;
use super::record::DataSet;

/// A row in visual order. Real rows point at their record in the unfiltered
/// data set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub id: RowId,
    pub record_index: Option<usize>,
}

impl Row {
    pub fn is_draft(&self) -> bool {
        self.id.is_draft()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowModel {
    rows: Vec<Row>,
    real_count: usize,
}

impl RowModel {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of visible real rows; draft rows follow them.
    pub fn real_count(&self) -> usize {
        self.real_count
    }

    pub fn get(&self, idx: usize) -> Option<&Row> {
        self.rows.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub fn index_of(&self, id: &RowId) -> Option<usize> {
        match id {
            RowId::Draft(idx) => (*idx >= self.real_count && *idx < self.rows.len()).then_some(*idx),
            RowId::Real(_) => self.rows[..self.real_count]
                .iter()
                .position(|r| &r.id == id),
        }
    }

    pub fn is_draft(&self, idx: usize) -> bool {
        self.rows.get(idx).is_some_and(Row::is_draft)
    }

    pub fn ids(&self) -> impl Iterator<Item = &RowId> {
        self.rows.iter().map(|r| &r.id)
    }
}

/// Filtered and sorted real rows, padded with draft rows up to `min_rows`,
/// then `extra_draft_rows` more.
///
/// Draft rows are identified by their visual index, so a draft row keeps its
/// id only as long as the number of visible real rows does not change.
pub fn build_row_model(
    data: &DataSet,
    filters: &FilterSet,
    sort: Option<&SortKey>,
    extra_draft_rows: usize,
    min_rows: usize,
    parser: &NumericLocaleParser,
) -> RowModel {
    let visible = filter_and_sort(data, filters, sort, parser);
    let real_count = visible.len();
    let padding = min_rows.saturating_sub(real_count) + extra_draft_rows;

    let mut rows: Vec<Row> = visible
        .into_iter()
        .map(|idx| Row {
            id: RowId::Real(data.key_of(idx)),
            record_index: Some(idx),
        })
        .collect();
    rows.extend((0..padding).map(|i| Row {
        id: RowId::Draft(real_count + i),
        record_index: None,
    }));

    tracing::debug!(real = real_count, draft = padding, "rebuilt row model");
    RowModel { rows, real_count }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::filter::{FilterOp, SortDirection};
    use crate::model::record::record;
    use ledger_grid_engine::engine::{CellValue, NumericLocale};
    use pretty_assertions::assert_eq;

    fn parser() -> NumericLocaleParser {
        NumericLocaleParser::new(NumericLocale::Vi)
    }

    fn vouchers() -> DataSet {
        DataSet::new(
            "so_ct",
            vec![
                record([("so_ct", CellValue::from("PC01")), ("amount", 300.0.into())]),
                record([("so_ct", CellValue::from("PC02")), ("amount", 100.0.into())]),
                record([("so_ct", CellValue::from("PC03")), ("amount", 200.0.into())]),
            ],
        )
    }

    #[test]
    fn test_pads_to_min_rows() {
        let model = build_row_model(&vouchers(), &FilterSet::new(), None, 0, 5, &parser());
        let ids: Vec<_> = model.ids().cloned().collect();
        assert_eq!(
            ids,
            vec![
                RowId::Real("PC01".into()),
                RowId::Real("PC02".into()),
                RowId::Real("PC03".into()),
                RowId::Draft(3),
                RowId::Draft(4),
            ]
        );
        assert_eq!(model.real_count(), 3);
        assert!(model.is_draft(3));
        assert!(!model.is_draft(2));
    }

    #[test]
    fn test_extra_draft_rows_follow_padding() {
        let model = build_row_model(&vouchers(), &FilterSet::new(), None, 2, 2, &parser());
        assert_eq!(model.len(), 5);
        assert_eq!(model.get(4).map(|r| r.id.clone()), Some(RowId::Draft(4)));
    }

    #[test]
    fn test_filter_and_sort_shape_real_rows() {
        let mut filters = FilterSet::new();
        filters.set_condition("amount", FilterOp::Gte, "200");
        let sort = SortKey::new("amount", SortDirection::Asc);
        let model = build_row_model(&vouchers(), &filters, Some(&sort), 0, 0, &parser());
        let indices: Vec<_> = model.iter().map(|r| r.record_index).collect();
        assert_eq!(indices, vec![Some(2), Some(0)]);
        assert_eq!(model.index_of(&RowId::Real("PC01".into())), Some(1));
        assert_eq!(model.index_of(&RowId::Real("PC02".into())), None);
    }

    #[test]
    fn test_draft_index_lookup() {
        let model = build_row_model(&vouchers(), &FilterSet::new(), None, 0, 4, &parser());
        assert_eq!(model.index_of(&RowId::Draft(3)), Some(3));
        assert_eq!(model.index_of(&RowId::Draft(1)), None);
        assert_eq!(model.index_of(&RowId::Draft(9)), None);
    }
}
