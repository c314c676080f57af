//! Scratch storage for cells that are not persisted.
//!
//! Any cell whose row or column is a draft lives here as raw input text,
//! keyed by its stable [`CellKey`]. A draft row becomes commit-eligible as
//! soon as one of its real-column cells holds a non-blank value; committing
//! hands the values to the host and leaves the scratch untouched until the
//! refreshed data set no longer shows the draft row.

use dashmap::DashMap;
use std::collections::HashSet;

use crate::model::{CellKey, ColId, ColumnModel, RowId};

#[derive(Debug, Default)]
pub struct DraftStaging {
    scratch: DashMap<CellKey, String>,
    /// Draft rows inserted on top of the `min_rows` padding.
    extra_rows: usize,
    /// Draft column ids in creation order.
    columns: Vec<u32>,
    next_column: u32,
}

impl DraftStaging {
    /// Staging with `draft_columns` draft columns created up front.
    pub fn new(draft_columns: usize) -> Self {
        let mut staging = Self::default();
        for _ in 0..draft_columns {
            staging.add_column();
        }
        staging
    }

    pub fn get(&self, key: &CellKey) -> Option<String> {
        self.scratch.get(key).map(|v| v.value().clone())
    }

    /// Store raw input; an empty value removes the entry.
    pub fn set(&self, key: CellKey, value: &str) {
        if value.is_empty() {
            self.scratch.remove(&key);
        } else {
            self.scratch.insert(key, value.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.scratch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scratch.is_empty()
    }

    pub fn extra_rows(&self) -> usize {
        self.extra_rows
    }

    pub fn add_row(&mut self) {
        self.extra_rows += 1;
    }

    pub fn column_ids(&self) -> &[u32] {
        &self.columns
    }

    pub fn add_column(&mut self) -> ColId {
        let id = self.next_column;
        self.next_column += 1;
        self.columns.push(id);
        ColId::Draft(id)
    }

    /// Non-blank scratch values of `row` in real columns, by visual column.
    pub fn staged_values(&self, row: &RowId, columns: &ColumnModel) -> Vec<(usize, String)> {
        columns
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_draft())
            .filter_map(|(idx, c)| {
                let value = self.get(&CellKey::new(row.clone(), c.id.clone()))?;
                (!value.trim().is_empty()).then_some((idx, value))
            })
            .collect()
    }

    pub fn is_commit_eligible(&self, row: &RowId, columns: &ColumnModel) -> bool {
        row.is_draft() && !self.staged_values(row, columns).is_empty()
    }

    /// Drop scratch values of draft rows that are no longer shown, and of
    /// real rows that left the data set. Returns the number removed.
    pub fn retain_rows(&self, live: &HashSet<RowId>) -> usize {
        let before = self.scratch.len();
        self.scratch.retain(|key, _| live.contains(&key.row));
        let removed = before - self.scratch.len();
        if removed > 0 {
            tracing::debug!(removed, "dropped scratch values of vanished rows");
        }
        removed
    }
}
