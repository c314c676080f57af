//! Stable row/column identities and the composite cell key.
//!
//! Visual positions change with every filter, sort or refresh; these ids do
//! not, so everything that must survive a rebuild (scratch values, error
//! annotations, width overrides) is keyed by them.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum RowId {
    /// Unique key value of the backing record.
    Real(String),
    /// Synthesized row, identified by its visual index.
    Draft(usize),
}

impl RowId {
    pub fn is_draft(&self) -> bool {
        matches!(self, RowId::Draft(_))
    }

    pub fn real_key(&self) -> Option<&str> {
        match self {
            RowId::Real(key) => Some(key),
            RowId::Draft(_) => None,
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Real(key) => write!(f, "{}", key),
            RowId::Draft(idx) => write!(f, "draft#{}", idx),
        }
    }
}

#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum ColId {
    /// Field name on the external records.
    Real(String),
    /// Synthesized column, numbered in creation order.
    Draft(u32),
}

impl ColId {
    pub fn is_draft(&self) -> bool {
        matches!(self, ColId::Draft(_))
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            ColId::Real(field) => Some(field),
            ColId::Draft(_) => None,
        }
    }
}

impl fmt::Display for ColId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColId::Real(field) => write!(f, "{}", field),
            ColId::Draft(n) => write!(f, "draft#{}", n),
        }
    }
}

/// (row, column) identity of a cell.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellKey {
    pub row: RowId,
    pub col: ColId,
}

impl CellKey {
    pub fn new(row: RowId, col: ColId) -> Self {
        Self { row, col }
    }

    /// Persisted cells have a real row and a real column.
    pub fn is_persisted(&self) -> bool {
        !self.row.is_draft() && !self.col.is_draft()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_keys_with_delimiters_do_not_collide() {
        // "a:b" + "c" and "a" + "b:c" would collide as joined strings.
        let mut map = HashMap::new();
        map.insert(
            CellKey::new(RowId::Real("a:b".into()), ColId::Real("c".into())),
            1,
        );
        map.insert(
            CellKey::new(RowId::Real("a".into()), ColId::Real("b:c".into())),
            2,
        );
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_persistence_needs_both_real() {
        let real_row = RowId::Real("K1".into());
        let real_col = ColId::Real("amount".into());
        assert!(CellKey::new(real_row.clone(), real_col.clone()).is_persisted());
        assert!(!CellKey::new(RowId::Draft(3), real_col).is_persisted());
        assert!(!CellKey::new(real_row, ColId::Draft(0)).is_persisted());
    }
}
