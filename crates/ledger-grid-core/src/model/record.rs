//! External records as supplied by the data provider.

use ledger_grid_engine::engine::CellValue;
use std::collections::BTreeMap;

/// One record: field name -> value.
pub type Record = BTreeMap<String, CellValue>;

/// A full, ordered snapshot from the data provider. The grid never patches
/// it incrementally; every mutation upstream arrives as a new `DataSet`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataSet {
    pub records: Vec<Record>,
    /// Field holding each record's unique key.
    pub key_field: String,
}

impl DataSet {
    pub fn new(key_field: &str, records: Vec<Record>) -> Self {
        Self {
            records,
            key_field: key_field.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stringified key of record `index`. Records without a key fall back to
    /// their position, which is only stable until the next refresh.
    pub fn key_of(&self, index: usize) -> String {
        let key = self
            .records
            .get(index)
            .and_then(|r| r.get(&self.key_field))
            .map(|v| v.to_input_string())
            .filter(|k| !k.is_empty());
        match key {
            Some(k) => k,
            None => {
                tracing::warn!(index, key_field = %self.key_field, "record has no key value");
                format!("#{}", index)
            }
        }
    }

    /// Stringified value of `field` in record `index` ("" when absent).
    pub fn text_of(&self, index: usize, field: &str) -> String {
        self.records
            .get(index)
            .and_then(|r| r.get(field))
            .map(|v| v.to_input_string())
            .unwrap_or_default()
    }
}

/// Build a record from `(field, value)` pairs.
pub fn record<I, K, V>(fields: I) -> Record
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<CellValue>,
{
    fields
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_of_uses_key_field() {
        let data = DataSet::new(
            "id",
            vec![
                record([("id", CellValue::from("TS-01")), ("name", "Máy in".into())]),
                record([("name", CellValue::from("Không mã"))]),
                record([("id", CellValue::from(7.0))]),
            ],
        );
        assert_eq!(data.key_of(0), "TS-01");
        assert_eq!(data.key_of(1), "#1");
        assert_eq!(data.key_of(2), "7");
        assert_eq!(data.text_of(0, "name"), "Máy in");
        assert_eq!(data.text_of(0, "missing"), "");
    }
}
