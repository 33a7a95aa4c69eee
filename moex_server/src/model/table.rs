//! ISS table blocks.
//!
//! Every ISS JSON answer is an object of named blocks, each shaped as
//! `{"columns": [...], "data": [[...], ...]}`. Rows are positional; [`Row`] gives
//! access by column name.
use serde::Deserialize;
use serde_json::Value;

/// One named block of an ISS answer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Table {
    /// Column names.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Positional rows.
    #[serde(default)]
    pub data: Vec<Vec<Value>>,
}

/// A row bound to its table's column names.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl Table {
    /// Extracts block `name` from an ISS answer; missing or malformed blocks are empty.
    pub fn from_block(answer: &Value, name: &str) -> Self {
        answer
            .get(name)
            .and_then(|block| Table::deserialize(block).ok())
            .unwrap_or_default()
    }

    /// Non-empty rows in answer order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.data
            .iter()
            .filter(|values| !values.is_empty())
            .map(|values| Row {
                columns: &self.columns,
                values,
            })
    }

    /// First non-empty row.
    pub fn first_row(&self) -> Option<Row<'_>> {
        self.rows().next()
    }
}

impl<'a> Row<'a> {
    /// Raw cell of `column`; `None` when the column is unknown or the row is short.
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.values.get(index).filter(|v| !v.is_null())
    }

    /// Numeric cell.
    pub fn f64(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(Value::as_f64)
    }

    /// Numeric cell, treating `0` like a missing value.
    pub fn nonzero_f64(&self, column: &str) -> Option<f64> {
        self.f64(column).filter(|v| *v != 0.0)
    }

    /// String cell.
    pub fn str(&self, column: &str) -> Option<&'a str> {
        self.get(column).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_cells_by_column() {
        let answer = json!({
            "marketdata": {
                "columns": ["SECID", "LAST", "HIGH", "VOLTODAY"],
                "data": [[], ["SBER", 295.4, null, 0]]
            }
        });
        let table = Table::from_block(&answer, "marketdata");
        let row = table.first_row().unwrap();
        assert_eq!(row.str("SECID"), Some("SBER"));
        assert_eq!(row.f64("LAST"), Some(295.4));
        assert_eq!(row.f64("HIGH"), None);
        assert_eq!(row.f64("VOLTODAY"), Some(0.0));
        assert_eq!(row.nonzero_f64("VOLTODAY"), None);
        assert_eq!(row.get("MISSING"), None);
    }

    #[test]
    fn missing_block_is_empty() {
        let table = Table::from_block(&json!({"other": 1}), "marketdata");
        assert!(table.first_row().is_none());
        let broken = Table::from_block(&json!({"marketdata": "oops"}), "marketdata");
        assert!(broken.rows().next().is_none());
    }
}
