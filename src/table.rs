//! Tabular structure handed to the presentation layer. Every cell is a
//! JSON-serializable scalar; `Missing` serializes as `null`.

use bson::{Bson, Document as BsonDocument};
use serde::Serialize;
use std::cmp::Ordering;

use crate::types::{ID_FIELD, NUMERIC_FIELDS, TEXT_FIELDS};

/// One display cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Missing,
    Bool(bool),
    Int(i64),
    Num(f64),
    Str(String),
}

impl Cell {
    fn from_bson(v: &Bson) -> Self {
        match v {
            Bson::Null => Self::Missing,
            Bson::Boolean(b) => Self::Bool(*b),
            Bson::Int32(i) => Self::Int(i64::from(*i)),
            Bson::Int64(i) => Self::Int(*i),
            Bson::Double(f) => Self::Num(*f),
            Bson::String(s) => Self::Str(s.clone()),
            Bson::ObjectId(oid) => Self::Str(oid.to_hex()),
            other => Self::Str(serde_json::to_string(other).unwrap_or_default()),
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Num(f) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Records reshaped into columns and rows. Column order is first-seen order
/// across the record set; a record lacking a column gets `Missing`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl DataTable {
    #[must_use]
    pub fn from_records(records: &[BsonDocument]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for doc in records {
            for key in doc.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        let rows = records
            .iter()
            .map(|doc| {
                columns
                    .iter()
                    .map(|c| doc.get(c).map_or(Cell::Missing, Cell::from_bson))
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Cleanup for presentation:
    /// - the identifier column, already stringified, is dropped,
    /// - named numeric columns are coerced to numbers, with non-convertible
    ///   values becoming `Missing` instead of erroring,
    /// - named text columns are coerced to strings and trimmed.
    #[must_use]
    pub fn clean(mut self) -> Self {
        if let Some(idx) = self.column_index(ID_FIELD) {
            self.columns.remove(idx);
            for row in &mut self.rows {
                row.remove(idx);
            }
        }
        for col in NUMERIC_FIELDS {
            if let Some(idx) = self.column_index(col) {
                for row in &mut self.rows {
                    row[idx] = coerce_numeric(&row[idx]);
                }
            }
        }
        for col in TEXT_FIELDS {
            if let Some(idx) = self.column_index(col) {
                for row in &mut self.rows {
                    row[idx] = coerce_text(&row[idx]);
                }
            }
        }
        self
    }

    /// Stable sort by one column. Missing cells sort last regardless of
    /// direction, matching how the dashboard displays incomplete records.
    pub fn sort_by(&mut self, column: &str, ascending: bool) {
        let Some(idx) = self.column_index(column) else {
            return;
        };
        self.rows.sort_by(|a, b| match (a[idx].is_missing(), b[idx].is_missing()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ord = compare_cells(&a[idx], &b[idx]);
                if ascending { ord } else { ord.reverse() }
            }
        });
    }

    /// Category counts for one column, descending by count, ties by name.
    #[must_use]
    pub fn value_counts(&self, column: &str) -> Vec<(String, u64)> {
        let Some(idx) = self.column_index(column) else {
            return Vec::new();
        };
        let mut counts: std::collections::BTreeMap<String, u64> = std::collections::BTreeMap::new();
        for row in &self.rows {
            let label = match &row[idx] {
                Cell::Missing => continue,
                Cell::Str(s) => s.clone(),
                Cell::Int(i) => i.to_string(),
                Cell::Num(f) => f.to_string(),
                Cell::Bool(b) => b.to_string(),
            };
            *counts.entry(label).or_insert(0) += 1;
        }
        let mut out: Vec<(String, u64)> = counts.into_iter().collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        out
    }

    /// Rows as JSON objects, the shape the UI's data table consumes.
    #[must_use]
    pub fn to_records(&self) -> Vec<serde_json::Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut obj = serde_json::Map::new();
                for (c, cell) in self.columns.iter().zip(row) {
                    obj.insert(
                        c.clone(),
                        serde_json::to_value(cell).unwrap_or(serde_json::Value::Null),
                    );
                }
                serde_json::Value::Object(obj)
            })
            .collect()
    }
}

fn coerce_numeric(cell: &Cell) -> Cell {
    match cell {
        Cell::Num(f) => Cell::Num(*f),
        Cell::Int(i) => Cell::Num(*i as f64),
        Cell::Bool(b) => Cell::Num(f64::from(u8::from(*b))),
        Cell::Str(s) => s.trim().parse::<f64>().map_or(Cell::Missing, Cell::Num),
        Cell::Missing => Cell::Missing,
    }
}

fn coerce_text(cell: &Cell) -> Cell {
    match cell {
        Cell::Str(s) => Cell::Str(s.trim().to_string()),
        Cell::Int(i) => Cell::Str(i.to_string()),
        Cell::Num(f) => Cell::Str(f.to_string()),
        Cell::Bool(b) => Cell::Str(b.to_string()),
        Cell::Missing => Cell::Missing,
    }
}

fn compare_cells(a: &Cell, b: &Cell) -> Ordering {
    match (a, b) {
        (Cell::Missing, Cell::Missing) => Ordering::Equal,
        (Cell::Missing, _) => Ordering::Greater,
        (_, Cell::Missing) => Ordering::Less,
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => match (a.as_str(), b.as_str()) {
                (Some(x), Some(y)) => x.cmp(y),
                _ => Ordering::Equal,
            },
        },
    }
}
