//! Column-oriented tables as emitted by `volatility --output=json`, decoded into records.

mod value;

pub use value::{Record, Value};

use crate::error::TableError;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// `{"columns": [...], "rows": [[...], ...]}` document for one module run
#[derive(Debug, Clone, Deserialize)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl RawTable {
    pub fn from_json(text: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, TableError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, TableError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Zip every row with the column names. Row lengths must match the column count.
    pub fn decode(&self) -> Result<Vec<Record>, TableError> {
        let mut seen = HashSet::with_capacity(self.columns.len());
        for c in &self.columns {
            if !seen.insert(c.as_str()) {
                return Err(TableError::DuplicateColumn(c.clone()));
            }
        }

        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                if row.len() != self.columns.len() {
                    return Err(TableError::RowShape {
                        row: i,
                        expected: self.columns.len(),
                        found: row.len(),
                    });
                }
                let fields: HashMap<String, Value> = self
                    .columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect();
                Ok(Record::from_fields(fields))
            })
            .collect()
    }

    /// Parse and decode in one step
    pub fn decode_json(text: &str) -> Result<Vec<Record>, TableError> {
        Self::from_json(text)?.decode()
    }
}
