//! Order-preserving collection of named columns.

use indexmap::IndexMap;

use super::column::Column;
use crate::error::{ObsddError, Result};

/// An in-memory table: unique column names mapped to equal-length columns.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: IndexMap<String, Column>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from columns, in order.
    pub fn from_columns(columns: impl IntoIterator<Item = Column>) -> Result<Self> {
        let mut dataset = Self::new();
        for column in columns {
            dataset.add_column(column)?;
        }
        Ok(dataset)
    }

    /// Append a column.
    ///
    /// Fails on a duplicate name or a row count that differs from the
    /// columns already present.
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        if self.columns.contains_key(column.name()) {
            return Err(ObsddError::DuplicateColumn(column.name().to_string()));
        }
        if let Some((_, first)) = self.columns.first() {
            if first.len() != column.len() {
                return Err(ObsddError::LengthMismatch {
                    column: column.name().to_string(),
                    expected: first.len(),
                    actual: column.len(),
                });
            }
        }
        self.columns.insert(column.name().to_string(), column);
        Ok(())
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Columns in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows shared by every column (0 for a dataset without columns).
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |(_, c)| c.len())
    }
}
