use std::collections::HashMap;

use common::{FeatureError, Result};

/// A collection of named `f64` columns of equal length, one row per
/// simulation run.
///
/// This is the minimal dataframe-like collaborator the feature extraction
/// needs: column lookup by name, a row count, and NaN-testable values.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: HashMap<String, Vec<f64>>,
    num_rows: usize,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column, replacing any existing column of the same name.
    ///
    /// The first column added determines the row count; later columns must
    /// match it.
    pub fn with_column(mut self, name: &str, values: Vec<f64>) -> Result<Self> {
        if self.columns.is_empty() {
            self.num_rows = values.len();
        } else if values.len() != self.num_rows {
            return Err(FeatureError::ShapeMismatch {
                what: "rows",
                expected: self.num_rows,
                got: values.len(),
            });
        }
        self.columns.insert(name.to_owned(), values);
        Ok(self)
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| FeatureError::UnknownColumn(name.to_owned()))
    }

    /// The number of rows shared by every column
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// The number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}
