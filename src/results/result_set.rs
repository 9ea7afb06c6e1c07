use std::sync::Arc;

use super::row::CustomDbRow;
use crate::types::RowValues;

/// The rows of one query result together with its column metadata.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query
    pub results: Vec<CustomDbRow>,
    /// Column names shared by all rows (to avoid duplicating in each row)
    column_names: Arc<Vec<String>>,
}

impl ResultSet {
    /// Create an empty result set for the given columns.
    #[must_use]
    pub fn with_columns(column_names: Vec<String>) -> ResultSet {
        ResultSet {
            results: Vec::new(),
            column_names: Arc::new(column_names),
        }
    }

    /// Get the column names for this result set
    #[must_use]
    pub fn get_column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Add a row to the result set
    ///
    /// `row_values` must hold one value per column.
    pub fn add_row_values(&mut self, row_values: Vec<RowValues>) {
        debug_assert_eq!(row_values.len(), self.column_names.len());
        self.results
            .push(CustomDbRow::new(Arc::clone(&self.column_names), row_values));
    }
}
