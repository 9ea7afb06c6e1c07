use std::sync::Arc;

use crate::types::RowValues;

/// A row from a query result
///
/// The column names are shared with every other row of the same result set.
#[derive(Debug, Clone)]
pub struct CustomDbRow {
    /// The column names for this row, in metadata order
    pub column_names: Arc<Vec<String>>,
    /// The values for this row, one per column
    pub rows: Vec<RowValues>,
}

impl CustomDbRow {
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, rows: Vec<RowValues>) -> Self {
        Self { column_names, rows }
    }

    /// Column names paired with their values, in metadata order.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &RowValues)> {
        self.column_names
            .iter()
            .map(String::as_str)
            .zip(self.rows.iter())
    }
}
