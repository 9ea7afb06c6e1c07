//! In-memory result sets read back from the server.

mod result_set;
mod row;

pub use result_set::ResultSet;
pub use row::CustomDbRow;
