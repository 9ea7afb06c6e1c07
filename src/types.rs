use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// A single cell fetched from SQL Server.
///
/// The variants keep enough of the column type to render the cell the way the
/// server's own tooling would; the JSON output only ever sees the text form:
/// ```rust
/// use mssql_json::types::RowValues;
///
/// assert_eq!(RowValues::Int(1).to_cell_text().as_deref(), Some("1"));
/// assert_eq!(RowValues::Bool(true).to_cell_text().as_deref(), Some("1"));
/// assert_eq!(RowValues::Null.to_cell_text(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (tinyint through bigint)
    Int(i64),
    /// Floating point value (real, float)
    Float(f64),
    /// Text value (char/varchar/nvarchar, decimal, money, guid, xml, date, time)
    Text(String),
    /// Bit value
    Bool(bool),
    /// datetime, datetime2 and smalldatetime values
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// Binary data
    Blob(Vec<u8>),
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// String form of the cell, `None` for SQL NULL.
    #[must_use]
    pub fn to_cell_text(&self) -> Option<String> {
        match self {
            RowValues::Int(i) => Some(i.to_string()),
            // Debug keeps the shortest round-trip digits and a trailing `.0`
            RowValues::Float(f) => Some(format!("{f:?}")),
            RowValues::Text(s) => Some(s.clone()),
            RowValues::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            RowValues::Timestamp(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
            RowValues::Null => None,
            RowValues::Blob(bytes) => Some(bytes.iter().map(|b| format!("{b:02X}")).collect()),
        }
    }

    /// JSON form of the cell: a string, or `null` for SQL NULL.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        self.to_cell_text().map_or(JsonValue::Null, JsonValue::String)
    }
}
