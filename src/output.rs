//! Turning a result set into JSON and routing it to stdout and/or a file.

use std::io::Write;
use std::path::Path;

use serde_json::{Map, Value as JsonValue};

use crate::config::QueryConfig;
use crate::error::MssqlJsonError;
use crate::results::{CustomDbRow, ResultSet};

/// One JSON object per row; keys keep the metadata column order.
#[must_use]
pub fn rows_to_json(result_set: &ResultSet) -> JsonValue {
    JsonValue::Array(result_set.results.iter().map(row_to_json).collect())
}

fn row_to_json(row: &CustomDbRow) -> JsonValue {
    let mut object = Map::with_capacity(row.rows.len());
    for (name, value) in row.cells() {
        object.insert(name.to_string(), value.to_json());
    }
    JsonValue::Object(object)
}

/// Compact JSON text for the whole result set.
///
/// # Errors
///
/// Returns `MssqlJsonError::JsonError` if serialization fails.
pub fn to_json_text(result_set: &ResultSet) -> Result<String, MssqlJsonError> {
    Ok(serde_json::to_string(&rows_to_json(result_set))?)
}

/// Print `json` to `stdout` unless silent, then write it to the configured file.
///
/// # Errors
///
/// Returns `MssqlJsonError::IoError` if stdout cannot be written and
/// `MssqlJsonError::OutputWriteError` if the result file cannot be written.
pub fn emit<W: Write>(
    json: &str,
    config: &QueryConfig,
    stdout: &mut W,
) -> Result<(), MssqlJsonError> {
    if !config.silent {
        writeln!(stdout, "{json}")?;
        stdout.flush()?;
    }

    if let Some(path) = &config.filename {
        write_file(path, json)?;
        tracing::info!(path = %path.display(), bytes = json.len(), "result written");
    }
    Ok(())
}

fn write_file(path: &Path, json: &str) -> Result<(), MssqlJsonError> {
    std::fs::write(path, json).map_err(|source| MssqlJsonError::OutputWriteError {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RowValues;
    use std::path::PathBuf;

    fn config(silent: bool, filename: Option<PathBuf>) -> QueryConfig {
        QueryConfig {
            username: "sa".into(),
            password: "x".into(),
            domain: String::new(),
            instance: "SQLEXPRESS".into(),
            host: "localhost".into(),
            port: 1433,
            database: "master".into(),
            sql: "SELECT 1 AS one;".into(),
            silent,
            filename,
            strict: false,
        }
    }

    fn people() -> ResultSet {
        let mut rs = ResultSet::with_columns(vec!["id".into(), "name".into(), "active".into()]);
        rs.add_row_values(vec![
            RowValues::Int(1),
            RowValues::Text("alice".into()),
            RowValues::Bool(true),
        ]);
        rs.add_row_values(vec![RowValues::Int(2), RowValues::Null, RowValues::Bool(false)]);
        rs
    }

    #[test]
    fn single_row_single_column() {
        let mut rs = ResultSet::with_columns(vec!["one".into()]);
        rs.add_row_values(vec![RowValues::Int(1)]);
        assert_eq!(to_json_text(&rs).unwrap(), r#"[{"one":"1"}]"#);
    }

    #[test]
    fn n_rows_with_c_keys_in_metadata_order() {
        let json = rows_to_json(&people());
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        for row in rows {
            let keys: Vec<&str> = row.as_object().unwrap().keys().map(String::as_str).collect();
            assert_eq!(keys, ["id", "name", "active"]);
        }
        assert_eq!(
            to_json_text(&people()).unwrap(),
            r#"[{"id":"1","name":"alice","active":"1"},{"id":"2","name":null,"active":"0"}]"#
        );
    }

    #[test]
    fn empty_result_set_is_empty_array() {
        let rs = ResultSet::with_columns(vec!["id".into()]);
        assert_eq!(to_json_text(&rs).unwrap(), "[]");
    }

    #[test]
    fn column_order_is_not_sorted() {
        let mut rs = ResultSet::with_columns(vec!["zeta".into(), "alpha".into()]);
        rs.add_row_values(vec![RowValues::Int(1), RowValues::Int(2)]);
        assert_eq!(to_json_text(&rs).unwrap(), r#"[{"zeta":"1","alpha":"2"}]"#);
    }

    #[test]
    fn prints_to_stdout_when_not_silent() {
        let mut out = Vec::new();
        emit("[]", &config(false, None), &mut out).unwrap();
        assert_eq!(out, b"[]\n");
    }

    #[test]
    fn silent_without_file_writes_nothing() {
        let mut out = Vec::new();
        emit(r#"[{"one":"1"}]"#, &config(true, None), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn file_matches_stdout_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        let json = to_json_text(&people()).unwrap();

        let mut out = Vec::new();
        emit(&json, &config(false, Some(path.clone())), &mut out).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(written, json);
        assert_eq!(printed.trim_end_matches('\n'), written);
    }

    #[test]
    fn existing_file_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        std::fs::write(&path, "x".repeat(1024)).unwrap();

        emit("[]", &config(true, Some(path.clone())), &mut Vec::new()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn unwritable_file_is_reported_after_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("result.json");

        let mut out = Vec::new();
        let err = emit("[]", &config(false, Some(path)), &mut out).unwrap_err();
        assert_eq!(out, b"[]\n");
        assert!(matches!(err, MssqlJsonError::OutputWriteError { .. }));
        assert_eq!(err.exit_code(true), 0);
        assert!(err.to_string().starts_with("Could not write "));
    }
}
