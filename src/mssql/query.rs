use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use futures_util::TryStreamExt;
use tiberius::{ColumnData, ColumnType, Row};

use super::config::MssqlClient;
use crate::error::MssqlJsonError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Run `sql` as a simple batch and collect its first result set.
///
/// Column names are captured from the metadata before any row is read. Rows of
/// later result sets in the same batch are drained and discarded.
///
/// # Errors
///
/// Returns `MssqlJsonError::QueryError` if the batch fails, if it yields no result set
/// (e.g. an `UPDATE`), or if fetching a row fails. The summary line is left empty for
/// the caller to fill in.
///
/// Row counts are not surfaced by the driver's query stream, so in a batch such as
/// `UPDATE ..; SELECT ..;` the leading count is skipped and the `SELECT` is returned.
pub async fn build_result_set(
    client: &mut MssqlClient,
    sql: &str,
) -> Result<ResultSet, MssqlJsonError> {
    let query_error = |message: String| MssqlJsonError::QueryError {
        message,
        summary: String::new(),
    };

    let mut stream = client
        .simple_query(sql)
        .await
        .map_err(|e| query_error(format!("SQL Server query error: {e}")))?;

    let columns = stream
        .columns()
        .await
        .map_err(|e| query_error(format!("SQL Server column fetch error: {e}")))?
        .ok_or_else(|| query_error("ResultSet is empty".to_string()))?;

    let column_names: Vec<String> = columns.iter().map(|col| col.name().to_string()).collect();
    tracing::debug!(columns = ?column_names, "result set metadata");

    let mut result_set = ResultSet::with_columns(column_names);

    let mut rows_stream = stream.into_row_stream();
    while let Some(row) = rows_stream
        .try_next()
        .await
        .map_err(|e| query_error(format!("SQL Server row fetch error: {e}")))?
    {
        if row.result_index() != 0 {
            continue;
        }
        result_set.add_row_values(extract_row(&row));
    }

    tracing::debug!(rows = result_set.results.len(), "result set fetched");
    Ok(result_set)
}

fn extract_row(row: &Row) -> Vec<RowValues> {
    row.cells()
        .enumerate()
        .map(|(idx, (col, data))| match (col.column_type(), data) {
            // money arrives as a float; keep the fixed scale of 4
            (ColumnType::Money | ColumnType::Money4, ColumnData::F64(Some(v))) => {
                RowValues::Text(format!("{v:.4}"))
            }
            _ => extract_value(row, idx, data),
        })
        .collect()
}

/// Convert one cell; date and time columns go through chrono for formatting.
fn extract_value(row: &Row, idx: usize, data: &ColumnData<'static>) -> RowValues {
    match data {
        ColumnData::U8(Some(v)) => RowValues::Int(i64::from(*v)),
        ColumnData::I16(Some(v)) => RowValues::Int(i64::from(*v)),
        ColumnData::I32(Some(v)) => RowValues::Int(i64::from(*v)),
        ColumnData::I64(Some(v)) => RowValues::Int(*v),
        ColumnData::F32(Some(v)) => RowValues::Float(widen_f32(*v)),
        ColumnData::F64(Some(v)) => RowValues::Float(*v),
        ColumnData::Bit(Some(b)) => RowValues::Bool(*b),
        ColumnData::Numeric(Some(n)) => RowValues::Text(n.to_string()),
        ColumnData::String(Some(s)) => RowValues::Text(s.to_string()),
        ColumnData::Guid(Some(g)) => RowValues::Text(g.to_string().to_uppercase()),
        ColumnData::Xml(Some(xml)) => RowValues::Text(xml.to_string()),
        ColumnData::Binary(Some(b)) => RowValues::Blob(b.to_vec()),
        ColumnData::DateTime(Some(_))
        | ColumnData::SmallDateTime(Some(_))
        | ColumnData::DateTime2(Some(_)) => row
            .try_get::<NaiveDateTime, _>(idx)
            .ok()
            .flatten()
            .map_or(RowValues::Null, RowValues::Timestamp),
        ColumnData::DateTimeOffset(Some(_)) => row
            .try_get::<DateTime<FixedOffset>, _>(idx)
            .ok()
            .flatten()
            .map_or(RowValues::Null, |dt| {
                RowValues::Text(dt.format("%Y-%m-%d %H:%M:%S%.f %:z").to_string())
            }),
        ColumnData::Date(Some(_)) => row
            .try_get::<NaiveDate, _>(idx)
            .ok()
            .flatten()
            .map_or(RowValues::Null, |d| {
                RowValues::Text(d.format("%Y-%m-%d").to_string())
            }),
        ColumnData::Time(Some(_)) => row
            .try_get::<NaiveTime, _>(idx)
            .ok()
            .flatten()
            .map_or(RowValues::Null, |t| {
                RowValues::Text(t.format("%H:%M:%S%.f").to_string())
            }),
        // every `None` variant
        _ => RowValues::Null,
    }
}

/// Widen a `real` without exposing binary noise (`0.1f32` stays `0.1`).
fn widen_f32(v: f32) -> f64 {
    v.to_string().parse().unwrap_or_else(|_| f64::from(v))
}
