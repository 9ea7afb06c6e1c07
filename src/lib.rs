//! Run one SQL statement against SQL Server and emit its result set as JSON.
//!
//! The pipeline is strictly sequential: [`args`] parses flags, [`config::QueryConfig`]
//! validates them, [`mssql`] connects and runs the statement, and [`output`] serializes
//! the rows.

pub mod args;
pub mod config;
pub mod error;
pub mod logging;
pub mod mssql;
pub mod output;
pub mod results;
pub mod types;

pub use config::QueryConfig;
pub use error::MssqlJsonError;

use std::io::Write;

/// Connect, run the configured statement, and write its JSON to `stdout` and/or the
/// configured file.
///
/// # Errors
///
/// Returns the first error of the pipeline; see [`MssqlJsonError::exit_code`] for how
/// each kind maps to a process status.
pub async fn run<W: Write>(config: &QueryConfig, stdout: &mut W) -> Result<(), MssqlJsonError> {
    tracing::debug!(
        "config: {}",
        serde_json::to_string(config).unwrap_or_else(|_| "{}".to_string())
    );

    let client = mssql::create_mssql_client(config).await?;
    let result_set = mssql::execute_select(client, config).await?;
    let json = output::to_json_text(&result_set)?;
    output::emit(&json, config, stdout)
}
