use super::config::MssqlClient;
use super::query::build_result_set;
use crate::config::QueryConfig;
use crate::error::MssqlJsonError;
use crate::results::ResultSet;

/// Execute the configured statement and close the connection.
///
/// Takes ownership of the client so it is closed exactly once, after the query,
/// whether the query succeeded or not. Errors raised while closing are only logged.
///
/// # Errors
///
/// Returns `MssqlJsonError::QueryError` with the connection summary attached if the
/// statement fails or produces no result set.
pub async fn execute_select(
    mut client: MssqlClient,
    config: &QueryConfig,
) -> Result<ResultSet, MssqlJsonError> {
    let outcome = build_result_set(&mut client, &config.sql).await;

    if let Err(e) = client.close().await {
        tracing::debug!("ignoring error while closing connection: {e}");
    }

    outcome.map_err(|e| with_summary(e, config))
}

/// Fill in the connection summary of a query error; other errors pass through.
fn with_summary(err: MssqlJsonError, config: &QueryConfig) -> MssqlJsonError {
    match err {
        MssqlJsonError::QueryError { message, .. } => MssqlJsonError::QueryError {
            message,
            summary: config.connection_summary(),
        },
        other => other,
    }
}
