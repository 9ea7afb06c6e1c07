use tiberius::{Client, SqlBrowser};
use tokio::net::TcpStream;
use tokio_util::compat::TokioAsyncWriteCompatExt;

use super::config::{ConnectionDescriptor, MssqlClient, build_tiberius_config};
use crate::config::QueryConfig;
use crate::error::MssqlJsonError;

/// Open a connection for the configuration.
///
/// The instance name is resolved through the SQL Browser service before the TCP
/// connection is made. No retry is attempted.
///
/// # Errors
/// Returns `MssqlJsonError::ConnectionError` carrying the redacted connection descriptor
/// if resolution, the TCP connection or the login fails.
pub async fn create_mssql_client(config: &QueryConfig) -> Result<MssqlClient, MssqlJsonError> {
    let tiberius_config = build_tiberius_config(config);
    let connection_error = |message: String| MssqlJsonError::ConnectionError {
        message,
        descriptor: ConnectionDescriptor::new(config).redacted().to_string(),
    };

    tracing::debug!(
        addr = %tiberius_config.get_addr(),
        instance = %config.instance,
        "connecting to SQL Server"
    );

    let tcp = TcpStream::connect_named(&tiberius_config)
        .await
        .map_err(|e| connection_error(format!("TCP connection error: {e}")))?;
    tcp.set_nodelay(true).ok();

    let client = Client::connect(tiberius_config, tcp.compat_write())
        .await
        .map_err(|e| connection_error(format!("SQL Server connection error: {e}")))?;

    tracing::debug!(database = %config.database, "connected");
    Ok(client)
}
