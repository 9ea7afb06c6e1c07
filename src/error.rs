use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MssqlJsonError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("{0}")]
    ArgumentError(String),

    #[error("{message}\nSQL Statement: {sql}")]
    ValidationError { message: String, sql: String },

    #[error("{message}\nConnection String: {descriptor}")]
    ConnectionError { message: String, descriptor: String },

    #[error("{message}\n{summary}")]
    QueryError { message: String, summary: String },

    #[error("Could not write {}: {source}", path.display())]
    OutputWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MssqlJsonError {
    /// Process exit status for this error.
    ///
    /// Query failures exit successfully unless `strict` is set; a failed result file
    /// never changes the status.
    #[must_use]
    pub fn exit_code(&self, strict: bool) -> u8 {
        match self {
            MssqlJsonError::ValidationError { .. } => 2,
            MssqlJsonError::QueryError { .. } if strict => 3,
            MssqlJsonError::QueryError { .. } | MssqlJsonError::OutputWriteError { .. } => 0,
            MssqlJsonError::IoError(_)
            | MssqlJsonError::JsonError(_)
            | MssqlJsonError::ArgumentError(_)
            | MssqlJsonError::ConnectionError { .. } => 1,
        }
    }
}
