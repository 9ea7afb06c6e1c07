use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::args::Args;
use crate::error::MssqlJsonError;

/// Everything one invocation needs, validated once and never mutated.
#[derive(Clone, Serialize)]
pub struct QueryConfig {
    pub username: String,
    #[serde(skip)]
    pub password: String,
    pub domain: String,
    pub instance: String,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub sql: String,
    pub silent: bool,
    pub filename: Option<PathBuf>,
    pub strict: bool,
}

impl QueryConfig {
    /// Build the configuration from parsed flags.
    ///
    /// # Errors
    ///
    /// Returns `MssqlJsonError::ValidationError` if the SQL text is not terminated.
    pub fn from_args(args: Args) -> Result<Self, MssqlJsonError> {
        validate_sql(&args.sql)?;
        Ok(QueryConfig {
            username: args.username,
            password: args.password,
            domain: args.domain.unwrap_or_default(),
            instance: args.instance,
            host: args.hostname,
            port: args.port,
            database: args.database,
            sql: args.sql,
            silent: args.silent,
            filename: args.filename,
            strict: args.strict,
        })
    }

    /// Human-readable pointer at the server and login in use, without secrets.
    #[must_use]
    pub fn connection_summary(&self) -> String {
        format!(
            "You are connected to {}:{}/{}. Using database {} as user {}.",
            self.host, self.port, self.instance, self.database, self.username
        )
    }
}

impl fmt::Debug for QueryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryConfig")
            .field("username", &self.username)
            .field("domain", &self.domain)
            .field("instance", &self.instance)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("sql", &self.sql)
            .field("silent", &self.silent)
            .field("filename", &self.filename)
            .field("strict", &self.strict)
            .finish_non_exhaustive()
    }
}

/// Require a `;` somewhere after the first character.
///
/// This is a presence check only, the statement itself is never parsed.
///
/// # Errors
///
/// Returns `MssqlJsonError::ValidationError` echoing the offending SQL.
pub fn validate_sql(sql: &str) -> Result<(), MssqlJsonError> {
    match sql.find(';') {
        Some(idx) if idx > 0 => Ok(()),
        _ => Err(MssqlJsonError::ValidationError {
            message: "You need to terminate the SQL statement with ;".to_string(),
            sql: sql.to_string(),
        }),
    }
}
