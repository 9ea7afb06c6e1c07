use std::fmt;

use tiberius::{AuthMethod, Client, Config as TiberiusConfig};
use tokio::net::TcpStream;
use tokio_util::compat::Compat;

use crate::config::QueryConfig;

/// Type alias for SQL Server client
pub type MssqlClient = Client<Compat<TcpStream>>;

const REDACTED: &str = "****";

/// jTDS-style connection URL for a configuration.
///
/// Each configuration field has exactly one slot; an empty domain still renders as
/// `domain=;`. Rendering is a pure function of the configuration.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionDescriptor<'a> {
    config: &'a QueryConfig,
    redact_password: bool,
}

impl<'a> ConnectionDescriptor<'a> {
    #[must_use]
    pub fn new(config: &'a QueryConfig) -> Self {
        Self {
            config,
            redact_password: false,
        }
    }

    /// Same descriptor with the password replaced by `****`, for diagnostics.
    #[must_use]
    pub fn redacted(self) -> Self {
        Self {
            redact_password: true,
            ..self
        }
    }
}

impl fmt::Display for ConnectionDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.config;
        let password = if self.redact_password {
            REDACTED
        } else {
            c.password.as_str()
        };
        write!(
            f,
            "jdbc:jtds:sqlserver://{}:{}/{};instance={};user={};domain={};password={};useNTLMv2=true;",
            c.host, c.port, c.database, c.instance, c.username, c.domain, password
        )
    }
}

/// Login for the configuration: NTLM as `DOMAIN\user` when a domain is given,
/// SQL Server authentication otherwise.
fn authentication(config: &QueryConfig) -> AuthMethod {
    if config.domain.is_empty() {
        AuthMethod::sql_server(&config.username, &config.password)
    } else {
        AuthMethod::windows(
            format!("{}\\{}", config.domain, config.username),
            &config.password,
        )
    }
}

pub(crate) fn build_tiberius_config(config: &QueryConfig) -> TiberiusConfig {
    let mut tiberius_config = TiberiusConfig::new();
    tiberius_config.host(&config.host);
    tiberius_config.port(config.port);
    tiberius_config.database(&config.database);
    tiberius_config.instance_name(&config.instance);
    tiberius_config.authentication(authentication(config));
    tiberius_config.trust_cert();
    tiberius_config
}
