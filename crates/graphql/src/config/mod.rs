//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    graphql::GraphqlConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod graphql;
pub(crate) mod observability;
pub(crate) mod server;

/// CRM GraphQL Server configuration
#[derive(Debug, Parser)]
#[command(name = "crm-graphql", about = "CRM GraphQL Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Tracing export and request logging settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Query execution limits.
    #[command(flatten)]
    pub graphql: GraphqlConfig,
}

impl ServerConfig {
    /// Load configuration from `.env`, the environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_apply_when_only_database_is_given() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "crm-graphql",
            "--database-url",
            "postgres://localhost/crm",
        ])?;

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.graphql.depth_limit, 10);
        assert_eq!(config.graphql.complexity_limit, 500);
        assert!(!config.observability.otel_enabled);

        Ok(())
    }

    #[test]
    fn socket_addr_joins_host_and_port() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "crm-graphql",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--database-url",
            "postgres://localhost/crm",
        ])?;

        assert_eq!(config.socket_addr(), "127.0.0.1:9000");

        Ok(())
    }
}
