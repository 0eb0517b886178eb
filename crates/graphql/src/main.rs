//! CRM GraphQL Server

use std::process::ExitCode;

use salvo::prelude::*;
use tracing::{error, info};

use crm_app::context::AppContext;

use crate::{
    config::ServerConfig,
    observability::{Observability, RequestLogging},
    state::State,
};

mod config;
mod extensions;
mod graphql;
mod healthcheck;
mod observability;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// CRM GraphQL Server entry point
#[tokio::main]
pub async fn main() -> ExitCode {
    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(parse_error) => {
            #[expect(
                clippy::print_stderr,
                reason = "logging not initialized yet, must use eprintln for startup errors"
            )]
            {
                eprintln!("Configuration error: {parse_error}");
            }

            return ExitCode::FAILURE;
        }
    };

    let observability = match Observability::init(&config) {
        Ok(observability) => observability,
        Err(init_error) => {
            #[expect(
                clippy::print_stderr,
                reason = "logging not initialized yet, must use eprintln for startup errors"
            )]
            {
                eprintln!("Observability error: {init_error}");
            }

            return ExitCode::FAILURE;
        }
    };

    let app = match AppContext::from_database_url(&config.database.database_url).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");
            observability.shutdown();

            return ExitCode::FAILURE;
        }
    };

    let schema = graphql::build_schema(app, &config.graphql);
    let router = router::app_router(
        State::new(schema),
        RequestLogging::from_config(&config.observability),
    );

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;
    let server = Server::new(listener);
    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(signal_error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {signal_error}");
        }
    });

    server.serve(router).await;

    info!("server stopped");
    observability.shutdown();

    ExitCode::SUCCESS
}
