//! App Router

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*, trailing_slash::remove_slash};

use crate::{
    graphql, healthcheck,
    observability::{self, RequestLogging},
    state::State,
};

/// Full routing tree with middleware for the given state.
pub(crate) fn app_router(state: Arc<State>, request_logging: RequestLogging) -> Router {
    Router::new()
        .hoop(request_logging)
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(
            Router::with_path("graphql")
                .get(graphql::graphiql)
                .post(graphql::execute),
        )
}
