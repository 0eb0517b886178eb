//! HTTP handlers for the GraphQL endpoint.

use std::sync::Arc;

use async_graphql::{BatchRequest, http::GraphiQLSource};
use salvo::prelude::*;

use crate::{extensions::*, observability::observe_graphql_response, state::State};

const GRAPHQL_PATH: &str = "/graphql";

/// Execute a single or batched GraphQL request.
#[handler]
pub(crate) async fn execute(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = req
        .parse_json::<BatchRequest>()
        .await
        .or_400("could not parse GraphQL request body")?;

    let response = state.schema.execute_batch(request).await;

    observe_graphql_response(!response.is_ok());

    res.render(Json(response));

    Ok(())
}

/// Serve the GraphiQL explorer.
#[handler]
pub(crate) async fn graphiql(res: &mut Response) {
    res.render(Text::Html(
        GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish(),
    ));
}
