//! Schema assembly.

use async_graphql::{EmptySubscription, Schema};

use crm_app::context::AppContext;

use crate::{
    config::graphql::GraphqlConfig,
    graphql::{mutation::MutationRoot, query::QueryRoot},
};

pub(crate) type CrmSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema over the application services.
pub(crate) fn build_schema(app: AppContext, limits: &GraphqlConfig) -> CrmSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(app)
        .limit_depth(limits.depth_limit)
        .limit_complexity(limits.complexity_limit)
        .finish()
}
