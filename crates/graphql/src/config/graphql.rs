//! GraphQL execution limits.

use clap::Args;

#[derive(Debug, Args)]
pub struct GraphqlConfig {
    /// Maximum selection depth of a single operation
    #[arg(long = "graphql-depth-limit", env = "GRAPHQL_DEPTH_LIMIT", default_value_t = 10)]
    pub depth_limit: usize,

    /// Maximum computed complexity of a single operation
    #[arg(
        long = "graphql-complexity-limit",
        env = "GRAPHQL_COMPLEXITY_LIMIT",
        default_value_t = 500
    )]
    pub complexity_limit: usize,
}
