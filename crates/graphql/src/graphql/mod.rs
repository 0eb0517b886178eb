//! GraphQL schema, resolvers and HTTP handlers.

mod connection;
mod errors;
mod filters;
mod handler;
mod mutation;
mod query;
mod scalars;
mod schema;
mod types;

#[cfg(test)]
mod tests;

pub(crate) use handler::{execute, graphiql};
pub(crate) use schema::{CrmSchema, build_schema};
