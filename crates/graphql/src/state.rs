//! State

use std::sync::Arc;

use crate::graphql::CrmSchema;

/// Request-independent state injected into every handler.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) schema: CrmSchema,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State").finish_non_exhaustive()
    }
}

impl State {
    #[must_use]
    pub(crate) fn new(schema: CrmSchema) -> Arc<Self> {
        Arc::new(Self { schema })
    }
}
