//! Relay connections backed by offset page windows.

use async_graphql::{
    OutputType, SimpleObject,
    connection::{Connection, Edge},
};

use crm_app::domain::pagination::{Page, PageRequest};

/// Extra connection field carrying the size of the full result set.
#[derive(Debug, SimpleObject)]
pub(crate) struct TotalCount {
    pub(crate) total_count: u64,
}

/// Cursors are row offsets into the filtered, ordered result set.
pub(crate) type CrmConnection<T> = Connection<usize, T, TotalCount>;

fn to_u64(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// Convert decoded connection arguments into a page request.
pub(crate) fn page_request(
    after: Option<usize>,
    before: Option<usize>,
    first: Option<usize>,
    last: Option<usize>,
) -> PageRequest {
    PageRequest {
        after: after.map(to_u64),
        before: before.map(to_u64),
        first: first.map(to_u64),
        last: last.map(to_u64),
    }
}

/// Build a connection from a page, wrapping each record with `node`.
pub(crate) fn into_connection<R, T>(page: Page<R>, node: impl Fn(R) -> T) -> CrmConnection<T>
where
    T: OutputType,
{
    let mut connection = Connection::with_additional_fields(
        page.has_previous_page(),
        page.has_next_page(),
        TotalCount {
            total_count: page.total_count,
        },
    );

    let offset = to_usize(page.offset);

    connection.edges.extend(
        page.items
            .into_iter()
            .enumerate()
            .map(|(index, item)| Edge::new(offset.saturating_add(index), node(item))),
    );

    connection
}
