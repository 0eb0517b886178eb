//! Page windows over filtered listings.

/// Relay-style pagination arguments with cursors already decoded into row
/// offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Offset of the row the page starts after.
    pub after: Option<u64>,

    /// Offset of the row the page ends before.
    pub before: Option<u64>,

    /// Take at most this many rows from the front of the range.
    pub first: Option<u64>,

    /// Take at most this many rows from the back of the range.
    pub last: Option<u64>,
}

/// Offset/limit slice resolved from a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Resolve the request against the size of the full result set.
    ///
    /// The returned window always lies within `[0, total)`.
    #[must_use]
    pub fn window(&self, total: u64) -> PageWindow {
        let mut start = self
            .after
            .map_or(0, |after| after.saturating_add(1))
            .min(total);

        let mut end = self
            .before
            .map_or(total, |before| before.min(total))
            .max(start);

        if let Some(first) = self.first {
            end = end.min(start.saturating_add(first));
        }

        if let Some(last) = self.last {
            start = start.max(end.saturating_sub(last));
        }

        PageWindow {
            offset: start,
            limit: end - start,
        }
    }
}

impl PageWindow {
    /// Offset as a SQL `OFFSET` parameter.
    #[must_use]
    pub fn sql_offset(&self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }

    /// Limit as a SQL `LIMIT` parameter.
    #[must_use]
    pub fn sql_limit(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }
}

/// One page of results together with the size of the full result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub offset: u64,
    pub total_count: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.offset > 0
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        let seen = u64::try_from(self.items.len()).unwrap_or(u64::MAX);

        self.offset.saturating_add(seen) < self.total_count
    }
}

pub(crate) fn count_from_sql(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

/// Build a case-insensitive `ILIKE` pattern matching `value` anywhere.
pub(crate) fn contains_pattern(value: &str) -> String {
    format!("%{}%", escape_like(value))
}

/// Build a `LIKE` pattern matching values starting with `value`.
pub(crate) fn prefix_pattern(value: &str) -> String {
    format!("{}%", escape_like(value))
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }

        escaped.push(c);
    }

    escaped
}
