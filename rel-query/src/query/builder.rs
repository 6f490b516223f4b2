//! Free constructors starting a new [`Query`] chain.

use crate::query::{FilterQuery, JoinQuery, Querier, Query, and};
use crate::value::Value;

/// Starts a query selecting `fields`.
pub fn select<I>(fields: I) -> Query
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    Query::default().select(fields)
}

/// Starts a query on `table`.
pub fn from(table: impl Into<String>) -> Query {
    Query::default().from(table)
}

/// Starts a query joining `table` using `filters` as condition.
pub fn join<I>(table: impl Into<String>, filters: I) -> Query
where
    I: IntoIterator<Item = FilterQuery>,
{
    Query::default().join(table, filters)
}

/// Starts a query joining `table` on the `from` and `to` columns.
pub fn join_on<I>(
    table: impl Into<String>,
    from: impl Into<String>,
    to: impl Into<String>,
    filters: I,
) -> Query
where
    I: IntoIterator<Item = FilterQuery>,
{
    Query::default().join_on(table, from, to, filters)
}

/// Starts a query joining `table` with a custom join `mode`.
pub fn join_with<I>(
    mode: impl Into<String>,
    table: impl Into<String>,
    from: impl Into<String>,
    to: impl Into<String>,
    filters: I,
) -> Query
where
    I: IntoIterator<Item = FilterQuery>,
{
    let mut query = Query::default();
    JoinQuery::new_with(mode, table, from, to, filters).build(&mut query);
    query
}

/// Starts a query joining with a raw expression.
pub fn joinf<I>(expr: impl Into<String>, arguments: I) -> Query
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    Query::default().joinf(expr, arguments)
}

/// Starts a query filtered by the AND of `filters`.
pub fn and_where<I>(filters: I) -> Query
where
    I: IntoIterator<Item = FilterQuery>,
{
    Query {
        filter: and(filters),
        ..Default::default()
    }
}

/// Starts a query running on the primary database.
pub fn use_primary() -> Query {
    Query::default().use_primary()
}
