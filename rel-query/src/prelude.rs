//! Prelude exposes all the types and constructors of the `rel-query` crate.

pub use crate::build;
pub use crate::error::{QueryError, QueryResult};
pub use crate::query::{
    Cascade, DEFAULT_JOIN_MODE, FOR_UPDATE, FilterQuery, GroupQuery, JoinQuery, Limit, Lock,
    Offset, Preload, Querier, Query, Reload, SelectQuery, SortDirection, SortQuery, SqlQuery,
    Unscoped, UsePrimary, and, and_where, build, eq, filter_fragment, for_update, from, gt, gte,
    is_in, join, join_on, join_with, joinf, like, lt, lte, ne, nil, not, not_in, not_like,
    not_nil, or, select, sql, use_primary,
};
pub use crate::types::{Decimal, Uuid};
pub use crate::value::Value;
