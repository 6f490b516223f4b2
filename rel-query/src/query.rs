//! This module exposes the [`Query`] aggregate and every fragment which can be folded into it.

mod builder;
mod filter;
mod group;
mod join;
mod modifier;
mod querier;
mod select;
mod sort;
mod sql;

use std::fmt;

use candid::CandidType;
use log::trace;
use serde::{Deserialize, Serialize};

pub use self::builder::{and_where, from, join, join_on, join_with, joinf, select, use_primary};
pub use self::filter::{
    FilterQuery, and, eq, filter_fragment, gt, gte, is_in, like, lt, lte, ne, nil, not, not_in,
    not_like, not_nil, or,
};
pub use self::group::GroupQuery;
pub use self::join::{DEFAULT_JOIN_MODE, JoinQuery};
pub use self::modifier::{
    Cascade, FOR_UPDATE, Limit, Lock, Offset, Preload, Reload, Unscoped, UsePrimary, for_update,
};
pub use self::querier::{Querier, build};
pub use self::select::SelectQuery;
pub use self::sort::{SortDirection, SortQuery};
pub use self::sql::{SqlQuery, sql};
use crate::error::{QueryError, QueryResult};
use crate::value::Value;

/// The accumulated, immutable representation of all the directives of a query.
///
/// Every chainable method takes the query by value and returns the updated copy, so deriving
/// several queries from a shared one never affects it.
#[derive(Debug, Clone, PartialEq, Eq, CandidType, Serialize, Deserialize)]
pub struct Query {
    /// Table the query runs on.
    pub table: String,
    /// Fields to select.
    pub select: SelectQuery,
    /// Joins, in insertion order.
    pub joins: Vec<JoinQuery>,
    /// The where clause.
    pub filter: FilterQuery,
    /// Group by fields and their having clause.
    pub group: GroupQuery,
    /// Order by clauses, in insertion order.
    pub sort: Vec<SortQuery>,
    /// Offset for pagination; `0` means none.
    pub offset: u64,
    /// Limit on the number of records; `0` means none.
    pub limit: u64,
    /// Lock mode; empty means none.
    pub lock: String,
    /// Raw statement overriding every other directive when set.
    pub sql: SqlQuery,
    /// Whether the default scoping is bypassed.
    pub unscoped: bool,
    /// Whether preloaded associations are reloaded.
    pub reload: bool,
    /// Whether associations are loaded automatically.
    pub cascade: bool,
    /// Associations to eagerly load, in insertion order.
    pub preload: Vec<String>,
    /// Whether the query must run on the primary database.
    pub use_primary: bool,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            table: String::new(),
            select: SelectQuery::default(),
            joins: Vec::new(),
            filter: FilterQuery::None,
            group: GroupQuery::default(),
            sort: Vec::new(),
            offset: 0,
            limit: 0,
            lock: String::new(),
            sql: SqlQuery::default(),
            unscoped: false,
            reload: false,
            cascade: true,
            preload: Vec::new(),
            use_primary: false,
        }
    }
}

impl Querier for Query {
    /// Merges this query into `query`, field by field.
    fn build(&self, query: &mut Query) {
        trace!(
            "merging query on '{}' into query on '{}'",
            self.table, query.table
        );

        if !self.table.is_empty() {
            query.table = self.table.clone();
        }

        self.select.merge_into(&mut query.select);
        query.joins.extend(self.joins.iter().cloned());
        query.filter = std::mem::take(&mut query.filter).and([self.filter.clone()]);
        self.group.merge_into(&mut query.group);
        query.sort.extend(self.sort.iter().cloned());

        if self.offset != 0 {
            query.offset = self.offset;
        }
        if self.limit != 0 {
            query.limit = self.limit;
        }
        if !self.lock.is_empty() {
            query.lock = self.lock.clone();
        }
        if !self.sql.is_empty() {
            query.sql = self.sql.clone();
        }

        query.unscoped = query.unscoped || self.unscoped;
        query.reload = query.reload || self.reload;
        query.cascade = query.cascade || self.cascade;
        query.use_primary = query.use_primary || self.use_primary;
        query.preload.extend(self.preload.iter().cloned());
    }

    fn as_query(&self) -> Option<&Query> {
        Some(self)
    }
}

impl Query {
    /// Sets the fields to select, replacing the previous select.
    pub fn select<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.select = SelectQuery::new(fields);
        self
    }

    /// Sets the table of the query.
    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Makes the select distinct.
    pub fn distinct(mut self) -> Self {
        self.select.only_distinct = true;
        self
    }

    /// Joins `table` using the `filters` as condition.
    pub fn join<I>(self, table: impl Into<String>, filters: I) -> Self
    where
        I: IntoIterator<Item = FilterQuery>,
    {
        self.join_on(table, "", "", filters)
    }

    /// Joins `table` on the `from` and `to` columns.
    pub fn join_on<I>(
        self,
        table: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        filters: I,
    ) -> Self
    where
        I: IntoIterator<Item = FilterQuery>,
    {
        self.join_with(DEFAULT_JOIN_MODE, table, from, to, filters)
    }

    /// Joins `table` on the `from` and `to` columns with a custom join `mode`.
    pub fn join_with<I>(
        mut self,
        mode: impl Into<String>,
        table: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        filters: I,
    ) -> Self
    where
        I: IntoIterator<Item = FilterQuery>,
    {
        JoinQuery::new_with(mode, table, from, to, filters).build(&mut self);
        self
    }

    /// Joins using a raw expression.
    pub fn joinf<I>(mut self, expr: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        JoinQuery::new_fragment(expr, arguments).build(&mut self);
        self
    }

    /// ANDs the where clause with `filters`.
    pub fn and_where<I>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = FilterQuery>,
    {
        self.filter = self.filter.and(filters);
        self
    }

    /// ANDs the where clause with a raw expression.
    pub fn and_wheref<I>(self, expr: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.and_where([filter_fragment(expr, values)])
    }

    /// ORs the whole accumulated where clause with the AND of `filters`.
    ///
    /// `and_where([a]).and_where([b]).or_where([c])` gives `(a AND b) OR c`.
    pub fn or_where<I>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = FilterQuery>,
    {
        self.filter = self.filter.or([and(filters)]);
        self
    }

    /// ORs the whole accumulated where clause with a raw expression.
    pub fn or_wheref<I>(mut self, expr: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.filter = self.filter.or([filter_fragment(expr, values)]);
        self
    }

    /// Sets the group by fields, keeping the having clause.
    pub fn group<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.group.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// ANDs the having clause with `filters`.
    pub fn having<I>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = FilterQuery>,
    {
        self.group = self.group.having(filters);
        self
    }

    /// ANDs the having clause with a raw expression.
    pub fn havingf<I>(mut self, expr: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.group = self.group.havingf(expr, values);
        self
    }

    /// ORs the whole accumulated having clause with the AND of `filters`.
    pub fn or_having<I>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = FilterQuery>,
    {
        self.group = self.group.or_having(filters);
        self
    }

    /// ORs the whole accumulated having clause with a raw expression.
    pub fn or_havingf<I>(mut self, expr: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.group = self.group.or_havingf(expr, values);
        self
    }

    /// Sorts ascending by `fields`.
    pub fn sort<I>(self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.sort_asc(fields)
    }

    /// Sorts ascending by `fields`, after the existing sorts.
    pub fn sort_asc<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.sort.extend(fields.into_iter().map(SortQuery::asc));
        self
    }

    /// Sorts descending by `fields`, after the existing sorts.
    pub fn sort_desc<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.sort.extend(fields.into_iter().map(SortQuery::desc));
        self
    }

    /// Sets the offset for pagination.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Sets a limit on the number of records to return.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the lock mode.
    pub fn lock(mut self, lock: impl Into<Lock>) -> Self {
        self.lock = lock.into().0;
        self
    }

    /// Bypasses the default scoping.
    pub fn unscoped(mut self) -> Self {
        self.unscoped = true;
        self
    }

    /// Forces reloading associations on preload.
    pub fn reload(mut self) -> Self {
        self.reload = true;
        self
    }

    /// Enables or disables auto-loading associations.
    pub fn cascade(mut self, cascade: bool) -> Self {
        self.cascade = cascade;
        self
    }

    /// Adds an association to eagerly load.
    pub fn preload(mut self, field: impl Into<String>) -> Self {
        self.preload.push(field.into());
        self
    }

    /// Runs the query on the primary database.
    pub fn use_primary(mut self) -> Self {
        self.use_primary = true;
        self
    }

    /// Encodes the query with Candid.
    pub fn to_candid(&self) -> QueryResult<Vec<u8>> {
        candid::encode_one(self).map_err(|e| QueryError::Serialization(e.to_string()))
    }

    /// Decodes a query previously encoded with [`Query::to_candid`].
    pub fn from_candid(bytes: &[u8]) -> QueryResult<Self> {
        candid::decode_one(bytes).map_err(|e| QueryError::Serialization(e.to_string()))
    }
}

/// Joins string arguments as `"a", "b"`.
fn quoted(fields: &[String]) -> String {
    fields
        .iter()
        .map(|field| format!("\"{field}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Query {
    /// Renders the query as the chain of builder calls which would rebuild it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.sql.is_empty() {
            return write!(f, "{}", self.sql);
        }

        let mut calls = Vec::new();

        if self.use_primary {
            calls.push("UsePrimary()".to_string());
        }
        if !self.table.is_empty() {
            calls.push(format!("From(\"{}\")", self.table));
        }
        if !self.select.fields.is_empty() {
            calls.push(format!("Select({})", quoted(&self.select.fields)));
        }
        if self.select.only_distinct {
            calls.push("Distinct()".to_string());
        }
        for join in &self.joins {
            calls.push(format!(
                "JoinWith(\"{}\", \"{}\", \"{}\", \"{}\")",
                join.mode, join.table, join.from, join.to
            ));
        }
        if !self.filter.is_none() {
            calls.push(format!("Where({})", self.filter));
        }
        if !self.group.fields.is_empty() {
            calls.push(format!("Group({})", quoted(&self.group.fields)));
            if !self.group.filter.is_none() {
                calls.push(format!("Having({})", self.group.filter));
            }
        }
        for sort in &self.sort {
            let call = if sort.is_asc() { "SortAsc" } else { "SortDesc" };
            calls.push(format!("{call}(\"{}\")", sort.field));
        }
        if self.limit > 0 {
            calls.push(format!("Limit({})", self.limit));
        }
        if self.offset > 0 {
            calls.push(format!("Offset({})", self.offset));
        }
        if !self.lock.is_empty() {
            calls.push(format!("Lock(\"{}\")", self.lock));
        }
        if self.unscoped {
            calls.push("Unscoped()".to_string());
        }
        if self.reload {
            calls.push("Reload()".to_string());
        }
        if !self.cascade {
            calls.push("Cascade(false)".to_string());
        }
        if !self.preload.is_empty() {
            calls.push(format!("Preload({})", quoted(&self.preload)));
        }

        f.write_str(&calls.join("."))
    }
}
