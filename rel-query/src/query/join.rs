use candid::CandidType;
use serde::{Deserialize, Serialize};

use crate::query::{FilterQuery, Querier, Query, and};
use crate::value::Value;

/// Join mode used when none is provided.
pub const DEFAULT_JOIN_MODE: &str = "JOIN";

/// A join between the query table and another table.
///
/// A column based join carries `from` and `to`; a fragment based join carries the raw expression
/// in `mode` and leaves the columns empty.
#[derive(Debug, Default, Clone, PartialEq, Eq, CandidType, Serialize, Deserialize)]
pub struct JoinQuery {
    pub mode: String,
    pub table: String,
    pub from: String,
    pub to: String,
    pub filter: FilterQuery,
    pub arguments: Vec<Value>,
}

impl JoinQuery {
    /// Creates a [`DEFAULT_JOIN_MODE`] join on `table` constrained by `filters`.
    pub fn new<I>(table: impl Into<String>, filters: I) -> Self
    where
        I: IntoIterator<Item = FilterQuery>,
    {
        Self::new_on(table, "", "", filters)
    }

    /// Creates a [`DEFAULT_JOIN_MODE`] join on `table` matching the `from` and `to` columns.
    pub fn new_on<I>(
        table: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        filters: I,
    ) -> Self
    where
        I: IntoIterator<Item = FilterQuery>,
    {
        Self::new_with(DEFAULT_JOIN_MODE, table, from, to, filters)
    }

    /// Creates a join with a custom `mode` (e.g. `LEFT JOIN`).
    pub fn new_with<I>(
        mode: impl Into<String>,
        table: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        filters: I,
    ) -> Self
    where
        I: IntoIterator<Item = FilterQuery>,
    {
        Self {
            mode: mode.into(),
            table: table.into(),
            from: from.into(),
            to: to.into(),
            filter: and(filters),
            arguments: Vec::new(),
        }
    }

    /// Creates a join from a raw expression and its positional arguments.
    pub fn new_fragment<I>(expr: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self {
            mode: expr.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Returns whether the join is expressed as a raw fragment.
    pub fn is_fragment(&self) -> bool {
        self.table.is_empty() && self.from.is_empty() && self.to.is_empty()
    }
}

impl Querier for JoinQuery {
    fn build(&self, query: &mut Query) {
        query.joins.push(self.clone());
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::query::eq;

    #[test]
    fn test_should_create_join() {
        let join = JoinQuery::new_on("users", "user_id", "id", []);
        assert_eq!(join.mode, DEFAULT_JOIN_MODE);
        assert_eq!(join.table, "users");
        assert_eq!(join.from, "user_id");
        assert_eq!(join.to, "id");
        assert!(join.filter.is_none());
        assert!(!join.is_fragment());
    }

    #[test]
    fn test_should_create_join_with_filters() {
        let join = JoinQuery::new_with(
            "LEFT JOIN",
            "users",
            "user_id",
            "id",
            [eq("users.active", true), eq("users.role", "admin")],
        );
        assert_eq!(join.mode, "LEFT JOIN");
        assert_eq!(
            join.filter.to_string(),
            r#"users.active = true AND users.role = "admin""#
        );
    }

    #[test]
    fn test_should_create_join_fragment() {
        let join = JoinQuery::new_fragment("JOIN users ON users.id = ?", [1]);
        assert_eq!(join.mode, "JOIN users ON users.id = ?");
        assert_eq!(join.arguments, vec![Value::Int32(1)]);
        assert!(join.is_fragment());
    }
}
