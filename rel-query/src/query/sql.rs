use std::fmt;

use candid::CandidType;
use serde::{Deserialize, Serialize};

use crate::query::{Querier, Query};
use crate::value::Value;

/// Raw SQL statement with its positional values.
///
/// When a [`Query`] carries a statement, adapters run the statement as is and ignore every other
/// directive.
#[derive(Debug, Default, Clone, PartialEq, Eq, CandidType, Serialize, Deserialize)]
pub struct SqlQuery {
    pub statement: String,
    pub values: Vec<Value>,
}

impl SqlQuery {
    /// Returns whether no statement is set.
    pub fn is_empty(&self) -> bool {
        self.statement.is_empty()
    }
}

/// Creates a raw SQL statement.
pub fn sql<I>(statement: impl Into<String>, values: I) -> SqlQuery
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    SqlQuery {
        statement: statement.into(),
        values: values.into_iter().map(Into::into).collect(),
    }
}

impl Querier for SqlQuery {
    fn build(&self, query: &mut Query) {
        query.sql = self.clone();
    }
}

impl fmt::Display for SqlQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SQL(\"{}\"", self.statement)?;
        for value in &self.values {
            write!(f, ", {value}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_should_render_sql() {
        let statement = sql("SELECT * FROM users WHERE id = ? AND name = ?", [
            Value::from(1),
            Value::from("bob"),
        ]);
        assert_eq!(
            statement.to_string(),
            r#"SQL("SELECT * FROM users WHERE id = ? AND name = ?", 1, "bob")"#
        );
    }

    #[test]
    fn test_should_set_statement_on_build() {
        let mut query = Query::default();
        assert!(query.sql.is_empty());
        sql("SELECT 1", [true]).build(&mut query);
        assert_eq!(query.sql.statement, "SELECT 1");
        assert_eq!(query.sql.values, vec![Value::Boolean(true)]);
    }
}
