use log::trace;

use crate::query::Query;

/// A fragment which knows how to apply its own directive onto a [`Query`].
///
/// This is the only extension point of the crate: any type implementing [`Querier`] can be folded
/// with [`build`]. A fragment whose [`Querier::build`] does nothing, such as `()`, is silently
/// skipped by the fold.
pub trait Querier {
    /// Applies the directive onto `query`.
    fn build(&self, query: &mut Query);

    /// Returns the fragment as a whole [`Query`], if it is one.
    ///
    /// The fold starts from a copy of the first fragment when it is a [`Query`].
    fn as_query(&self) -> Option<&Query> {
        None
    }
}

impl<T> Querier for &T
where
    T: Querier + ?Sized,
{
    fn build(&self, query: &mut Query) {
        (**self).build(query);
    }

    fn as_query(&self) -> Option<&Query> {
        (**self).as_query()
    }
}

impl<T> Querier for Box<T>
where
    T: Querier + ?Sized,
{
    fn build(&self, query: &mut Query) {
        (**self).build(query);
    }

    fn as_query(&self) -> Option<&Query> {
        (**self).as_query()
    }
}

impl Querier for () {
    fn build(&self, _query: &mut Query) {}
}

/// Folds `queriers` into a new [`Query`] for `table`.
///
/// When the first fragment is a [`Query`], the result starts as a copy of it; every other fragment
/// is applied in order with its own [`Querier::build`]. `table` is used only if no fragment set
/// a table.
///
/// The table is always set on the result, so folding no fragments at all still renders
/// `From(table)` rather than an empty string:
///
/// ```rust
/// use rel_query::prelude::*;
///
/// let query = build("todos", Vec::<Query>::new());
/// assert_eq!(query.to_string(), r#"From("todos")"#);
/// assert_eq!(Query::default().to_string(), "");
/// ```
pub fn build<I>(table: &str, queriers: I) -> Query
where
    I: IntoIterator,
    I::Item: Querier,
{
    let mut queriers = queriers.into_iter().peekable();
    let prior = queriers
        .peek()
        .and_then(|querier| querier.as_query())
        .cloned();

    let mut query = match prior {
        Some(prior) => {
            trace!("building query for table '{table}' starting from prior query");
            queriers.next();
            prior
        }
        None => {
            trace!("building query for table '{table}'");
            Query::default()
        }
    };

    for querier in queriers {
        querier.build(&mut query);
    }

    if query.table.is_empty() {
        query.table = table.to_string();
    }

    query
}

/// Folds heterogeneous fragments into a new [`Query`] for a table.
///
/// ```rust
/// use rel_query::prelude::*;
///
/// let query = rel_query::build!("todos", eq("completed", false), SortQuery::asc("id"), Limit(10));
/// assert_eq!(
///     query.to_string(),
///     r#"From("todos").Where(completed = false).SortAsc("id").Limit(10)"#
/// );
/// ```
#[macro_export]
macro_rules! build {
    ($table:expr $(,)?) => {
        $crate::query::build($table, ::std::iter::empty::<$crate::query::Query>())
    };
    ($table:expr, $($fragment:expr),+ $(,)?) => {
        $crate::query::build(
            $table,
            [$(&$fragment as &dyn $crate::query::Querier),+],
        )
    };
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::query::{Limit, SortQuery, eq, from};

    struct Ignored;

    impl Querier for Ignored {
        fn build(&self, _query: &mut Query) {}
    }

    #[test]
    fn test_should_build_empty_query() {
        let query = build("todos", Vec::<Query>::new());
        assert_eq!(query.table, "todos");
        assert!(query.cascade);
        assert_eq!(
            query,
            Query {
                table: "todos".to_string(),
                ..Default::default()
            }
        );
        assert_eq!(query.to_string(), r#"From("todos")"#);
        assert_eq!(crate::build!("todos"), query);
    }

    #[test]
    fn test_should_fold_heterogeneous_fragments() {
        let query = crate::build!("todos", eq("completed", true), SortQuery::asc("id"), Limit(20));
        assert_eq!(
            query.to_string(),
            r#"From("todos").Where(completed = true).SortAsc("id").Limit(20)"#
        );
    }

    #[test]
    fn test_should_skip_ignored_fragments() {
        let query = crate::build!("todos", Ignored, (), Limit(5), Ignored);
        assert_eq!(query, Query::default().from("todos").limit(5));
    }

    #[test]
    fn test_should_start_from_prior_query() {
        let prior = from("users").limit(5).cascade(false);
        let query = crate::build!("todos", prior.clone());
        assert_eq!(query, prior);

        let query = crate::build!("todos", prior, eq("id", 1));
        assert_eq!(query.table, "users");
        assert!(!query.cascade);
        assert_eq!(query.filter, eq("id", 1));
    }

    #[test]
    fn test_should_merge_queries_after_first_fragment() {
        let query = crate::build!(
            "todos",
            Limit(5),
            Query::default().cascade(false),
            Query::default().limit(10)
        );
        assert_eq!(query.limit, 10);
        // cascade is OR-combined while merging
        assert!(query.cascade);
    }

    #[test]
    fn test_should_build_from_boxed_fragments() {
        let fragments: Vec<Box<dyn Querier>> = vec![
            Box::new(from("users")),
            Box::new(eq("active", true)),
            Box::new(Limit(1)),
        ];
        let query = build("todos", fragments);
        assert_eq!(
            query.to_string(),
            r#"From("users").Where(active = true).Limit(1)"#
        );
    }
}
