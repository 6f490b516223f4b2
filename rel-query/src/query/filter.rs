use std::fmt;

use candid::CandidType;
use serde::{Deserialize, Serialize};

use crate::query::{Querier, Query};
use crate::value::Value;

/// [`Query`] filter tree.
///
/// [`FilterQuery::None`] is the identity element: combining it with any filter with AND or OR
/// yields the other filter unchanged.
#[derive(Debug, Default, Clone, PartialEq, Eq, CandidType, Serialize, Deserialize)]
pub enum FilterQuery {
    #[default]
    None,
    And(Vec<FilterQuery>),
    Or(Vec<FilterQuery>),
    Not(Box<FilterQuery>),
    Eq { field: String, value: Value },
    Ne { field: String, value: Value },
    Lt { field: String, value: Value },
    Lte { field: String, value: Value },
    Gt { field: String, value: Value },
    Gte { field: String, value: Value },
    Nil { field: String },
    NotNil { field: String },
    In { field: String, values: Vec<Value> },
    Nin { field: String, values: Vec<Value> },
    Like { field: String, pattern: String },
    NotLike { field: String, pattern: String },
    /// Raw expression; each `?` is a placeholder for the next value.
    Fragment { expr: String, values: Vec<Value> },
}

/// Kind of combinator, used to decide flattening and parenthesization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    And,
    Or,
}

impl FilterQuery {
    /// Returns whether the filter is the identity element.
    ///
    /// A combinator whose inner filters are all empty is considered empty as well.
    pub fn is_none(&self) -> bool {
        match self {
            FilterQuery::None => true,
            FilterQuery::And(inner) | FilterQuery::Or(inner) => {
                inner.iter().all(FilterQuery::is_none)
            }
            _ => false,
        }
    }

    /// Combine the filter with the provided ones using AND.
    pub fn and<I>(self, filters: I) -> Self
    where
        I: IntoIterator<Item = FilterQuery>,
    {
        filters
            .into_iter()
            .fold(self, |acc, filter| acc.combine(filter, Combinator::And))
    }

    /// Combine the filter with the provided ones using OR.
    pub fn or<I>(self, filters: I) -> Self
    where
        I: IntoIterator<Item = FilterQuery>,
    {
        filters
            .into_iter()
            .fold(self, |acc, filter| acc.combine(filter, Combinator::Or))
    }

    /// Negate the filter with NOT.
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        if self.is_none() {
            return self;
        }

        FilterQuery::Not(Box::new(self))
    }

    /// AND the filter with a raw expression.
    pub fn and_fragment<I>(self, expr: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.and([filter_fragment(expr, values)])
    }

    /// OR the filter with a raw expression.
    pub fn or_fragment<I>(self, expr: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.or([filter_fragment(expr, values)])
    }

    /// AND the filter with an `IS NULL` predicate.
    pub fn and_nil(self, field: impl Into<String>) -> Self {
        self.and([nil(field)])
    }

    /// OR the filter with an `IS NULL` predicate.
    pub fn or_nil(self, field: impl Into<String>) -> Self {
        self.or([nil(field)])
    }

    /// AND the filter with an `IS NOT NULL` predicate.
    pub fn and_not_nil(self, field: impl Into<String>) -> Self {
        self.and([not_nil(field)])
    }

    /// OR the filter with an `IS NOT NULL` predicate.
    pub fn or_not_nil(self, field: impl Into<String>) -> Self {
        self.or([not_nil(field)])
    }

    /// AND the filter with an `IN` predicate.
    pub fn and_in<I>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.and([is_in(field, values)])
    }

    /// OR the filter with an `IN` predicate.
    pub fn or_in<I>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.or([is_in(field, values)])
    }

    /// AND the filter with a `NOT IN` predicate.
    pub fn and_not_in<I>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.and([not_in(field, values)])
    }

    /// OR the filter with a `NOT IN` predicate.
    pub fn or_not_in<I>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.or([not_in(field, values)])
    }

    fn combine(self, other: FilterQuery, combinator: Combinator) -> Self {
        if other.is_none() {
            return self;
        }
        if self.is_none() {
            return other;
        }

        match (combinator, self, other) {
            (Combinator::And, FilterQuery::And(mut inner), FilterQuery::And(rest))
            | (Combinator::Or, FilterQuery::Or(mut inner), FilterQuery::Or(rest)) => {
                inner.extend(rest);
                combinator.wrap(inner)
            }
            (Combinator::And, FilterQuery::And(mut inner), other)
            | (Combinator::Or, FilterQuery::Or(mut inner), other) => {
                inner.push(other);
                combinator.wrap(inner)
            }
            (Combinator::And, lhs, FilterQuery::And(rest))
            | (Combinator::Or, lhs, FilterQuery::Or(rest)) => {
                let mut inner = Vec::with_capacity(rest.len() + 1);
                inner.push(lhs);
                inner.extend(rest);
                combinator.wrap(inner)
            }
            (combinator, lhs, rhs) => combinator.wrap(vec![lhs, rhs]),
        }
    }

    fn combinator(&self) -> Option<Combinator> {
        let (combinator, inner) = match self {
            FilterQuery::And(inner) => (Combinator::And, inner),
            FilterQuery::Or(inner) => (Combinator::Or, inner),
            _ => return None,
        };

        (inner.iter().filter(|filter| !filter.is_none()).count() > 1).then_some(combinator)
    }

    /// Unwraps combinators holding a single non-empty filter.
    fn effective(&self) -> &FilterQuery {
        match self {
            FilterQuery::And(inner) | FilterQuery::Or(inner) => {
                let mut filled = inner.iter().filter(|filter| !filter.is_none());
                match (filled.next(), filled.next()) {
                    (Some(single), None) => single.effective(),
                    _ => self,
                }
            }
            _ => self,
        }
    }
}

impl Combinator {
    fn wrap(self, inner: Vec<FilterQuery>) -> FilterQuery {
        match self {
            Combinator::And => FilterQuery::And(inner),
            Combinator::Or => FilterQuery::Or(inner),
        }
    }

    fn separator(self) -> &'static str {
        match self {
            Combinator::And => " AND ",
            Combinator::Or => " OR ",
        }
    }
}

// macro rules for the comparison shorthands combining a new predicate with an existing tree
macro_rules! impl_filter_shorthand {
    ($ctor:ident, $and:ident, $or:ident) => {
        impl FilterQuery {
            #[doc = concat!("AND the filter with a `", stringify!($ctor), "` predicate.")]
            pub fn $and(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
                self.and([$ctor(field, value)])
            }

            #[doc = concat!("OR the filter with a `", stringify!($ctor), "` predicate.")]
            pub fn $or(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
                self.or([$ctor(field, value)])
            }
        }
    };
}

impl_filter_shorthand!(eq, and_eq, or_eq);
impl_filter_shorthand!(ne, and_ne, or_ne);
impl_filter_shorthand!(lt, and_lt, or_lt);
impl_filter_shorthand!(lte, and_lte, or_lte);
impl_filter_shorthand!(gt, and_gt, or_gt);
impl_filter_shorthand!(gte, and_gte, or_gte);

impl Querier for FilterQuery {
    fn build(&self, query: &mut Query) {
        query.filter = std::mem::take(&mut query.filter).and([self.clone()]);
    }
}

impl fmt::Display for FilterQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.effective() {
            FilterQuery::None => Ok(()),
            FilterQuery::And(inner) => write_combined(f, inner, Combinator::And),
            FilterQuery::Or(inner) => write_combined(f, inner, Combinator::Or),
            FilterQuery::Not(inner) => write!(f, "NOT ({inner})"),
            FilterQuery::Eq { field, value } => write!(f, "{field} = {value}"),
            FilterQuery::Ne { field, value } => write!(f, "{field} <> {value}"),
            FilterQuery::Lt { field, value } => write!(f, "{field} < {value}"),
            FilterQuery::Lte { field, value } => write!(f, "{field} <= {value}"),
            FilterQuery::Gt { field, value } => write!(f, "{field} > {value}"),
            FilterQuery::Gte { field, value } => write!(f, "{field} >= {value}"),
            FilterQuery::Nil { field } => write!(f, "{field} IS NULL"),
            FilterQuery::NotNil { field } => write!(f, "{field} IS NOT NULL"),
            FilterQuery::In { field, values } => {
                write!(f, "{field} IN ")?;
                write_list(f, values)
            }
            FilterQuery::Nin { field, values } => {
                write!(f, "{field} NOT IN ")?;
                write_list(f, values)
            }
            FilterQuery::Like { field, pattern } => write!(f, "{field} LIKE {pattern:?}"),
            FilterQuery::NotLike { field, pattern } => write!(f, "{field} NOT LIKE {pattern:?}"),
            FilterQuery::Fragment { expr, values } => write_fragment(f, expr, values),
        }
    }
}

fn write_combined(
    f: &mut fmt::Formatter<'_>,
    inner: &[FilterQuery],
    parent: Combinator,
) -> fmt::Result {
    let filled = inner
        .iter()
        .filter(|filter| !filter.is_none())
        .map(FilterQuery::effective);
    for (i, filter) in filled.enumerate() {
        if i > 0 {
            f.write_str(parent.separator())?;
        }
        match filter.combinator() {
            Some(child) if child != parent => write!(f, "({filter})")?,
            _ => write!(f, "{filter}")?,
        }
    }

    Ok(())
}

fn write_list(f: &mut fmt::Formatter<'_>, values: &[Value]) -> fmt::Result {
    f.write_str("(")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{value}")?;
    }
    f.write_str(")")
}

/// Substitutes each `?` placeholder with the next value; placeholders without a value are kept.
fn write_fragment(f: &mut fmt::Formatter<'_>, expr: &str, values: &[Value]) -> fmt::Result {
    let mut values = values.iter();
    for ch in expr.chars() {
        if ch != '?' {
            write!(f, "{ch}")?;
            continue;
        }
        match values.next() {
            Some(value) => write!(f, "{value}")?,
            None => f.write_str("?")?,
        }
    }

    Ok(())
}

/// Combines the provided filters using AND.
///
/// A single filter is returned as is, an empty list yields [`FilterQuery::None`].
pub fn and<I>(filters: I) -> FilterQuery
where
    I: IntoIterator<Item = FilterQuery>,
{
    FilterQuery::None.and(filters)
}

/// Combines the provided filters using OR.
pub fn or<I>(filters: I) -> FilterQuery
where
    I: IntoIterator<Item = FilterQuery>,
{
    FilterQuery::None.or(filters)
}

/// Negates the AND of the provided filters.
pub fn not<I>(filters: I) -> FilterQuery
where
    I: IntoIterator<Item = FilterQuery>,
{
    and(filters).not()
}

/// Creates an equality filter.
pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> FilterQuery {
    FilterQuery::Eq {
        field: field.into(),
        value: value.into(),
    }
}

/// Creates a not-equal filter.
pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> FilterQuery {
    FilterQuery::Ne {
        field: field.into(),
        value: value.into(),
    }
}

/// Creates a less-than filter.
pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> FilterQuery {
    FilterQuery::Lt {
        field: field.into(),
        value: value.into(),
    }
}

/// Creates a less-than-or-equal filter.
pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> FilterQuery {
    FilterQuery::Lte {
        field: field.into(),
        value: value.into(),
    }
}

/// Creates a greater-than filter.
pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> FilterQuery {
    FilterQuery::Gt {
        field: field.into(),
        value: value.into(),
    }
}

/// Creates a greater-than-or-equal filter.
pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> FilterQuery {
    FilterQuery::Gte {
        field: field.into(),
        value: value.into(),
    }
}

/// Creates an IS NULL filter.
pub fn nil(field: impl Into<String>) -> FilterQuery {
    FilterQuery::Nil {
        field: field.into(),
    }
}

/// Creates an IS NOT NULL filter.
pub fn not_nil(field: impl Into<String>) -> FilterQuery {
    FilterQuery::NotNil {
        field: field.into(),
    }
}

/// Creates an IN filter.
pub fn is_in<I>(field: impl Into<String>, values: I) -> FilterQuery
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    FilterQuery::In {
        field: field.into(),
        values: values.into_iter().map(Into::into).collect(),
    }
}

/// Creates a NOT IN filter.
pub fn not_in<I>(field: impl Into<String>, values: I) -> FilterQuery
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    FilterQuery::Nin {
        field: field.into(),
        values: values.into_iter().map(Into::into).collect(),
    }
}

/// Creates a LIKE filter.
pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> FilterQuery {
    FilterQuery::Like {
        field: field.into(),
        pattern: pattern.into(),
    }
}

/// Creates a NOT LIKE filter.
pub fn not_like(field: impl Into<String>, pattern: impl Into<String>) -> FilterQuery {
    FilterQuery::NotLike {
        field: field.into(),
        pattern: pattern.into(),
    }
}

/// Creates a filter from a raw expression.
///
/// The expression is not validated nor escaped: whoever renders the filter is responsible for
/// binding the values safely.
pub fn filter_fragment<I>(expr: impl Into<String>, values: I) -> FilterQuery
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    FilterQuery::Fragment {
        expr: expr.into(),
        values: values.into_iter().map(Into::into).collect(),
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_should_build_filter() {
        let eq = eq("age", 30);
        assert!(matches!(
            eq,
            FilterQuery::Eq { ref field, value: Value::Int32(30) } if field == "age"
        ));

        let nil = nil("phone");
        assert!(matches!(nil, FilterQuery::Nil { ref field } if field == "phone"));

        let like = like("name", "John%");
        assert!(matches!(like, FilterQuery::Like { ref pattern, .. } if pattern == "John%"));

        let is_in = is_in("id", [1u64, 2]);
        assert_eq!(
            is_in,
            FilterQuery::In {
                field: "id".to_string(),
                values: vec![Value::Uint64(1), Value::Uint64(2)],
            }
        );
    }

    #[test]
    fn test_should_treat_none_as_identity() {
        let filter = eq("id", 1);
        assert_eq!(FilterQuery::None.and([filter.clone()]), filter);
        assert_eq!(FilterQuery::None.or([filter.clone()]), filter);
        assert_eq!(filter.clone().and([FilterQuery::None]), filter);
        assert_eq!(filter.clone().or([FilterQuery::None]), filter);
        assert_eq!(and([FilterQuery::None, filter.clone()]), filter);
        assert_eq!(or([FilterQuery::None, filter.clone()]), filter);
        assert!(and([]).is_none());
        assert!(FilterQuery::And(vec![]).is_none());
        assert!(!filter.is_none());
    }

    #[test]
    fn test_should_flatten_same_combinator() {
        let (a, b, c) = (eq("a", 1), eq("b", 2), eq("c", 3));

        let nested = and([and([a.clone(), b.clone()]), c.clone()]);
        let flat = and([a.clone(), b.clone(), c.clone()]);
        assert_eq!(nested, flat);
        assert_eq!(nested.to_string(), flat.to_string());
        assert_eq!(flat.to_string(), "a = 1 AND b = 2 AND c = 3");

        let chained = a.clone().or([b.clone()]).or([c.clone()]);
        assert_eq!(chained, FilterQuery::Or(vec![a, b, c]));
    }

    #[test]
    fn test_should_not_flatten_different_combinators() {
        let filter = and([eq("a", 1), eq("b", 2)]).or([eq("c", 3)]);
        assert_eq!(filter.to_string(), "(a = 1 AND b = 2) OR c = 3");

        let filter = or([eq("a", 1), eq("b", 2)]).and([eq("c", 3)]);
        assert_eq!(filter.to_string(), "(a = 1 OR b = 2) AND c = 3");
    }

    #[test]
    fn test_should_render_predicates() {
        assert_eq!(eq("completed", true).to_string(), "completed = true");
        assert_eq!(ne("name", "John").to_string(), r#"name <> "John""#);
        assert_eq!(lt("score", 10).to_string(), "score < 10");
        assert_eq!(lte("score", 10).to_string(), "score <= 10");
        assert_eq!(gt("score", 10).to_string(), "score > 10");
        assert_eq!(gte("score", 10).to_string(), "score >= 10");
        assert_eq!(nil("deleted_at").to_string(), "deleted_at IS NULL");
        assert_eq!(not_nil("deleted_at").to_string(), "deleted_at IS NOT NULL");
        assert_eq!(is_in("id", [1, 2, 3]).to_string(), "id IN (1, 2, 3)");
        assert_eq!(not_in("id", ["a", "b"]).to_string(), r#"id NOT IN ("a", "b")"#);
        assert_eq!(like("name", "J%").to_string(), r#"name LIKE "J%""#);
        assert_eq!(not_like("name", "J%").to_string(), r#"name NOT LIKE "J%""#);
        assert_eq!(
            not([eq("a", 1), eq("b", 2)]).to_string(),
            "NOT (a = 1 AND b = 2)"
        );
    }

    #[test]
    fn test_should_substitute_fragment_values() {
        let fragment =
            filter_fragment("age > ? AND name = ?", [Value::from(18), Value::from("Bob")]);
        assert_eq!(fragment.to_string(), r#"age > 18 AND name = "Bob""#);

        let fragment = filter_fragment("a = ? OR b = ?", [1]);
        assert_eq!(fragment.to_string(), "a = 1 OR b = ?");

        // values without a placeholder are ignored
        let fragment = filter_fragment("a = ?", [1, 2]);
        assert_eq!(fragment.to_string(), "a = 1");
    }

    #[test]
    fn test_should_ignore_empty_children_of_combinators() {
        assert!(FilterQuery::Or(vec![FilterQuery::None]).is_none());
        assert!(FilterQuery::And(vec![FilterQuery::None, FilterQuery::Or(vec![])]).is_none());
        assert!(!FilterQuery::Or(vec![FilterQuery::None, eq("a", 1)]).is_none());

        assert_eq!(eq("a", 1).and([FilterQuery::Or(vec![FilterQuery::None])]), eq("a", 1));

        let nested = FilterQuery::Or(vec![FilterQuery::None, and([eq("b", 2), eq("c", 3)])]);
        let filter = FilterQuery::And(vec![eq("a", 1), nested.clone()]);
        assert_eq!(filter.to_string(), "a = 1 AND b = 2 AND c = 3");
        assert_eq!(nested.to_string(), "b = 2 AND c = 3");

        let filter = FilterQuery::Or(vec![eq("a", 1), nested]);
        assert_eq!(filter.to_string(), "a = 1 OR (b = 2 AND c = 3)");
    }

    #[test]
    fn test_should_chain_shorthands() {
        let filter = eq("a", 1).and_gt("b", 2).or_nil("c");
        assert_eq!(filter.to_string(), "(a = 1 AND b > 2) OR c IS NULL");

        let filter = FilterQuery::None
            .and_in("id", [1, 2])
            .and_not_nil("name")
            .and_fragment("LOWER(name) = ?", ["bob"]);
        assert_eq!(
            filter.to_string(),
            r#"id IN (1, 2) AND name IS NOT NULL AND LOWER(name) = "bob""#
        );
    }

    #[test]
    fn test_should_not_negate_none() {
        assert!(FilterQuery::None.not().is_none());
    }

    #[test]
    fn test_should_candid_encode_decode() {
        let src = and([eq("a", 1), or([nil("b"), like("c", "x%")])]).not();
        let buf = candid::encode_one(&src).expect("Candid encoding failed");
        let decoded: FilterQuery = candid::decode_one(&buf).expect("Candid decoding failed");
        assert_eq!(src, decoded);
    }
}
