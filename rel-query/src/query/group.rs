use candid::CandidType;
use serde::{Deserialize, Serialize};

use crate::query::{FilterQuery, Querier, Query, filter_fragment};
use crate::value::Value;

/// Grouping fields with their having-filter.
#[derive(Debug, Default, Clone, PartialEq, Eq, CandidType, Serialize, Deserialize)]
pub struct GroupQuery {
    pub fields: Vec<String>,
    pub filter: FilterQuery,
}

impl GroupQuery {
    /// Creates a group on the provided fields.
    pub fn new<I>(fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            filter: FilterQuery::None,
        }
    }

    /// AND the having-filter with `filters`.
    pub fn having<I>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = FilterQuery>,
    {
        self.filter = self.filter.and(filters);
        self
    }

    /// AND the having-filter with a raw expression.
    pub fn havingf<I>(self, expr: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.having([filter_fragment(expr, values)])
    }

    /// OR the whole having-filter with the AND of `filters`.
    pub fn or_having<I>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = FilterQuery>,
    {
        self.filter = self.filter.or([crate::query::and(filters)]);
        self
    }

    /// OR the whole having-filter with a raw expression.
    pub fn or_havingf<I>(mut self, expr: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.filter = self.filter.or([filter_fragment(expr, values)]);
        self
    }

    /// Applies this group onto `target`: fields are replaced when present, filters are ANDed.
    pub(crate) fn merge_into(&self, target: &mut GroupQuery) {
        if !self.fields.is_empty() {
            target.fields = self.fields.clone();
        }
        target.filter = std::mem::take(&mut target.filter).and([self.filter.clone()]);
    }
}

impl Querier for GroupQuery {
    fn build(&self, query: &mut Query) {
        self.merge_into(&mut query.group);
    }
}
