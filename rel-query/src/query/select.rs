use candid::CandidType;
use serde::{Deserialize, Serialize};

use crate::query::{Querier, Query};

/// Fields to select, optionally distinct.
///
/// No fields means every column of the table.
#[derive(Debug, Default, Clone, PartialEq, Eq, CandidType, Serialize, Deserialize)]
pub struct SelectQuery {
    pub only_distinct: bool,
    pub fields: Vec<String>,
}

impl SelectQuery {
    /// Creates a select on the provided fields.
    pub fn new<I>(fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            only_distinct: false,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Marks the select as distinct.
    pub fn distinct(mut self) -> Self {
        self.only_distinct = true;
        self
    }

    /// Applies this select onto `target`.
    ///
    /// A select with fields replaces `target` entirely, otherwise only the distinct flag is
    /// carried.
    pub(crate) fn merge_into(&self, target: &mut SelectQuery) {
        if !self.fields.is_empty() {
            *target = self.clone();
        } else if self.only_distinct {
            target.only_distinct = true;
        }
    }
}

impl Querier for SelectQuery {
    fn build(&self, query: &mut Query) {
        self.merge_into(&mut query.select);
    }
}
