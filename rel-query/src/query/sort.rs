use candid::CandidType;
use serde::{Deserialize, Serialize};

use crate::query::{Querier, Query};

/// Direction of a [`SortQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, CandidType, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Returns the sign of the direction: `1` when ascending, `-1` when descending.
    pub fn signum(self) -> i8 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

/// A single ordering clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, CandidType, Serialize, Deserialize)]
pub struct SortQuery {
    pub field: String,
    pub sort: SortDirection,
}

impl SortQuery {
    /// Creates an ascending sort on `field`.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            sort: SortDirection::Ascending,
        }
    }

    /// Creates a descending sort on `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            sort: SortDirection::Descending,
        }
    }

    /// Returns whether the sort is ascending.
    pub fn is_asc(&self) -> bool {
        self.sort.signum() > 0
    }

    /// Returns whether the sort is descending.
    pub fn is_desc(&self) -> bool {
        self.sort.signum() < 0
    }
}

impl Querier for SortQuery {
    fn build(&self, query: &mut Query) {
        query.sort.push(self.clone());
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_should_create_sort() {
        let sort = SortQuery::asc("id");
        assert_eq!(sort.field, "id");
        assert!(sort.is_asc());
        assert!(!sort.is_desc());

        let sort = SortQuery::desc("created_at");
        assert!(sort.is_desc());
        assert!(!sort.is_asc());
    }

    #[test]
    fn test_should_append_sort_on_build() {
        let mut query = Query::default();
        SortQuery::asc("a").build(&mut query);
        SortQuery::desc("b").build(&mut query);
        assert_eq!(query.sort, vec![SortQuery::asc("a"), SortQuery::desc("b")]);
    }
}
