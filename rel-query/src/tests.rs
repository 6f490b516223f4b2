//! Reusable fragments shared by the tests.

use crate::query::{Query, and_where, nil};

/// Excludes soft-deleted records.
pub fn active_only() -> Query {
    and_where([nil("deleted_at")])
}

/// Newest records first.
pub fn recent_first() -> Query {
    Query::default().sort_desc(["created_at"])
}

/// Page `page` (starting from 1) of `per_page` records.
pub fn paginated(page: u64, per_page: u64) -> Query {
    Query::default()
        .limit(per_page)
        .offset(page.saturating_sub(1) * per_page)
}
