//! Single-directive fragments.

use candid::CandidType;
use serde::{Deserialize, Serialize};

use crate::query::{Querier, Query};

/// Lock mode used to select rows for update.
pub const FOR_UPDATE: &str = "FOR UPDATE";

/// Skip the first N records.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, CandidType, Serialize, Deserialize)]
pub struct Offset(pub u64);

/// Return at most N records.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, CandidType, Serialize, Deserialize)]
pub struct Limit(pub u64);

/// Row lock mode. Ignored by adapters outside of a transaction.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, CandidType, Serialize, Deserialize)]
pub struct Lock(pub String);

/// Bypass the default scoping (e.g. soft-delete exclusion).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, CandidType, Serialize, Deserialize)]
pub struct Unscoped(pub bool);

/// Force reloading associations on preload.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, CandidType, Serialize, Deserialize)]
pub struct Reload(pub bool);

/// Enable or disable auto-loading associations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, CandidType, Serialize, Deserialize)]
pub struct Cascade(pub bool);

impl Default for Cascade {
    fn default() -> Self {
        Self(true)
    }
}

/// Association to load eagerly with the records.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, CandidType, Serialize, Deserialize)]
pub struct Preload(pub String);

/// Run the query on the primary database rather than a replica.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, CandidType, Serialize, Deserialize)]
pub struct UsePrimary;

/// Creates a [`FOR_UPDATE`] lock.
pub fn for_update() -> Lock {
    Lock(FOR_UPDATE.to_string())
}

impl From<&str> for Lock {
    fn from(mode: &str) -> Self {
        Lock(mode.to_string())
    }
}

impl From<String> for Lock {
    fn from(mode: String) -> Self {
        Lock(mode)
    }
}

impl Querier for Offset {
    fn build(&self, query: &mut Query) {
        query.offset = self.0;
    }
}

impl Querier for Limit {
    fn build(&self, query: &mut Query) {
        query.limit = self.0;
    }
}

impl Querier for Lock {
    fn build(&self, query: &mut Query) {
        query.lock = self.0.clone();
    }
}

impl Querier for Unscoped {
    fn build(&self, query: &mut Query) {
        query.unscoped = self.0;
    }
}

impl Querier for Reload {
    fn build(&self, query: &mut Query) {
        query.reload = self.0;
    }
}

impl Querier for Cascade {
    fn build(&self, query: &mut Query) {
        query.cascade = self.0;
    }
}

impl Querier for Preload {
    fn build(&self, query: &mut Query) {
        query.preload.push(self.0.clone());
    }
}

impl Querier for UsePrimary {
    fn build(&self, query: &mut Query) {
        query.use_primary = true;
    }
}
