#![crate_name = "rel_query"]
#![crate_type = "lib"]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Rel Query
//!
//! This crate exposes an immutable, composable query representation.
//!
//! A [`Query`](crate::prelude::Query) accumulates table, select, join, filter, grouping, sorting,
//! pagination, locking and preload directives. Every builder call takes the query by value and
//! returns a new one, so a query can be shared and extended freely without affecting the original.
//!
//! Independently authored fragments can be folded together with [`build`](crate::prelude::build)
//! (or the [`build!`] macro), which merges them with deterministic precedence rules.
//!
//! ```rust
//! use rel_query::prelude::*;
//!
//! let query = from("todos")
//!     .and_where([eq("completed", true)])
//!     .sort_asc(["id"])
//!     .limit(20);
//!
//! assert_eq!(
//!     query.to_string(),
//!     r#"From("todos").Where(completed = true).SortAsc("id").Limit(20)"#
//! );
//! ```
//!
//! The crate does not execute queries nor render SQL: it produces a finalized
//! [`Query`](crate::prelude::Query) value which is walked read-only by an adapter.

#![doc(html_playground_url = "https://play.rust-lang.org")]

mod error;
pub mod prelude;
pub mod query;
#[cfg(test)]
mod tests;
pub mod types;
pub mod value;

pub use self::error::{QueryError, QueryResult};
