//! This module exposes the data types which need a dedicated wire encoding when carried by a
//! [`crate::prelude::Value`].

mod decimal;
mod uuid;

pub use self::decimal::Decimal;
pub use self::uuid::Uuid;
