//! Entity schema for the HBNB store.
//!
//! The set of kinds is closed. Each kind declares default attributes whose
//! types drive value coercion on update; the defaults themselves are never
//! written into a record's attribute mapping.

mod field;
mod kind;

pub use field::{DefaultValue, FieldDef};
pub use kind::Kind;
