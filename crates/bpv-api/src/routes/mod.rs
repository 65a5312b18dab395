//! # API Route Modules
//!
//! - `validation`: `/user/validate` and `/product/validate`, one profile each.
//! - `profiles`: read-only introspection of the configured rule tables.

pub mod profiles;
pub mod validation;
