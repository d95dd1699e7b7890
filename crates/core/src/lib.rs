//! Core domain logic for drillhole data validation.
//!
//! Pure functions over in-memory tables and rule sets. No I/O, no HTTP.

pub mod config_export;
pub mod config_lint;
pub mod defaults;
pub mod error;
pub mod library;
pub mod numeric;
pub mod row;
pub mod rules;
pub mod types;
pub mod validation;
