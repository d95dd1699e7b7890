//! Drillhole validation engine.
//!
//! Each submodule is one family of checks over `Row` slices. `engine`
//! sequences them per table type and `aggregator` collapses the raw
//! findings into the final [`report::ValidationSummary`].

pub mod aggregator;
pub mod depth;
pub mod engine;
pub mod geometry;
pub mod integrity;
pub mod report;
pub mod structure;
pub mod values;

pub use engine::validate_dataset;
pub use report::{CheckCategory, ErrorType, Severity, ValidationError, ValidationSummary};
