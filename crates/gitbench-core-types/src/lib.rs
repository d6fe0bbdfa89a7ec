//! Core types shared across gitbench facilities
//!
//! - **Correlation types**: RunId, used to tie every log event of a run together
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::RunId;
