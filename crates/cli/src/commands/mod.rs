//! CLI command implementations.

pub mod check_api;
pub mod migrate;
