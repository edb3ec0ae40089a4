//! Rootly tool catalog and invocation
//!
//! Provides the fixed tool table, argument handling, and the upstream call behind `tools/call`.

pub mod catalog;
pub mod tools;
pub mod utils;
