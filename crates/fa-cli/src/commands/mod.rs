//! CLI command implementations.

pub mod absent;
pub mod merge;
pub mod overtime;
pub mod roster;
pub mod scan;
