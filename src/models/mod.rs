//! Domain models: patterns, matches, registry entries and query filters.

pub mod filter;
pub mod pattern;
pub mod registry_pattern;
