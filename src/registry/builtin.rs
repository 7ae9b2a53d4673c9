//! Framework definitions and mapping tables shipped with the crate.

/// Built-in framework definitions (YAML).
pub const BUILTIN_FRAMEWORKS_YAML: &str = include_str!("../../data/frameworks.yaml");

/// Built-in identifier mapping tables (YAML).
pub const BUILTIN_MAPPINGS_YAML: &str = include_str!("../../data/mappings.yaml");

/// Ids of the built-in frameworks.
pub const BUILTIN_FRAMEWORK_IDS: &[&str] = &["nsrf", "iesg"];
