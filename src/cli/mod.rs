//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod assess;
mod frameworks;
mod interpret;
mod request;
mod sources;
mod submit;

pub use assess::run_assess;
pub use frameworks::run_frameworks;
pub use interpret::run_interpret;
pub use request::run_request;
pub use sources::{load_mappings, load_registry, load_session};
pub use submit::run_submit;
