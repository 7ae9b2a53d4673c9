//! Core data structures for frameworks, collected responses and analysis results.
//!
//! The schema types ([`Framework`], [`Category`], [`Criterion`], [`Field`]) are
//! static, read-only definitions. [`Response`] records what was collected for one
//! criterion, and [`AnalysisResult`] is the canonical display model every output
//! surface consumes, whether it came from the external service or the local
//! fallback scorer.

mod analysis;
mod response;
mod schema;

pub use analysis::*;
pub use response::*;
pub use schema::*;
