//! Client side of the external analysis service.
//!
//! The service is a black box: it accepts the normalized request and returns a
//! JSON body of unstable shape. The [`AnalysisService`] trait decouples
//! submission from transport so tests and disabled configurations can use
//! [`NoOpAnalysisService`] or their own stubs.
//!
//! The HTTP client is available with the `analysis` feature (enabled by default).

#[cfg(feature = "analysis")]
mod client;
mod traits;

#[cfg(feature = "analysis")]
pub use client::{AnalysisClientConfig, HttpAnalysisService};
pub use traits::{AnalysisService, NoOpAnalysisService};
