//! Mapping collected responses into the external analysis request.
//!
//! Each `(criterion, field)` pair is resolved through a framework-versioned
//! [`MappingTable`] to a dotted external path. Pairs without an entry are not
//! sent; the external contract is narrower than the internal schema. Values are
//! coerced by field type, and anything that coerces to absent is omitted from
//! the request rather than sent as `null`, `""` or `0`.
//!
//! ```
//! use esg_readiness::model::ResponseDraft;
//! use esg_readiness::normalize::{MappingSet, RequestNormalizer};
//! use esg_readiness::registry::SchemaRegistry;
//! use esg_readiness::session::AssessmentSession;
//!
//! let registry = SchemaRegistry::builtin().unwrap();
//! let mappings = MappingSet::builtin().unwrap();
//! let mut session = AssessmentSession::new(&registry, "iesg").unwrap();
//! session
//!     .advance(ResponseDraft::new().with_field("assessed_suppliers_pct", "abc".to_string()))
//!     .unwrap();
//!
//! let request = RequestNormalizer::for_session(&mappings, &session)
//!     .unwrap()
//!     .normalize(&session)
//!     .unwrap();
//! assert!(request.assessment.is_empty());
//! assert_eq!(request.stats.dropped_absent, 1);
//! ```

mod coerce;
mod mapping;
mod request;

pub use coerce::coerce;
pub use mapping::{MappingEntry, MappingSet, MappingTable};
pub use request::{insert_path, NormalizationStats, NormalizedRequest, RequestNormalizer};
