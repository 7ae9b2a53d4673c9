//! Building the nested external request from a session.

use super::coerce::coerce;
use super::mapping::{MappingSet, MappingTable};
use crate::error::{AssessmentError, MappingErrorKind, Result};
use crate::session::AssessmentSession;
use serde::Serialize;
use serde_json::{Map, Value};

/// Counters describing what happened to each collected value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationStats {
    /// Values written into the request
    pub mapped: usize,
    /// Values without a mapping entry
    pub dropped_unmapped: usize,
    /// Mapped values that coerced to absent
    pub dropped_absent: usize,
    /// Values for field ids the criterion does not declare
    pub dropped_unknown_field: usize,
}

impl NormalizationStats {
    /// Total number of values inspected.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.mapped + self.dropped_unmapped + self.dropped_absent + self.dropped_unknown_field
    }
}

/// Request ready for the external analysis service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRequest {
    pub framework: String,
    pub mapping_version: String,
    /// Nested object built from the mapped dotted paths
    pub assessment: Map<String, Value>,
    #[serde(skip)]
    pub stats: NormalizationStats,
}

impl NormalizedRequest {
    /// JSON body sent to the service.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "framework": self.framework,
            "mapping_version": self.mapping_version,
            "assessment": self.assessment,
        })
    }
}

/// Maps collected responses into the external request contract.
#[derive(Debug, Clone, Copy)]
pub struct RequestNormalizer<'a> {
    table: &'a MappingTable,
}

impl<'a> RequestNormalizer<'a> {
    /// Normalizer using one mapping table.
    #[must_use]
    pub const fn new(table: &'a MappingTable) -> Self {
        Self { table }
    }

    /// Normalizer using the table registered for the session's framework.
    pub fn for_session(mappings: &'a MappingSet, session: &AssessmentSession) -> Result<Self> {
        Ok(Self::new(mappings.table_for(session.framework_id())?))
    }

    /// Build the request for a session.
    ///
    /// Unmapped pairs are dropped with a debug log. Values that coerce to
    /// absent are omitted entirely.
    pub fn normalize(&self, session: &AssessmentSession) -> Result<NormalizedRequest> {
        if self.table.framework() != session.framework_id() {
            tracing::warn!(
                "Mapping table {}@{} applied to framework '{}'",
                self.table.framework(),
                self.table.version(),
                session.framework_id()
            );
        }

        let framework = session.framework();
        let mut assessment = Map::new();
        let mut stats = NormalizationStats::default();

        for response in session.responses() {
            let criterion = framework
                .find_criterion(&response.criterion_id)
                .map(|(_, c)| c);

            for (field_id, value) in &response.field_responses {
                let Some(field) = criterion.and_then(|c| c.field(field_id)) else {
                    tracing::debug!(
                        "Dropping value for undeclared field {}/{}",
                        response.criterion_id,
                        field_id
                    );
                    stats.dropped_unknown_field += 1;
                    continue;
                };

                let Some(path) = self.table.resolve(&response.criterion_id, field_id) else {
                    tracing::debug!(
                        "No external mapping for {}/{}; not sent",
                        response.criterion_id,
                        field_id
                    );
                    stats.dropped_unmapped += 1;
                    continue;
                };

                match coerce(field.field_type, value) {
                    Some(coerced) => {
                        insert_path(&mut assessment, path, coerced)?;
                        stats.mapped += 1;
                    }
                    None => {
                        tracing::debug!(
                            "Value for {}/{} is absent after {} coercion; omitted",
                            response.criterion_id,
                            field_id,
                            field.field_type
                        );
                        stats.dropped_absent += 1;
                    }
                }
            }
        }

        tracing::debug!(
            "Normalized {} of {} values for '{}' ({} unmapped, {} absent, {} unknown)",
            stats.mapped,
            stats.total(),
            session.framework_id(),
            stats.dropped_unmapped,
            stats.dropped_absent,
            stats.dropped_unknown_field
        );

        Ok(NormalizedRequest {
            framework: session.framework_id().to_string(),
            mapping_version: self.table.version().to_string(),
            assessment,
            stats,
        })
    }
}

/// Write `value` at a dotted path, creating intermediate objects.
pub fn insert_path(root: &mut Map<String, Value>, path: &str, value: Value) -> Result<()> {
    let conflict = || {
        AssessmentError::mapping(
            "building request",
            MappingErrorKind::PathConflict {
                path: path.to_string(),
                other: "an existing value".to_string(),
            },
        )
    };

    let mut segments = path.split('.').peekable();
    let mut current = root;
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            if current.contains_key(segment) {
                return Err(conflict());
            }
            current.insert(segment.to_string(), value);
            return Ok(());
        }
        let next = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        current = match next {
            Value::Object(map) => map,
            _ => return Err(conflict()),
        };
    }
    Ok(())
}
