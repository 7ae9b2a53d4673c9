//! Unified error types for esg-readiness.
//!
//! The taxonomy mirrors how the engine degrades: only [`AssessmentError::NotFound`]
//! is fatal. Every other variant has a defined degraded-but-functional path, either
//! a user prompt (incomplete responses), a navigation boundary, or a local fallback
//! result.

use std::path::PathBuf;
use thiserror::Error;

/// Kind of schema entity a lookup was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Framework,
    Category,
    Criterion,
    Field,
    MappingTable,
}

impl EntityKind {
    /// Lower-case name used in messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Framework => "framework",
            Self::Category => "category",
            Self::Criterion => "criterion",
            Self::Field => "field",
            Self::MappingTable => "mapping table",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Main error type for esg-readiness operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AssessmentError {
    /// Unknown framework/category/criterion id. Programmer error.
    #[error("Unknown {kind} '{id}'")]
    NotFound { kind: EntityKind, id: String },

    /// Required fields of the current criterion are missing or empty
    #[error("Incomplete response for criterion '{criterion}': missing {}", missing.join(", "))]
    IncompleteResponse {
        criterion: String,
        missing: Vec<String>,
    },

    /// `advance` called after the last criterion was submitted
    #[error("Assessment session is already complete")]
    SessionComplete,

    /// `retreat` called on the first criterion
    #[error("Already at the first criterion")]
    AtStart,

    /// The external analysis service could not be used
    #[error("External analysis unavailable: {context}")]
    ExternalUnavailable {
        context: String,
        #[source]
        source: ExternalErrorKind,
    },

    /// External payload matched none of the known response shapes
    #[error("Unrecognized analysis response shape: {0}")]
    UnrecognizedResponseShape(String),

    /// Framework schema could not be loaded or is malformed
    #[error("Invalid framework schema: {context}")]
    Schema {
        context: String,
        #[source]
        source: SchemaErrorKind,
    },

    /// Identifier mapping table could not be loaded or applied
    #[error("Invalid mapping table: {context}")]
    Mapping {
        context: String,
        #[source]
        source: MappingErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific external-service failure kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExternalErrorKind {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response body: {0}")]
    InvalidResponse(String),

    #[error("Analysis service disabled")]
    Disabled,

    #[error("Request cancelled")]
    Cancelled,
}

/// Specific schema error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SchemaErrorKind {
    #[error("Invalid YAML: {0}")]
    InvalidYaml(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId { kind: EntityKind, id: String },

    #[error("Invalid weight {weight} on {kind} '{id}'")]
    InvalidWeight {
        kind: EntityKind,
        id: String,
        weight: f64,
    },

    #[error("Field '{field}' of type {field_type} declares no options")]
    MissingOptions { field: String, field_type: String },
}

/// Specific mapping error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MappingErrorKind {
    #[error("Invalid YAML: {0}")]
    InvalidYaml(String),

    #[error("Empty or malformed external path '{path}' for {criterion}/{field}")]
    InvalidPath {
        criterion: String,
        field: String,
        path: String,
    },

    #[error("Duplicate mapping for {criterion}/{field}")]
    DuplicateKey { criterion: String, field: String },

    #[error("External path '{path}' conflicts with '{other}'")]
    PathConflict { path: String, other: String },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for esg-readiness operations
pub type Result<T> = std::result::Result<T, AssessmentError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl AssessmentError {
    /// Create a not-found error
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create an incomplete-response error
    pub fn incomplete(criterion: impl Into<String>, missing: Vec<String>) -> Self {
        Self::IncompleteResponse {
            criterion: criterion.into(),
            missing,
        }
    }

    /// Create an external-unavailable error with context
    pub fn external(context: impl Into<String>, source: ExternalErrorKind) -> Self {
        Self::ExternalUnavailable {
            context: context.into(),
            source,
        }
    }

    /// Create a schema error with context
    pub fn schema(context: impl Into<String>, source: SchemaErrorKind) -> Self {
        Self::Schema {
            context: context.into(),
            source,
        }
    }

    /// Create a mapping error with context
    pub fn mapping(context: impl Into<String>, source: MappingErrorKind) -> Self {
        Self::Mapping {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error should abort the caller.
    ///
    /// Only unknown ids are fatal; they indicate a schema/caller mismatch
    /// that no user action can repair.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Inverse of [`Self::is_fatal`].
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !self.is_fatal()
    }

    /// Navigation boundary conditions are not failures.
    #[must_use]
    pub const fn is_navigation_boundary(&self) -> bool {
        matches!(self, Self::SessionComplete | Self::AtStart)
    }

    /// Message suitable for showing to the person filling in the assessment.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::IncompleteResponse { missing, .. } => {
                format!("Please complete required fields: {}", missing.join(", "))
            }
            Self::SessionComplete => "This assessment has already been completed.".to_string(),
            Self::AtStart => "You are already at the first question.".to_string(),
            Self::ExternalUnavailable { .. } => {
                "Detailed analysis is unavailable right now; showing estimated scores.".to_string()
            }
            Self::UnrecognizedResponseShape(_) => {
                "Detailed analysis could not be read; showing estimated scores.".to_string()
            }
            other => other.to_string(),
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for AssessmentError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for AssessmentError {
    fn from(err: serde_json::Error) -> Self {
        Self::schema(
            "JSON deserialization",
            SchemaErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for AssessmentError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::schema(
            "YAML deserialization",
            SchemaErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context,
/// creating a chain such as `"loading registry: reading nsrf.yaml: ..."`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<AssessmentError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
///
/// Variants without a free-form context (ids, navigation) are returned unchanged.
fn add_context_to_error(err: AssessmentError, new_ctx: &str) -> AssessmentError {
    match err {
        AssessmentError::ExternalUnavailable {
            context: existing,
            source,
        } => AssessmentError::ExternalUnavailable {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AssessmentError::Schema {
            context: existing,
            source,
        } => AssessmentError::Schema {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AssessmentError::Mapping {
            context: existing,
            source,
        } => AssessmentError::Mapping {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AssessmentError::Io {
            path,
            message,
            source,
        } => AssessmentError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        AssessmentError::UnrecognizedResponseShape(msg) => {
            AssessmentError::UnrecognizedResponseShape(chain_context(new_ctx, &msg))
        }
        AssessmentError::Config(msg) => AssessmentError::Config(chain_context(new_ctx, &msg)),
        AssessmentError::Validation(msg) => {
            AssessmentError::Validation(chain_context(new_ctx, &msg))
        }
        other => other,
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to a not-found error for the given entity.
    fn or_not_found(self, kind: EntityKind, id: &str) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| AssessmentError::Validation(context.into()))
    }

    fn or_not_found(self, kind: EntityKind, id: &str) -> Result<T> {
        self.ok_or_else(|| AssessmentError::not_found(kind, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AssessmentError::not_found(EntityKind::Framework, "gri");
        assert_eq!(err.to_string(), "Unknown framework 'gri'");

        let err = AssessmentError::incomplete(
            "energy-efficiency",
            vec!["monthly_electricity_spend".to_string(), "has_energy_audit".to_string()],
        );
        let display = err.to_string();
        assert!(display.contains("energy-efficiency"), "{display}");
        assert!(display.contains("monthly_electricity_spend, has_energy_audit"), "{display}");
    }

    #[test]
    fn test_only_not_found_is_fatal() {
        assert!(AssessmentError::not_found(EntityKind::Criterion, "x").is_fatal());
        assert!(!AssessmentError::SessionComplete.is_fatal());
        assert!(!AssessmentError::AtStart.is_fatal());
        assert!(!AssessmentError::incomplete("c", vec![]).is_fatal());
        assert!(
            AssessmentError::external("submit", ExternalErrorKind::Disabled).is_recoverable()
        );
        assert!(AssessmentError::UnrecognizedResponseShape("x".into()).is_recoverable());
    }

    #[test]
    fn test_navigation_boundaries() {
        assert!(AssessmentError::AtStart.is_navigation_boundary());
        assert!(AssessmentError::SessionComplete.is_navigation_boundary());
        assert!(!AssessmentError::validation("x").is_navigation_boundary());
    }

    #[test]
    fn test_user_message_for_incomplete() {
        let err = AssessmentError::incomplete("c1", vec!["a".into(), "b".into()]);
        assert_eq!(err.user_message(), "Please complete required fields: a, b");
    }

    #[test]
    fn test_context_chaining() {
        let initial: Result<()> = Err(AssessmentError::schema(
            "initial context",
            SchemaErrorKind::InvalidYaml("bad".into()),
        ));

        match initial.context("outer context") {
            Err(AssessmentError::Schema { context, .. }) => {
                assert_eq!(context, "outer context: initial context");
            }
            _ => panic!("Expected Schema error"),
        }
    }

    #[test]
    fn test_context_leaves_id_errors_untouched() {
        let initial: Result<()> = Err(AssessmentError::not_found(EntityKind::Category, "social"));
        match initial.context("scoring") {
            Err(AssessmentError::NotFound { kind, id }) => {
                assert_eq!(kind, EntityKind::Category);
                assert_eq!(id, "social");
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(AssessmentError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_option_context() {
        let none_value: Option<i32> = None;
        match none_value.or_not_found(EntityKind::Field, "spend") {
            Err(AssessmentError::NotFound { kind, id }) => {
                assert_eq!(kind, EntityKind::Field);
                assert_eq!(id, "spend");
            }
            _ => panic!("Expected NotFound error"),
        }

        assert_eq!(Some(3).context_none("missing").unwrap(), 3);
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
