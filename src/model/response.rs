//! Collected answers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single collected value.
///
/// Multiselect answers are normally a [`FieldValue::List`], but a comma-joined
/// [`FieldValue::Text`] is accepted as well and split when normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Whether the value counts as answered.
    ///
    /// Booleans are always defined (false is a valid answer). Text must contain
    /// a non-whitespace character, numbers must be finite and lists non-empty.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        match self {
            Self::Bool(_) => true,
            Self::Number(n) => n.is_finite(),
            Self::Text(s) => !s.trim().is_empty(),
            Self::List(items) => items.iter().any(|s| !s.trim().is_empty()),
        }
    }

    /// Borrow the text content, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_string).collect())
    }
}

/// Field id to value, in entry order.
pub type FieldResponses = IndexMap<String, FieldValue>;

/// Answers for the current criterion, before validation and scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseDraft {
    #[serde(default)]
    pub field_responses: FieldResponses,
    #[serde(default)]
    pub notes: String,
}

impl ResponseDraft {
    /// Create an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value.
    #[must_use]
    pub fn with_field(mut self, field_id: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.field_responses.insert(field_id.into(), value.into());
        self
    }

    /// Set free-form notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// The recorded answer set and derived score for one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub criterion_id: String,
    pub field_responses: FieldResponses,
    #[serde(default)]
    pub notes: String,
    /// Fallback score (0-100) assigned when the criterion was submitted
    pub score: f64,
}

impl Response {
    /// Get the value for a field, if present.
    #[must_use]
    pub fn value(&self, field_id: &str) -> Option<&FieldValue> {
        self.field_responses.get(field_id)
    }
}
