//! Canonical analysis result consumed by every display surface.

use crate::scoring::ComplianceBand;
use serde::{Deserialize, Serialize};

/// Prefix of the synthetic gap emitted when no analysis could be produced.
pub const UNAVAILABLE_GAP_PREFIX: &str = "Analysis unavailable";

/// Which decoder produced an [`AnalysisResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum ResponseShape {
    /// `{scoring: {overallScore, ...}, opportunities}`
    FlatScoring,
    /// `{NSRF: {scores: {...}}, iESG: {scores: {...}}}`
    PerFramework,
    /// `{report: {...}, baseline_checklist: {...}, gaps_detected}`
    Checklist,
    /// `{scores: {overall_score, ...}, recommendations, compliance_gaps}`
    ProcessorScores,
    /// Produced locally from fallback scores
    LocalFallback,
    /// Nothing usable was available
    Unavailable,
}

impl ResponseShape {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FlatScoring => "flat-scoring",
            Self::PerFramework => "per-framework",
            Self::Checklist => "checklist",
            Self::ProcessorScores => "processor-scores",
            Self::LocalFallback => "local-fallback",
            Self::Unavailable => "unavailable",
        }
    }
}

impl std::fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Recommendation priority.
///
/// Ordered so that sorting ascending puts the most urgent first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Parse a loosely written priority ("High", "critical", "LOW").
    ///
    /// Unknown labels default to medium.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" | "critical" | "urgent" => Self::High,
            "low" | "minor" => Self::Low,
            _ => Self::Medium,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An improvement suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    /// Category the recommendation addresses, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Recommendation {
    /// Create a medium-priority recommendation with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: Priority::Medium,
            timeframe: None,
            actions: Vec::new(),
            category: None,
        }
    }
}

/// A financing, grant or certification opportunity carried through from the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_value: Option<String>,
    /// Eligibility match percentage as reported by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility_match: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_url: Option<String>,
}

/// Score for one named category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub name: String,
    pub score: f64,
    pub band: ComplianceBand,
}

impl CategoryScore {
    /// Create a category score, banding it locally.
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
            band: ComplianceBand::from_score(score),
        }
    }
}

/// Canonical analysis result.
///
/// Always constructible: when nothing usable was produced, [`AnalysisResult::unavailable`]
/// yields a result with every score unset and exactly one synthetic gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct AnalysisResult {
    pub shape: ResponseShape,
    pub overall_score: Option<f64>,
    pub category_scores: Vec<CategoryScore>,
    /// Band recomputed locally from `overall_score`
    pub compliance_level: Option<ComplianceBand>,
    pub recommendations: Vec<Recommendation>,
    pub gaps: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opportunities: Vec<Opportunity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Label supplied by the service, kept for display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_level: Option<String>,
}

impl AnalysisResult {
    /// Create an empty result for the given shape.
    pub fn new(shape: ResponseShape) -> Self {
        Self {
            shape,
            overall_score: None,
            category_scores: Vec::new(),
            compliance_level: None,
            recommendations: Vec::new(),
            gaps: Vec::new(),
            opportunities: Vec::new(),
            summary: None,
            reported_level: None,
        }
    }

    /// Result with all scores unset and a single synthetic gap.
    pub fn unavailable(reason: &str) -> Self {
        let mut result = Self::new(ResponseShape::Unavailable);
        result.gaps.push(format!("{UNAVAILABLE_GAP_PREFIX}: {reason}"));
        result
    }

    /// Set the overall score and recompute the band from it.
    ///
    /// Non-finite scores leave the result unscored.
    pub fn with_overall_score(mut self, score: Option<f64>) -> Self {
        let score = score.filter(|s| s.is_finite());
        self.overall_score = score;
        self.compliance_level = score.map(ComplianceBand::from_score);
        self
    }

    /// Whether any numeric score is present.
    #[must_use]
    pub fn has_scores(&self) -> bool {
        self.overall_score.is_some() || !self.category_scores.is_empty()
    }

    /// Whether this result came from real analysis rather than the unavailable placeholder.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.shape != ResponseShape::Unavailable
    }

    /// Look up a category score by name (case-insensitive).
    #[must_use]
    pub fn category_score(&self, name: &str) -> Option<f64> {
        self.category_scores
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .map(|c| c.score)
    }

    /// Append a gap unless an identical entry exists.
    pub fn push_gap(&mut self, gap: impl Into<String>) {
        let gap = gap.into();
        if !self.gaps.contains(&gap) {
            self.gaps.push(gap);
        }
    }
}
