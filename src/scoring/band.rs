//! Compliance banding.

use serde::{Deserialize, Serialize};

/// Lower bound of the progressing band.
pub const PROGRESSING_THRESHOLD: f64 = 50.0;
/// Lower bound of the financing-ready band.
pub const FINANCING_READY_THRESHOLD: f64 = 75.0;

/// Readiness band derived from a numeric score.
///
/// Thresholds are inclusive at the lower bound of each band. The same rule is
/// applied to locally computed and externally supplied scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceBand {
    /// Below 50
    NeedsFoundation,
    /// 50 up to (excluding) 75
    Progressing,
    /// 75 and above
    FinancingReady,
}

impl ComplianceBand {
    /// Band a score.
    ///
    /// NaN never satisfies a lower bound and therefore lands in the lowest band.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= FINANCING_READY_THRESHOLD {
            Self::FinancingReady
        } else if score >= PROGRESSING_THRESHOLD {
            Self::Progressing
        } else {
            Self::NeedsFoundation
        }
    }

    /// Machine label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NeedsFoundation => "needs-foundation",
            Self::Progressing => "progressing",
            Self::FinancingReady => "financing-ready",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::NeedsFoundation => "Needs Foundation",
            Self::Progressing => "Progressing",
            Self::FinancingReady => "Financing Ready",
        }
    }
}

impl std::fmt::Display for ComplianceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
