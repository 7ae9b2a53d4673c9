//! Readiness scoring.
//!
//! Produces a deterministic, explainable fallback score usable before (or in
//! the absence of) the external service's own scoring, and the banding rule
//! applied uniformly to local and external scores.
//!
//! # Scoring
//!
//! - **Criterion**: `min(100, completion_rate * 80 + confidence_bonus)`, see [`fallback_score`]
//! - **Rollup**: `Σ(score * weight) / Σ(weight)` over present items, see [`rollup`]
//! - **Banding**: `< 50` needs-foundation, `[50, 75)` progressing, `>= 75` financing-ready
//!
//! # Usage
//!
//! ```
//! use esg_readiness::registry::SchemaRegistry;
//! use esg_readiness::scoring::ScoringEngine;
//! use esg_readiness::session::AssessmentSession;
//!
//! let registry = SchemaRegistry::builtin().unwrap();
//! let session = AssessmentSession::new(&registry, "iesg").unwrap();
//! let report = ScoringEngine::new().score_session(&session);
//! assert!(report.overall_score.is_none());
//! ```

mod band;
mod engine;
mod fallback;
mod local;
mod rollup;

pub use band::{ComplianceBand, FINANCING_READY_THRESHOLD, PROGRESSING_THRESHOLD};
pub use engine::{
    CategoryReport, CriterionScore, SCORING_ENGINE_VERSION, ScoreReport, ScoreSource,
    ScoringEngine,
};
pub use fallback::{
    COMPLETION_POINTS, MAX_CONFIDENCE_BONUS, combine, completion_rate, confidence_bonus,
    fallback_score,
};
pub use rollup::{mean, rollup};
