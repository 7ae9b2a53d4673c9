//! Read-only registry of framework definitions.
//!
//! A [`SchemaRegistry`] is built once from static configuration and passed
//! explicitly to every component that needs schema lookups. It carries no
//! mutable state, and frameworks are shared through [`Arc`] so sessions can
//! outlive a borrow of the registry.
//!
//! ```
//! use esg_readiness::registry::SchemaRegistry;
//!
//! let registry = SchemaRegistry::builtin().unwrap();
//! let criterion = registry
//!     .get_criterion("nsrf", "environmental", "energy-efficiency")
//!     .unwrap();
//! assert_eq!(criterion.title, "Energy Efficiency & Carbon Management");
//! ```

mod builtin;
mod validation;

pub use builtin::{BUILTIN_FRAMEWORKS_YAML, BUILTIN_FRAMEWORK_IDS, BUILTIN_MAPPINGS_YAML};
pub use validation::{validate_framework, validate_frameworks};

use crate::error::{AssessmentError, EntityKind, ErrorContext, OptionContext, Result};
use crate::model::{Criterion, Framework};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// On-disk document holding framework definitions.
#[derive(Debug, Deserialize)]
struct FrameworkDocument {
    frameworks: Vec<Framework>,
}

/// Read-only lookup of frameworks by id.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    frameworks: IndexMap<String, Arc<Framework>>,
}

impl SchemaRegistry {
    /// Build a registry from already-parsed frameworks, validating each.
    pub fn from_frameworks(frameworks: Vec<Framework>) -> Result<Self> {
        validate_frameworks(&frameworks)?;
        let frameworks = frameworks
            .into_iter()
            .map(|fw| (fw.id.clone(), Arc::new(fw)))
            .collect();
        Ok(Self { frameworks })
    }

    /// Registry containing the frameworks shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_FRAMEWORKS_YAML).context("loading built-in frameworks")
    }

    /// Parse a `frameworks:` YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let doc: FrameworkDocument = serde_yaml::from_str(content)?;
        Self::from_frameworks(doc.frameworks)
    }

    /// Parse a `{"frameworks": [...]}` JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let doc: FrameworkDocument = serde_json::from_str(content)?;
        Self::from_frameworks(doc.frameworks)
    }

    /// Load a registry file; `.json` files are parsed as JSON, anything else as YAML.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| AssessmentError::io(path, e))?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let registry = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        };
        let registry = registry.with_context(|| format!("loading {}", path.display()))?;
        tracing::debug!(
            "Loaded {} framework(s) from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Look up a framework.
    pub fn get_framework(&self, id: &str) -> Result<&Framework> {
        self.frameworks
            .get(id)
            .map(AsRef::as_ref)
            .or_not_found(EntityKind::Framework, id)
    }

    /// Shared handle to a framework, for sessions.
    pub fn framework_handle(&self, id: &str) -> Result<Arc<Framework>> {
        self.frameworks
            .get(id)
            .cloned()
            .or_not_found(EntityKind::Framework, id)
    }

    /// Look up a criterion by its full path.
    pub fn get_criterion(
        &self,
        framework_id: &str,
        category_id: &str,
        criterion_id: &str,
    ) -> Result<&Criterion> {
        self.get_framework(framework_id)?
            .category(category_id)
            .or_not_found(EntityKind::Category, category_id)?
            .criterion(criterion_id)
            .or_not_found(EntityKind::Criterion, criterion_id)
    }

    /// Frameworks in registration order.
    pub fn frameworks(&self) -> impl Iterator<Item = &Framework> {
        self.frameworks.values().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.frameworks.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frameworks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
    }
}
