//! Framework-versioned identifier mapping tables.

use crate::error::{
    AssessmentError, EntityKind, ErrorContext, MappingErrorKind, OptionContext, Result,
};
use crate::registry::BUILTIN_MAPPINGS_YAML;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Maps one `(criterion, field)` pair to a dotted external path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub criterion: String,
    pub field: String,
    /// Dotted path in the external request, e.g. `environmental.energy.monthly_electricity_spend_rm`
    pub path: String,
}

impl MappingEntry {
    /// Path split into its segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('.')
    }
}

/// Serialized form of a mapping table.
#[derive(Debug, Clone, Deserialize)]
struct RawMappingTable {
    framework: String,
    version: String,
    #[serde(default)]
    entries: Vec<MappingEntry>,
}

/// Validated lookup table for one framework version.
#[derive(Debug, Clone)]
pub struct MappingTable {
    framework: String,
    version: String,
    entries: Vec<MappingEntry>,
    index: HashMap<(String, String), usize>,
}

impl MappingTable {
    /// Build and validate a table.
    ///
    /// Rejects empty paths or path segments, duplicate `(criterion, field)` keys
    /// and paths where one is an ancestor of another (they cannot both be
    /// written into one nested object).
    pub fn new(
        framework: impl Into<String>,
        version: impl Into<String>,
        entries: Vec<MappingEntry>,
    ) -> Result<Self> {
        let framework = framework.into();
        let version = version.into();
        let ctx = format!("mapping table {framework}@{version}");

        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if entry.path.trim().is_empty() || entry.segments().any(|s| s.trim().is_empty()) {
                return Err(AssessmentError::mapping(
                    ctx,
                    MappingErrorKind::InvalidPath {
                        criterion: entry.criterion.clone(),
                        field: entry.field.clone(),
                        path: entry.path.clone(),
                    },
                ));
            }
            let key = (entry.criterion.clone(), entry.field.clone());
            if index.insert(key, i).is_some() {
                return Err(AssessmentError::mapping(
                    ctx,
                    MappingErrorKind::DuplicateKey {
                        criterion: entry.criterion.clone(),
                        field: entry.field.clone(),
                    },
                ));
            }
        }

        check_path_conflicts(&entries).context(ctx)?;

        Ok(Self {
            framework,
            version,
            entries,
            index,
        })
    }

    #[must_use]
    pub fn framework(&self) -> &str {
        &self.framework
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Resolve a `(criterion, field)` pair to its external path.
    #[must_use]
    pub fn resolve(&self, criterion_id: &str, field_id: &str) -> Option<&str> {
        self.index
            .get(&(criterion_id.to_string(), field_id.to_string()))
            .and_then(|&i| self.entries.get(i))
            .map(|e| e.path.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reject identical paths and paths nested under another mapped path.
fn check_path_conflicts(entries: &[MappingEntry]) -> Result<()> {
    let conflict = |path: &str, other: &str| {
        AssessmentError::mapping(
            "",
            MappingErrorKind::PathConflict {
                path: path.to_string(),
                other: other.to_string(),
            },
        )
    };

    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.path.as_str()) {
            return Err(conflict(&entry.path, &entry.path));
        }
    }

    for entry in entries {
        let ancestor = entry
            .path
            .match_indices('.')
            .map(|(i, _)| &entry.path[..i])
            .find(|prefix| seen.contains(prefix));
        if let Some(ancestor) = ancestor {
            return Err(conflict(&entry.path, ancestor));
        }
    }
    Ok(())
}

/// Serialized collection of mapping tables.
#[derive(Debug, Deserialize)]
struct MappingDocument {
    tables: Vec<RawMappingTable>,
}

/// Mapping tables keyed by framework id.
#[derive(Debug, Clone, Default)]
pub struct MappingSet {
    tables: IndexMap<String, MappingTable>,
}

impl MappingSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_MAPPINGS_YAML).context("loading built-in mapping tables")
    }

    /// Parse a `tables:` YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let doc: MappingDocument = serde_yaml::from_str(content).map_err(|e| {
            AssessmentError::mapping("parsing", MappingErrorKind::InvalidYaml(e.to_string()))
        })?;
        let mut set = Self::new();
        for raw in doc.tables {
            set.insert(MappingTable::new(raw.framework, raw.version, raw.entries)?);
        }
        Ok(set)
    }

    /// Load mapping tables from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| AssessmentError::io(path, e))?;
        Self::from_yaml_str(&content).with_context(|| format!("loading {}", path.display()))
    }

    /// Register a table, replacing any earlier table for the same framework.
    pub fn insert(&mut self, table: MappingTable) {
        if let Some(previous) = self.tables.insert(table.framework.clone(), table) {
            tracing::warn!(
                "Replacing mapping table {}@{}",
                previous.framework,
                previous.version
            );
        }
    }

    /// Table for a framework.
    pub fn table_for(&self, framework_id: &str) -> Result<&MappingTable> {
        self.tables
            .get(framework_id)
            .or_not_found(EntityKind::MappingTable, framework_id)
    }

    pub fn tables(&self) -> impl Iterator<Item = &MappingTable> {
        self.tables.values()
    }
}
