//! Framework schema definitions.

use serde::{Deserialize, Serialize};

/// A named hierarchical compliance standard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Framework {
    /// Stable identifier (e.g. "nsrf")
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional long description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Categories in declaration order
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Framework {
    /// Look up a category by id.
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Look up a criterion by id anywhere in the framework.
    #[must_use]
    pub fn find_criterion(&self, criterion_id: &str) -> Option<(&Category, &Criterion)> {
        self.criteria().find(|(_, crit)| crit.id == criterion_id)
    }

    /// All criteria with their parent category, in traversal order.
    pub fn criteria(&self) -> impl Iterator<Item = (&Category, &Criterion)> {
        self.categories
            .iter()
            .flat_map(|cat| cat.criteria.iter().map(move |crit| (cat, crit)))
    }

    /// Total number of criteria across all categories.
    #[must_use]
    pub fn criterion_count(&self) -> usize {
        self.categories.iter().map(|c| c.criteria.len()).sum()
    }

    /// Sum of the authored category weights.
    #[must_use]
    pub fn weight_sum(&self) -> f64 {
        self.categories.iter().map(|c| c.weight).sum()
    }
}

/// A weighted topic within a framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Fractional contribution within the framework
    pub weight: f64,
    #[serde(default)]
    pub criteria: Vec<Criterion>,
}

impl Category {
    /// Look up a criterion by id.
    #[must_use]
    pub fn criterion(&self, id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.id == id)
    }

    /// Sum of the authored criterion weights.
    #[must_use]
    pub fn weight_sum(&self) -> f64 {
        self.criteria.iter().map(|c| c.weight).sum()
    }
}

/// A single assessable item within a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fractional contribution within the parent category
    pub weight: f64,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Criterion {
    /// Look up a field by id.
    #[must_use]
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Fields that must be answered before the criterion can be submitted.
    pub fn required_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Fields that may be left empty.
    pub fn optional_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.required)
    }
}

/// One atomic input collected for a criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    /// Allowed values for select/multiselect fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Display unit (e.g. "RM", "kWh")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Input type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Boolean,
    Select,
    Multiselect,
    Textarea,
}

impl FieldType {
    /// Lower-case name as written in schema files.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Select => "select",
            Self::Multiselect => "multiselect",
            Self::Textarea => "textarea",
        }
    }

    /// Whether the field draws its values from a declared option list.
    #[must_use]
    pub const fn has_options(&self) -> bool {
        matches!(self, Self::Select | Self::Multiselect)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Framework {
        serde_yaml::from_str(
            r"
id: demo
name: Demo
categories:
  - id: env
    name: Environmental
    weight: 0.6
    criteria:
      - id: energy
        title: Energy
        weight: 1.0
        fields:
          - { id: spend, label: Spend, type: number, required: true, unit: RM }
          - { id: audit, label: Audit, type: boolean }
  - id: gov
    name: Governance
    weight: 0.4
    criteria:
      - id: ethics
        title: Ethics
        weight: 0.5
      - id: risk
        title: Risk
        weight: 0.5
",
        )
        .unwrap()
    }

    #[test]
    fn test_traversal_order() {
        let fw = sample();
        let ids: Vec<_> = fw.criteria().map(|(_, c)| c.id.as_str()).collect();
        assert_eq!(ids, vec!["energy", "ethics", "risk"]);
        assert_eq!(fw.criterion_count(), 3);
    }

    #[test]
    fn test_lookups() {
        let fw = sample();
        let (cat, crit) = fw.find_criterion("risk").unwrap();
        assert_eq!(cat.id, "gov");
        assert_eq!(crit.title, "Risk");
        assert!(fw.category("social").is_none());

        let energy = fw.category("env").unwrap().criterion("energy").unwrap();
        assert_eq!(energy.required_fields().count(), 1);
        assert_eq!(energy.optional_fields().count(), 1);
        assert_eq!(energy.field("spend").unwrap().field_type, FieldType::Number);
    }

    #[test]
    fn test_weight_sum() {
        let fw = sample();
        assert!((fw.weight_sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_field_type_serde_name() {
        let json = serde_json::to_string(&FieldType::Multiselect).unwrap();
        assert_eq!(json, "\"multiselect\"");
        assert!(FieldType::Select.has_options());
        assert!(!FieldType::Textarea.has_options());
    }
}
