//! Structural checks applied when frameworks are loaded.

use crate::error::{AssessmentError, EntityKind, Result, SchemaErrorKind};
use crate::model::Framework;
use std::collections::HashSet;

/// Tolerance used when checking that sibling weights sum to 1.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Validate one framework definition.
///
/// Rejects duplicate ids, negative or non-finite weights and option-less
/// select/multiselect fields. Weight sets that do not sum to 1 only log a
/// warning; rollups normalize by the weights present.
pub fn validate_framework(framework: &Framework) -> Result<()> {
    let ctx = format!("framework '{}'", framework.id);

    let mut category_ids = HashSet::new();
    let mut criterion_ids = HashSet::new();

    for category in &framework.categories {
        if !category_ids.insert(category.id.as_str()) {
            return Err(duplicate(&ctx, EntityKind::Category, &category.id));
        }
        check_weight(&ctx, EntityKind::Category, &category.id, category.weight)?;

        for criterion in &category.criteria {
            // Criterion ids are unique across the whole framework so answer
            // sheets and mapping tables can address them without a category.
            if !criterion_ids.insert(criterion.id.as_str()) {
                return Err(duplicate(&ctx, EntityKind::Criterion, &criterion.id));
            }
            check_weight(&ctx, EntityKind::Criterion, &criterion.id, criterion.weight)?;

            let mut field_ids = HashSet::new();
            for field in &criterion.fields {
                if !field_ids.insert(field.id.as_str()) {
                    return Err(duplicate(&ctx, EntityKind::Field, &field.id));
                }
                if field.field_type.has_options() && field.options.is_empty() {
                    return Err(AssessmentError::schema(
                        ctx.clone(),
                        SchemaErrorKind::MissingOptions {
                            field: field.id.clone(),
                            field_type: field.field_type.to_string(),
                        },
                    ));
                }
            }
        }

        if !category.criteria.is_empty() {
            warn_on_weight_drift(
                &framework.id,
                &format!("criteria of category '{}'", category.id),
                category.weight_sum(),
            );
        }
    }

    if !framework.categories.is_empty() {
        warn_on_weight_drift(&framework.id, "categories", framework.weight_sum());
    }

    Ok(())
}

/// Validate a set of frameworks, including uniqueness of framework ids.
pub fn validate_frameworks(frameworks: &[Framework]) -> Result<()> {
    let mut ids = HashSet::new();
    for framework in frameworks {
        if !ids.insert(framework.id.as_str()) {
            return Err(duplicate("registry", EntityKind::Framework, &framework.id));
        }
        validate_framework(framework)?;
    }
    Ok(())
}

fn check_weight(ctx: &str, kind: EntityKind, id: &str, weight: f64) -> Result<()> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(AssessmentError::schema(
            ctx,
            SchemaErrorKind::InvalidWeight {
                kind,
                id: id.to_string(),
                weight,
            },
        ))
    }
}

fn duplicate(ctx: &str, kind: EntityKind, id: &str) -> AssessmentError {
    AssessmentError::schema(
        ctx,
        SchemaErrorKind::DuplicateId {
            kind,
            id: id.to_string(),
        },
    )
}

fn warn_on_weight_drift(framework_id: &str, what: &str, sum: f64) {
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        tracing::warn!(
            "Weights of {} in framework '{}' sum to {:.3}, not 1.0; scores will be normalized",
            what,
            framework_id,
            sum
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Criterion, Field, FieldType};

    fn field(id: &str, field_type: FieldType) -> Field {
        Field {
            id: id.to_string(),
            label: id.to_string(),
            field_type,
            required: false,
            options: Vec::new(),
            unit: None,
        }
    }

    fn framework(criteria: Vec<Criterion>) -> Framework {
        Framework {
            id: "fw".to_string(),
            name: "FW".to_string(),
            description: None,
            categories: vec![Category {
                id: "cat".to_string(),
                name: "Cat".to_string(),
                weight: 1.0,
                criteria,
            }],
        }
    }

    fn criterion(id: &str, weight: f64, fields: Vec<Field>) -> Criterion {
        Criterion {
            id: id.to_string(),
            title: id.to_string(),
            description: None,
            weight,
            fields,
        }
    }

    #[test]
    fn test_valid_framework_passes() {
        let fw = framework(vec![criterion("a", 1.0, vec![field("x", FieldType::Text)])]);
        assert!(validate_framework(&fw).is_ok());
    }

    #[test]
    fn test_weight_drift_is_tolerated() {
        let fw = framework(vec![criterion("a", 0.3, vec![]), criterion("b", 0.3, vec![])]);
        assert!(validate_framework(&fw).is_ok());
    }

    #[test]
    fn test_duplicate_criterion_rejected() {
        let fw = framework(vec![criterion("a", 0.5, vec![]), criterion("a", 0.5, vec![])]);
        match validate_framework(&fw) {
            Err(AssessmentError::Schema {
                source: SchemaErrorKind::DuplicateId { kind, id },
                ..
            }) => {
                assert_eq!(kind, EntityKind::Criterion);
                assert_eq!(id, "a");
            }
            other => panic!("Expected duplicate id error, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_and_nan_weights_rejected() {
        let fw = framework(vec![criterion("a", -0.1, vec![])]);
        assert!(validate_framework(&fw).is_err());
        let fw = framework(vec![criterion("a", f64::NAN, vec![])]);
        assert!(validate_framework(&fw).is_err());
    }

    #[test]
    fn test_select_without_options_rejected() {
        let fw = framework(vec![criterion("a", 1.0, vec![field("s", FieldType::Select)])]);
        assert!(matches!(
            validate_framework(&fw),
            Err(AssessmentError::Schema {
                source: SchemaErrorKind::MissingOptions { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_framework_ids() {
        let fw = framework(vec![]);
        assert!(validate_frameworks(&[fw.clone(), fw]).is_err());
    }
}
