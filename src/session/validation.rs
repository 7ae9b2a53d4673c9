//! Required-field validation.

use crate::error::{AssessmentError, Result};
use crate::model::{Criterion, FieldResponses};

/// Ids of required fields without a defined, non-empty value.
///
/// For boolean fields presence is enough; `false` is a valid answer.
#[must_use]
pub fn missing_required_fields(criterion: &Criterion, fields: &FieldResponses) -> Vec<String> {
    criterion
        .required_fields()
        .filter(|field| !fields.get(&field.id).is_some_and(|v| v.is_defined()))
        .map(|field| field.id.clone())
        .collect()
}

/// Check that every required field of the criterion is answered.
pub fn validate_response(criterion: &Criterion, fields: &FieldResponses) -> Result<()> {
    let missing = missing_required_fields(criterion, fields);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AssessmentError::incomplete(&criterion.id, missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, FieldType, FieldValue};

    fn criterion() -> Criterion {
        let field = |id: &str, field_type, required| Field {
            id: id.to_string(),
            label: id.to_string(),
            field_type,
            required,
            options: Vec::new(),
            unit: None,
        };
        Criterion {
            id: "energy".to_string(),
            title: "Energy".to_string(),
            description: None,
            weight: 1.0,
            fields: vec![
                field("spend", FieldType::Number, true),
                field("audited", FieldType::Boolean, true),
                field("notes", FieldType::Textarea, false),
            ],
        }
    }

    #[test]
    fn test_false_boolean_satisfies_required() {
        let mut fields = FieldResponses::new();
        fields.insert("spend".into(), FieldValue::Number(1200.0));
        fields.insert("audited".into(), FieldValue::Bool(false));
        assert!(validate_response(&criterion(), &fields).is_ok());
    }

    #[test]
    fn test_absent_boolean_is_missing() {
        let mut fields = FieldResponses::new();
        fields.insert("spend".into(), FieldValue::Number(1200.0));
        assert_eq!(missing_required_fields(&criterion(), &fields), vec!["audited"]);
    }

    #[test]
    fn test_empty_text_is_missing() {
        let mut fields = FieldResponses::new();
        fields.insert("spend".into(), FieldValue::Text(String::new()));
        fields.insert("audited".into(), FieldValue::Bool(true));
        match validate_response(&criterion(), &fields) {
            Err(AssessmentError::IncompleteResponse { criterion, missing }) => {
                assert_eq!(criterion, "energy");
                assert_eq!(missing, vec!["spend"]);
            }
            other => panic!("Expected IncompleteResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_optional_fields_ignored() {
        let missing = missing_required_fields(&criterion(), &FieldResponses::new());
        assert_eq!(missing, vec!["spend", "audited"]);
    }
}
