//! Field value coercion into external JSON values.
//!
//! `None` means "absent": the key is omitted from the request entirely so the
//! external service's own defaulting applies. Absent is never encoded as
//! `null`, `""` or `0`.

use crate::model::{FieldType, FieldValue};
use serde_json::Value;

/// Coerce a collected value according to its schema type.
#[must_use]
pub fn coerce(field_type: FieldType, value: &FieldValue) -> Option<Value> {
    match field_type {
        FieldType::Boolean => coerce_bool(value),
        FieldType::Number => coerce_number(value),
        FieldType::Multiselect => coerce_multiselect(value),
        FieldType::Select | FieldType::Text | FieldType::Textarea => coerce_text(value),
    }
}

fn coerce_bool(value: &FieldValue) -> Option<Value> {
    match value {
        FieldValue::Bool(b) => Some(Value::Bool(*b)),
        FieldValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => Some(Value::Bool(true)),
            "false" | "no" => Some(Value::Bool(false)),
            _ => None,
        },
        FieldValue::Number(_) | FieldValue::List(_) => None,
    }
}

fn coerce_number(value: &FieldValue) -> Option<Value> {
    let n = match value {
        FieldValue::Number(n) => *n,
        FieldValue::Text(s) => s.trim().parse::<f64>().ok()?,
        FieldValue::Bool(_) | FieldValue::List(_) => return None,
    };
    number_value(n)
}

/// JSON number for a finite value; whole numbers are written without a fraction.
#[allow(clippy::cast_possible_truncation)]
fn number_value(n: f64) -> Option<Value> {
    if !n.is_finite() {
        return None;
    }
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        return Some(Value::from(n as i64));
    }
    serde_json::Number::from_f64(n).map(Value::Number)
}

fn coerce_multiselect(value: &FieldValue) -> Option<Value> {
    let raw: Vec<&str> = match value {
        FieldValue::List(items) => items.iter().map(String::as_str).collect(),
        FieldValue::Text(s) => s.split(',').collect(),
        FieldValue::Bool(_) | FieldValue::Number(_) => return None,
    };

    let mut selected: Vec<Value> = Vec::with_capacity(raw.len());
    for item in raw.into_iter().map(str::trim).filter(|s| !s.is_empty()) {
        let item = Value::String(item.to_string());
        if !selected.contains(&item) {
            selected.push(item);
        }
    }

    if selected.is_empty() {
        None
    } else {
        Some(Value::Array(selected))
    }
}

fn coerce_text(value: &FieldValue) -> Option<Value> {
    let text = match value {
        FieldValue::Text(s) => s.clone(),
        FieldValue::Number(n) if n.is_finite() => n.to_string(),
        FieldValue::Number(_) => return None,
        FieldValue::Bool(b) => b.to_string(),
        FieldValue::List(items) => items
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
    };
    if text.trim().is_empty() {
        None
    } else {
        Some(Value::String(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_parsing() {
        assert_eq!(coerce(FieldType::Number, &"1500".into()), Some(json!(1500)));
        assert_eq!(coerce(FieldType::Number, &" 12.5 ".into()), Some(json!(12.5)));
        assert_eq!(coerce(FieldType::Number, &FieldValue::Number(3.0)), Some(json!(3)));
    }

    #[test]
    fn test_non_numeric_is_absent_not_zero() {
        assert_eq!(coerce(FieldType::Number, &"abc".into()), None);
        assert_eq!(coerce(FieldType::Number, &"".into()), None);
        assert_eq!(coerce(FieldType::Number, &"NaN".into()), None);
        assert_eq!(coerce(FieldType::Number, &FieldValue::Bool(true)), None);
    }

    #[test]
    fn test_boolean_passthrough() {
        assert_eq!(coerce(FieldType::Boolean, &false.into()), Some(json!(false)));
        assert_eq!(coerce(FieldType::Boolean, &"Yes".into()), Some(json!(true)));
        assert_eq!(coerce(FieldType::Boolean, &"maybe".into()), None);
    }

    #[test]
    fn test_multiselect_split_and_trim() {
        assert_eq!(
            coerce(FieldType::Multiselect, &"Solar, Grid ,,Solar".into()),
            Some(json!(["Solar", "Grid"]))
        );
        assert_eq!(
            coerce(FieldType::Multiselect, &FieldValue::from(vec!["Paper", " Metal "])),
            Some(json!(["Paper", "Metal"]))
        );
        assert_eq!(coerce(FieldType::Multiselect, &" , ".into()), None);
    }

    #[test]
    fn test_text_passthrough_and_empty() {
        assert_eq!(coerce(FieldType::Select, &"GRI".into()), Some(json!("GRI")));
        assert_eq!(
            coerce(FieldType::Textarea, &"  keep spacing ".into()),
            Some(json!("  keep spacing "))
        );
        assert_eq!(coerce(FieldType::Text, &"".into()), None);
        assert_eq!(coerce(FieldType::Text, &"   ".into()), None);
        assert_eq!(coerce(FieldType::Text, &FieldValue::Number(42.0)), Some(json!("42")));
    }
}
