//! Tolerant field extraction from untyped service payloads.

use crate::model::{Opportunity, Priority, Recommendation};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Keys tried, in order, when reading the text of a gap or recommendation object.
const TEXT_KEYS: &[&str] = &[
    "title",
    "action",
    "improvement",
    "gap",
    "risk",
    "name",
    "description",
];

/// A score from a number or numeric string, clamped to 0-100.
#[must_use]
pub fn score_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then(|| n.clamp(0.0, 100.0))
}

/// First non-empty string under any of `keys`.
#[must_use]
pub fn first_str<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| map.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
}

/// Text of a list item: a string, or an object's first text-like key.
#[must_use]
pub fn item_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(map) => first_str(map, TEXT_KEYS).map(str::to_string),
        _ => None,
    }
}

/// All item texts of an array; anything else yields nothing.
#[must_use]
pub fn text_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(item_text).collect())
        .unwrap_or_default()
}

/// Priority from a label or a 1-based rank.
#[must_use]
pub fn priority_value(value: Option<&Value>) -> Priority {
    match value {
        Some(Value::String(s)) => Priority::parse(s),
        Some(Value::Number(n)) => match n.as_u64() {
            Some(0 | 1) => Priority::High,
            Some(2) => Priority::Medium,
            Some(_) => Priority::Low,
            None => Priority::Medium,
        },
        _ => Priority::Medium,
    }
}

/// A recommendation from a plain string or an object.
#[must_use]
pub fn recommendation(value: &Value) -> Option<Recommendation> {
    let map = match value {
        Value::String(_) => return item_text(value).map(Recommendation::titled),
        Value::Object(map) => map,
        _ => return None,
    };

    let title = first_str(map, TEXT_KEYS)?.to_string();
    let description = first_str(map, &["description", "details", "rationale"])
        .filter(|d| *d != title)
        .unwrap_or_default()
        .to_string();
    let actions = ["requiredActions", "actions", "steps"]
        .iter()
        .find_map(|k| map.get(*k).filter(|v| v.is_array()))
        .map(|v| text_list(Some(v)))
        .unwrap_or_default();

    Some(Recommendation {
        title,
        description,
        priority: priority_value(map.get("priority")),
        timeframe: first_str(map, &["timeframe", "timeline"]).map(str::to_string),
        actions,
        category: first_str(map, &["category", "type"]).map(str::to_string),
    })
}

/// All recommendations of an array.
#[must_use]
pub fn recommendation_list(value: Option<&Value>) -> Vec<Recommendation> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(recommendation).collect())
        .unwrap_or_default()
}

/// Opportunity as sent by the service, in camelCase or snake_case.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawOpportunity {
    id: Option<Value>,
    title: Option<String>,
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    provider: Option<String>,
    description: Option<String>,
    #[serde(alias = "estimated_value")]
    estimated_value: Option<String>,
    amount: Option<String>,
    #[serde(
        alias = "eligibility_match",
        alias = "eligibilityMatchScore",
        alias = "eligibility_match_score"
    )]
    eligibility_match: Option<Value>,
    deadline: Option<String>,
    #[serde(alias = "application_deadline")]
    application_deadline: Option<String>,
    requirements: Vec<Value>,
    #[serde(alias = "eligibility_requirements")]
    eligibility_requirements: Vec<Value>,
    #[serde(alias = "application_url")]
    application_url: Option<String>,
}

impl RawOpportunity {
    fn into_opportunity(self) -> Option<Opportunity> {
        let title = self.title.or(self.name).filter(|t| !t.trim().is_empty())?;
        let mut requirements = self.requirements;
        requirements.extend(self.eligibility_requirements);

        Some(Opportunity {
            id: self.id.and_then(|v| match v {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }),
            title,
            kind: self.kind,
            provider: self.provider,
            description: self.description,
            estimated_value: self.estimated_value.or(self.amount),
            eligibility_match: self.eligibility_match.as_ref().and_then(score_value),
            deadline: self.deadline.or(self.application_deadline),
            requirements: requirements.iter().filter_map(item_text).collect(),
            application_url: self.application_url,
        })
    }
}

/// All opportunities of an array; malformed entries are skipped.
#[must_use]
pub fn opportunity_list(value: Option<&Value>) -> Vec<Opportunity> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match RawOpportunity::deserialize(item) {
            Ok(raw) => raw.into_opportunity(),
            Err(e) => {
                tracing::debug!("Skipping malformed opportunity: {}", e);
                None
            }
        })
        .collect()
}

/// Display name for a payload key: `environmentalScore` -> `Environmental`,
/// `energy_management` -> `Energy Management`.
#[must_use]
pub fn humanize_key(key: &str) -> String {
    let key = key
        .strip_suffix("Score")
        .or_else(|| key.strip_suffix("_score"))
        .unwrap_or(key);

    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for ch in key.chars() {
        if ch == '_' || ch == '-' || ch == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
