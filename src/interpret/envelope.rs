//! Transport envelope unwrapping.
//!
//! Service replies are sometimes wrapped by the transport:
//!
//! - gateway style: `{"statusCode": 200, "body": "<json string>"}` (or `body` as an object)
//! - processor style: `{"success": true, "data": {...}}`
//!
//! A processor envelope with `success: false` still carries degraded `data`;
//! that payload is kept and the reported error is returned as a notice.
//! Unwrapping is bounded so a self-similar payload cannot recurse forever.

use serde_json::{Map, Value};

/// Maximum number of envelopes removed before shape detection.
pub const MAX_ENVELOPE_DEPTH: usize = 3;

/// Payload left after unwrapping, with any failures the envelopes reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Unwrapped {
    pub payload: Value,
    pub notices: Vec<String>,
}

/// Remove up to `max_depth` envelopes.
///
/// Returns `Err` with a reason when an envelope reports failure without a
/// payload (non-2xx status, or `success: false` with no `data` object) or its
/// body is not valid JSON.
pub fn unwrap_envelopes(mut value: Value, max_depth: usize) -> Result<Unwrapped, String> {
    let mut notices = Vec::new();
    for depth in 0..max_depth {
        match unwrap_once(value, &mut notices)? {
            Step::Inner(inner) => {
                tracing::debug!("Removed response envelope at depth {}", depth + 1);
                value = inner;
            }
            Step::Done(payload) => return Ok(Unwrapped { payload, notices }),
        }
    }
    Ok(Unwrapped {
        payload: value,
        notices,
    })
}

enum Step {
    Inner(Value),
    Done(Value),
}

fn failure_reason(map: &Map<String, Value>) -> String {
    map.get("error")
        .or_else(|| map.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("service reported failure")
        .to_string()
}

fn unwrap_once(value: Value, notices: &mut Vec<String>) -> Result<Step, String> {
    let mut map = match value {
        Value::Object(map) => map,
        other => return Ok(Step::Done(other)),
    };

    if map.contains_key("statusCode") && map.contains_key("body") {
        if let Some(status) = map.get("statusCode").and_then(Value::as_u64) {
            if !(200..300).contains(&status) {
                return Err(format!("service returned status {status}"));
            }
        }
        return match map.remove("body") {
            Some(Value::String(body)) => serde_json::from_str(&body)
                .map(Step::Inner)
                .map_err(|e| format!("envelope body is not valid JSON: {e}")),
            Some(body) => Ok(Step::Inner(body)),
            None => Ok(Step::Done(Value::Object(map))),
        };
    }

    if let Some(success) = map.get("success").and_then(Value::as_bool) {
        if !success {
            let reason = failure_reason(&map);
            return match map.remove("data") {
                Some(data @ Value::Object(_)) => {
                    tracing::warn!("Service reported failure with degraded data: {}", reason);
                    notices.push(reason);
                    Ok(Step::Inner(data))
                }
                _ => Err(reason),
            };
        }
        if let Some(data) = map.remove("data") {
            return Ok(Step::Inner(data));
        }
    }

    Ok(Step::Done(Value::Object(map)))
}
