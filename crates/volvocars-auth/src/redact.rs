//! Masking of sensitive values before logging.
//!
//! Response bodies and request URLs are logged at debug level on every
//! call; these helpers make sure token material, identifiers and
//! coordinates never reach the log output.

use serde_json::Value;

/// Mask token substituted for redacted values.
pub const REDACTED: &str = "**REDACTED**";

/// Return a copy of `data` with the values of all `keys` masked.
///
/// Objects and arrays are walked recursively. Null and empty-string
/// values are left untouched. The input is never mutated.
pub fn redact_data(data: &Value, keys: &[&str]) -> Value {
    match data {
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, value) in map {
                let redacted = match value {
                    Value::Null => value.clone(),
                    Value::String(s) if s.is_empty() => value.clone(),
                    _ if keys.contains(&key.as_str()) => Value::String(REDACTED.to_string()),
                    Value::Object(_) | Value::Array(_) => redact_data(value, keys),
                    _ => value.clone(),
                };
                out.insert(key.clone(), redacted);
            }
            Value::Object(out)
        }
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| redact_data(item, keys)).collect())
        }
        _ => data.clone(),
    }
}

/// Replace every occurrence of `vin` in `url` with the mask token.
///
/// Returns the URL unchanged when `vin` is empty.
pub fn redact_url(url: &str, vin: &str) -> String {
    if vin.is_empty() {
        url.to_string()
    } else {
        url.replace(vin, REDACTED)
    }
}
