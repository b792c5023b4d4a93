//! Canonical hashing of session parameters.
//!
//! ```text
//! params_hash = hex(BLAKE3(JCS(params_json)))
//! ```
//!
//! Two parameter sets hash equal exactly when their JSON forms are equal,
//! independent of key order or whitespace.

use crate::error::SpecError;
use crate::params::SessionParameters;

/// Computes the canonical BLAKE3 hash of a parameter set.
///
/// # Example
/// ```
/// use entrain_spec::{canonical_params_hash, SessionParameters};
///
/// let hash = canonical_params_hash(&SessionParameters::default()).unwrap();
/// assert_eq!(hash.len(), 64);
/// ```
pub fn canonical_params_hash(params: &SessionParameters) -> Result<String, SpecError> {
    let value = serde_json::to_value(params)?;
    Ok(canonical_value_hash(&value))
}

/// Computes the BLAKE3 hash of a JSON value's canonical form.
pub fn canonical_value_hash(value: &serde_json::Value) -> String {
    let canonical = canonicalize_json(value);
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}

/// Canonicalizes a JSON value (sorted keys, no whitespace, minimal escaping).
pub fn canonicalize_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => format_number(n),
        serde_json::Value::String(s) => format_string(s),
        serde_json::Value::Array(items) => {
            let items: Vec<String> = items.iter().map(canonicalize_json).collect();
            format!("[{}]", items.join(","))
        }
        serde_json::Value::Object(obj) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let pairs: Vec<String> = entries
                .into_iter()
                .map(|(k, v)| format!("{}:{}", format_string(k), canonicalize_json(v)))
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => {
            if f == 0.0 {
                "0".to_string()
            } else if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", f as i64)
            } else {
                format!("{}", f)
            }
        }
        _ => "null".to_string(),
    }
}

fn format_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\x20' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_order_does_not_matter() {
        let a = json!({"b": 1, "a": [1.5, "x"]});
        let b = json!({"a": [1.5, "x"], "b": 1});
        assert_eq!(canonicalize_json(&a), r#"{"a":[1.5,"x"],"b":1}"#);
        assert_eq!(canonical_value_hash(&a), canonical_value_hash(&b));
    }

    #[test]
    fn test_integer_like_floats() {
        assert_eq!(canonicalize_json(&json!(210.0)), "210");
        assert_eq!(canonicalize_json(&json!(-0.0)), "0");
    }

    #[test]
    fn test_params_hash_changes_with_params() {
        let base = SessionParameters::default();
        let other = SessionParameters {
            freq_left: 200.0,
            ..Default::default()
        };
        let h1 = canonical_params_hash(&base).unwrap();
        let h2 = canonical_params_hash(&base).unwrap();
        let h3 = canonical_params_hash(&other).unwrap();
        assert_eq!(h1, h2);
        assert_ne!(h1, h3);
    }
}
