use serde::{Deserialize, Deserializer};

/// Case-insensitive substring test. Empty needles match everything, which is
/// what the filter no-op rule requires.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive equality for status/option matching.
pub fn eq_ci(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Coerce a loosely stored numeric value to f64.
///
/// Source documents hold numbers written straight from form inputs: real
/// numbers, numeric strings, empty strings, or junk. Everything unparseable
/// is 0 — the arithmetic downstream never errors on data shape.
pub fn lenient_f64(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Serde adapter over `lenient_f64` for `#[serde(deserialize_with)]`.
pub fn de_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(lenient_f64(&value))
}
