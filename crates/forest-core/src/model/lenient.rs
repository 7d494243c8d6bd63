//! Serde helpers for GIS exports whose columns arrive as strings or numbers
//! depending on which converter produced the JSON.

use serde::de::{Deserializer, Error};
use serde::Deserialize;
use serde_json::Value;

/// Any scalar as its string form; `null` and absent values become `None`.
pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Unsigned integer from a JSON number or a numeric string. `null` is 0.
pub fn int<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|v| v.fract() == 0.0 && *v >= 0.0).map(|v| v as u64))
            .ok_or_else(|| D::Error::custom(format!("expected an unsigned integer, got {n}"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected an unsigned integer, got {s:?}"))),
        other => Err(D::Error::custom(format!("expected an unsigned integer, got {other}"))),
    }
}

/// Float from a JSON number or a numeric string. `null` is 0.
pub fn float<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(0.0),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("expected a number, got {n}"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected a number, got {s:?}"))),
        other => Err(D::Error::custom(format!("expected a number, got {other}"))),
    }
}

/// Parse the leading decimal literal of `raw`, ignoring trailing junk
/// (`"1.5 mi"` is 1.5). Returns `None` when no digits lead the string.
pub fn leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut i = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut end = None;
    let (mut digits, mut dot, mut exp) = (false, false, false);

    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => {
                digits = true;
                i += 1;
                end = Some(i);
            }
            b'.' if !dot && !exp => {
                dot = true;
                i += 1;
                if digits {
                    end = Some(i);
                }
            }
            b'e' | b'E' if digits && !exp => {
                exp = true;
                i += 1;
                if matches!(bytes.get(i), Some(b'+' | b'-')) {
                    i += 1;
                }
            }
            _ => break,
        }
    }
    s[..end?].parse().ok()
}
