use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;

/// Coerces a result cell into a chart value.
///
/// Never fails: unparseable or non-finite input becomes `0.0`.
#[must_use]
pub fn cell_to_number(cell: &Value) -> f64 {
    let value = match cell {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => parse_numeric_text(text).unwrap_or(0.0),
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };
    if value.is_finite() { value } else { 0.0 }
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(decimal) = Decimal::from_str(trimmed) {
        return decimal.to_f64();
    }
    // Exponent notation and values outside the decimal range.
    trimmed.parse::<f64>().ok()
}

/// Interprets a result cell as unix seconds.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD HH:MM:SS[.f]`, `YYYY-MM-DDTHH:MM:SS[.f]`,
/// plain `YYYY-MM-DD` dates (midnight UTC) and finite JSON numbers.
#[must_use]
pub fn cell_to_timestamp(cell: &Value) -> Option<f64> {
    match cell {
        Value::Number(number) => number.as_f64().filter(|value| value.is_finite()),
        Value::String(text) => parse_timestamp_text(text.trim()),
        _ => None,
    }
}

fn parse_timestamp_text(text: &str) -> Option<f64> {
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(millis_to_seconds(time.timestamp_millis()));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(time) = NaiveDateTime::parse_from_str(text, format) {
            return Some(millis_to_seconds(time.and_utc().timestamp_millis()));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|time| millis_to_seconds(time.and_utc().timestamp_millis()))
}

fn millis_to_seconds(millis: i64) -> f64 {
    millis as f64 / 1000.0
}
