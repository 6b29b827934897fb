//! Numeric normalization of localized price tokens.
//!
//! Accepts `3,833 €`, `3.833€`, ` 3,833 ` and the like. Anything that does
//! not cleanly become a finite number inside `(0, upper_bound)` yields `None`;
//! a bad token is never an error, only a skipped value.

use log::debug;
use serde_json::Value;

use crate::config::CURRENCY_MARKER;

/// Parse a localized price token into EUR/kg rounded to three decimals.
///
/// The currency marker and all whitespace are removed and a decimal comma
/// becomes a dot. Tokens with more than one separator (thousands grouping
/// such as `1.234,56`) are rejected since the decimal point is ambiguous.
pub fn parse_price(token: &str, upper_bound: f64) -> Option<f64> {
    let cleaned: String = token
        .replace(CURRENCY_MARKER, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let separators = cleaned.chars().filter(|c| matches!(c, '.' | ',')).count();
    if separators > 1 {
        debug!("rejecting grouped numeric token {:?}", token);
        return None;
    }

    match cleaned.replace(',', ".").parse::<f64>() {
        Ok(value) => normalize_value(value, upper_bound),
        Err(_) => {
            debug!("rejecting non-numeric token {:?}", token);
            None
        }
    }
}

/// Range-check an already numeric price and round it for storage.
pub fn normalize_value(value: f64, upper_bound: f64) -> Option<f64> {
    if value.is_finite() && value > 0.0 && value < upper_bound {
        Some(round3(value))
    } else {
        debug!("rejecting out-of-range price {} (bound {})", value, upper_bound);
        None
    }
}

/// Normalize a raw JSON value, either a number or a localized string.
pub fn normalize_json(value: &Value, upper_bound: f64) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().and_then(|v| normalize_value(v, upper_bound)),
        Value::String(s) => parse_price(s, upper_bound),
        _ => None,
    }
}

pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
